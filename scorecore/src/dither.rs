//! Checkerboard fills used in place of gray

use egui::{Color32, Painter, Pos2, Rect, Vec2};

/// Fill every `step`-th pixel of `rect` in a checkerboard.
pub fn draw_checker(painter: &Painter, rect: Rect, step: u32) {
    let step = step.max(1) as i32;
    let x0 = rect.min.x.ceil() as i32;
    let y0 = rect.min.y.ceil() as i32;
    let x1 = rect.max.x.floor() as i32;
    let y1 = rect.max.y.floor() as i32;
    let pixel = Vec2::splat(1.0);

    let mut y = y0;
    while y < y1 {
        let row = (y - y0) / step;
        let mut x = x0 + if row % 2 == 0 { 0 } else { step };
        while x < x1 {
            painter.rect_filled(Rect::from_min_size(Pos2::new(x as f32, y as f32), pixel), 0.0, Color32::BLACK);
            x += step * 2;
        }
        y += step;
    }
}

/// Hover feedback on buttons and labels.
pub fn draw_hover(painter: &Painter, rect: Rect) {
    draw_checker(painter, rect, 2);
}

/// Drop shadow for dialogs. Call after `Window::show` with its rect.
pub fn draw_window_shadow(ctx: &egui::Context, window_rect: Rect) {
    let shadow = window_rect.translate(Vec2::splat(4.0));
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::PanelResizeLine,
        egui::Id::new("dither_shadows"),
    ));
    draw_checker(&painter, shadow, 2);
}
