//! Custom widgets — pure black and white

use crate::dither;
use crate::duration::NoteDuration;
use crate::theme::SlowColors;
use egui::{Color32, Painter, Pos2, Rect, Response, Sense, Stroke, TextureHandle, Ui, Vec2, Widget};

/// Status bar: white bg, 1px black top border
pub fn status_bar(ui: &mut Ui, text: &str) {
    egui::Frame::none()
        .fill(SlowColors::WHITE)
        .stroke(Stroke::new(1.0, SlowColors::BLACK))
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(text);
        });
}

/// Draw a note symbol for `duration` centered in `rect`.
pub fn draw_note_glyph(painter: &Painter, rect: Rect, duration: NoteDuration, color: Color32) {
    let stroke = Stroke::new(1.5, color);
    let radius = rect.height() * 0.12;
    let head = Pos2::new(rect.center().x - radius, rect.center().y + rect.height() * 0.2);

    let hollow = matches!(
        duration,
        NoteDuration::Whole | NoteDuration::DottedHalf | NoteDuration::Half
    );
    if hollow {
        painter.circle_stroke(head, radius, stroke);
    } else {
        painter.circle_filled(head, radius, color);
    }

    if duration != NoteDuration::Whole {
        let stem_x = head.x + radius;
        let stem_top = Pos2::new(stem_x, head.y - rect.height() * 0.5);
        painter.line_segment([Pos2::new(stem_x, head.y), stem_top], stroke);
        if duration == NoteDuration::Eighth {
            painter.line_segment(
                [stem_top, stem_top + Vec2::new(radius * 1.5, radius * 2.0)],
                stroke,
            );
        }
    }

    if duration.dots() > 0 {
        painter.circle_filled(Pos2::new(head.x + radius * 2.2, head.y), 1.5, color);
    }
}

/// Duration selector button. Shows the loaded icon if there is one,
/// otherwise a drawn glyph. The active duration is drawn inverted.
pub struct DurationButton<'a> {
    duration: NoteDuration,
    selected: bool,
    icon: Option<&'a TextureHandle>,
}

impl<'a> DurationButton<'a> {
    pub fn new(duration: NoteDuration) -> Self {
        Self {
            duration,
            selected: false,
            icon: None,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn icon(mut self, icon: Option<&'a TextureHandle>) -> Self {
        self.icon = icon;
        self
    }
}

impl<'a> Widget for DurationButton<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(50.0), Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let (bg, fg) = if self.selected {
                (SlowColors::BLACK, SlowColors::WHITE)
            } else {
                (SlowColors::WHITE, SlowColors::BLACK)
            };
            painter.rect_filled(rect, 0.0, bg);

            match self.icon {
                Some(texture) => {
                    let inner = rect.shrink(if self.selected { 3.0 } else { 0.0 });
                    let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                    painter.image(texture.id(), inner, uv, Color32::WHITE);
                }
                None => draw_note_glyph(painter, rect, self.duration, fg),
            }

            let outline = if self.selected { 2.0 } else { 1.0 };
            painter.rect_stroke(rect, 0.0, Stroke::new(outline, SlowColors::BLACK));
            if response.hovered() && !self.selected {
                dither::draw_hover(painter, rect);
            }
        }

        response.on_hover_text(self.duration.label())
    }
}
