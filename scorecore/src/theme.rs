//! slowScore theme — black on white, 1px outlines, no rounding

use egui::{Color32, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

/// Only two colors exist on this machine.
pub struct SlowColors;

impl SlowColors {
    pub const WHITE: Color32 = Color32::from_rgb(255, 255, 255);
    pub const BLACK: Color32 = Color32::from_rgb(0, 0, 0);
}

/// Font sizes and spacing for slowScore windows.
pub struct SlowTheme {
    pub body_size: f32,
    pub heading_size: f32,
    /// Note names drawn on the canvas
    pub note_size: f32,
    pub spacing: f32,
}

impl Default for SlowTheme {
    fn default() -> Self {
        Self {
            body_size: 14.0,
            heading_size: 18.0,
            note_size: 14.0,
            spacing: 4.0,
        }
    }
}

impl SlowTheme {
    pub fn note_font(&self) -> FontId {
        FontId::proportional(self.note_size)
    }

    fn text_size(&self, style: &TextStyle) -> f32 {
        match style {
            TextStyle::Heading => self.heading_size,
            TextStyle::Small => self.body_size * 0.8,
            _ => self.body_size,
        }
    }

    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();
        for (text_style, font) in style.text_styles.iter_mut() {
            font.size = self.text_size(text_style);
        }

        let outline = Stroke::new(1.0, SlowColors::BLACK);
        let mut visuals = Visuals::light();
        visuals.window_fill = SlowColors::WHITE;
        visuals.panel_fill = SlowColors::WHITE;
        visuals.extreme_bg_color = SlowColors::WHITE;
        visuals.window_stroke = outline;
        visuals.window_rounding = Rounding::ZERO;
        visuals.menu_rounding = Rounding::ZERO;
        // shadows are dithered by hand
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        let widgets = &mut visuals.widgets;
        for state in [
            &mut widgets.noninteractive,
            &mut widgets.inactive,
            &mut widgets.hovered,
            &mut widgets.active,
            &mut widgets.open,
        ] {
            state.bg_fill = SlowColors::WHITE;
            state.weak_bg_fill = SlowColors::WHITE;
            state.bg_stroke = outline;
            state.fg_stroke = outline;
            state.rounding = Rounding::ZERO;
        }
        visuals.selection.bg_fill = Color32::GRAY;
        visuals.selection.stroke = outline;

        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(self.spacing, self.spacing);
        ctx.set_style(style);
    }
}

/// Menu bar styling helper
pub fn menu_bar<R>(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> egui::InnerResponse<R> {
    let frame_resp = egui::Frame::none()
        .fill(SlowColors::WHITE)
        .stroke(Stroke::new(1.0, SlowColors::BLACK))
        .inner_margin(egui::Margin::symmetric(4.0, 2.0))
        .show(ui, |ui| ui.horizontal(add_contents).inner);
    egui::InnerResponse {
        inner: frame_resp.inner,
        response: frame_resp.response,
    }
}
