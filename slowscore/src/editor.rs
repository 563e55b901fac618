//! Editor window for one score

use crate::app::{report, Notice};
use egui::{Align2, Context, Key, Sense, Stroke, TextureHandle, TextureOptions};
use scorecore::dither::draw_window_shadow;
use scorecore::layout::CANVAS_SIZE;
use scorecore::theme::SlowColors;
use scorecore::widgets::{status_bar, DurationButton};
use scorecore::{EditingSession, NoteDuration, Settings, SlowTheme};

pub struct EditorWindow {
    session: EditingSession,
    pitch_input: String,
    /// Uploaded duration icons; empty when the session has none
    textures: Vec<(NoteDuration, TextureHandle)>,
    textures_loaded: bool,
    open: bool,
    show_close_confirm: bool,
}

impl EditorWindow {
    pub fn new(session: EditingSession) -> Self {
        Self {
            session,
            pitch_input: String::new(),
            textures: Vec::new(),
            textures_loaded: false,
            open: true,
            show_close_confirm: false,
        }
    }

    pub fn session(&self) -> &EditingSession {
        &self.session
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    fn load_textures(&mut self, ctx: &Context) {
        if self.textures_loaded {
            return;
        }
        self.textures_loaded = true;
        let Some(icons) = self.session.icons() else {
            return;
        };
        for (duration, image) in icons.iter() {
            let texture = ctx.load_texture(
                format!("duration_{}_{}", self.session.id(), duration.icon_file()),
                image.clone(),
                TextureOptions::LINEAR,
            );
            self.textures.push((*duration, texture));
        }
    }

    fn texture(&self, duration: NoteDuration) -> Option<&TextureHandle> {
        self.textures.iter().find(|(d, _)| *d == duration).map(|(_, t)| t)
    }

    fn request_close(&mut self) {
        if self.session.is_modified() {
            self.show_close_confirm = true;
        } else {
            self.open = false;
        }
    }

    fn add_note(&mut self, notices: &mut Vec<Notice>) {
        if let Err(err) = self.session.add_note(&self.pitch_input) {
            report(notices, &err);
        }
    }

    fn edit_note(&mut self, notices: &mut Vec<Notice>) {
        if let Err(err) = self.session.edit_note(&self.pitch_input) {
            report(notices, &err);
        }
    }

    fn save(&mut self, settings: &Settings, notices: &mut Vec<Notice>) -> bool {
        match self.session.save(settings) {
            Ok(path) => {
                notices.push(Notice::saved(&path));
                true
            }
            Err(err) => {
                report(notices, &err);
                false
            }
        }
    }

    /// Blocks until the viewer process exits.
    fn save_and_launch(&mut self, settings: &Settings, notices: &mut Vec<Notice>) {
        match self.session.save_and_launch(settings) {
            Ok(path) => notices.push(Notice::saved(&path)),
            Err(err) => report(notices, &err),
        }
    }

    fn render_durations(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("duration:");
            for duration in NoteDuration::ALL {
                let selected = self.session.highlighted() == Some(duration);
                let button = DurationButton::new(duration)
                    .selected(selected)
                    .icon(self.texture(duration));
                if ui.add(button).clicked() {
                    self.session.set_duration(duration);
                }
            }
        });
    }

    fn render_canvas(&mut self, ui: &mut egui::Ui) {
        let (rect, response) = ui.allocate_exact_size(CANVAS_SIZE, Sense::click());
        let font = SlowTheme::default().note_font();

        if ui.is_rect_visible(rect) {
            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, 0.0, SlowColors::WHITE);
            painter.rect_stroke(rect, 0.0, Stroke::new(1.0, SlowColors::BLACK));

            for (index, label) in self.session.labels().iter().enumerate() {
                let center = rect.min + label.center.to_vec2();
                let color = if self.session.is_selected(index) {
                    painter.rect_filled(label.rect.translate(rect.min.to_vec2()).expand(2.0), 0.0, SlowColors::BLACK);
                    SlowColors::WHITE
                } else {
                    SlowColors::BLACK
                };
                painter.text(center, Align2::CENTER_CENTER, &label.text, font.clone(), color);
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let local = pos - rect.min;
                self.session.select_note(local.x, local.y);
            }
        }
    }

    fn render_close_confirm(&mut self, ctx: &Context, settings: &Settings, notices: &mut Vec<Notice>) {
        let resp = egui::Window::new("unsaved changes")
            .id(egui::Id::new(("close_confirm", self.session.id())))
            .collapsible(false)
            .resizable(false)
            .default_width(300.0)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!("\"{}\" has unsaved notes.", self.session.title()));
                ui.label("do you want to save before closing?");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("don't save").clicked() {
                        self.show_close_confirm = false;
                        self.open = false;
                    }
                    if ui.button("cancel").clicked() {
                        self.show_close_confirm = false;
                    }
                    if ui.button("save").clicked() && self.save(settings, notices) {
                        self.show_close_confirm = false;
                        self.open = false;
                    }
                });
            });
        if let Some(r) = &resp {
            draw_window_shadow(ctx, r.response.rect);
        }
    }

    pub fn show(&mut self, ctx: &Context, settings: &Settings, notices: &mut Vec<Notice>) {
        self.load_textures(ctx);

        let mut window_open = true;
        let resp = egui::Window::new(format!("score — {}", self.session.title()))
            .id(egui::Id::new(("editor", self.session.id())))
            .open(&mut window_open)
            .collapsible(false)
            .default_width(CANVAS_SIZE.x + 20.0)
            .show(ctx, |ui| {
                ui.label(format!("title: {}", self.session.title()));
                ui.add_space(4.0);

                ui.label("note (e.g. C4, D4, E4):");
                let field = ui.add(egui::TextEdit::singleline(&mut self.pitch_input).desired_width(360.0));
                if field.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                    self.add_note(notices);
                    field.request_focus();
                }

                self.render_durations(ui);

                ui.horizontal(|ui| {
                    if ui.button("add note").clicked() {
                        self.add_note(notices);
                    }
                    if ui.button("edit note").clicked() {
                        self.edit_note(notices);
                    }
                    ui.separator();
                    if ui.button("save and open").clicked() {
                        self.save_and_launch(settings, notices);
                    }
                    if ui.button("save").clicked() {
                        self.save(settings, notices);
                    }
                    ui.separator();
                    if ui.button("close").clicked() {
                        self.request_close();
                    }
                });

                ui.add_space(4.0);
                self.render_canvas(ui);
                ui.add_space(4.0);

                let status = if self.session.status().is_empty() {
                    format!("{} notes", self.session.score().len())
                } else {
                    format!("{} | {} notes", self.session.status(), self.session.score().len())
                };
                status_bar(ui, &status);
            });
        if let Some(r) = &resp {
            draw_window_shadow(ctx, r.response.rect);
        }

        if !window_open {
            self.request_close();
        }
        if self.show_close_confirm {
            self.render_close_confirm(ctx, settings, notices);
        }
    }
}
