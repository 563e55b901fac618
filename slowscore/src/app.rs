//! Launcher window: title prompt, open editors and notices

use crate::editor::EditorWindow;
use egui::{Context, Key};
use scorecore::dither::draw_window_shadow;
use scorecore::theme::{menu_bar, SlowColors};
use scorecore::widgets::status_bar;
use scorecore::{Launcher, ScoreError, Settings};
use std::path::Path;

/// A message box waiting to be dismissed.
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn from_error(err: &ScoreError) -> Self {
        Self {
            title: err.title().to_string(),
            message: err.to_string(),
        }
    }

    pub fn saved(path: &Path) -> Self {
        Self {
            title: "saved".into(),
            message: format!("score saved to {}", path.display()),
        }
    }
}

/// Log an operation failure and queue it for display.
pub fn report(notices: &mut Vec<Notice>, err: &ScoreError) {
    match err {
        ScoreError::EmptyInput | ScoreError::InvalidPitch(_) | ScoreError::NoSelection => {
            log::warn!("{err}")
        }
        _ if err.is_fatal() => log::error!("editor could not start: {err}"),
        _ => log::error!("{err}"),
    }
    notices.push(Notice::from_error(err));
}

pub struct ScoreApp {
    settings: Settings,
    launcher: Launcher,
    editors: Vec<EditorWindow>,
    /// Text of the title prompt while it is open
    title_prompt: Option<String>,
    notices: Vec<Notice>,
    show_about: bool,
}

impl ScoreApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        Self {
            settings,
            launcher: Launcher::new(),
            editors: Vec::new(),
            title_prompt: None,
            notices: Vec::new(),
            show_about: false,
        }
    }

    /// Create an editor for the prompt result. `None` is a cancelled prompt.
    pub fn open_score(&mut self, title: Option<&str>) {
        match self.launcher.open_session(title, &self.settings) {
            Ok(session) => self.editors.push(EditorWindow::new(session)),
            Err(ScoreError::EmptyInput) => {
                log::warn!("score not created: no title");
                self.notices.push(Notice {
                    title: "input error".into(),
                    message: "please enter a title for the score.".into(),
                });
            }
            Err(err) => report(&mut self.notices, &err),
        }
    }

    fn handle_keys(&mut self, ctx: &Context) {
        let new_score = ctx.input(|i| i.modifiers.command && i.key_pressed(Key::N));
        if new_score && self.title_prompt.is_none() {
            self.title_prompt = Some(String::new());
        }
    }

    fn render_home(&mut self, ctx: &Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(SlowColors::WHITE).inner_margin(egui::Margin::same(24.0)))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(16.0);
                    ui.heading("score editor");
                    ui.add_space(16.0);
                    if ui.button("new score").clicked() {
                        self.title_prompt = Some(String::new());
                    }
                    ui.add_space(8.0);
                    if ui.button("quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
    }

    fn render_title_prompt(&mut self, ctx: &Context) {
        let Some(text) = self.title_prompt.as_mut() else {
            return;
        };
        let mut decision: Option<Option<String>> = None;

        let resp = egui::Window::new("score title")
            .collapsible(false)
            .resizable(false)
            .default_width(300.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("enter a title for the score:");
                let field = ui.text_edit_singleline(text);
                field.request_focus();
                let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("cancel").clicked() {
                        decision = Some(None);
                    }
                    if ui.button("ok").clicked() || submitted {
                        decision = Some(Some(text.clone()));
                    }
                });
            });
        if let Some(r) = &resp {
            draw_window_shadow(ctx, r.response.rect);
        }

        if let Some(result) = decision {
            self.title_prompt = None;
            self.open_score(result.as_deref());
        }
    }

    fn render_notice(&mut self, ctx: &Context) {
        let Some(notice) = self.notices.first() else {
            return;
        };
        let mut dismissed = false;
        let resp = egui::Window::new(notice.title.as_str())
            .id(egui::Id::new("notice"))
            .collapsible(false)
            .resizable(false)
            .default_width(320.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.label(notice.message.as_str());
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("ok").clicked() {
                        dismissed = true;
                    }
                });
            });
        if let Some(r) = &resp {
            draw_window_shadow(ctx, r.response.rect);
        }
        if dismissed {
            self.notices.remove(0);
        }
    }

    fn render_about(&mut self, ctx: &Context) {
        let resp = egui::Window::new("about slowScore")
            .collapsible(false)
            .resizable(false)
            .default_width(300.0)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("slowScore");
                    ui.label(format!("version {}", env!("CARGO_PKG_VERSION")));
                    ui.add_space(8.0);
                    ui.label("note entry for slowOS");
                });
                ui.add_space(8.0);
                ui.separator();
                ui.label("saves to:");
                ui.label(format!("  {}", self.settings.output_dir.display()));
                ui.label("opens with:");
                ui.label(format!("  {}", self.settings.viewer_path.display()));
                ui.label("settings file:");
                ui.label(format!("  {}", Settings::config_path().display()));
                ui.add_space(4.0);
                ui.label("frameworks:");
                ui.label("  egui/eframe (MIT), simple_xml_builder (MIT)");
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("ok").clicked() {
                        self.show_about = false;
                    }
                });
            });
        if let Some(r) = &resp {
            draw_window_shadow(ctx, r.response.rect);
        }
    }
}

impl eframe::App for ScoreApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            menu_bar(ui, |ui| {
                ui.menu_button("file", |ui| {
                    if ui.button("new score   ⌘N").clicked() {
                        self.title_prompt = Some(String::new());
                        ui.close_menu();
                    }
                    if ui.button("quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        ui.close_menu();
                    }
                });
                ui.menu_button("help", |ui| {
                    if ui.button("about").clicked() {
                        self.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let unsaved = self.editors.iter().filter(|e| e.session().is_modified()).count();
            let status = format!("{} open | {} unsaved", self.editors.len(), unsaved);
            status_bar(ui, &status);
        });

        self.render_home(ctx);

        for editor in &mut self.editors {
            editor.show(ctx, &self.settings, &mut self.notices);
        }
        self.editors.retain(|editor| {
            if !editor.is_open() {
                log::info!("closed score {:?}", editor.session().title());
            }
            editor.is_open()
        });

        self.render_title_prompt(ctx);

        if self.show_about {
            self.render_about(ctx);
        }

        self.render_notice(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_report_queues_one_notice() {
        let mut notices = Vec::new();
        let err = ScoreError::ImageAssetLoad {
            path: PathBuf::from("/icons/quarter.png"),
            reason: "missing".into(),
        };
        report(&mut notices, &err);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, err.title());
    }

    #[test]
    fn test_saved_notice_names_the_file() {
        let notice = Notice::saved(Path::new("/scores/Test.musicxml"));
        assert_eq!(notice.title, "saved");
        assert!(notice.message.ends_with("/scores/Test.musicxml"));
    }
}
