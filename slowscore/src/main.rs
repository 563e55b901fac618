//! slowScore — type note names, see them on a staff line, open them in a notation editor

mod app;
mod editor;

use app::ScoreApp;
use scorecore::{Settings, SlowTheme};

fn main() -> eframe::Result<()> {
    env_logger::init();

    let settings = Settings::load();
    log::debug!("settings: {:?}", settings);
    let initial_title = std::env::args().nth(1);

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([880.0, 640.0])
        .with_min_inner_size([600.0, 420.0])
        .with_title("slowScore");

    if let Some(pos) = scorecore::cascade_position() {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "slowScore",
        options,
        Box::new(move |cc| {
            SlowTheme::default().apply(&cc.egui_ctx);
            let mut app = ScoreApp::new(cc, settings);
            if let Some(title) = initial_title {
                app.open_score(Some(&title));
            }
            Ok(Box::new(app))
        }),
    )
}
