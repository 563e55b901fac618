//! scorecore — score model, MusicXML export and shared widgets for slowScore

pub mod assets;
pub mod config;
pub mod dither;
pub mod duration;
pub mod error;
pub mod launcher;
pub mod layout;
pub mod musicxml;
pub mod pitch;
pub mod score;
pub mod session;
pub mod theme;
pub mod viewer;
pub mod widgets;

pub use config::Settings;
pub use duration::NoteDuration;
pub use error::{Result, ScoreError};
pub use launcher::Launcher;
pub use session::EditingSession;
pub use theme::SlowTheme;

/// Initial window position when the desktop staggers several instances
/// (`SLOWOS_CASCADE=n` shifts the window by 30px per step).
pub fn cascade_position() -> Option<egui::Pos2> {
    std::env::var("SLOWOS_CASCADE").ok()
        .and_then(|s| s.parse::<u32>().ok())
        .map(|n| {
            let offset = (n as f32) * 30.0;
            egui::Pos2::new(100.0 + offset, 100.0 + offset)
        })
}
