//! Title prompt handling and session creation

use crate::assets::DurationIcons;
use crate::config::Settings;
use crate::error::{Result, ScoreError};
use crate::session::EditingSession;

/// Check the title prompt result. `None` means the prompt was cancelled.
pub fn validate_title(input: Option<&str>) -> Result<String> {
    let title = input.map(str::trim).unwrap_or_default();
    if title.is_empty() {
        return Err(ScoreError::EmptyInput);
    }
    Ok(title.to_string())
}

/// File name stem for a title. Path separators and characters that are
/// reserved on common filesystems become `_`.
pub fn file_stem(title: &str) -> String {
    title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Hands out sessions with unique ids.
#[derive(Default)]
pub struct Launcher {
    next_id: u64,
}

impl Launcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the title and build a session for it.
    ///
    /// Icons are loaded when `settings.icon_dir` is set; failing to load them
    /// aborts the session.
    pub fn open_session(&mut self, input: Option<&str>, settings: &Settings) -> Result<EditingSession> {
        let title = validate_title(input)?;
        let icons = match &settings.icon_dir {
            Some(dir) => Some(DurationIcons::load(dir)?),
            None => None,
        };
        self.next_id += 1;
        log::info!("opening score {:?} (session {})", title, self.next_id);
        Ok(EditingSession::new(self.next_id, title, icons))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn settings() -> Settings {
        Settings {
            output_dir: PathBuf::from("/tmp"),
            viewer_path: PathBuf::from("/bin/true"),
            icon_dir: None,
        }
    }

    #[test]
    fn test_validate_title() {
        assert_eq!(validate_title(Some("  Etude ")).unwrap(), "Etude");
        assert!(matches!(validate_title(Some("")), Err(ScoreError::EmptyInput)));
        assert!(matches!(validate_title(Some(" \t")), Err(ScoreError::EmptyInput)));
        assert!(matches!(validate_title(None), Err(ScoreError::EmptyInput)));
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("Test"), "Test");
        assert_eq!(file_stem("a/b\\c"), "a_b_c");
        assert_eq!(file_stem("why? <now>"), "why_ _now_");
        assert_eq!(file_stem("악보"), "악보");
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        let mut launcher = Launcher::new();
        let a = launcher.open_session(Some("one"), &settings()).unwrap();
        let b = launcher.open_session(Some("two"), &settings()).unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(b.title(), "two");
        assert!(b.score().is_empty());
    }

    #[test]
    fn test_empty_title_creates_nothing() {
        let mut launcher = Launcher::new();
        assert!(launcher.open_session(Some(""), &settings()).is_err());
        let first = launcher.open_session(Some("x"), &settings()).unwrap();
        assert_eq!(first.id(), 1);
    }

    #[test]
    fn test_bad_icon_dir_aborts_session() {
        let mut launcher = Launcher::new();
        let mut settings = settings();
        settings.icon_dir = Some(PathBuf::from("/no/such/icons"));
        let err = launcher.open_session(Some("x"), &settings).err().unwrap();
        assert!(matches!(err, ScoreError::ImageAssetLoad { .. }));
    }
}
