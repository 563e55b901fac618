//! Persisted settings: where scores go and which program opens them

use crate::error::{Result, ScoreError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "slowscore";

/// Config directory for slowScore
pub fn config_dir() -> PathBuf {
    directories::ProjectDirs::from("co", "slowcomputer", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the documents directory
pub fn documents_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.document_dir().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(target_os = "windows")]
fn default_viewer() -> PathBuf {
    PathBuf::from(r"C:\Program Files\MuseScore 4\bin\MuseScore4.exe")
}

#[cfg(target_os = "macos")]
fn default_viewer() -> PathBuf {
    PathBuf::from("/Applications/MuseScore 4.app/Contents/MacOS/mscore")
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn default_viewer() -> PathBuf {
    PathBuf::from("/usr/bin/mscore4portable")
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Folder that receives `{title}.musicxml`; created on first save
    pub output_dir: PathBuf,
    /// Notation editor launched with the saved file
    pub viewer_path: PathBuf,
    /// Folder holding the duration icons. Glyphs are drawn when unset.
    #[serde(default)]
    pub icon_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: documents_dir().join("Scores"),
            viewer_path: default_viewer(),
            icon_dir: None,
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        config_dir().join("settings.json")
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                log::debug!("no settings at {} ({e}), using defaults", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("ignoring malformed settings {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| ScoreError::Settings(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ScoreError::Settings(e.to_string()))?;
        }
        std::fs::write(path, json).map_err(|e| ScoreError::Settings(e.to_string()))
    }

    /// Destination of a score with the given title.
    pub fn score_path(&self, title: &str) -> PathBuf {
        self.output_dir.join(format!(
            "{}.{}",
            crate::launcher::file_stem(title),
            crate::musicxml::EXTENSION
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("scorecore-config-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_score_path() {
        let settings = Settings {
            output_dir: PathBuf::from("/scores"),
            viewer_path: PathBuf::from("/bin/viewer"),
            icon_dir: None,
        };
        assert_eq!(settings.score_path("Test"), PathBuf::from("/scores/Test.musicxml"));
        assert_eq!(settings.score_path("a/b"), PathBuf::from("/scores/a_b.musicxml"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = scratch_dir("roundtrip");
        let path = dir.join("nested").join("settings.json");
        let settings = Settings {
            output_dir: dir.join("out"),
            viewer_path: PathBuf::from("/opt/viewer"),
            icon_dir: Some(dir.join("icons")),
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_or_bad_file_gives_defaults() {
        let dir = scratch_dir("bad");
        assert_eq!(Settings::load_from(&dir.join("absent.json")), Settings::default());

        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_icon_dir_is_optional_in_file() {
        let settings: Settings =
            serde_json::from_str(r#"{"output_dir":"/o","viewer_path":"/v"}"#).unwrap();
        assert_eq!(settings.icon_dir, None);
    }
}
