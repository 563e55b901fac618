//! Error type shared by every score operation

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("nothing was entered")]
    EmptyInput,
    #[error("not a valid pitch name: {0:?}")]
    InvalidPitch(String),
    #[error("no note is selected")]
    NoSelection,
    #[error("could not create folder {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write score to {path}: {source}")]
    Serialization {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("viewer not found at {0}")]
    ExternalToolNotFound(PathBuf),
    #[error("viewer {tool} failed: {reason}")]
    ExternalTool { tool: PathBuf, reason: String },
    #[error("could not load image {path}: {reason}")]
    ImageAssetLoad { path: PathBuf, reason: String },
    #[error("could not read MusicXML: {0}")]
    Parse(String),
    #[error("settings error: {0}")]
    Settings(String),
}

impl ScoreError {
    /// Short title for the notice window shown to the user.
    pub fn title(&self) -> &'static str {
        match self {
            ScoreError::EmptyInput | ScoreError::InvalidPitch(_) => "input error",
            ScoreError::NoSelection => "selection error",
            ScoreError::DirectoryCreate { .. } | ScoreError::Serialization { .. } => "save error",
            ScoreError::ExternalToolNotFound(_) | ScoreError::ExternalTool { .. } => "viewer error",
            ScoreError::ImageAssetLoad { .. } => "image error",
            ScoreError::Parse(_) => "read error",
            ScoreError::Settings(_) => "settings error",
        }
    }

    /// Fatal errors abort session creation instead of being shown inline.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ScoreError::ImageAssetLoad { .. })
    }
}

pub type Result<T> = std::result::Result<T, ScoreError>;
