//! In-memory score: a title and an ordered list of notes

use crate::duration::NoteDuration;
use crate::error::{Result, ScoreError};
use crate::pitch::{parse_pitch, Pitch};

#[derive(Clone, Debug, PartialEq)]
pub struct NoteEntry {
    /// Text as the user typed it (trimmed); shown on the canvas
    pub pitch_name: String,
    pub pitch: Pitch,
    pub duration: NoteDuration,
}

impl NoteEntry {
    /// Validate `text` and build an entry. Nothing is constructed on error.
    pub fn parse(text: &str, duration: NoteDuration) -> Result<Self> {
        let pitch = parse_pitch(text)?;
        Ok(Self {
            pitch_name: text.trim().to_string(),
            pitch,
            duration,
        })
    }

    pub fn from_pitch(pitch: Pitch, duration: NoteDuration) -> Self {
        Self {
            pitch_name: pitch.to_string(),
            pitch,
            duration,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Score {
    pub title: String,
    entries: Vec<NoteEntry>,
}

impl Score {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: NoteEntry) {
        self.entries.push(entry);
    }

    /// Replace the entry at `index` in place.
    pub fn replace(&mut self, index: usize, entry: NoteEntry) -> Result<()> {
        let slot = self.entries.get_mut(index).ok_or(ScoreError::NoSelection)?;
        *slot = entry;
        Ok(())
    }

    pub fn entries(&self) -> &[NoteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_quarter_length(&self) -> f32 {
        self.entries.iter().map(|e| e.duration.quarter_length()).sum()
    }
}
