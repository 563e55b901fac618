//! Editing session: the state behind one editor window
//!
//! A session owns its score, the canvas labels drawn for it, the current
//! duration and the selected note. UI callbacks borrow it mutably; nothing
//! here is global.

use crate::assets::DurationIcons;
use crate::config::Settings;
use crate::duration::NoteDuration;
use crate::error::{Result, ScoreError};
use crate::layout::{hit_test, NoteLabel};
use crate::musicxml::save_score;
use crate::score::{NoteEntry, Score};
use crate::viewer::launch_viewer;
use std::path::PathBuf;

pub struct EditingSession {
    id: u64,
    score: Score,
    /// One label per entry, same order
    labels: Vec<NoteLabel>,
    duration: NoteDuration,
    /// Selector drawn as active; none until the user picks one
    highlighted: Option<NoteDuration>,
    /// Target of the next edit. Only `select_note` changes it.
    selection: Option<usize>,
    icons: Option<DurationIcons>,
    status: String,
    modified: bool,
    last_saved: Option<PathBuf>,
}

impl EditingSession {
    pub fn new(id: u64, title: impl Into<String>, icons: Option<DurationIcons>) -> Self {
        Self {
            id,
            score: Score::new(title),
            labels: Vec::new(),
            duration: NoteDuration::default(),
            highlighted: None,
            selection: None,
            icons,
            status: String::new(),
            modified: false,
            last_saved: None,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.score.title
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn labels(&self) -> &[NoteLabel] {
        &self.labels
    }

    pub fn duration(&self) -> NoteDuration {
        self.duration
    }

    pub fn highlighted(&self) -> Option<NoteDuration> {
        self.highlighted
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selection == Some(index)
    }

    pub fn icons(&self) -> Option<&DurationIcons> {
        self.icons.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn last_saved(&self) -> Option<&PathBuf> {
        self.last_saved.as_ref()
    }

    /// Make `duration` the length of subsequently added or edited notes.
    pub fn set_duration(&mut self, duration: NoteDuration) {
        self.duration = duration;
        self.highlighted = Some(duration);
        self.status = format!("duration: {}", duration.label());
    }

    /// Append a note at the current duration. Returns its index.
    pub fn add_note(&mut self, pitch_text: &str) -> Result<usize> {
        let entry = NoteEntry::parse(pitch_text, self.duration)?;
        let index = self.score.len();
        self.labels.push(NoteLabel::place(index, &entry.pitch_name));
        self.status = format!("added {} ({})", entry.pitch_name, self.duration.label());
        self.score.push(entry);
        self.modified = true;
        Ok(index)
    }

    /// Select the first note whose label spans `click_x`.
    ///
    /// `_click_y` is accepted but not tested: labels share one row. A click
    /// that hits nothing leaves the selection as it was.
    pub fn select_note(&mut self, click_x: f32, _click_y: f32) -> Option<usize> {
        let index = hit_test(&self.labels, click_x)?;
        self.selection = Some(index);
        self.status = format!("selected {}", self.labels[index].text);
        Some(index)
    }

    /// Replace the selected note with `pitch_text` at the current duration.
    pub fn edit_note(&mut self, pitch_text: &str) -> Result<usize> {
        let index = self.selection.ok_or(ScoreError::NoSelection)?;
        let entry = NoteEntry::parse(pitch_text, self.duration)?;
        let label = self.labels.get_mut(index).ok_or(ScoreError::NoSelection)?;
        label.set_text(&entry.pitch_name);
        self.status = format!(
            "changed note {} to {} ({})",
            index + 1,
            entry.pitch_name,
            self.duration.label()
        );
        self.score.replace(index, entry)?;
        self.modified = true;
        Ok(index)
    }

    /// Write the score to `{output_dir}/{title}.musicxml`.
    pub fn save(&mut self, settings: &Settings) -> Result<PathBuf> {
        let dir = &settings.output_dir;
        if !dir.is_dir() {
            std::fs::create_dir_all(dir).map_err(|source| ScoreError::DirectoryCreate {
                path: dir.clone(),
                source,
            })?;
        }
        let path = settings.score_path(self.title());
        save_score(&self.score, &path)?;
        self.modified = false;
        self.status = format!("saved {}", path.display());
        self.last_saved = Some(path.clone());
        Ok(path)
    }

    /// Save, then open the file in the configured viewer and wait for it.
    ///
    /// The file stays written when the viewer fails.
    pub fn save_and_launch(&mut self, settings: &Settings) -> Result<PathBuf> {
        let path = self.save(settings)?;
        launch_viewer(&settings.viewer_path, &path)?;
        self.status = format!("opened {}", path.display());
        Ok(path)
    }
}
