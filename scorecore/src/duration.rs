//! The six note lengths offered by the duration selector

use serde::{Deserialize, Serialize};

/// MusicXML divisions per quarter note. The eighth is the shortest value.
pub const DIVISIONS: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteDuration {
    Whole,
    DottedHalf,
    Half,
    DottedQuarter,
    Quarter,
    Eighth,
}

impl Default for NoteDuration {
    fn default() -> Self {
        NoteDuration::Quarter
    }
}

impl NoteDuration {
    /// Selector order, longest first.
    pub const ALL: [NoteDuration; 6] = [
        NoteDuration::Whole,
        NoteDuration::DottedHalf,
        NoteDuration::Half,
        NoteDuration::DottedQuarter,
        NoteDuration::Quarter,
        NoteDuration::Eighth,
    ];

    /// Length in quarter notes (1.0 = quarter).
    pub fn quarter_length(self) -> f32 {
        match self {
            NoteDuration::Whole => 4.0,
            NoteDuration::DottedHalf => 3.0,
            NoteDuration::Half => 2.0,
            NoteDuration::DottedQuarter => 1.5,
            NoteDuration::Quarter => 1.0,
            NoteDuration::Eighth => 0.5,
        }
    }

    pub fn from_quarter_length(ql: f32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| (d.quarter_length() - ql).abs() < 0.01)
    }

    /// Length in MusicXML divisions.
    pub fn divisions(self) -> u32 {
        match self {
            NoteDuration::Whole => 8,
            NoteDuration::DottedHalf => 6,
            NoteDuration::Half => 4,
            NoteDuration::DottedQuarter => 3,
            NoteDuration::Quarter => 2,
            NoteDuration::Eighth => 1,
        }
    }

    pub fn from_divisions(divisions: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.divisions() == divisions)
    }

    /// MusicXML `<type>` value.
    pub fn type_name(self) -> &'static str {
        match self {
            NoteDuration::Whole => "whole",
            NoteDuration::DottedHalf | NoteDuration::Half => "half",
            NoteDuration::DottedQuarter | NoteDuration::Quarter => "quarter",
            NoteDuration::Eighth => "eighth",
        }
    }

    pub fn dots(self) -> u8 {
        match self {
            NoteDuration::DottedHalf | NoteDuration::DottedQuarter => 1,
            _ => 0,
        }
    }

    /// Human-readable name for the status bar.
    pub fn label(self) -> &'static str {
        match self {
            NoteDuration::Whole => "whole",
            NoteDuration::DottedHalf => "dotted half",
            NoteDuration::Half => "half",
            NoteDuration::DottedQuarter => "dotted quarter",
            NoteDuration::Quarter => "quarter",
            NoteDuration::Eighth => "eighth",
        }
    }

    /// Icon file name looked up in the configured icon folder.
    pub fn icon_file(self) -> &'static str {
        match self {
            NoteDuration::Whole => "whole_note.png",
            NoteDuration::DottedHalf => "dotted_half_note.png",
            NoteDuration::Half => "half_note.png",
            NoteDuration::DottedQuarter => "dotted_quarter_note.png",
            NoteDuration::Quarter => "quarter_note.png",
            NoteDuration::Eighth => "eighth_note.png",
        }
    }

    /// Split a span of divisions into the fewest representable lengths,
    /// longest first. Used when a note is cut at a barline.
    pub fn decompose(mut divisions: u32) -> Vec<NoteDuration> {
        let mut parts = Vec::new();
        while divisions > 0 {
            let Some(part) = Self::ALL.into_iter().find(|d| d.divisions() <= divisions) else {
                break;
            };
            parts.push(part);
            divisions -= part.divisions();
        }
        parts
    }
}
