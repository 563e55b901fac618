//! Canvas label placement and click hit-testing
//!
//! Labels sit on a single row. Label `i` is centered at
//! `LEFT_MARGIN + i * LABEL_SPACING` on the baseline, so positions never move
//! once a label is placed.

use egui::{Pos2, Rect, Vec2};

pub const LEFT_MARGIN: f32 = 10.0;
pub const LABEL_SPACING: f32 = 60.0;
pub const BASELINE_Y: f32 = 80.0;
/// Approximate advance of one glyph in the 14px label font
pub const CHAR_WIDTH: f32 = 10.0;
pub const LABEL_HEIGHT: f32 = 20.0;

/// Canvas size the editor asks for.
pub const CANVAS_SIZE: Vec2 = Vec2::new(800.0, 200.0);

#[derive(Clone, Debug, PartialEq)]
pub struct NoteLabel {
    pub text: String,
    pub center: Pos2,
    pub rect: Rect,
}

impl NoteLabel {
    /// Place the label for the note at `index`.
    pub fn place(index: usize, text: &str) -> Self {
        let center = Pos2::new(LEFT_MARGIN + index as f32 * LABEL_SPACING, BASELINE_Y);
        Self {
            text: text.to_string(),
            center,
            rect: text_rect(center, text),
        }
    }

    /// Change the text, keeping the label's center.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.rect = text_rect(self.center, text);
    }

    pub fn contains_x(&self, x: f32) -> bool {
        self.rect.min.x <= x && x <= self.rect.max.x
    }
}

fn text_rect(center: Pos2, text: &str) -> Rect {
    let width = text.chars().count() as f32 * CHAR_WIDTH;
    Rect::from_center_size(center, Vec2::new(width, LABEL_HEIGHT))
}

/// First label (left to right) whose horizontal bounds contain `x`.
///
/// The vertical coordinate is not checked: a click anywhere in the column of
/// a label selects it.
pub fn hit_test(labels: &[NoteLabel], x: f32) -> Option<usize> {
    labels.iter().position(|label| label.contains_x(x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_follow_index() {
        let first = NoteLabel::place(0, "C4");
        let third = NoteLabel::place(2, "E4");
        assert_eq!(first.center, Pos2::new(10.0, 80.0));
        assert_eq!(third.center, Pos2::new(130.0, 80.0));
        assert_eq!(first.rect.min.x, 0.0);
        assert_eq!(first.rect.max.x, 20.0);
    }

    #[test]
    fn test_set_text_keeps_center() {
        let mut label = NoteLabel::place(1, "C4");
        label.set_text("C#4");
        assert_eq!(label.center, Pos2::new(70.0, 80.0));
        assert_eq!(label.rect.width(), 30.0);
        assert_eq!(label.text, "C#4");
    }

    #[test]
    fn test_hit_test_ignores_y_and_gaps() {
        let labels: Vec<_> = ["C4", "D4", "E4"]
            .iter()
            .enumerate()
            .map(|(i, t)| NoteLabel::place(i, t))
            .collect();
        assert_eq!(hit_test(&labels, 10.0), Some(0));
        assert_eq!(hit_test(&labels, 20.0), Some(0));
        assert_eq!(hit_test(&labels, 75.0), Some(1));
        assert_eq!(hit_test(&labels, 40.0), None);
        assert_eq!(hit_test(&labels, 500.0), None);
        assert_eq!(hit_test(&[], 10.0), None);
    }

    #[test]
    fn test_overlap_prefers_leftmost() {
        let labels = vec![NoteLabel::place(0, "C##456789012"), NoteLabel::place(1, "D4")];
        // the wide first label reaches past the second label's left edge
        assert!(labels[0].rect.max.x > labels[1].rect.min.x);
        assert_eq!(hit_test(&labels, labels[1].rect.min.x), Some(0));
    }
}
