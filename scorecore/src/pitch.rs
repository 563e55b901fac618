//! Pitch names: a letter, an optional accidental and an octave digit
//!
//! Accepted accidentals are `#` and `##` (sharp), `-`, `--`, `b` and `bb`
//! (flat), `n` (natural), plus the unicode signs ♯ ♭ ♮.

use crate::error::{Result, ScoreError};
use std::fmt;
use std::str::FromStr;

/// Diatonic step letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Step {
    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Step::C),
            'D' => Some(Step::D),
            'E' => Some(Step::E),
            'F' => Some(Step::F),
            'G' => Some(Step::G),
            'A' => Some(Step::A),
            'B' => Some(Step::B),
            _ => None,
        }
    }

    /// MusicXML `<step>` text.
    pub fn letter(self) -> &'static str {
        match self {
            Step::C => "C",
            Step::D => "D",
            Step::E => "E",
            Step::F => "F",
            Step::G => "G",
            Step::A => "A",
            Step::B => "B",
        }
    }

    pub fn from_letter(s: &str) -> Option<Self> {
        let mut chars = s.trim().chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::from_char(c)
    }

    /// Semitones above C in the same octave.
    fn semitone(self) -> i32 {
        match self {
            Step::C => 0,
            Step::D => 2,
            Step::E => 4,
            Step::F => 5,
            Step::G => 7,
            Step::A => 9,
            Step::B => 11,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pitch {
    pub step: Step,
    /// Chromatic alteration in semitones (-2..=2)
    pub alter: i8,
    pub octave: u8,
}

impl Pitch {
    pub fn new(step: Step, alter: i8, octave: u8) -> Self {
        Self { step, alter, octave }
    }

    /// MIDI note number, middle C (C4) = 60.
    pub fn midi(&self) -> i32 {
        (self.octave as i32 + 1) * 12 + self.step.semitone() + self.alter as i32
    }

    fn accidental_text(&self) -> &'static str {
        match self.alter {
            2 => "##",
            1 => "#",
            -1 => "-",
            -2 => "--",
            _ => "",
        }
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.step.letter(), self.accidental_text(), self.octave)
    }
}

impl FromStr for Pitch {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self> {
        parse_pitch(s)
    }
}

/// Map an accidental spelling to its alteration.
fn parse_accidental(s: &str) -> Option<i8> {
    match s {
        "" | "n" | "♮" => Some(0),
        "#" | "♯" => Some(1),
        "##" | "♯♯" => Some(2),
        "-" | "b" | "♭" => Some(-1),
        "--" | "bb" | "♭♭" => Some(-2),
        _ => None,
    }
}

/// Parse user text into a pitch.
///
/// Blank text is `EmptyInput`; anything that does not match
/// `step accidental? octave` is `InvalidPitch`.
pub fn parse_pitch(text: &str) -> Result<Pitch> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ScoreError::EmptyInput);
    }
    let invalid = || ScoreError::InvalidPitch(text.to_string());

    let mut chars = text.chars();
    let step = chars.next().and_then(Step::from_char).ok_or_else(invalid)?;
    let rest = chars.as_str();

    // Octave is the final character and must be a single digit.
    let octave_char = rest.chars().last().ok_or_else(invalid)?;
    let octave = octave_char.to_digit(10).ok_or_else(invalid)? as u8;
    let accidental = &rest[..rest.len() - octave_char.len_utf8()];
    if accidental.chars().any(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let alter = parse_accidental(accidental).ok_or_else(invalid)?;

    Ok(Pitch { step, alter, octave })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_pitches() {
        let p = parse_pitch("C4").unwrap();
        assert_eq!(p, Pitch::new(Step::C, 0, 4));
        assert_eq!(p.midi(), 60);
        assert_eq!(parse_pitch("a4").unwrap().midi(), 69);
        assert_eq!(parse_pitch("  G5 ").unwrap(), Pitch::new(Step::G, 0, 5));
    }

    #[test]
    fn test_accidentals() {
        assert_eq!(parse_pitch("F#3").unwrap().alter, 1);
        assert_eq!(parse_pitch("C##4").unwrap().alter, 2);
        assert_eq!(parse_pitch("B-3").unwrap().alter, -1);
        assert_eq!(parse_pitch("Bb3").unwrap().alter, -1);
        assert_eq!(parse_pitch("Ebb5").unwrap().alter, -2);
        assert_eq!(parse_pitch("En4").unwrap().alter, 0);
        assert_eq!(parse_pitch("D♭4").unwrap().alter, -1);
        assert_eq!(parse_pitch("D♯4").unwrap().midi(), 63);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse_pitch(""), Err(ScoreError::EmptyInput)));
        assert!(matches!(parse_pitch("   "), Err(ScoreError::EmptyInput)));
    }

    #[test]
    fn test_invalid_grammar() {
        for bad in ["Z9", "C", "4", "C44", "C#", "Cx4", "H2", "C4#", "C###4", "C 4"] {
            assert!(
                matches!(parse_pitch(bad), Err(ScoreError::InvalidPitch(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_display_is_canonical() {
        assert_eq!(parse_pitch("Bb3").unwrap().to_string(), "B-3");
        assert_eq!(parse_pitch("f♯2").unwrap().to_string(), "F#2");
        assert_eq!("e4".parse::<Pitch>().unwrap().to_string(), "E4");
    }
}
