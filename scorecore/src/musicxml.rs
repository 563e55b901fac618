//! MusicXML export (and the small reader used to check it)
//!
//! Scores are written as a single-part `score-partwise` document in 4/4.
//! Notes that cross a barline are split and tied; the reader merges tie
//! chains back into one note so a write/read cycle keeps the note list.

use crate::duration::{NoteDuration, DIVISIONS};
use crate::error::{Result, ScoreError};
use crate::pitch::{Pitch, Step};
use crate::score::{NoteEntry, Score};
use simple_xml_builder::XMLElement;
use std::io::{BufWriter, Write};
use std::path::Path;

/// File extension used for exported scores.
pub const EXTENSION: &str = "musicxml";

const BEATS_PER_MEASURE: u32 = 4;
const MEASURE_DIVISIONS: u32 = BEATS_PER_MEASURE * DIVISIONS;
const PART_ID: &str = "P1";

/// One written `<note>`: an entry, or a tied fragment of one.
#[derive(Clone, Debug, PartialEq)]
struct Fragment {
    pitch: Pitch,
    duration: NoteDuration,
    tie_stop: bool,
    tie_start: bool,
}

/// Pack entries into 4/4 measures, cutting at barlines.
fn layout_measures(entries: &[NoteEntry]) -> Vec<Vec<Fragment>> {
    let mut measures: Vec<Vec<Fragment>> = vec![Vec::new()];
    let mut fill = 0;

    for entry in entries {
        let mut remaining = entry.duration.divisions();
        let mut first = true;
        while remaining > 0 {
            if fill == MEASURE_DIVISIONS {
                measures.push(Vec::new());
                fill = 0;
            }
            let take = remaining.min(MEASURE_DIVISIONS - fill);
            for part in NoteDuration::decompose(take) {
                remaining -= part.divisions();
                fill += part.divisions();
                if let Some(measure) = measures.last_mut() {
                    measure.push(Fragment {
                        pitch: entry.pitch,
                        duration: part,
                        tie_stop: !first,
                        tie_start: remaining > 0,
                    });
                }
                first = false;
            }
        }
    }
    measures
}

fn text_element(name: &str, text: impl ToString) -> XMLElement {
    let mut element = XMLElement::new(name);
    element.add_text(text);
    element
}

fn tie_element(name: &str, kind: &str) -> XMLElement {
    let mut element = XMLElement::new(name);
    element.add_attribute("type", kind);
    element
}

fn note_element(fragment: &Fragment) -> XMLElement {
    let mut note = XMLElement::new("note");

    let mut pitch = XMLElement::new("pitch");
    pitch.add_child(text_element("step", fragment.pitch.step.letter()));
    if fragment.pitch.alter != 0 {
        pitch.add_child(text_element("alter", fragment.pitch.alter));
    }
    pitch.add_child(text_element("octave", fragment.pitch.octave));
    note.add_child(pitch);

    note.add_child(text_element("duration", fragment.duration.divisions()));
    if fragment.tie_stop {
        note.add_child(tie_element("tie", "stop"));
    }
    if fragment.tie_start {
        note.add_child(tie_element("tie", "start"));
    }
    note.add_child(text_element("voice", 1));
    note.add_child(text_element("type", fragment.duration.type_name()));
    for _ in 0..fragment.duration.dots() {
        note.add_child(XMLElement::new("dot"));
    }

    if fragment.tie_stop || fragment.tie_start {
        let mut notations = XMLElement::new("notations");
        if fragment.tie_stop {
            notations.add_child(tie_element("tied", "stop"));
        }
        if fragment.tie_start {
            notations.add_child(tie_element("tied", "start"));
        }
        note.add_child(notations);
    }
    note
}

fn attributes_element() -> XMLElement {
    let mut attributes = XMLElement::new("attributes");
    attributes.add_child(text_element("divisions", DIVISIONS));

    let mut key = XMLElement::new("key");
    key.add_child(text_element("fifths", 0));
    attributes.add_child(key);

    let mut time = XMLElement::new("time");
    time.add_child(text_element("beats", BEATS_PER_MEASURE));
    time.add_child(text_element("beat-type", 4));
    attributes.add_child(time);

    let mut clef = XMLElement::new("clef");
    clef.add_child(text_element("sign", "G"));
    clef.add_child(text_element("line", 2));
    attributes.add_child(clef);

    attributes
}

/// Build the whole document tree.
fn score_element(score: &Score) -> XMLElement {
    let mut root = XMLElement::new("score-partwise");
    root.add_attribute("version", "3.1");

    let mut work = XMLElement::new("work");
    work.add_child(text_element("work-title", &score.title));
    root.add_child(work);
    root.add_child(text_element("movement-title", &score.title));

    let mut identification = XMLElement::new("identification");
    let mut encoding = XMLElement::new("encoding");
    encoding.add_child(text_element(
        "software",
        format!("slowScore {}", env!("CARGO_PKG_VERSION")),
    ));
    identification.add_child(encoding);
    root.add_child(identification);

    let mut part_list = XMLElement::new("part-list");
    let mut score_part = XMLElement::new("score-part");
    score_part.add_attribute("id", PART_ID);
    score_part.add_child(text_element("part-name", "Music"));
    part_list.add_child(score_part);
    root.add_child(part_list);

    let mut part = XMLElement::new("part");
    part.add_attribute("id", PART_ID);
    for (index, fragments) in layout_measures(score.entries()).iter().enumerate() {
        let mut measure = XMLElement::new("measure");
        measure.add_attribute("number", index + 1);
        if index == 0 {
            measure.add_child(attributes_element());
        }
        for fragment in fragments {
            measure.add_child(note_element(fragment));
        }
        part.add_child(measure);
    }
    root.add_child(part);

    root
}

/// Serialize `score` as MusicXML into `writer`.
pub fn write_score<W: Write>(score: &Score, writer: W) -> std::io::Result<()> {
    score_element(score).write(writer)
}

pub fn to_string(score: &Score) -> std::io::Result<String> {
    let mut buffer = Vec::new();
    write_score(score, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write `score` to `path`, replacing any existing file.
pub fn save_score(score: &Score, path: &Path) -> Result<()> {
    let serialization = |source| ScoreError::Serialization {
        path: path.to_path_buf(),
        source,
    };
    let file = std::fs::File::create(path).map_err(serialization)?;
    let mut writer = BufWriter::new(file);
    write_score(score, &mut writer).map_err(serialization)?;
    writer.flush().map_err(serialization)?;
    log::info!("wrote {} notes to {}", score.len(), path.display());
    Ok(())
}

// ---------------------------------------------------------------
// Reading
// ---------------------------------------------------------------

fn child<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

fn child_text<'a>(node: roxmltree::Node<'a, '_>, name: &str) -> Option<&'a str> {
    child(node, name).and_then(|n| n.text()).map(str::trim)
}

fn parse_error(message: impl Into<String>) -> ScoreError {
    ScoreError::Parse(message.into())
}

fn read_pitch(note: roxmltree::Node) -> Result<Pitch> {
    let pitch = child(note, "pitch").ok_or_else(|| parse_error("note without pitch"))?;
    let step = child_text(pitch, "step")
        .and_then(Step::from_letter)
        .ok_or_else(|| parse_error("bad or missing <step>"))?;
    let alter = match child_text(pitch, "alter") {
        Some(text) => text
            .parse::<f32>()
            .ok()
            .map(f32::round)
            .filter(|a| (-2.0..=2.0).contains(a))
            .ok_or_else(|| parse_error(format!("bad <alter> {text:?}")))? as i8,
        None => 0,
    };
    let octave = child_text(pitch, "octave")
        .and_then(|t| t.parse::<u8>().ok())
        .filter(|o| *o <= 9)
        .ok_or_else(|| parse_error("bad or missing <octave>"))?;
    Ok(Pitch::new(step, alter, octave))
}

fn has_tie(note: roxmltree::Node, kind: &str) -> bool {
    note.children()
        .any(|n| n.has_tag_name("tie") && n.attribute("type") == Some(kind))
}

fn finish_note(score: &mut Score, pitch: Pitch, divisions: u32) -> Result<()> {
    let duration = NoteDuration::from_divisions(divisions).ok_or_else(|| {
        parse_error(format!(
            "{pitch} lasts {} quarters, which has no single note value",
            divisions as f32 / DIVISIONS as f32
        ))
    })?;
    score.push(NoteEntry::from_pitch(pitch, duration));
    Ok(())
}

/// Parse a MusicXML document produced by [`write_score`].
///
/// Only the first part is read. Rests and chord tones are skipped.
pub fn parse_score(xml: &str) -> Result<Score> {
    let doc = roxmltree::Document::parse(xml).map_err(|e| parse_error(e.to_string()))?;
    let root = doc.root_element();
    if !root.has_tag_name("score-partwise") {
        return Err(parse_error(format!(
            "expected <score-partwise>, found <{}>",
            root.tag_name().name()
        )));
    }

    let title = child(root, "work")
        .and_then(|w| child_text(w, "work-title"))
        .or_else(|| child_text(root, "movement-title"))
        .unwrap_or_default();
    let mut score = Score::new(title);

    let part = child(root, "part").ok_or_else(|| parse_error("document has no <part>"))?;
    let mut divisions = 1;
    let mut pending: Option<(Pitch, u32)> = None;

    for measure in part.children().filter(|n| n.has_tag_name("measure")) {
        for node in measure.children().filter(|n| n.is_element()) {
            if node.has_tag_name("attributes") {
                if let Some(text) = child_text(node, "divisions") {
                    divisions = text
                        .parse::<u32>()
                        .ok()
                        .filter(|d| *d > 0)
                        .ok_or_else(|| parse_error(format!("bad <divisions> {text:?}")))?;
                }
                continue;
            }
            if !node.has_tag_name("note")
                || child(node, "rest").is_some()
                || child(node, "chord").is_some()
                || child(node, "grace").is_some()
            {
                continue;
            }

            let pitch = read_pitch(node)?;
            let length = child_text(node, "duration")
                .and_then(|t| t.parse::<u32>().ok())
                .ok_or_else(|| parse_error("bad or missing <duration>"))?;
            let scaled = length
                .checked_mul(DIVISIONS)
                .ok_or_else(|| parse_error(format!("<duration> {length} is too long")))?;
            if scaled % divisions != 0 {
                return Err(parse_error(format!("{pitch} is shorter than an eighth")));
            }
            let length = scaled / divisions;

            pending = match pending.take() {
                Some((held, total)) if has_tie(node, "stop") && held == pitch => {
                    let total = total
                        .checked_add(length)
                        .ok_or_else(|| parse_error(format!("tied {pitch} is too long")))?;
                    Some((held, total))
                }
                Some((held, total)) => {
                    finish_note(&mut score, held, total)?;
                    Some((pitch, length))
                }
                None => Some((pitch, length)),
            };
            if !has_tie(node, "start") {
                if let Some((held, total)) = pending.take() {
                    finish_note(&mut score, held, total)?;
                }
            }
        }
    }
    if let Some((held, total)) = pending {
        finish_note(&mut score, held, total)?;
    }

    Ok(score)
}

pub fn load_score(path: &Path) -> Result<Score> {
    let xml = std::fs::read_to_string(path)
        .map_err(|e| parse_error(format!("{}: {e}", path.display())))?;
    parse_score(&xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_of(title: &str, notes: &[(&str, NoteDuration)]) -> Score {
        let mut score = Score::new(title);
        for (name, duration) in notes {
            score.push(NoteEntry::parse(name, *duration).unwrap());
        }
        score
    }

    fn pairs(score: &Score) -> Vec<(Pitch, NoteDuration)> {
        score.entries().iter().map(|e| (e.pitch, e.duration)).collect()
    }

    #[test]
    fn test_layout_splits_at_barline() {
        let score = score_of(
            "t",
            &[
                ("C4", NoteDuration::DottedHalf),
                ("D4", NoteDuration::Half),
            ],
        );
        let measures = layout_measures(score.entries());
        assert_eq!(measures.len(), 2);
        assert_eq!(measures[0].len(), 2);
        assert!(measures[0][1].tie_start && !measures[0][1].tie_stop);
        assert_eq!(measures[0][1].duration, NoteDuration::Quarter);
        assert!(measures[1][0].tie_stop && !measures[1][0].tie_start);
        assert_eq!(measures[1][0].duration, NoteDuration::Quarter);
    }

    #[test]
    fn test_layout_exact_measure_opens_no_extra_bar() {
        let score = score_of("t", &[("C4", NoteDuration::Whole)]);
        assert_eq!(layout_measures(score.entries()).len(), 1);
        assert_eq!(layout_measures(&[]).len(), 1);
    }

    #[test]
    fn test_document_contents() {
        let score = score_of(
            "Test",
            &[("C4", NoteDuration::Quarter), ("E-4", NoteDuration::DottedQuarter)],
        );
        let xml = to_string(&score).unwrap();
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let root = doc.root_element();
        assert!(root.has_tag_name("score-partwise"));

        let title = root.descendants().find(|n| n.has_tag_name("work-title")).unwrap();
        assert_eq!(title.text().map(str::trim), Some("Test"));

        let notes: Vec<_> = root.descendants().filter(|n| n.has_tag_name("note")).collect();
        assert_eq!(notes.len(), 2);
        assert_eq!(child_text(notes[0], "type"), Some("quarter"));
        assert!(child(notes[0], "dot").is_none());
        assert_eq!(child_text(notes[1], "duration"), Some("3"));
        assert!(child(notes[1], "dot").is_some());
        let pitch = child(notes[1], "pitch").unwrap();
        assert_eq!(child_text(pitch, "alter"), Some("-1"));
    }

    #[test]
    fn test_round_trip_keeps_order_and_lengths() {
        let score = score_of(
            "Round",
            &[
                ("C4", NoteDuration::DottedHalf),
                ("F#4", NoteDuration::Half),
                ("Bb3", NoteDuration::Eighth),
                ("G5", NoteDuration::Whole),
                ("A4", NoteDuration::DottedQuarter),
            ],
        );
        let parsed = parse_score(&to_string(&score).unwrap()).unwrap();
        assert_eq!(parsed.title, "Round");
        assert_eq!(pairs(&parsed), pairs(&score));
    }

    #[test]
    fn test_repeated_pitch_is_not_merged() {
        let score = score_of(
            "t",
            &[("C4", NoteDuration::Quarter), ("C4", NoteDuration::Quarter)],
        );
        let parsed = parse_score(&to_string(&score).unwrap()).unwrap();
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_empty_score_round_trip() {
        let score = Score::new("blank");
        let parsed = parse_score(&to_string(&score).unwrap()).unwrap();
        assert_eq!(parsed.title, "blank");
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_parse_other_divisions() {
        let xml = r#"<?xml version="1.0"?>
            <score-partwise version="3.1">
              <movement-title>Other</movement-title>
              <part id="P1"><measure number="1">
                <attributes><divisions>4</divisions></attributes>
                <note><pitch><step>E</step><octave>4</octave></pitch><duration>6</duration></note>
                <note><rest/><duration>2</duration></note>
                <note><pitch><step>G</step><alter>1</alter><octave>4</octave></pitch><duration>2</duration></note>
              </measure></part>
            </score-partwise>"#;
        let score = parse_score(xml).unwrap();
        assert_eq!(score.title, "Other");
        assert_eq!(score.len(), 2);
        assert_eq!(score.entries()[0].duration, NoteDuration::DottedQuarter);
        assert_eq!(score.entries()[1].pitch_name, "G#4");
        assert_eq!(score.entries()[1].duration, NoteDuration::Eighth);
    }

    fn single_note(pitch: &str, duration: &str) -> String {
        format!(
            r#"<score-partwise version="3.1">
              <part id="P1"><measure number="1">
                <attributes><divisions>1</divisions></attributes>
                <note><pitch>{pitch}</pitch><duration>{duration}</duration></note>
              </measure></part>
            </score-partwise>"#
        )
    }

    #[test]
    fn test_huge_duration_is_a_parse_error() {
        let xml = single_note("<step>C</step><octave>4</octave>", "4000000000");
        assert!(matches!(parse_score(&xml), Err(ScoreError::Parse(_))));
    }

    #[test]
    fn test_alter_out_of_range() {
        for alter in ["7", "-3", "2.6", "sharp"] {
            let pitch = format!("<step>C</step><alter>{alter}</alter><octave>4</octave>");
            assert!(
                matches!(parse_score(&single_note(&pitch, "1")), Err(ScoreError::Parse(_))),
                "alter {alter} should be rejected"
            );
        }
        let flat = single_note("<step>E</step><alter>-2</alter><octave>4</octave>", "1");
        let score = parse_score(&flat).unwrap();
        assert_eq!(score.entries()[0].pitch.alter, -2);
        assert_eq!(score.entries()[0].pitch_name, "E--4");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_score("not xml"), Err(ScoreError::Parse(_))));
        assert!(matches!(
            parse_score("<score-timewise/>"),
            Err(ScoreError::Parse(_))
        ));
    }
}
