//! Transcription result types

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::metadata::TranscriptionMetadata;
use crate::features::chroma::EnergyMatrix;

/// Sentinel chord label for frames with no active pitch class
pub const NO_CHORD: &str = "N";

/// Separator between note names in a chord label
pub const NOTE_SEPARATOR: &str = "+";

/// Per-frame event classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventLabel {
    /// Many simultaneous pitch classes
    Chord,
    /// One to a few pitch classes (single or sequential notes)
    Picking,
    /// No active pitch class
    Silence,
}

impl EventLabel {
    /// Label text as printed in transcriptions
    pub fn as_str(&self) -> &'static str {
        match self {
            EventLabel::Chord => "Chord",
            EventLabel::Picking => "Picking",
            EventLabel::Silence => "Silence",
        }
    }
}

impl fmt::Display for EventLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw listing of the active notes in a frame, e.g. "C+E+G", or "N"
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChordLabel(String);

impl ChordLabel {
    /// The "no chord" label
    pub fn none() -> Self {
        Self(NO_CHORD.to_string())
    }

    /// Join note names with "+"; an empty list gives the "no chord" label
    pub fn from_notes<I, S>(notes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = notes
            .into_iter()
            .map(|n| n.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(NOTE_SEPARATOR);

        if joined.is_empty() {
            Self::none()
        } else {
            Self(joined)
        }
    }

    /// True for the "no chord" label
    pub fn is_none(&self) -> bool {
        self.0 == NO_CHORD
    }

    /// Label text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Individual note names ("C+E+G" → ["C", "E", "G"]); empty for "N"
    pub fn notes(&self) -> Vec<&str> {
        if self.is_none() {
            Vec::new()
        } else {
            self.0.split(NOTE_SEPARATOR).collect()
        }
    }
}

impl fmt::Display for ChordLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for ChordLabel {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// One transcribed frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionEntry {
    /// Frame index in the energy matrix
    pub frame_index: usize,

    /// Frame time offset in seconds
    pub time_seconds: f64,

    /// Event classification
    pub event: EventLabel,

    /// Chord label
    pub chord: ChordLabel,
}

impl fmt::Display for TranscriptionEntry {
    /// `index: EventLabel - ChordLabel`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.frame_index, self.event, self.chord)
    }
}

/// Ordered per-frame transcription, one entry per energy-matrix frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    entries: Vec<TranscriptionEntry>,
    hop_seconds: f64,
}

impl Transcription {
    pub(crate) fn new(entries: Vec<TranscriptionEntry>, hop_seconds: f64) -> Self {
        Self {
            entries,
            hop_seconds,
        }
    }

    /// Entries in frame order
    pub fn entries(&self) -> &[TranscriptionEntry] {
        &self.entries
    }

    /// Number of entries (equals the number of frames)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for frame `index`
    pub fn get(&self, index: usize) -> Option<&TranscriptionEntry> {
        self.entries.get(index)
    }

    /// Iterate over entries in frame order
    pub fn iter(&self) -> std::slice::Iter<'_, TranscriptionEntry> {
        self.entries.iter()
    }

    /// Hop duration in seconds
    pub fn hop_seconds(&self) -> f64 {
        self.hop_seconds
    }

    /// `(event, chord)` pairs in frame order
    pub fn pairs(&self) -> impl Iterator<Item = (EventLabel, &ChordLabel)> + '_ {
        self.entries.iter().map(|e| (e.event, &e.chord))
    }

    /// Frame counts per event label and distinct chord labels
    pub fn summary(&self) -> TranscriptionSummary {
        let mut summary = TranscriptionSummary {
            frames: self.entries.len(),
            duration_seconds: self.entries.len() as f64 * self.hop_seconds,
            ..TranscriptionSummary::default()
        };

        let mut labels = BTreeSet::new();
        for entry in &self.entries {
            match entry.event {
                EventLabel::Chord => summary.chord_frames += 1,
                EventLabel::Picking => summary.picking_frames += 1,
                EventLabel::Silence => summary.silence_frames += 1,
            }
            if !entry.chord.is_none() {
                labels.insert(entry.chord.as_str());
            }
        }
        summary.distinct_labels = labels.len();

        summary
    }
}

impl<'a> IntoIterator for &'a Transcription {
    type Item = &'a TranscriptionEntry;
    type IntoIter = std::slice::Iter<'a, TranscriptionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Aggregate counts over a transcription
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionSummary {
    /// Total frames
    pub frames: usize,

    /// Frames labelled `Chord`
    pub chord_frames: usize,

    /// Frames labelled `Picking`
    pub picking_frames: usize,

    /// Frames labelled `Silence`
    pub silence_frames: usize,

    /// Distinct chord labels, not counting "N"
    pub distinct_labels: usize,

    /// Frames × hop duration in seconds
    pub duration_seconds: f64,
}

/// Complete result of transcribing one recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResult {
    /// The chromagram the transcription was derived from
    pub energy_matrix: EnergyMatrix,

    /// Per-frame transcription
    pub transcription: Transcription,

    /// Run metadata
    pub metadata: TranscriptionMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(i: usize, event: EventLabel, chord: &str) -> TranscriptionEntry {
        TranscriptionEntry {
            frame_index: i,
            time_seconds: i as f64 * 0.5,
            event,
            chord: if chord == NO_CHORD {
                ChordLabel::none()
            } else {
                ChordLabel::from_notes(chord.split('+'))
            },
        }
    }

    #[test]
    fn test_event_label_names() {
        assert_eq!(EventLabel::Chord.to_string(), "Chord");
        assert_eq!(EventLabel::Picking.to_string(), "Picking");
        assert_eq!(EventLabel::Silence.to_string(), "Silence");
    }

    #[test]
    fn test_chord_label_from_notes() {
        assert_eq!(ChordLabel::from_notes(["C", "E", "G"]), "C+E+G");
        assert_eq!(ChordLabel::from_notes(Vec::<&str>::new()), "N");
        assert!(ChordLabel::from_notes(Vec::<String>::new()).is_none());
        assert_eq!(ChordLabel::from_notes(["C#"]).notes(), vec!["C#"]);
        assert!(ChordLabel::none().notes().is_empty());
    }

    #[test]
    fn test_entry_display() {
        let e = entry(3, EventLabel::Picking, "C+E+G");
        assert_eq!(e.to_string(), "3: Picking - C+E+G");

        let e = entry(0, EventLabel::Silence, "N");
        assert_eq!(e.to_string(), "0: Silence - N");
    }

    #[test]
    fn test_summary_counts() {
        let t = Transcription::new(
            vec![
                entry(0, EventLabel::Silence, "N"),
                entry(1, EventLabel::Picking, "C"),
                entry(2, EventLabel::Picking, "C"),
                entry(3, EventLabel::Chord, "C+E+G+B"),
                entry(4, EventLabel::Silence, "N"),
            ],
            0.5,
        );

        let s = t.summary();
        assert_eq!(s.frames, 5);
        assert_eq!(s.silence_frames, 2);
        assert_eq!(s.picking_frames, 2);
        assert_eq!(s.chord_frames, 1);
        assert_eq!(s.distinct_labels, 2);
        assert!((s.duration_seconds - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_serializes_labels_as_plain_strings() {
        let e = entry(1, EventLabel::Picking, "C+E");
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"event\":\"Picking\""));
        assert!(json.contains("\"chord\":\"C+E\""));
    }
}
