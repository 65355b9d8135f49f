//! Note name spelling
//!
//! One canonical spelling per pitch class (sharps), so labels are deterministic.

/// Pitch class names, index 0 = C
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Name of a pitch class (0 = C, 1 = C#, ..., 11 = B)
///
/// # Example
///
/// ```
/// use chroma_transcribe::transcription::notes::pitch_class_name;
///
/// assert_eq!(pitch_class_name(0), "C");
/// assert_eq!(pitch_class_name(6), "F#");
/// assert_eq!(pitch_class_name(11), "B");
/// ```
pub fn pitch_class_name(pitch_class: usize) -> &'static str {
    NOTE_NAMES[pitch_class % 12]
}

/// Name of a MIDI note including its octave, with 60 = "C4"
///
/// # Example
///
/// ```
/// use chroma_transcribe::transcription::notes::midi_note_name;
///
/// assert_eq!(midi_note_name(60), "C4");
/// assert_eq!(midi_note_name(69), "A4");
/// assert_eq!(midi_note_name(0), "C-1");
/// ```
pub fn midi_note_name(midi: u8) -> String {
    let octave = midi as i32 / 12 - 1;
    format!("{}{}", pitch_class_name(midi as usize), octave)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_class_names() {
        let names: Vec<&str> = (0..12).map(pitch_class_name).collect();
        assert_eq!(
            names,
            vec!["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"]
        );
    }

    #[test]
    fn test_midi_note_names() {
        assert_eq!(midi_note_name(60), "C4");
        assert_eq!(midi_note_name(64), "E4");
        assert_eq!(midi_note_name(71), "B4");
        assert_eq!(midi_note_name(72), "C5");
        assert_eq!(midi_note_name(127), "G9");
    }
}
