//! Text rendering of a chromagram and its transcription
//!
//! Read-only: nothing here feeds back into the transcription.

use std::fmt::Write as _;

use crate::analysis::result::{EventLabel, Transcription};
use crate::features::chroma::{EnergyMatrix, NUM_PITCH_CLASSES};
use crate::transcription::notes::pitch_class_name;

/// Intensity ramp, dark to bright
const RAMP: &[u8] = b" .:-=+*#%@";

/// Render a chromagram heat map with an event marker row
///
/// Rows run from B (top) to C (bottom). Frames are averaged into at most
/// `max_width` columns. The marker row shows `#` where a column contains a
/// chord frame, `-` where it contains picking only, and a blank for silence.
pub fn render_chromagram(matrix: &EnergyMatrix, transcription: &Transcription, max_width: usize) -> String {
    let frames = matrix.frames();
    if frames.is_empty() {
        return "(no frames)\n".to_string();
    }

    let columns = frames.len().min(max_width.max(1));
    let groups: Vec<(usize, usize)> = (0..columns)
        .map(|c| (c * frames.len() / columns, (c + 1) * frames.len() / columns))
        .collect();

    let mut out = String::new();

    for pc in (0..NUM_PITCH_CLASSES).rev() {
        let row = matrix.pitch_class_row(pc);
        let _ = write!(out, "{:<2}|", pitch_class_name(pc));
        for &(start, end) in &groups {
            let span = &row[start..end];
            out.push(shade(span.iter().sum::<f64>() / span.len() as f64));
        }
        out.push('\n');
    }

    out.push_str("  |");
    for &(start, end) in &groups {
        let events = transcription
            .entries()
            .get(start..end)
            .unwrap_or_default();
        let marker = if events.iter().any(|e| e.event == EventLabel::Chord) {
            '#'
        } else if events.iter().any(|e| e.event == EventLabel::Picking) {
            '-'
        } else {
            ' '
        };
        out.push(marker);
    }
    out.push('\n');

    let end_time = matrix.frame_time(frames.len() - 1);
    let _ = writeln!(
        out,
        "  0.00s .. {:.2}s ({} frames, {} per column)",
        end_time,
        frames.len(),
        frames.len().div_ceil(columns)
    );

    out
}

fn shade(energy: f64) -> char {
    let clamped = if energy.is_finite() { energy.clamp(0.0, 1.0) } else { 0.0 };
    let idx = (clamped * (RAMP.len() - 1) as f64).round() as usize;
    RAMP[idx] as char
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcription::TranscriptionBuilder;

    fn frame_with(active: &[usize], value: f64) -> Vec<f64> {
        let mut frame = vec![0.0; 12];
        for &pc in active {
            frame[pc] = value;
        }
        frame
    }

    #[test]
    fn test_shade_ramp_ends() {
        assert_eq!(shade(0.0), ' ');
        assert_eq!(shade(1.0), '@');
        assert_eq!(shade(7.0), '@');
        assert_eq!(shade(f64::NAN), ' ');
    }

    #[test]
    fn test_render_rows_and_markers() {
        let matrix = EnergyMatrix::new(
            vec![
                vec![0.0; 12],
                frame_with(&[0], 1.0),
                frame_with(&[0, 4, 7, 11], 1.0),
            ],
            512,
            44100,
        )
        .unwrap();
        let transcription = TranscriptionBuilder::default().build(&matrix).unwrap();

        let text = render_chromagram(&matrix, &transcription, 80);
        let lines: Vec<&str> = text.lines().collect();

        // 12 pitch rows, marker row, time axis
        assert_eq!(lines.len(), 14);
        assert_eq!(lines[0], "B |  @");
        assert_eq!(lines[11], "C | @@");
        assert_eq!(lines[12], "  | -#");
    }

    #[test]
    fn test_render_downsamples_columns() {
        let frames: Vec<Vec<f64>> = (0..100).map(|_| frame_with(&[9], 1.0)).collect();
        let matrix = EnergyMatrix::new(frames, 512, 44100).unwrap();
        let transcription = TranscriptionBuilder::default().build(&matrix).unwrap();

        let text = render_chromagram(&matrix, &transcription, 10);
        let a_row = text.lines().find(|l| l.starts_with("A |")).unwrap();
        assert_eq!(a_row, "A |@@@@@@@@@@");
    }

    #[test]
    fn test_render_averages_row_over_column() {
        let matrix = EnergyMatrix::new(vec![frame_with(&[9], 1.0), vec![0.0; 12]], 512, 44100).unwrap();
        let transcription = TranscriptionBuilder::default().build(&matrix).unwrap();

        let text = render_chromagram(&matrix, &transcription, 1);
        let a_row = text.lines().find(|l| l.starts_with("A |")).unwrap();
        assert_eq!(a_row, "A |+");
    }

    #[test]
    fn test_render_empty() {
        let matrix = EnergyMatrix::new(vec![], 512, 44100).unwrap();
        let transcription = TranscriptionBuilder::default().build(&matrix).unwrap();
        assert_eq!(render_chromagram(&matrix, &transcription, 40), "(no frames)\n");
    }
}
