//! Transcribe an audio file into per-frame event and chord labels
//!
//! Usage:
//!   chroma-transcribe <audio-file>
//!
//! Prints a chromagram overview to stderr and one `index: Event - Chord` line
//! per frame to stdout. Set `RUST_LOG=debug` for pipeline logging.

use std::env;
use std::io::{self, BufWriter, Write};
use std::process;

use chroma_transcribe::display::render_chromagram;
use chroma_transcribe::{transcribe_file, TranscriptionConfig};

/// Width of the chromagram overview in columns
const OVERVIEW_WIDTH: usize = 100;

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let path = match (args.next(), args.next()) {
        (Some(path), None) => path,
        _ => {
            eprintln!("Usage: chroma-transcribe <audio-file>");
            process::exit(2);
        }
    };

    if let Err(e) = run(&path) {
        eprintln!("ERROR: {}", e);
        process::exit(1);
    }
}

fn run(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = TranscriptionConfig::default();
    let result = transcribe_file(path, &config)?;

    let summary = result.transcription.summary();
    log::info!(
        "{}: {:.2}s at {} Hz, {} frames ({} chord, {} picking, {} silence), {:.1} ms",
        path,
        result.metadata.duration_seconds,
        result.metadata.sample_rate,
        summary.frames,
        summary.chord_frames,
        summary.picking_frames,
        summary.silence_frames,
        result.metadata.processing_time_ms
    );

    eprint!(
        "{}",
        render_chromagram(&result.energy_matrix, &result.transcription, OVERVIEW_WIDTH)
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for entry in &result.transcription {
        writeln!(out, "{}", entry)?;
    }
    out.flush()?;

    Ok(())
}
