// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Fixed-width ASCII tablature rendering.
//!
//! One text row per string in conventional tab order (high string on top),
//! stable column alignment for snapshot-style testing.

use crate::config::{GeneratorSettings, Mode};
use crate::generators::{ChordEvent, NoteEvent};

/// A (string, step) cell to print
#[derive(Debug, Clone, Copy)]
struct TabEntry {
    string_index: usize,
    fret: u8,
    step_index: usize,
}

/// Render events into a per-string text grid.
///
/// Chord mode flattens each chord's shape into pseudo-events offset from
/// `round(start_beat * 2)`; lead modes use the notes' own step indices. The
/// grid is at least 16 columns wide and every row has the same length.
pub fn render_tab(
    settings: &GeneratorSettings,
    notes: &[NoteEvent],
    chords: &[ChordEvent],
) -> Vec<String> {
    let string_count = settings.tuning.string_count();

    let entries: Vec<TabEntry> = if settings.mode == Mode::Chord {
        chords
            .iter()
            .flat_map(|chord| {
                let base_step = (chord.start_beat * 2.0).round() as usize;
                chord
                    .suggested_shape
                    .iter()
                    .enumerate()
                    .map(move |(shape_index, shape)| TabEntry {
                        string_index: shape.string_index,
                        fret: shape.fret,
                        step_index: base_step + shape_index,
                    })
            })
            .collect()
    } else {
        notes
            .iter()
            .map(|note| TabEntry {
                string_index: note.string_index,
                fret: note.fret,
                step_index: note.step_index,
            })
            .collect()
    };

    let total_steps = entries
        .iter()
        .map(|entry| entry.step_index + 1)
        .max()
        .unwrap_or(0)
        .max(16);

    (0..string_count)
        .map(|row_index| {
            // Reversed so the visually high string sits on top
            let string_index = string_count - row_index - 1;
            let mut line = format!("{:<3}|", settings.tuning.strings[string_index]);

            for step in 0..total_steps {
                let cell = entries
                    .iter()
                    .find(|entry| entry.step_index == step && entry.string_index == string_index);
                match cell {
                    Some(entry) => line.push_str(&format!("{:-<2}", entry.fret)),
                    None => line.push_str("--"),
                }
            }

            line
        })
        .collect()
}
