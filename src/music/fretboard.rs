// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Fretboard position mapping.
//!
//! Enumerates the playable (string, fret) positions for a tuning and fret
//! window, and suggests chord shapes over them.

use super::scale::{midi_to_frequency, midi_to_note, note_to_midi, MidiNote, Note};
use super::tuning::{parse_note_name, Tuning};
use super::TheoryError;

/// A single playable fretboard position.
///
/// Derived data, generated fresh per request; never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FretPosition {
    /// String index in tuning order (0 = lowest string)
    pub string_index: usize,
    /// Fret number (0 = open string)
    pub fret: u8,
    /// MIDI note number
    pub midi: MidiNote,
    /// Pitch class at this position
    pub pitch_class: Note,
    /// Frequency in Hz
    pub frequency: f64,
}

/// One string's entry within a suggested chord shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeEntry {
    pub string_index: usize,
    pub fret: u8,
}

/// Enumerate every playable position in the inclusive fret window.
///
/// Positions are grouped by string in tuning order with ascending frets within
/// each string; callers re-sort by MIDI where pitch order is required.
pub fn playable_positions(
    tuning: &Tuning,
    lowest_fret: u8,
    highest_fret: u8,
) -> Result<Vec<FretPosition>, TheoryError> {
    let mut positions = Vec::new();

    for (string_index, string_note) in tuning.strings.iter().enumerate() {
        let (pitch_class, octave) = parse_note_name(string_note)?;
        let open_midi = note_to_midi(pitch_class, octave);

        for fret in lowest_fret..=highest_fret {
            let midi = open_midi + fret;
            positions.push(FretPosition {
                string_index,
                fret,
                midi,
                pitch_class: midi_to_note(midi),
                frequency: midi_to_frequency(midi),
            });
        }
    }

    Ok(positions)
}

/// Best-effort chord shape suggestion, one fret per string.
///
/// Each string targets `chord_tones[string_index % chord_tones.len()]` and
/// takes the first in-window position matching it, defaulting to the lowest
/// fret when nothing matches. Not a guaranteed playable human fingering.
pub fn suggested_chord_shape(
    chord_tones: &[Note],
    tuning: &Tuning,
    lowest_fret: u8,
    highest_fret: u8,
) -> Result<Vec<ShapeEntry>, TheoryError> {
    let positions = playable_positions(tuning, lowest_fret, highest_fret)?;
    let mut shape = Vec::with_capacity(tuning.string_count());

    for string_index in 0..tuning.string_count() {
        let entry = if chord_tones.is_empty() {
            ShapeEntry { string_index, fret: lowest_fret }
        } else {
            let target = chord_tones[string_index % chord_tones.len()];
            positions
                .iter()
                .find(|position| {
                    position.string_index == string_index && position.pitch_class == target
                })
                .map(|position| ShapeEntry { string_index, fret: position.fret })
                .unwrap_or(ShapeEntry { string_index, fret: lowest_fret })
        };
        shape.push(entry);
    }

    Ok(shape)
}
