// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Diatonic triad construction.
//!
//! Builds the triads available on each scale degree, with quality suffixes
//! following the major-scale pattern and a suggested fretboard shape per chord.

use super::fretboard::{suggested_chord_shape, ShapeEntry};
use super::scale::{build_scale, Note, ScaleId};
use super::tuning::Tuning;
use super::TheoryError;

/// Quality suffix per scale degree (I, ii, iii, IV, V, vi, vii°)
pub const DIATONIC_QUALITIES: [&str; 7] = ["", "m", "m", "", "", "m", "dim"];

/// Parallel-mode quality suffixes used when renaming borrowed chords
pub const BORROWED_QUALITIES: [&str; 7] = ["m", "", "", "m", "", "", ""];

/// A triad built on one scale degree, with a suggested shape
#[derive(Debug, Clone, PartialEq)]
pub struct DiatonicChord {
    /// Scale degree, 1-based
    pub degree: usize,
    /// Display name (root + quality suffix)
    pub name: String,
    /// Constituent pitch classes (root, third, fifth)
    pub notes: Vec<Note>,
    /// One fret per string
    pub suggested_shape: Vec<ShapeEntry>,
}

/// Build the diatonic triads for every degree of a scale.
///
/// Degree i stacks thirds as scale[i], scale[i+2], scale[i+4], wrapping at
/// the scale length.
pub fn build_diatonic_chords(
    tonic: &str,
    scale_id: ScaleId,
    tuning: &Tuning,
    lowest_fret: u8,
    highest_fret: u8,
) -> Result<Vec<DiatonicChord>, TheoryError> {
    let scale = build_scale(tonic, scale_id)?;
    let mut chords = Vec::with_capacity(scale.len());

    for (index, &root) in scale.iter().enumerate() {
        let triad = vec![
            scale[index % scale.len()],
            scale[(index + 2) % scale.len()],
            scale[(index + 4) % scale.len()],
        ];
        let quality = DIATONIC_QUALITIES.get(index).copied().unwrap_or("");
        let suggested_shape = suggested_chord_shape(&triad, tuning, lowest_fret, highest_fret)?;

        chords.push(DiatonicChord {
            degree: index + 1,
            name: format!("{root}{quality}"),
            notes: triad,
            suggested_shape,
        });
    }

    Ok(chords)
}
