// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale theory: pitch classes, interval tables, and MIDI conversion.
//!
//! Everything here is total, deterministic, and side-effect-free; the rest
//! of the engine composes with these functions.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::TheoryError;

/// MIDI note number type
pub type MidiNote = u8;

/// Note names (pitch classes), sharps preferred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Note {
    C,
    Cs, // C#
    D,
    Ds, // D#
    E,
    F,
    Fs, // F#
    G,
    Gs, // G#
    A,
    As, // A#
    B,
}

impl Note {
    /// All notes in chromatic order
    pub const ALL: [Note; 12] = [
        Note::C,
        Note::Cs,
        Note::D,
        Note::Ds,
        Note::E,
        Note::F,
        Note::Fs,
        Note::G,
        Note::Gs,
        Note::A,
        Note::As,
        Note::B,
    ];

    /// Get the pitch class (0-11) for this note
    pub fn pitch_class(self) -> u8 {
        match self {
            Note::C => 0,
            Note::Cs => 1,
            Note::D => 2,
            Note::Ds => 3,
            Note::E => 4,
            Note::F => 5,
            Note::Fs => 6,
            Note::G => 7,
            Note::Gs => 8,
            Note::A => 9,
            Note::As => 10,
            Note::B => 11,
        }
    }

    /// Get note from pitch class
    pub fn from_pitch_class(pc: u8) -> Self {
        Note::ALL[(pc % 12) as usize]
    }

    /// Parse a note from its canonical sharp spelling (e.g., "C", "F#")
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_uppercase();
        match s.as_str() {
            "C" => Some(Note::C),
            "C#" => Some(Note::Cs),
            "D" => Some(Note::D),
            "D#" => Some(Note::Ds),
            "E" => Some(Note::E),
            "F" => Some(Note::F),
            "F#" => Some(Note::Fs),
            "G" => Some(Note::G),
            "G#" => Some(Note::Gs),
            "A" => Some(Note::A),
            "A#" => Some(Note::As),
            "B" => Some(Note::B),
            _ => None,
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Note::C => "C",
            Note::Cs => "C#",
            Note::D => "D",
            Note::Ds => "D#",
            Note::E => "E",
            Note::F => "F",
            Note::Fs => "F#",
            Note::G => "G",
            Note::Gs => "G#",
            Note::A => "A",
            Note::As => "A#",
            Note::B => "B",
        };
        write!(f, "{}", name)
    }
}

/// Scale types supported by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaleId {
    Major,
    NaturalMinor,
    HarmonicMinor,
    MelodicMinor,
    PentatonicMajor,
    PentatonicMinor,
    Blues,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Locrian,
}

impl ScaleId {
    /// All supported scales
    pub const ALL: [ScaleId; 12] = [
        ScaleId::Major,
        ScaleId::NaturalMinor,
        ScaleId::HarmonicMinor,
        ScaleId::MelodicMinor,
        ScaleId::PentatonicMajor,
        ScaleId::PentatonicMinor,
        ScaleId::Blues,
        ScaleId::Dorian,
        ScaleId::Phrygian,
        ScaleId::Lydian,
        ScaleId::Mixolydian,
        ScaleId::Locrian,
    ];

    /// Get the intervals (semitones from tonic) for this scale
    pub fn intervals(self) -> Vec<u8> {
        match self {
            ScaleId::Major => vec![0, 2, 4, 5, 7, 9, 11],
            ScaleId::NaturalMinor => vec![0, 2, 3, 5, 7, 8, 10],
            ScaleId::HarmonicMinor => vec![0, 2, 3, 5, 7, 8, 11],
            ScaleId::MelodicMinor => vec![0, 2, 3, 5, 7, 9, 11],
            ScaleId::PentatonicMajor => vec![0, 2, 4, 7, 9],
            ScaleId::PentatonicMinor => vec![0, 3, 5, 7, 10],
            ScaleId::Blues => vec![0, 3, 5, 6, 7, 10],
            ScaleId::Dorian => vec![0, 2, 3, 5, 7, 9, 10],
            ScaleId::Phrygian => vec![0, 1, 3, 5, 7, 8, 10],
            ScaleId::Lydian => vec![0, 2, 4, 6, 7, 9, 11],
            ScaleId::Mixolydian => vec![0, 2, 4, 5, 7, 9, 10],
            ScaleId::Locrian => vec![0, 1, 3, 5, 6, 8, 10],
        }
    }

    /// The external id string (matches the settings format)
    pub fn id(self) -> &'static str {
        match self {
            ScaleId::Major => "major",
            ScaleId::NaturalMinor => "naturalMinor",
            ScaleId::HarmonicMinor => "harmonicMinor",
            ScaleId::MelodicMinor => "melodicMinor",
            ScaleId::PentatonicMajor => "pentatonicMajor",
            ScaleId::PentatonicMinor => "pentatonicMinor",
            ScaleId::Blues => "blues",
            ScaleId::Dorian => "dorian",
            ScaleId::Phrygian => "phrygian",
            ScaleId::Lydian => "lydian",
            ScaleId::Mixolydian => "mixolydian",
            ScaleId::Locrian => "locrian",
        }
    }

    /// Get a human-readable name for this scale
    pub fn name(self) -> &'static str {
        match self {
            ScaleId::Major => "Major",
            ScaleId::NaturalMinor => "Natural Minor",
            ScaleId::HarmonicMinor => "Harmonic Minor",
            ScaleId::MelodicMinor => "Melodic Minor",
            ScaleId::PentatonicMajor => "Pentatonic Major",
            ScaleId::PentatonicMinor => "Pentatonic Minor",
            ScaleId::Blues => "Blues",
            ScaleId::Dorian => "Dorian",
            ScaleId::Phrygian => "Phrygian",
            ScaleId::Lydian => "Lydian",
            ScaleId::Mixolydian => "Mixolydian",
            ScaleId::Locrian => "Locrian",
        }
    }

    /// Parse a scale id string
    pub fn parse(s: &str) -> Result<Self, TheoryError> {
        let normalized = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        ScaleId::ALL
            .iter()
            .copied()
            .find(|scale| scale.id().to_lowercase() == normalized)
            .ok_or_else(|| TheoryError::UnsupportedScale(s.to_string()))
    }

    /// Whether progressions over this scale should lean minor.
    ///
    /// Minor-named scales plus Phrygian.
    pub fn is_minor_leaning(self) -> bool {
        matches!(
            self,
            ScaleId::NaturalMinor
                | ScaleId::HarmonicMinor
                | ScaleId::MelodicMinor
                | ScaleId::PentatonicMinor
                | ScaleId::Phrygian
        )
    }
}

impl fmt::Display for ScaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Build the ordered pitch classes of a scale, tonic first.
///
/// The result length equals the scale's interval-table length. Fails when the
/// tonic is not one of the 12 canonical pitch classes.
pub fn build_scale(tonic: &str, scale: ScaleId) -> Result<Vec<Note>, TheoryError> {
    let root =
        Note::from_str(tonic).ok_or_else(|| TheoryError::UnsupportedTonic(tonic.to_string()))?;
    Ok(scale
        .intervals()
        .iter()
        .map(|&interval| Note::from_pitch_class(root.pitch_class() + interval))
        .collect())
}

/// MIDI number for a pitch class at an octave (C4 = 60)
pub fn note_to_midi(note: Note, octave: i8) -> MidiNote {
    ((octave as i16 + 1) * 12 + note.pitch_class() as i16) as MidiNote
}

/// Pitch class of a MIDI number (modulo 12)
pub fn midi_to_note(midi: MidiNote) -> Note {
    Note::from_pitch_class(midi % 12)
}

/// Equal-temperament frequency in Hz (A4 = 440 Hz, MIDI 69)
pub fn midi_to_frequency(midi: MidiNote) -> f64 {
    440.0 * 2f64.powf((midi as f64 - 69.0) / 12.0)
}
