// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory foundation for Riff Forge.
//!
//! This module provides scale definitions, tuning and note-name parsing,
//! fretboard position mapping, and diatonic chord construction.

pub mod chords;
pub mod fretboard;
pub mod scale;
pub mod tuning;

pub use fretboard::{FretPosition, ShapeEntry};
pub use scale::{Note, ScaleId};
pub use tuning::Tuning;

use thiserror::Error;

/// Errors raised by the theory layer.
///
/// These are not recoverable internally: an unrecognized tonic or scale means
/// the caller handed over a combination it should never have permitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    /// The tonic string is not one of the 12 canonical pitch classes.
    #[error("unsupported tonic: {0}")]
    UnsupportedTonic(String),
    /// The scale id string does not name a known scale.
    #[error("unsupported scale: {0}")]
    UnsupportedScale(String),
    /// An open-string note name does not match the `<pitch class><octave>` pattern.
    #[error("invalid note name: {0}")]
    InvalidNoteName(String),
}
