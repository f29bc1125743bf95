// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Guitar tunings and open-string note parsing.

use serde::{Deserialize, Serialize};

use super::scale::Note;
use super::TheoryError;

/// A guitar tuning: open-string note names, low string first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tuning {
    /// Display name
    pub name: String,
    /// Open-string note names (e.g., "E2"), string index 0 is the lowest string
    pub strings: Vec<String>,
    /// User-edited tuning, not validated against musical convention
    #[serde(default)]
    pub is_custom: bool,
}

impl Tuning {
    /// Standard six-string tuning
    pub fn standard() -> Self {
        Self {
            name: "Standard EADGBE".to_string(),
            strings: ["E2", "A2", "D3", "G3", "B3", "E4"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            is_custom: false,
        }
    }

    /// Drop D tuning
    pub fn drop_d() -> Self {
        Self {
            name: "Drop D".to_string(),
            strings: ["D2", "A2", "D3", "G3", "B3", "E4"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            is_custom: false,
        }
    }

    /// All built-in tunings
    pub fn builtin() -> Vec<Tuning> {
        vec![Tuning::standard(), Tuning::drop_d()]
    }

    /// Number of strings
    pub fn string_count(&self) -> usize {
        self.strings.len()
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning::standard()
    }
}

/// Parse an open-string note name like "E2" or "F#3".
///
/// The name must match `<pitch class><octave digit>` exactly; anything else
/// fails fast rather than guessing intent.
pub fn parse_note_name(name: &str) -> Result<(Note, i8), TheoryError> {
    let invalid = || TheoryError::InvalidNoteName(name.to_string());

    let mut chars = name.chars();
    let letter = chars.next().ok_or_else(invalid)?;
    if !('A'..='G').contains(&letter) {
        return Err(invalid());
    }

    let rest: Vec<char> = chars.collect();
    let (pitch, octave_char) = match rest.as_slice() {
        [octave] => (letter.to_string(), *octave),
        ['#', octave] => (format!("{letter}#"), *octave),
        _ => return Err(invalid()),
    };

    let octave = octave_char.to_digit(10).ok_or_else(invalid)? as i8;
    let note = Note::from_str(&pitch).ok_or_else(invalid)?;
    Ok((note, octave))
}
