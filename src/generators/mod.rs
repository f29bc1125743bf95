// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Generative engine for riffs, melodies, and progressions.
//!
//! This module family turns a settings value plus a random stream into timed
//! note/chord events: rhythm grids, harmonic progressions, melodic contour,
//! and the facade that orchestrates them.

pub mod contour;
pub mod progression;
pub mod rhythm;

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{GeneratorSettings, Mode};
use crate::music::fretboard::{playable_positions, FretPosition, ShapeEntry};
use crate::music::scale::{build_scale, Note};
use crate::music::TheoryError;
use crate::tab::render_tab;

/// Playing technique attached to a generated note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Technique {
    Bends,
    Slides,
    HammerOns,
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Technique::Bends => "bend",
            Technique::Slides => "slide",
            Technique::HammerOns => "hammer-on",
        };
        write!(f, "{}", label)
    }
}

/// A single generated note with its fretboard placement and timing
#[derive(Debug, Clone, PartialEq)]
pub struct NoteEvent {
    pub id: String,
    pub pitch_class: Note,
    pub midi: u8,
    pub frequency: f64,
    pub string_index: usize,
    pub fret: u8,
    /// Grid position across the whole phrase
    pub step_index: usize,
    pub start_beat: f64,
    pub duration_beats: f64,
    pub technique: Option<Technique>,
}

/// A chord slot within a generated progression
#[derive(Debug, Clone, PartialEq)]
pub struct ChordEvent {
    pub id: String,
    /// Display name (root + quality suffix)
    pub name: String,
    /// Scale degree, 1-based
    pub degree: usize,
    /// Triad pitch classes
    pub notes: Vec<Note>,
    /// One fret per string
    pub suggested_shape: Vec<ShapeEntry>,
    pub start_beat: f64,
    pub duration_beats: f64,
}

/// Complete result of one generation call.
///
/// Constructed fresh per call, immutable thereafter; regeneration replaces
/// the whole value rather than patching it.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedOutput {
    /// Note line (empty in chord mode)
    pub notes: Vec<NoteEvent>,
    /// Progression (empty outside chord mode)
    pub chords: Vec<ChordEvent>,
    /// One text row per string, conventional tab order
    pub tab: Vec<String>,
    pub summary: String,
}

/// Weighted random pick over a non-empty slice.
///
/// Weights are floored at 0.001 so zero-weight items cannot starve the draw;
/// the cursor walks cumulative weights and the last item backstops rounding.
pub fn weighted_pick<'a, T, R: Rng>(
    rng: &mut R,
    items: &'a [T],
    weight: impl Fn(&T) -> f64,
) -> &'a T {
    debug_assert!(!items.is_empty(), "weighted_pick requires a non-empty slice");

    let total: f64 = items.iter().map(|item| weight(item).max(0.001)).sum();
    let mut cursor = rng.gen::<f64>() * total;

    for item in items {
        cursor -= weight(item).max(0.001);
        if cursor <= 0.0 {
            return item;
        }
    }

    &items[items.len() - 1]
}

/// Generate a complete output using an entropy-seeded random source.
pub fn generate_output(settings: &GeneratorSettings) -> Result<GeneratedOutput, TheoryError> {
    let mut rng = StdRng::from_entropy();
    generate_output_with_rng(settings, &mut rng)
}

/// Generate a complete output from an injected random source.
///
/// Identical settings and an identical deterministic random sequence produce
/// identical output, which is what reproducible tests rely on.
pub fn generate_output_with_rng<R: Rng>(
    settings: &GeneratorSettings,
    rng: &mut R,
) -> Result<GeneratedOutput, TheoryError> {
    let scale_notes = build_scale(&settings.tonic, settings.scale)?;
    let mut positions =
        playable_positions(&settings.tuning, settings.lowest_fret, settings.highest_fret)?;
    positions.sort_by_key(|position| position.midi);

    let mut pool: Vec<FretPosition> = positions
        .iter()
        .copied()
        .filter(|position| scale_notes.contains(&position.pitch_class))
        .collect();
    if pool.is_empty() {
        // A degenerate fret window can exclude every scale tone. Falling back
        // to the full window keeps the output playable at the cost of scale
        // adherence; see the error-handling notes in DESIGN.md.
        debug!(
            lowest_fret = settings.lowest_fret,
            highest_fret = settings.highest_fret,
            "no scale tones in fret window, using unfiltered positions"
        );
        pool = positions;
    }

    let output = if settings.mode == Mode::Chord {
        let chords = progression::generate_progression(settings, rng)?;
        let tab = render_tab(settings, &[], &chords);
        let names: Vec<&str> = chords.iter().map(|chord| chord.name.as_str()).collect();
        let summary = format!("Forged {}.", names.join(" -> "));
        GeneratedOutput { notes: Vec::new(), chords, tab, summary }
    } else {
        let guide_chords = progression::measure_guide_chords(settings, rng)?;
        let notes = contour::generate_lead_notes(settings, &pool, &guide_chords, rng)?;
        let tab = render_tab(settings, &notes, &[]);
        let summary = format!(
            "Forged {} notes with motif reuse, chord-tone targets, and a {} contour.",
            notes.len(),
            settings.mode
        );
        GeneratedOutput { notes, chords: Vec::new(), tab, summary }
    };

    debug!(
        mode = %settings.mode,
        notes = output.notes.len(),
        chords = output.chords.len(),
        "generation complete"
    );
    Ok(output)
}
