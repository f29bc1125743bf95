// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Melodic contour selection.
//!
//! Chooses a concrete fretboard position for every rhythmic onset, balancing
//! harmonic targets, melodic smoothness, cadential resolution, and the
//! relative pitch shape of a reused motif.

use rand::Rng;

use crate::config::{GeneratorSettings, Mode};
use crate::music::chords::build_diatonic_chords;
use crate::music::fretboard::FretPosition;
use crate::music::scale::{build_scale, Note};
use crate::music::TheoryError;

use super::rhythm::{self, generate_measure_rhythm, RhythmHit};
use super::{weighted_pick, ChordEvent, NoteEvent, Technique};

/// Captured rhythm and relative pitch shape, reused across measures
#[derive(Debug, Clone)]
struct MotifShape {
    rhythm: Vec<RhythmHit>,
    /// Chosen MIDI offsets from the measure anchor, one per onset
    relative_midis: Vec<i32>,
}

/// Collect notes in first-seen order, dropping duplicates
fn dedup_notes(notes: impl IntoIterator<Item = Note>) -> Vec<Note> {
    let mut seen: Vec<Note> = Vec::new();
    for note in notes {
        if !seen.contains(&note) {
            seen.push(note);
        }
    }
    seen
}

/// Pick a measure anchor near the pool's pitch midpoint.
///
/// The pool is narrowed to the harmonic target pitch classes when any
/// position matches them; riff mode additionally prefers lower frets.
fn find_central_anchor<R: Rng>(
    positions: &[FretPosition],
    pitch_classes: &[Note],
    mode: Mode,
    rng: &mut R,
) -> FretPosition {
    let matching: Vec<FretPosition> = positions
        .iter()
        .copied()
        .filter(|position| pitch_classes.contains(&position.pitch_class))
        .collect();
    let pool: &[FretPosition] = if matching.is_empty() { positions } else { &matching };
    let center_midi = (pool[0].midi as f64 + pool[pool.len() - 1].midi as f64) / 2.0;

    *weighted_pick(rng, pool, |position| {
        let distance = (position.midi as f64 - center_midi).abs();
        let fret_bias = if mode == Mode::Riff {
            1.0 / (1.0 + position.fret as f64 * 0.08)
        } else {
            1.0
        };
        (12.0 - distance.min(11.0)) * fret_bias
    })
}

/// Choose the position for one onset.
///
/// Candidates are the positions matching the target pitch classes (or the
/// whole pool when none match), constrained to a bounded leap from the
/// previous note; an empty constrained pool relaxes back to the pitch pool.
#[allow(clippy::too_many_arguments)]
fn choose_position<R: Rng>(
    positions: &[FretPosition],
    previous: Option<FretPosition>,
    anchor: FretPosition,
    target_pitch_classes: &[Note],
    settings: &GeneratorSettings,
    is_phrase_ending: bool,
    motif_midi_target: Option<i32>,
    rng: &mut R,
) -> FretPosition {
    let max_leap: i32 = if settings.mode == Mode::Melody { 7 } else { 5 };

    let target_pool: Vec<FretPosition> = positions
        .iter()
        .copied()
        .filter(|position| target_pitch_classes.contains(&position.pitch_class))
        .collect();
    let pitch_pool: Vec<FretPosition> =
        if target_pool.is_empty() { positions.to_vec() } else { target_pool };

    let constrained_pool: Vec<FretPosition> = match previous {
        None => pitch_pool.clone(),
        Some(prev) => pitch_pool
            .iter()
            .copied()
            .filter(|position| {
                (position.midi as i32 - prev.midi as i32).abs() <= max_leap + 2
            })
            .collect(),
    };
    let pool: &[FretPosition] =
        if constrained_pool.is_empty() { &pitch_pool } else { &constrained_pool };

    *weighted_pick(rng, pool, |position| {
        let previous_distance =
            previous.map_or(0.0, |prev| (position.midi as f64 - prev.midi as f64).abs());
        let anchor_distance = (position.midi as f64 - anchor.midi as f64).abs();
        let motif_distance = motif_midi_target
            .map_or(0.0, |target| (position.midi as i32 - target).abs() as f64);
        let cadence_bonus = if is_phrase_ending
            && target_pitch_classes.contains(&position.pitch_class)
        {
            4.0
        } else {
            1.0
        };
        let string_bias = match previous {
            Some(prev)
                if settings.mode == Mode::Riff
                    && prev.string_index == position.string_index =>
            {
                1.4
            }
            _ => 1.0,
        };

        cadence_bonus * string_bias * 10.0
            / (1.0 + previous_distance * 1.3 + anchor_distance * 0.45 + motif_distance * 0.6)
    })
}

/// Technique eligibility keyed by fret-interval thresholds.
///
/// Every 4th note with a previous note and a nonzero interval gets a tag:
/// small intervals hammer on, medium intervals slide, wide intervals bend,
/// each gated on its flag.
fn attach_technique(
    settings: &GeneratorSettings,
    note_index: usize,
    previous: Option<FretPosition>,
    current: FretPosition,
) -> Option<Technique> {
    if !settings.techniques.any() {
        return None;
    }
    let previous = previous?;

    let interval = (current.fret as i32 - previous.fret as i32).abs();
    if interval == 0 || note_index % 4 != 3 {
        return None;
    }

    if interval <= 2 && settings.techniques.hammer_ons {
        return Some(Technique::HammerOns);
    }
    if interval <= 4 && settings.techniques.slides {
        return Some(Technique::Slides);
    }
    if settings.techniques.bends {
        Some(Technique::Bends)
    } else {
        None
    }
}

/// Generate the full note line for riff/melody modes.
///
/// `scale_positions` is the MIDI-sorted candidate pool computed by the
/// facade; `measure_guide_chords` supplies one harmonic context per measure.
pub fn generate_lead_notes<R: Rng>(
    settings: &GeneratorSettings,
    scale_positions: &[FretPosition],
    measure_guide_chords: &[ChordEvent],
    rng: &mut R,
) -> Result<Vec<NoteEvent>, TheoryError> {
    let per_beat = rhythm::steps_per_beat(settings);
    let beats_per_measure = settings.beats_per_measure();
    let steps_in_measure = beats_per_measure * per_beat;

    let scale_notes = build_scale(&settings.tonic, settings.scale)?;
    let diatonic = build_diatonic_chords(
        &settings.tonic,
        settings.scale,
        &settings.tuning,
        settings.lowest_fret,
        settings.highest_fret,
    )?;
    let tonic = scale_notes[0];
    let fifth = scale_notes[4.min(scale_notes.len() - 1)];
    let tonic_third = diatonic[0].notes.get(1).copied().unwrap_or(tonic);
    let stable_riff_targets = [tonic, fifth, tonic_third];

    let mut notes: Vec<NoteEvent> = Vec::new();
    let mut previous: Option<FretPosition> = None;
    let mut motif: Option<MotifShape> = None;

    for measure_index in 0..settings.measures {
        let guide_notes: &[Note] = measure_guide_chords
            .get(measure_index.min(measure_guide_chords.len().saturating_sub(1)))
            .map(|chord| chord.notes.as_slice())
            .unwrap_or(&diatonic[0].notes);

        let reuse_motif =
            motif.is_some() && measure_index > 0 && rng.gen::<f64>() < 0.55;
        let motif_rhythm = if reuse_motif {
            motif.as_ref().map(|shape| shape.rhythm.as_slice())
        } else {
            None
        };
        let measure_rhythm =
            generate_measure_rhythm(settings, steps_in_measure, motif_rhythm, rng);

        let target_pitch_classes: Vec<Note> = if settings.mode == Mode::Riff {
            dedup_notes(stable_riff_targets.iter().chain(guide_notes).copied())
        } else {
            dedup_notes(guide_notes.iter().copied().chain([tonic]))
        };
        let anchor =
            find_central_anchor(scale_positions, &target_pitch_classes, settings.mode, rng);

        let mut relative_midis: Vec<i32> = Vec::new();
        let hit_count = measure_rhythm.len();

        for (hit_index, hit) in measure_rhythm.iter().enumerate() {
            let is_measure_start = hit.step_offset == 0;
            let is_phrase_ending = hit_index == hit_count - 1;
            let strong_beat = hit.step_offset % per_beat == 0;
            let beat_index = hit.step_offset / per_beat;

            let local_targets: Vec<Note> = if is_phrase_ending {
                // Cadence: resolve toward tonic, chord root, chord fifth
                let mut targets = vec![tonic];
                targets.extend(guide_notes.first().copied());
                targets.extend(guide_notes.get(2).copied());
                targets
            } else if strong_beat {
                guide_notes.to_vec()
            } else {
                target_pitch_classes.clone()
            };

            let motif_midi_target = if reuse_motif {
                motif
                    .as_ref()
                    .and_then(|shape| shape.relative_midis.get(hit_index))
                    .map(|relative| anchor.midi as i32 + relative)
            } else {
                None
            };

            let chosen = choose_position(
                scale_positions,
                previous,
                anchor,
                &local_targets,
                settings,
                is_phrase_ending,
                motif_midi_target,
                rng,
            );

            let duration_beats = hit.duration_steps as f64 / per_beat as f64;
            let global_step = measure_index * steps_in_measure + hit.step_offset;
            let start_beat = (measure_index * beats_per_measure + beat_index) as f64
                + (hit.step_offset % per_beat) as f64 / per_beat as f64;
            let technique = attach_technique(settings, notes.len(), previous, chosen);

            notes.push(NoteEvent {
                id: format!("note-{measure_index}-{hit_index}"),
                pitch_class: chosen.pitch_class,
                midi: chosen.midi,
                frequency: chosen.frequency,
                string_index: chosen.string_index,
                fret: chosen.fret,
                step_index: global_step,
                start_beat,
                duration_beats,
                technique,
            });

            previous = Some(chosen);
            relative_midis.push(chosen.midi as i32 - anchor.midi as i32);

            // Ornamental connecting position: steers the next pick upward
            // without consuming a rhythm slot or emitting an event.
            if is_measure_start && settings.mode == Mode::Melody && rng.gen::<f64>() < 0.6 {
                previous = Some(choose_position(
                    scale_positions,
                    Some(chosen),
                    anchor,
                    guide_notes,
                    settings,
                    false,
                    Some(chosen.midi as i32 + 2),
                    rng,
                ));
            }
        }

        if measure_index == 0 || rng.gen::<f64>() < 0.3 {
            motif = Some(MotifShape { rhythm: measure_rhythm, relative_midis });
        }
    }

    Ok(notes)
}
