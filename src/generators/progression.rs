// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord progression sequencing.
//!
//! Draws a degree template matching the scale's tonality, consumes its slots
//! cyclically, and spreads the chords evenly across the phrase.

use rand::Rng;

use crate::config::GeneratorSettings;
use crate::music::chords::{build_diatonic_chords, BORROWED_QUALITIES};
use crate::music::TheoryError;

use super::ChordEvent;

/// Degree templates for major-leaning tonalities
const MAJOR_PROGRESSIONS: [[usize; 4]; 4] = [
    [1, 5, 6, 4], // I-V-vi-IV
    [1, 4, 5, 1], // I-IV-V-I
    [6, 4, 1, 5], // vi-IV-I-V
    [2, 5, 1, 6], // ii-V-I-vi
];

/// Degree templates for minor-leaning tonalities
const MINOR_PROGRESSIONS: [[usize; 4]; 4] = [
    [1, 6, 3, 7], // i-vi-iii-vii
    [1, 7, 6, 7], // i-vii-vi-vii
    [6, 7, 1, 1], // vi-vii-i-i
    [1, 4, 7, 3], // i-iv-vii-iii
];

/// Generate `settings.chord_count` chords partitioning the phrase evenly.
pub fn generate_progression<R: Rng>(
    settings: &GeneratorSettings,
    rng: &mut R,
) -> Result<Vec<ChordEvent>, TheoryError> {
    generate_progression_slots(settings, settings.chord_count, rng)
}

fn generate_progression_slots<R: Rng>(
    settings: &GeneratorSettings,
    chord_count: usize,
    rng: &mut R,
) -> Result<Vec<ChordEvent>, TheoryError> {
    let chords = build_diatonic_chords(
        &settings.tonic,
        settings.scale,
        &settings.tuning,
        settings.lowest_fret,
        settings.highest_fret,
    )?;
    let templates: &[[usize; 4]; 4] = if settings.scale.is_minor_leaning() {
        &MINOR_PROGRESSIONS
    } else {
        &MAJOR_PROGRESSIONS
    };
    let template = &templates[rng.gen_range(0..templates.len())];

    let total_beats = (settings.beats_per_measure() * settings.measures) as f64;
    let chord_duration = total_beats / chord_count.max(1) as f64;

    let mut events = Vec::with_capacity(chord_count);
    for chord_index in 0..chord_count {
        let degree = template[chord_index % template.len()];
        let source = &chords[(degree - 1) % chords.len()];

        // Borrowed substitution renames the chord from the parallel mode;
        // root, triad, and shape stay put.
        let name = if settings.allow_borrowed_chords && chord_index % 4 == 3 {
            format!(
                "{}{}",
                source.notes[0],
                BORROWED_QUALITIES[(source.degree - 1) % 7]
            )
        } else {
            source.name.clone()
        };

        events.push(ChordEvent {
            id: format!("chord-{chord_index}"),
            name,
            degree: source.degree,
            notes: source.notes.clone(),
            suggested_shape: source.suggested_shape.clone(),
            start_beat: chord_index as f64 * chord_duration,
            duration_beats: chord_duration,
        });
    }

    Ok(events)
}

/// One guide chord per measure for lead generation.
///
/// The progression is generated with enough slots to cover every measure,
/// then each measure takes the slot at its index, clamped to the tail.
pub fn measure_guide_chords<R: Rng>(
    settings: &GeneratorSettings,
    rng: &mut R,
) -> Result<Vec<ChordEvent>, TheoryError> {
    let slots = settings.measures.max(settings.chord_count.min(4));
    let progression = generate_progression_slots(settings, slots, rng)?;

    Ok((0..settings.measures)
        .map(|measure_index| {
            progression[measure_index.min(progression.len() - 1)].clone()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::music::scale::{build_scale, ScaleId};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn chord_settings() -> GeneratorSettings {
        GeneratorSettings::default()
            .with_mode(Mode::Chord)
            .with_tonic("C")
            .with_scale(ScaleId::Major)
    }

    #[test]
    fn test_progression_partitions_phrase_evenly() {
        let settings = chord_settings();
        let mut rng = StdRng::seed_from_u64(21);
        let chords = generate_progression(&settings, &mut rng).unwrap();

        // 2 measures of 4/4 split into 4 chords of 2 beats
        assert_eq!(chords.len(), 4);
        for (index, chord) in chords.iter().enumerate() {
            assert!((chord.start_beat - index as f64 * 2.0).abs() < 1e-9);
            assert!((chord.duration_beats - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_progression_degrees_in_range() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let chords = generate_progression(&chord_settings(), &mut rng).unwrap();
            for chord in chords {
                assert!((1..=7).contains(&chord.degree));
                assert_eq!(chord.notes.len(), 3);
            }
        }
    }

    #[test]
    fn test_progression_triads_in_scale() {
        let settings = chord_settings();
        let scale = build_scale("C", ScaleId::Major).unwrap();
        let mut rng = StdRng::seed_from_u64(22);
        let chords = generate_progression(&settings, &mut rng).unwrap();

        for chord in chords {
            for note in chord.notes {
                assert!(scale.contains(&note));
            }
        }
    }

    #[test]
    fn test_minor_tonality_uses_minor_templates() {
        let settings = chord_settings().with_scale(ScaleId::NaturalMinor).with_tonic("A");
        // Minor templates never open on degree 2
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let chords = generate_progression(&settings, &mut rng).unwrap();
            assert_ne!(chords[0].degree, 2);
        }
    }

    #[test]
    fn test_chord_count_cycles_template() {
        let mut settings = chord_settings();
        settings.chord_count = 6;
        let mut rng = StdRng::seed_from_u64(23);
        let chords = generate_progression(&settings, &mut rng).unwrap();

        assert_eq!(chords.len(), 6);
        // Slot 4 repeats slot 0, slot 5 repeats slot 1
        assert_eq!(chords[4].degree, chords[0].degree);
        assert_eq!(chords[5].degree, chords[1].degree);
    }

    #[test]
    fn test_borrowed_substitution_renames_only() {
        let mut settings = chord_settings();
        settings.allow_borrowed_chords = true;
        settings.chord_count = 8;

        let mut rng = StdRng::seed_from_u64(24);
        let borrowed = generate_progression(&settings, &mut rng).unwrap();

        let mut rng = StdRng::seed_from_u64(24);
        settings.allow_borrowed_chords = false;
        let plain = generate_progression(&settings, &mut rng).unwrap();

        for (index, (with, without)) in borrowed.iter().zip(&plain).enumerate() {
            assert_eq!(with.degree, without.degree);
            assert_eq!(with.notes, without.notes);
            assert_eq!(with.suggested_shape, without.suggested_shape);
            if index % 4 == 3 {
                let root = with.notes[0].to_string();
                let expected_quality = BORROWED_QUALITIES[(with.degree - 1) % 7];
                assert_eq!(with.name, format!("{root}{expected_quality}"));
            } else {
                assert_eq!(with.name, without.name);
            }
        }
    }

    #[test]
    fn test_guide_chords_cover_every_measure() {
        let settings = GeneratorSettings::default().with_measures(5);
        let mut rng = StdRng::seed_from_u64(25);
        let guides = measure_guide_chords(&settings, &mut rng).unwrap();
        assert_eq!(guides.len(), 5);
    }

    #[test]
    fn test_pentatonic_progression_wraps_degrees() {
        let settings = chord_settings().with_scale(ScaleId::PentatonicMinor).with_tonic("E");
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let chords = generate_progression(&settings, &mut rng).unwrap();
            for chord in chords {
                assert!((1..=5).contains(&chord.degree));
            }
        }
    }
}
