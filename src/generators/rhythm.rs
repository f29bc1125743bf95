// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Step-grid rhythm construction.
//!
//! Builds one measure of onsets at a density- and meter-dependent grid
//! resolution, with weighted duration choice and motif-template reuse.

use rand::Rng;

use crate::config::{GeneratorSettings, Mode, TimeSignature};

use super::weighted_pick;

/// A single onset within a measure's step grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RhythmHit {
    /// Step offset from the measure start
    pub step_offset: usize,
    /// Length in steps; never extends past the measure
    pub duration_steps: usize,
}

/// Grid resolution per beat.
///
/// Higher density subdivides further; compound meter tops out at triplet feel.
pub fn steps_per_beat(settings: &GeneratorSettings) -> usize {
    if settings.time_signature == TimeSignature::SixEight {
        if settings.density >= 70 {
            return 3;
        }
        return if settings.density >= 40 { 2 } else { 1 };
    }

    if settings.density >= 72 {
        4
    } else if settings.density >= 38 {
        2
    } else {
        1
    }
}

/// Total grid steps in one measure
pub fn steps_per_measure(settings: &GeneratorSettings) -> usize {
    settings.beats_per_measure() * steps_per_beat(settings)
}

/// Candidate note durations (in steps) that fit the remaining measure span
fn rhythm_options(settings: &GeneratorSettings, remaining_steps: usize) -> Vec<usize> {
    let short = if settings.mode == Mode::Riff { 1 } else { 2 };
    let mut options: Vec<usize> = [short, 2, 4]
        .iter()
        .copied()
        .filter(|&duration| duration <= remaining_steps)
        .collect();

    if settings.time_signature == TimeSignature::SixEight && remaining_steps >= 3 {
        options.push(3);
    }

    options.sort_unstable();
    options.dedup();

    if options.is_empty() {
        // A 1-step tail in a mode whose shortest value is 2; take the tail.
        options.push(remaining_steps);
    }

    options
}

/// Generate one measure of onsets, optionally replaying a captured motif.
///
/// A motif template is reused verbatim when its last onset still fits the
/// grid; otherwise the measure is rolled fresh. Step 0 and strong beats
/// always play, and a measure is never left silent.
pub fn generate_measure_rhythm<R: Rng>(
    settings: &GeneratorSettings,
    steps_in_measure: usize,
    motif_template: Option<&[RhythmHit]>,
    rng: &mut R,
) -> Vec<RhythmHit> {
    if let Some(template) = motif_template {
        if template
            .last()
            .is_some_and(|hit| hit.step_offset < steps_in_measure)
        {
            return template
                .iter()
                .copied()
                .filter(|hit| hit.step_offset < steps_in_measure)
                .collect();
        }
    }

    let per_beat = steps_per_beat(settings);
    let rest_bias = (0.34 - settings.density as f64 / 420.0).max(0.08);
    let mut hits: Vec<RhythmHit> = Vec::new();
    let mut step = 0;

    while step < steps_in_measure {
        let beat_boundary = step % per_beat == 0;
        let strong_beat = step % (per_beat * 2) == 0;
        let boundary_penalty = if beat_boundary { 0.05 } else { 0.12 };
        let should_play =
            step == 0 || strong_beat || rng.gen::<f64>() > rest_bias + boundary_penalty;

        if !should_play {
            step += 1;
            continue;
        }

        let remaining_steps = steps_in_measure - step;
        let durations = rhythm_options(settings, remaining_steps);
        let duration_steps = *weighted_pick(rng, &durations, |&duration| {
            let long_bias = if strong_beat { 1.4 } else { 1.0 };
            let density_bias = if settings.density >= 65 {
                5.0 - duration as f64
            } else {
                duration as f64
            };
            density_bias.max(0.3) * long_bias
        });

        hits.push(RhythmHit { step_offset: step, duration_steps });
        step += duration_steps;
    }

    if hits.is_empty() {
        return vec![RhythmHit {
            step_offset: 0,
            duration_steps: steps_in_measure.min(2),
        }];
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimeSignature;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn settings_with_density(density: u8) -> GeneratorSettings {
        GeneratorSettings::default().with_density(density)
    }

    #[test]
    fn test_steps_per_beat_thresholds() {
        assert_eq!(steps_per_beat(&settings_with_density(0)), 1);
        assert_eq!(steps_per_beat(&settings_with_density(37)), 1);
        assert_eq!(steps_per_beat(&settings_with_density(38)), 2);
        assert_eq!(steps_per_beat(&settings_with_density(71)), 2);
        assert_eq!(steps_per_beat(&settings_with_density(72)), 4);
        assert_eq!(steps_per_beat(&settings_with_density(100)), 4);
    }

    #[test]
    fn test_steps_per_beat_compound_meter() {
        let mut settings = settings_with_density(0);
        settings.time_signature = TimeSignature::SixEight;

        settings.density = 39;
        assert_eq!(steps_per_beat(&settings), 1);
        settings.density = 40;
        assert_eq!(steps_per_beat(&settings), 2);
        settings.density = 69;
        assert_eq!(steps_per_beat(&settings), 2);
        settings.density = 70;
        assert_eq!(steps_per_beat(&settings), 3);
    }

    #[test]
    fn test_steps_per_measure() {
        let settings = settings_with_density(48);
        // 4 beats x 2 steps
        assert_eq!(steps_per_measure(&settings), 8);
    }

    #[test]
    fn test_measure_is_never_silent_and_fits() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            for density in [0u8, 30, 48, 72, 100] {
                let settings = settings_with_density(density);
                let steps = steps_per_measure(&settings);
                let hits = generate_measure_rhythm(&settings, steps, None, &mut rng);

                assert!(!hits.is_empty());
                for pair in hits.windows(2) {
                    assert!(pair[0].step_offset < pair[1].step_offset);
                }
                let last = hits.last().unwrap();
                assert!(last.step_offset + last.duration_steps <= steps);
                assert_eq!(hits[0].step_offset, 0, "measure always opens with a hit");
            }
        }
    }

    #[test]
    fn test_motif_template_is_replayed() {
        let settings = settings_with_density(48);
        let steps = steps_per_measure(&settings);
        let template = vec![
            RhythmHit { step_offset: 0, duration_steps: 2 },
            RhythmHit { step_offset: 4, duration_steps: 2 },
        ];

        let mut rng = StdRng::seed_from_u64(9);
        let replayed = generate_measure_rhythm(&settings, steps, Some(&template), &mut rng);
        assert_eq!(replayed, template);
    }

    #[test]
    fn test_stale_motif_is_regenerated() {
        let settings = settings_with_density(48);
        let steps = steps_per_measure(&settings);
        // Last onset beyond the grid: template no longer fits
        let template = vec![RhythmHit { step_offset: steps + 4, duration_steps: 2 }];

        let mut rng = StdRng::seed_from_u64(10);
        let hits = generate_measure_rhythm(&settings, steps, Some(&template), &mut rng);
        assert!(hits.iter().all(|hit| hit.step_offset < steps));
        assert!(!hits.is_empty());
    }

    #[test]
    fn test_melody_one_step_tail_is_filled() {
        // Melody mode in 6/8 can leave a 1-step tail where no standard
        // duration fits; the tail itself must become the candidate.
        let mut settings = GeneratorSettings::default().with_mode(Mode::Melody);
        settings.time_signature = TimeSignature::SixEight;
        assert_eq!(rhythm_options(&settings, 1), vec![1]);
    }

    #[test]
    fn test_rhythm_options_include_triplet_in_six_eight() {
        let mut settings = settings_with_density(48);
        settings.time_signature = TimeSignature::SixEight;
        let options = rhythm_options(&settings, 6);
        assert!(options.contains(&3));

        let plain = rhythm_options(&settings_with_density(48), 6);
        assert!(!plain.contains(&3));
    }

    #[test]
    fn test_density_raises_hit_count() {
        let mut sparse_total = 0;
        let mut dense_total = 0;

        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let sparse = settings_with_density(10);
            sparse_total +=
                generate_measure_rhythm(&sparse, steps_per_measure(&sparse), None, &mut rng).len();

            let dense = settings_with_density(90);
            dense_total +=
                generate_measure_rhythm(&dense, steps_per_measure(&dense), None, &mut rng).len();
        }

        assert!(dense_total > sparse_total);
    }
}
