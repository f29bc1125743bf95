// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::process;

use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use riff_forge::config::{GeneratorSettings, Mode, TimeSignature};
use riff_forge::generators::{generate_output, generate_output_with_rng};
use riff_forge::music::scale::ScaleId;

fn print_usage() {
    println!("RIFF FORGE - Guitar riff, melody, and progression generator");
    println!();
    println!("Usage: riff-forge [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config <FILE>       Load a settings preset (YAML)");
    println!("  --save-preset <FILE>  Save the effective settings to a preset file");
    println!("  --mode <MODE>         riff | melody | chord");
    println!("  --tonic <NOTE>        Tonic pitch class (e.g., E, F#)");
    println!("  --scale <SCALE>       Scale id (e.g., major, pentatonicMinor)");
    println!("  --time-sig <SIG>      4/4 | 3/4 | 6/8");
    println!("  --measures <N>        Number of measures");
    println!("  --density <N>         Complexity dial (0-100)");
    println!("  --chords <N>          Chord count (chord mode)");
    println!("  --seed <N>            Deterministic random seed");
    println!("  --help                Show this help message");
}

fn next_value<'a>(args: &'a [String], index: &mut usize, flag: &str) -> Result<&'a str> {
    *index += 1;
    args.get(*index)
        .map(|value| value.as_str())
        .ok_or_else(|| anyhow!("{flag} requires a value"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = env::args().collect();
    let mut settings = GeneratorSettings::default();
    let mut seed: Option<u64> = None;
    let mut save_path: Option<String> = None;

    let mut index = 1;
    while index < args.len() {
        match args[index].as_str() {
            "--config" => {
                let path = next_value(&args, &mut index, "--config")?;
                settings = GeneratorSettings::load(path)?;
            }
            "--save-preset" => {
                let path = next_value(&args, &mut index, "--save-preset")?;
                save_path = Some(path.to_string());
            }
            "--mode" => {
                let value = next_value(&args, &mut index, "--mode")?;
                settings.mode =
                    Mode::parse(value).ok_or_else(|| anyhow!("Unknown mode: {value}"))?;
            }
            "--tonic" => {
                settings.tonic = next_value(&args, &mut index, "--tonic")?.to_string();
            }
            "--scale" => {
                settings.scale = ScaleId::parse(next_value(&args, &mut index, "--scale")?)?;
            }
            "--time-sig" => {
                let value = next_value(&args, &mut index, "--time-sig")?;
                settings.time_signature = TimeSignature::parse(value)
                    .ok_or_else(|| anyhow!("Unknown time signature: {value}"))?;
            }
            "--measures" => {
                settings.measures = next_value(&args, &mut index, "--measures")?.parse()?;
            }
            "--density" => {
                settings.density = next_value(&args, &mut index, "--density")?.parse()?;
            }
            "--chords" => {
                settings.chord_count = next_value(&args, &mut index, "--chords")?.parse()?;
            }
            "--seed" => {
                seed = Some(next_value(&args, &mut index, "--seed")?.parse()?);
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other => {
                eprintln!("Unknown option: {other}");
                print_usage();
                process::exit(1);
            }
        }
        index += 1;
    }

    settings.validate()?;

    if let Some(path) = &save_path {
        settings.save(path)?;
        info!(path = %path, "preset saved");
    }

    let output = match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            generate_output_with_rng(&settings, &mut rng)?
        }
        None => generate_output(&settings)?,
    };

    println!(
        "{} {} in {} {} at {:.0} BPM ({})",
        settings.tonic,
        settings.scale.name(),
        settings.measures,
        if settings.measures == 1 { "measure" } else { "measures" },
        settings.tempo,
        settings.time_signature,
    );
    println!("{}", output.summary);
    println!();

    for chord in &output.chords {
        println!(
            "  {:<6} degree {}  beats {:.1}-{:.1}",
            chord.name,
            chord.degree,
            chord.start_beat,
            chord.start_beat + chord.duration_beats,
        );
    }
    if !output.chords.is_empty() {
        println!();
    }

    for line in &output.tab {
        println!("{line}");
    }

    Ok(())
}
