// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Generator settings and preset persistence.
//!
//! Settings are the single input contract: generation is a pure function of
//! a settings value plus the random stream. Presets round-trip through YAML
//! verbatim; the engine itself never touches storage.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::music::scale::ScaleId;
use crate::music::tuning::Tuning;

/// Generation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Single-line riff: tight positions, tonic/fifth targets
    Riff,
    /// Single-line melody: wider leaps, ornamental motion
    Melody,
    /// Chord progression only
    Chord,
}

impl Mode {
    /// Parse a mode string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "riff" => Some(Mode::Riff),
            "melody" => Some(Mode::Melody),
            "chord" => Some(Mode::Chord),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Mode::Riff => "riff",
            Mode::Melody => "melody",
            Mode::Chord => "chord",
        };
        write!(f, "{}", label)
    }
}

/// Supported meters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeSignature {
    #[serde(rename = "4/4")]
    FourFour,
    #[serde(rename = "3/4")]
    ThreeFour,
    #[serde(rename = "6/8")]
    SixEight,
}

impl TimeSignature {
    /// Beats per measure (the numerator; 6/8 counts six grid beats)
    pub fn beats_per_measure(self) -> usize {
        match self {
            TimeSignature::FourFour => 4,
            TimeSignature::ThreeFour => 3,
            TimeSignature::SixEight => 6,
        }
    }

    /// Whether this is a compound meter
    pub fn is_compound(self) -> bool {
        matches!(self, TimeSignature::SixEight)
    }

    /// Parse a time signature string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "4/4" => Some(TimeSignature::FourFour),
            "3/4" => Some(TimeSignature::ThreeFour),
            "6/8" => Some(TimeSignature::SixEight),
            _ => None,
        }
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimeSignature::FourFour => "4/4",
            TimeSignature::ThreeFour => "3/4",
            TimeSignature::SixEight => "6/8",
        };
        write!(f, "{}", label)
    }
}

/// Playing-technique toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechniqueFlags {
    #[serde(default = "default_true")]
    pub bends: bool,
    #[serde(default = "default_true")]
    pub slides: bool,
    #[serde(default = "default_true")]
    pub hammer_ons: bool,
}

impl TechniqueFlags {
    /// Whether any technique is enabled
    pub fn any(self) -> bool {
        self.bends || self.slides || self.hammer_ons
    }
}

impl Default for TechniqueFlags {
    fn default() -> Self {
        Self { bends: true, slides: true, hammer_ons: true }
    }
}

fn default_true() -> bool {
    true
}

fn default_mode() -> Mode {
    Mode::Riff
}
fn default_tonic() -> String {
    "E".to_string()
}
fn default_scale() -> ScaleId {
    ScaleId::PentatonicMinor
}
fn default_tempo() -> f64 {
    120.0
}
fn default_time_signature() -> TimeSignature {
    TimeSignature::FourFour
}
fn default_measures() -> usize {
    2
}
fn default_density() -> u8 {
    48
}
fn default_highest_fret() -> u8 {
    12
}
fn default_chord_count() -> usize {
    4
}

/// Complete input contract for one generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    #[serde(default = "default_mode")]
    pub mode: Mode,
    /// Tonic pitch class, sharps preferred (e.g., "E", "F#")
    #[serde(default = "default_tonic")]
    pub tonic: String,
    #[serde(default = "default_scale")]
    pub scale: ScaleId,
    /// Tempo in BPM
    #[serde(default = "default_tempo")]
    pub tempo: f64,
    #[serde(default = "default_time_signature")]
    pub time_signature: TimeSignature,
    #[serde(default = "default_measures")]
    pub measures: usize,
    /// Complexity dial (0-100)
    #[serde(default = "default_density")]
    pub density: u8,
    #[serde(default)]
    pub lowest_fret: u8,
    #[serde(default = "default_highest_fret")]
    pub highest_fret: u8,
    #[serde(default)]
    pub tuning: Tuning,
    #[serde(default)]
    pub techniques: TechniqueFlags,
    #[serde(default = "default_chord_count")]
    pub chord_count: usize,
    #[serde(default)]
    pub allow_borrowed_chords: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            tonic: default_tonic(),
            scale: default_scale(),
            tempo: default_tempo(),
            time_signature: default_time_signature(),
            measures: default_measures(),
            density: default_density(),
            lowest_fret: 0,
            highest_fret: default_highest_fret(),
            tuning: Tuning::default(),
            techniques: TechniqueFlags::default(),
            chord_count: default_chord_count(),
            allow_borrowed_chords: false,
        }
    }
}

impl GeneratorSettings {
    /// Load a settings preset from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read preset file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML settings")
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize settings to YAML")
    }

    /// Save settings to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write preset file: {:?}", path.as_ref()))
    }

    /// Check structural bounds before generation
    pub fn validate(&self) -> Result<()> {
        if self.lowest_fret > self.highest_fret {
            bail!(
                "lowest fret {} exceeds highest fret {}",
                self.lowest_fret,
                self.highest_fret
            );
        }
        if self.highest_fret > 24 {
            bail!("highest fret {} is beyond the fretboard", self.highest_fret);
        }
        if self.density > 100 {
            bail!("density {} is out of range 0-100", self.density);
        }
        if self.measures == 0 {
            bail!("measure count must be at least 1");
        }
        if self.chord_count == 0 {
            bail!("chord count must be at least 1");
        }
        if self.tempo <= 0.0 {
            bail!("tempo must be positive, got {}", self.tempo);
        }
        if self.tuning.strings.is_empty() {
            bail!("tuning has no strings");
        }
        Ok(())
    }

    /// Seconds per beat for playback scheduling
    pub fn seconds_per_beat(&self) -> f64 {
        60.0 / self.tempo
    }

    /// Beats per measure under the current meter
    pub fn beats_per_measure(&self) -> usize {
        self.time_signature.beats_per_measure()
    }

    /// A copy with a different mode
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// A copy with a different tonic
    pub fn with_tonic(mut self, tonic: &str) -> Self {
        self.tonic = tonic.to_string();
        self
    }

    /// A copy with a different scale
    pub fn with_scale(mut self, scale: ScaleId) -> Self {
        self.scale = scale;
        self
    }

    /// A copy with a different density
    pub fn with_density(mut self, density: u8) -> Self {
        self.density = density;
        self
    }

    /// A copy with a different measure count
    pub fn with_measures(mut self, measures: usize) -> Self {
        self.measures = measures;
        self
    }

    /// A copy with a different fret window
    pub fn with_fret_window(mut self, lowest_fret: u8, highest_fret: u8) -> Self {
        self.lowest_fret = lowest_fret;
        self.highest_fret = highest_fret;
        self
    }
}
