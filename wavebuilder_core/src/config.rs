use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::waveform::WaveShape;

/// One additive component of a composite table: a wave shape, the
/// number of cycles packed into one table period, and a mixing weight.
///
/// `amplitude` is a weight relative to the other oscillators in the
/// stack, not an absolute output level; the final normalization pass
/// maps the composite peak to `sample_max` whatever the weights sum to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillatorSpec {
    pub shape: WaveShape,
    pub overtone_ratio: f32,
    pub amplitude: f32,
}

impl OscillatorSpec {
    pub fn new(shape: WaveShape, overtone_ratio: f32, amplitude: f32) -> Self {
        Self {
            shape,
            overtone_ratio,
            amplitude,
        }
    }

    pub(crate) fn validate(&self, index: usize, cycle_limit: f32) -> Result<(), ConfigurationError> {
        if !self.overtone_ratio.is_finite() || self.overtone_ratio <= 0.0 {
            return Err(ConfigurationError::InvalidOvertoneRatio {
                index,
                ratio: self.overtone_ratio,
            });
        }
        if !self.amplitude.is_finite() || !(0.0..=1.0).contains(&self.amplitude) {
            return Err(ConfigurationError::InvalidAmplitude {
                index,
                amplitude: self.amplitude,
            });
        }
        if self.shape.is_pitched() && self.overtone_ratio > cycle_limit {
            return Err(ConfigurationError::AliasingRatio {
                index,
                ratio: self.overtone_ratio,
                limit: cycle_limit,
            });
        }
        Ok(())
    }
}

/// Table parameters for a [`crate::WaveTableBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveBuilderConfig {
    /// Number of samples in one playback cycle.
    pub table_length: usize,
    /// Peak magnitude of the rendered table, within 1..=32767.
    #[serde(default = "default_sample_max")]
    pub sample_max: i16,
    /// Shaping exponent applied to the normalized composite; 1.0 leaves
    /// the waveform untouched. See [`crate::builder`] for the curve.
    #[serde(default = "default_lambda_factor")]
    pub lambda_factor: f32,
    /// Crossfade the end of the table toward the start so the loop wrap
    /// point is click-free.
    #[serde(default)]
    pub loop_smoothing: bool,
}

impl WaveBuilderConfig {
    /// Check the table parameters, independent of any oscillator list.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.table_length == 0 {
            return Err(ConfigurationError::InvalidTableLength);
        }
        if self.sample_max < 1 {
            return Err(ConfigurationError::InvalidSampleMax(self.sample_max));
        }
        if !self.lambda_factor.is_finite() || self.lambda_factor <= 0.0 {
            return Err(ConfigurationError::InvalidLambdaFactor(self.lambda_factor));
        }
        Ok(())
    }

    /// Highest representable cycle count for this table length. An
    /// oscillator needs at least two samples per cycle.
    pub fn cycle_limit(&self) -> f32 {
        self.table_length as f32 / 2.0
    }
}

impl Default for WaveBuilderConfig {
    /// A 512-sample table at full signed 16-bit scale, no reshaping,
    /// no loop smoothing.
    fn default() -> Self {
        Self {
            table_length: 512,
            sample_max: default_sample_max(),
            lambda_factor: default_lambda_factor(),
            loop_smoothing: false,
        }
    }
}

fn default_sample_max() -> i16 {
    32767
}

fn default_lambda_factor() -> f32 {
    1.0
}

/// A complete builder description, table parameters plus oscillator
/// stack, loadable from a JSON preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WavePreset {
    #[serde(flatten)]
    pub config: WaveBuilderConfig,
    pub oscillators: Vec<OscillatorSpec>,
}

impl WavePreset {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
