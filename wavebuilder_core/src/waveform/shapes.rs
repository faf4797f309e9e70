use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use super::noise;

/// The supported base wave shapes.
///
/// Each shape is a pure function from a phase fraction in `[0.0, 1.0)`
/// to a normalized amplitude in `[-1.0, 1.0]`. Adding a shape means
/// adding a variant plus its arm in [`WaveShape::sample`]; the
/// summation and normalization pipeline is untouched by new shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveShape {
    Sine,
    Square,
    Triangle,
    Saw,
    Noise,
}

impl WaveShape {
    /// Sample this shape at a normalized phase in `[0.0, 1.0)`.
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            WaveShape::Sine => (2.0 * PI * phase).sin(),
            WaveShape::Square => {
                if phase < 0.5 { 1.0 } else { -1.0 }
            }
            WaveShape::Triangle => {
                if phase < 0.25 {
                    4.0 * phase
                } else if phase < 0.75 {
                    2.0 - 4.0 * phase
                } else {
                    4.0 * phase - 4.0
                }
            }
            WaveShape::Saw => 2.0 * phase - 1.0,
            WaveShape::Noise => noise::phase_noise(phase),
        }
    }

    /// Whether the shape carries a fundamental frequency. The aliasing
    /// guard only applies to pitched shapes; noise is exempt.
    pub fn is_pitched(self) -> bool {
        !matches!(self, WaveShape::Noise)
    }
}
