use thiserror::Error;

/// Rejection of a builder configuration or oscillator list.
///
/// These errors are raised at construction or reconfiguration time,
/// never mid-build. A failed reconfiguration leaves the previously
/// built table, configuration, and oscillator list untouched.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("table_length must be greater than zero")]
    InvalidTableLength,

    #[error("sample_max must be within 1..=32767, got {0}")]
    InvalidSampleMax(i16),

    #[error("lambda_factor must be finite and greater than zero, got {0}")]
    InvalidLambdaFactor(f32),

    #[error("oscillator {index}: overtone_ratio must be finite and greater than zero, got {ratio}")]
    InvalidOvertoneRatio { index: usize, ratio: f32 },

    #[error("oscillator {index}: amplitude must be within 0.0..=1.0, got {amplitude}")]
    InvalidAmplitude { index: usize, amplitude: f32 },

    #[error(
        "oscillator {index}: overtone_ratio {ratio} exceeds the {limit} cycle limit of the table"
    )]
    AliasingRatio { index: usize, ratio: f32, limit: f32 },
}
