//! Additive construction of single-cycle wave tables.
//!
//! A [`WaveTableBuilder`] combines a stack of oscillator components
//! (wave shape, overtone ratio, relative amplitude) into one
//! fixed-length buffer of signed 16-bit samples, ready to be looped by
//! a wavetable synthesis engine. The builder handles weighted
//! summation, peak normalization, optional lambda reshaping, and
//! smoothing of the loop wrap point; audio output, mixing, and voice
//! management belong to whatever consumes the finished table.
//!
//! ```
//! use wavebuilder_core::{OscillatorSpec, WaveBuilderConfig, WaveShape, WaveTableBuilder};
//!
//! let oscillators = vec![
//!     OscillatorSpec::new(WaveShape::Sine, 1.0, 0.6),
//!     OscillatorSpec::new(WaveShape::Sine, 2.0, 0.3),
//! ];
//! let config = WaveBuilderConfig {
//!     table_length: 512,
//!     sample_max: 32700,
//!     ..WaveBuilderConfig::default()
//! };
//!
//! let builder = WaveTableBuilder::new(oscillators, config).unwrap();
//! assert_eq!(builder.wave_table().len(), 512);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod waveform;

pub use builder::{BuildStats, WaveTableBuilder};
pub use config::{OscillatorSpec, WaveBuilderConfig, WavePreset};
pub use error::ConfigurationError;
pub use waveform::WaveShape;
