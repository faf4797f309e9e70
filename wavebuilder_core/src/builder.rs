use std::f32::consts::PI;
use std::sync::Arc;

use log::{debug, warn};

use crate::config::{OscillatorSpec, WaveBuilderConfig, WavePreset};
use crate::error::ConfigurationError;

// Loop smoothing crossfades the last `table_length / 64` samples,
// bounded to a sensible window for very short or very long tables.
const SMOOTHING_DIVISOR: usize = 64;
const SMOOTHING_WINDOW_MAX: usize = 64;

/// Diagnostics captured during the most recent rebuild. Informational
/// only; none of these values feed back into the produced table.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BuildStats {
    /// Sum of the absolute oscillator amplitudes.
    pub summed_amplitude: f32,
    /// Peak magnitude of the raw composite before normalization.
    pub peak_raw: f32,
    /// Wrap-point discontinuity as a percentage of `sample_max`.
    pub loop_distortion_pct: f32,
    /// Samples clamped during integer quantization.
    pub clipped_samples: usize,
}

/// Builds a single-cycle composite wave table from a stack of
/// oscillators.
///
/// The builder owns its configuration, oscillator list, and rendered
/// table. Rendering is synchronous: every constructor and setter
/// returns with a fully built table installed, or with an error and
/// the previous state untouched. The exposed buffer is replaced
/// wholesale on rebuild, never mutated in place, so a consumer holding
/// a [`WaveTableBuilder::share_table`] handle keeps reading a complete
/// cycle while the builder works.
#[derive(Debug)]
pub struct WaveTableBuilder {
    oscillators: Vec<OscillatorSpec>,
    config: WaveBuilderConfig,
    table: Arc<[i16]>,
    stats: BuildStats,
    // f32 working buffer reused across rebuilds.
    scratch: Vec<f32>,
}

impl WaveTableBuilder {
    /// Create a builder and render its first table.
    pub fn new(
        oscillators: Vec<OscillatorSpec>,
        config: WaveBuilderConfig,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        validate_oscillators(&oscillators, &config)?;

        let mut builder = Self {
            oscillators,
            config,
            table: Vec::new().into(),
            stats: BuildStats::default(),
            scratch: Vec::new(),
        };
        builder.rebuild();
        Ok(builder)
    }

    /// Positional constructor mirroring the classic builder surface.
    pub fn construct(
        oscillators: Vec<OscillatorSpec>,
        table_length: usize,
        sample_max: i16,
        lambda_factor: f32,
        loop_smoothing: bool,
    ) -> Result<Self, ConfigurationError> {
        Self::new(
            oscillators,
            WaveBuilderConfig {
                table_length,
                sample_max,
                lambda_factor,
                loop_smoothing,
            },
        )
    }

    /// Create a builder from a deserialized preset.
    pub fn from_preset(preset: WavePreset) -> Result<Self, ConfigurationError> {
        Self::new(preset.oscillators, preset.config)
    }

    /// Replace the oscillator list and synchronously rebuild the table.
    pub fn set_oscillators(
        &mut self,
        oscillators: Vec<OscillatorSpec>,
    ) -> Result<(), ConfigurationError> {
        validate_oscillators(&oscillators, &self.config)?;
        self.oscillators = oscillators;
        self.rebuild();
        Ok(())
    }

    /// Change the table length and synchronously rebuild the table.
    pub fn set_table_length(&mut self, table_length: usize) -> Result<(), ConfigurationError> {
        let candidate = WaveBuilderConfig {
            table_length,
            ..self.config
        };
        candidate.validate()?;
        // A shorter table may no longer represent the existing stack.
        validate_oscillators(&self.oscillators, &candidate)?;
        self.config = candidate;
        self.rebuild();
        Ok(())
    }

    /// Change the peak sample magnitude and synchronously rebuild.
    pub fn set_sample_max(&mut self, sample_max: i16) -> Result<(), ConfigurationError> {
        let candidate = WaveBuilderConfig {
            sample_max,
            ..self.config
        };
        candidate.validate()?;
        self.config = candidate;
        self.rebuild();
        Ok(())
    }

    /// Change the shaping exponent and synchronously rebuild.
    pub fn set_lambda_factor(&mut self, lambda_factor: f32) -> Result<(), ConfigurationError> {
        let candidate = WaveBuilderConfig {
            lambda_factor,
            ..self.config
        };
        candidate.validate()?;
        self.config = candidate;
        self.rebuild();
        Ok(())
    }

    /// Toggle wrap-point smoothing and synchronously rebuild. Cannot
    /// fail; the `Result` keeps the setter surface uniform.
    pub fn set_loop_smoothing(&mut self, loop_smoothing: bool) -> Result<(), ConfigurationError> {
        self.config.loop_smoothing = loop_smoothing;
        self.rebuild();
        Ok(())
    }

    /// The current table, read-only. Exactly `table_length` samples,
    /// each within `[-sample_max, sample_max]`.
    pub fn wave_table(&self) -> &[i16] {
        &self.table
    }

    /// A cheap handle to the current table. The handle stays valid and
    /// unchanged across later rebuilds, which install a fresh buffer
    /// rather than touching this one.
    pub fn share_table(&self) -> Arc<[i16]> {
        Arc::clone(&self.table)
    }

    pub fn oscillators(&self) -> &[OscillatorSpec] {
        &self.oscillators
    }

    pub fn config(&self) -> &WaveBuilderConfig {
        &self.config
    }

    /// Diagnostics from the most recent rebuild.
    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    // Renders the already-validated configuration into a fresh table
    // and installs it. Infallible: validation happened at the call
    // boundary, and an all-silent stack renders as zeros.
    fn rebuild(&mut self) {
        let len = self.config.table_length;
        let max = self.config.sample_max as f32;

        self.scratch.clear();
        self.scratch.resize(len, 0.0);

        // Elementwise sum of every oscillator's cycle.
        for osc in &self.oscillators {
            if osc.amplitude == 0.0 {
                continue;
            }
            let step = osc.overtone_ratio / len as f32;
            for (i, slot) in self.scratch.iter_mut().enumerate() {
                let phase = (i as f32 * step).fract();
                *slot += osc.shape.sample(phase) * osc.amplitude;
            }
        }

        let peak = self.scratch.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));

        let mut clipped = 0usize;
        let table: Arc<[i16]> = if peak > 0.0 {
            // Map the composite peak exactly to sample_max, bending the
            // amplitude curve through the lambda hook on the way.
            let inv_peak = 1.0 / peak;
            let lambda = self.config.lambda_factor;
            for slot in &mut self.scratch {
                *slot = reshape(*slot * inv_peak, lambda) * max;
            }

            if self.config.loop_smoothing {
                smooth_loop(&mut self.scratch);
            }

            // Quantize straight into the installed buffer; the sized
            // iterator collects into the Arc in one allocation.
            self.scratch
                .iter()
                .map(|&value| {
                    let rounded = value.round();
                    let bounded = rounded.clamp(-max, max);
                    if bounded != rounded {
                        clipped += 1;
                    }
                    bounded as i16
                })
                .collect()
        } else {
            // Empty stack or all-zero amplitudes: silence, not a
            // division by the zero peak.
            std::iter::repeat_n(0i16, len).collect()
        };

        let loop_distortion_pct = match (table.first(), table.last()) {
            (Some(&first), Some(&last)) => (first as f32 - last as f32).abs() / max * 100.0,
            _ => 0.0,
        };

        self.stats = BuildStats {
            summed_amplitude: self.oscillators.iter().map(|o| o.amplitude.abs()).sum(),
            peak_raw: peak,
            loop_distortion_pct,
            clipped_samples: clipped,
        };
        self.table = table;

        if clipped > 0 {
            warn!("wave table rebuild clamped {clipped} samples to +/-{max}");
        }
        debug!(
            "rebuilt wave table: {} samples, {} oscillators, raw peak {:.4}, loop distortion {:.1}%",
            len,
            self.oscillators.len(),
            peak,
            self.stats.loop_distortion_pct,
        );
    }
}

fn validate_oscillators(
    oscillators: &[OscillatorSpec],
    config: &WaveBuilderConfig,
) -> Result<(), ConfigurationError> {
    let limit = config.cycle_limit();
    for (index, osc) in oscillators.iter().enumerate() {
        osc.validate(index, limit)?;
    }
    Ok(())
}

/// The lambda shaping hook: a sign-preserving power curve on the
/// peak-normalized composite. 1.0 is the identity; exponents below 1.0
/// fatten the waveform toward its peaks, exponents above 1.0 pull it
/// toward the zero crossings. Swap this function out to change the
/// curve without touching the rest of the pipeline.
#[inline]
fn reshape(value: f32, lambda: f32) -> f32 {
    if lambda == 1.0 {
        return value;
    }
    value.signum() * value.abs().powf(lambda)
}

// Crossfade the tail of the table toward a backward extrapolation of
// the table start, so both the wrap value and the local first
// difference line up when the cycle repeats.
fn smooth_loop(table: &mut [f32]) {
    let len = table.len();
    if len < 4 {
        return;
    }
    let window = (len / SMOOTHING_DIVISOR)
        .clamp(2, SMOOTHING_WINDOW_MAX)
        .min(len - 2);
    let start = table[0];
    let slope = table[1] - table[0];

    for k in 0..window {
        let i = len - window + k;
        // Continue the start of the table backwards across the wrap.
        let steps_back = (window - k) as f32;
        let target = start - steps_back * slope;
        // Cosine taper: 0 at the window edge, 1 at the final sample.
        let t = (k + 1) as f32 / window as f32;
        let fade = 0.5 * (1.0 - (PI * t).cos());
        table[i] += (target - table[i]) * fade;
    }
}
