// Deterministic white noise for the Noise wave shape.
//
// Instead of drawing from a stateful RNG, the phase bits are mixed
// through two linear congruential steps. The same phase always maps to
// the same value, which keeps table rebuilds bit-for-bit reproducible.

const LCG_MUL: u32 = 1664525;
const LCG_ADD: u32 = 1013904223;

/// Map a phase fraction to a pseudo-random amplitude in `[-1.0, 1.0)`.
#[inline]
pub fn phase_noise(phase: f32) -> f32 {
    let mut state = phase.to_bits().wrapping_mul(LCG_MUL).wrapping_add(LCG_ADD);
    state = state.wrapping_mul(LCG_MUL).wrapping_add(LCG_ADD);
    let unit = (state as f32) * (1.0 / 4294967296.0); // [0.0, 1.0)
    (unit - 0.5) * 2.0
}
