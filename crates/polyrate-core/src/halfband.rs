//! Polyphase IIR half-band filter for 2x up- and down-conversion.
//!
//! The filter is `H(z) = 0.5·[A0(z²) + z⁻¹·A1(z²)]` with `A0`/`A1` realised
//! by two [`AllpassChain`]s that run at the lower rate. Neither direction
//! ever touches a zero-stuffed sample or a discarded one, so a 2x stage
//! costs one evaluation of each branch per low-rate sample.
//!
//! ## Upsampling
//!
//! Each input sample `x` feeds both branches. The output pair is
//!
//! ```text
//! out0 = prev_branch1      (A1 output of the previous input sample)
//! out1 = A0(x)
//! ```
//!
//! The one-sample delay on branch 1 is the `z⁻¹` of the polyphase identity.
//! The resulting stream is `2·z⁻¹·H(z)` applied to the zero-stuffed input,
//! so the interpolator has unity passband gain.
//!
//! ## Downsampling
//!
//! For an input pair `(in0, in1)`, the odd-phase output of `H(z)` is
//! `0.5·(A0(in1) + A1(in0))`. Filtering happens before the rate drops, so
//! content above the lower Nyquist is removed rather than folded back.

use crate::allpass::AllpassChain;
use crate::coeffs::{HalfBandCoeffs, PhaseMode, Quality, StageRole, half_band_coeffs};
use crate::math::flush_denormal;

/// One 2x polyphase half-band stage.
///
/// # Example
///
/// ```rust
/// use polyrate_core::{HalfBandFilter, PhaseMode, Quality, StageRole};
///
/// let mut hb =
///     HalfBandFilter::new(Quality::Standard, PhaseMode::MinimumPhase, StageRole::Primary);
///
/// let mut up = [0.0f32; 8];
/// hb.upsample_2x_block(&[1.0, 1.0, 1.0, 1.0], &mut up);
/// ```
#[derive(Debug, Clone)]
pub struct HalfBandFilter {
    branch0: AllpassChain,
    branch1: AllpassChain,
    prev_branch1: f64,
    quality: Quality,
    mode: PhaseMode,
    role: StageRole,
    coeffs: &'static HalfBandCoeffs,
}

impl HalfBandFilter {
    /// Create a stage configured from the coefficient table for the given key.
    pub fn new(quality: Quality, mode: PhaseMode, role: StageRole) -> Self {
        let coeffs = half_band_coeffs(quality, mode, role);
        let mut hb = Self {
            branch0: AllpassChain::new(),
            branch1: AllpassChain::new(),
            prev_branch1: 0.0,
            quality,
            mode,
            role,
            coeffs,
        };
        hb.configure();
        hb
    }

    /// Select a new design and clear all state.
    ///
    /// The stage keeps its [`StageRole`]; only phase mode and quality change.
    pub fn set_mode(&mut self, mode: PhaseMode, quality: Quality) {
        self.mode = mode;
        self.quality = quality;
        self.coeffs = half_band_coeffs(quality, mode, self.role);
        self.configure();
    }

    fn configure(&mut self) {
        self.branch0.configure(self.coeffs.branch0);
        self.branch1.configure(self.coeffs.branch1);
        self.prev_branch1 = 0.0;
    }

    /// Upsample one sample into two.
    #[inline]
    pub fn upsample_2x(&mut self, x: f32) -> [f32; 2] {
        let x = f64::from(x);
        let b0 = self.branch0.process(x);
        let b1 = self.branch1.process(x);
        let out = [self.prev_branch1 as f32, b0 as f32];
        self.prev_branch1 = flush_denormal(b1);
        out
    }

    /// Downsample a pair of samples into one.
    #[inline]
    pub fn downsample_2x(&mut self, in0: f32, in1: f32) -> f32 {
        let b0 = self.branch0.process(f64::from(in1));
        let b1 = self.branch1.process(f64::from(in0));
        (0.5 * (b0 + b1)) as f32
    }

    /// Upsample a block: `output[2i..2i + 2]` receives the pair for `input[i]`.
    ///
    /// Processes `min(input.len(), output.len() / 2)` input samples and
    /// returns that count.
    pub fn upsample_2x_block(&mut self, input: &[f32], output: &mut [f32]) -> usize {
        let mut n = 0;
        for (&x, pair) in input.iter().zip(output.chunks_exact_mut(2)) {
            pair.copy_from_slice(&self.upsample_2x(x));
            n += 1;
        }
        n
    }

    /// Downsample a block: `output[i]` is computed from `input[2i..2i + 2]`.
    ///
    /// Produces `min(output.len(), input.len() / 2)` output samples and
    /// returns that count.
    pub fn downsample_2x_block(&mut self, input: &[f32], output: &mut [f32]) -> usize {
        let mut n = 0;
        for (pair, y) in input.chunks_exact(2).zip(output.iter_mut()) {
            *y = self.downsample_2x(pair[0], pair[1]);
            n += 1;
        }
        n
    }

    /// Clear both branches and the branch-1 delay.
    pub fn reset(&mut self) {
        self.branch0.reset();
        self.branch1.reset();
        self.prev_branch1 = 0.0;
    }

    /// Round-trip latency of this stage in samples of its lower rate.
    pub fn latency_samples(&self) -> u32 {
        self.coeffs.latency_samples
    }

    /// Guaranteed stop-band rejection of the active design, in dB.
    pub fn stopband_rejection_db(&self) -> f32 {
        self.coeffs.stopband_rejection_db
    }

    /// Active quality.
    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Active phase mode.
    pub fn phase_mode(&self) -> PhaseMode {
        self.mode
    }

    /// Position of this stage in its cascade.
    pub fn role(&self) -> StageRole {
        self.role
    }
}

impl Default for HalfBandFilter {
    fn default() -> Self {
        Self::new(Quality::default(), PhaseMode::default(), StageRole::Primary)
    }
}
