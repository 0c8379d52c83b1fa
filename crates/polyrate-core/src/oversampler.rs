//! Cascaded 2x/4x/8x polyphase up- and down-conversion.
//!
//! An [`Oversampler`] chains `log2(FACTOR)` [`HalfBandFilter`] stages for
//! each direction. Stage `i` converts between `2^i` and `2^(i+1)` times the
//! external rate:
//!
//! ```text
//! up:    x1 ─[up 0]→ x2 ─[up 1]→ x4 ─[up 2]→ x8
//! down:  x8 ─[down 2]→ x4 ─[down 1]→ x2 ─[down 0]→ x1
//! ```
//!
//! Up stages run lowest index first, down stages highest index first. Stage 0
//! uses the steep [`StageRole::Primary`] design and every stage above it the
//! cheaper [`StageRole::Relaxed`] one, so running the down stages in up order
//! would pair each design with the wrong rate.
//!
//! Calls longer than [`MAX_BLOCK_SIZE`] are split into sequential chunks.
//! All state is streaming, so chunked and single calls produce identical
//! output.

use alloc::vec;
use alloc::vec::Vec;

use crate::coeffs::{PhaseMode, Quality, StageRole, cascade_latency, cascade_rejection_db};
use crate::factor::OversamplingFactor;
use crate::halfband::HalfBandFilter;

/// Largest block, in external-rate samples, processed in one pass.
pub const MAX_BLOCK_SIZE: usize = 4096;

/// Largest supported oversampling factor.
pub const MAX_FACTOR: usize = 8;

/// Object-safe interface over oversamplers of any factor.
///
/// [`Oversampler`] implements it for a fixed factor; [`AnyOversampler`]
/// implements it with the factor chosen at runtime.
pub trait Resampler {
    /// Oversampling factor.
    fn factor(&self) -> OversamplingFactor;

    /// Upsample `input` into `output` (`factor` output samples per input sample).
    ///
    /// Returns the number of input samples consumed, which is
    /// `min(input.len(), output.len() / factor)`.
    fn process_up(&mut self, input: &[f32], output: &mut [f32]) -> usize;

    /// Downsample `input` into `output` (`factor` input samples per output sample).
    ///
    /// Returns the number of output samples produced, which is
    /// `min(output.len(), input.len() / factor)`.
    fn process_down(&mut self, input: &[f32], output: &mut [f32]) -> usize;

    /// Select phase mode and quality for every stage. Clears all state.
    fn set_mode(&mut self, mode: PhaseMode, quality: Quality);

    /// Active quality.
    fn quality(&self) -> Quality;

    /// Active phase mode.
    fn phase_mode(&self) -> PhaseMode;

    /// Round-trip latency (up, then down) in external-rate samples.
    fn latency(&self) -> u32;

    /// Clear every stage in both directions.
    fn reset(&mut self);
}

/// Fixed-factor cascaded oversampler.
///
/// `FACTOR` must be 2, 4 or 8; any other value fails to compile.
///
/// All intermediate storage is allocated by [`new`](Self::new). Processing
/// never allocates.
///
/// # Example
///
/// ```rust
/// use polyrate_core::{Oversampler, PhaseMode, Quality};
///
/// let mut os = Oversampler::<4>::new(Quality::Standard, PhaseMode::QuasiLinearPhase);
///
/// let input = [0.0f32; 64];
/// let mut high = [0.0f32; 256];
/// let mut output = [0.0f32; 64];
///
/// os.process_up(&input, &mut high);
/// // ... nonlinear processing at 4x ...
/// os.process_down(&high, &mut output);
///
/// assert_eq!(os.latency(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct Oversampler<const FACTOR: usize> {
    up: Vec<HalfBandFilter>,
    down: Vec<HalfBandFilter>,
    /// Signal at 2x the external rate (factors 4 and 8).
    mid2: Vec<f32>,
    /// Signal at 4x the external rate (factor 8).
    mid4: Vec<f32>,
    quality: Quality,
    mode: PhaseMode,
    latency: u32,
}

impl<const FACTOR: usize> Oversampler<FACTOR> {
    /// Number of 2x stages per direction.
    pub const STAGES: usize = FACTOR.trailing_zeros() as usize;

    /// Create an oversampler with cleared state.
    pub fn new(quality: Quality, mode: PhaseMode) -> Self {
        const {
            assert!(
                FACTOR == 2 || FACTOR == 4 || FACTOR == 8,
                "oversampling factor must be 2, 4 or 8"
            );
        }

        let stages = || {
            (0..Self::STAGES)
                .map(|i| HalfBandFilter::new(quality, mode, StageRole::for_stage(i)))
                .collect::<Vec<_>>()
        };
        let mid2 = if FACTOR >= 4 { vec![0.0; MAX_BLOCK_SIZE * 2] } else { Vec::new() };
        let mid4 = if FACTOR >= 8 { vec![0.0; MAX_BLOCK_SIZE * 4] } else { Vec::new() };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            factor = FACTOR,
            quality = quality.name(),
            mode = mode.name(),
            "oversampler created"
        );

        Self {
            up: stages(),
            down: stages(),
            mid2,
            mid4,
            quality,
            mode,
            latency: cascade_latency(Self::STAGES, quality, mode),
        }
    }

    /// Oversampling factor as an enum.
    pub const fn factor(&self) -> OversamplingFactor {
        match FACTOR {
            2 => OversamplingFactor::X2,
            4 => OversamplingFactor::X4,
            _ => OversamplingFactor::X8,
        }
    }

    /// Upsample `input` into `output`. See [`Resampler::process_up`].
    pub fn process_up(&mut self, input: &[f32], output: &mut [f32]) -> usize {
        let n = input.len().min(output.len() / FACTOR);
        for (src, dst) in input[..n]
            .chunks(MAX_BLOCK_SIZE)
            .zip(output[..n * FACTOR].chunks_mut(MAX_BLOCK_SIZE * FACTOR))
        {
            self.up_block(src, dst);
        }
        n
    }

    /// Downsample `input` into `output`. See [`Resampler::process_down`].
    pub fn process_down(&mut self, input: &[f32], output: &mut [f32]) -> usize {
        let n = output.len().min(input.len() / FACTOR);
        for (src, dst) in input[..n * FACTOR]
            .chunks(MAX_BLOCK_SIZE * FACTOR)
            .zip(output[..n].chunks_mut(MAX_BLOCK_SIZE))
        {
            self.down_block(src, dst);
        }
        n
    }

    // `input.len() <= MAX_BLOCK_SIZE`, `output.len() == input.len() * FACTOR`
    fn up_block(&mut self, input: &[f32], output: &mut [f32]) {
        let n = input.len();
        match self.up.as_mut_slice() {
            [s0] => {
                s0.upsample_2x_block(input, output);
            }
            [s0, s1] => {
                let mid2 = &mut self.mid2[..2 * n];
                s0.upsample_2x_block(input, mid2);
                s1.upsample_2x_block(mid2, output);
            }
            [s0, s1, s2] => {
                let mid2 = &mut self.mid2[..2 * n];
                let mid4 = &mut self.mid4[..4 * n];
                s0.upsample_2x_block(input, mid2);
                s1.upsample_2x_block(mid2, mid4);
                s2.upsample_2x_block(mid4, output);
            }
            _ => unreachable!(),
        }
    }

    // `output.len() <= MAX_BLOCK_SIZE`, `input.len() == output.len() * FACTOR`
    fn down_block(&mut self, input: &[f32], output: &mut [f32]) {
        let n = output.len();
        match self.down.as_mut_slice() {
            [s0] => {
                s0.downsample_2x_block(input, output);
            }
            [s0, s1] => {
                let mid2 = &mut self.mid2[..2 * n];
                s1.downsample_2x_block(input, mid2);
                s0.downsample_2x_block(mid2, output);
            }
            [s0, s1, s2] => {
                let mid2 = &mut self.mid2[..2 * n];
                let mid4 = &mut self.mid4[..4 * n];
                s2.downsample_2x_block(input, mid4);
                s1.downsample_2x_block(mid4, mid2);
                s0.downsample_2x_block(mid2, output);
            }
            _ => unreachable!(),
        }
    }

    /// Reconfigure every stage for a new phase mode and quality, then reset.
    ///
    /// Coefficients are swapped in place; no buffer is reallocated.
    pub fn set_mode(&mut self, mode: PhaseMode, quality: Quality) {
        for stage in self.up.iter_mut().chain(self.down.iter_mut()) {
            stage.set_mode(mode, quality);
        }
        self.mode = mode;
        self.quality = quality;
        self.latency = cascade_latency(Self::STAGES, quality, mode);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            factor = FACTOR,
            quality = quality.name(),
            mode = mode.name(),
            latency = self.latency,
            "oversampler reconfigured"
        );

        self.reset();
    }

    /// Active quality.
    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Active phase mode.
    pub fn phase_mode(&self) -> PhaseMode {
        self.mode
    }

    /// Round-trip latency in external-rate samples.
    ///
    /// A fixed lookup of (factor, quality, phase mode); see
    /// [`cascade_latency`].
    pub fn latency(&self) -> u32 {
        self.latency
    }

    /// Weakest stop-band rejection across the cascade, in dB.
    pub fn stopband_rejection_db(&self) -> f32 {
        cascade_rejection_db(Self::STAGES, self.quality, self.mode)
    }

    /// Clear every stage in both directions.
    pub fn reset(&mut self) {
        for stage in self.up.iter_mut().chain(self.down.iter_mut()) {
            stage.reset();
        }
    }
}

impl<const FACTOR: usize> Default for Oversampler<FACTOR> {
    fn default() -> Self {
        Self::new(Quality::default(), PhaseMode::default())
    }
}

impl<const FACTOR: usize> Resampler for Oversampler<FACTOR> {
    fn factor(&self) -> OversamplingFactor {
        Oversampler::factor(self)
    }

    fn process_up(&mut self, input: &[f32], output: &mut [f32]) -> usize {
        Oversampler::process_up(self, input, output)
    }

    fn process_down(&mut self, input: &[f32], output: &mut [f32]) -> usize {
        Oversampler::process_down(self, input, output)
    }

    fn set_mode(&mut self, mode: PhaseMode, quality: Quality) {
        Oversampler::set_mode(self, mode, quality);
    }

    fn quality(&self) -> Quality {
        self.quality
    }

    fn phase_mode(&self) -> PhaseMode {
        self.mode
    }

    fn latency(&self) -> u32 {
        self.latency
    }

    fn reset(&mut self) {
        Oversampler::reset(self);
    }
}

/// Oversampler with its factor chosen at runtime.
///
/// Dispatch happens once per call, outside the per-sample loops.
#[derive(Debug, Clone)]
pub enum AnyOversampler {
    /// 2x.
    X2(Oversampler<2>),
    /// 4x.
    X4(Oversampler<4>),
    /// 8x.
    X8(Oversampler<8>),
}

macro_rules! dispatch {
    ($self:expr, $os:ident => $body:expr) => {
        match $self {
            AnyOversampler::X2($os) => $body,
            AnyOversampler::X4($os) => $body,
            AnyOversampler::X8($os) => $body,
        }
    };
}

impl AnyOversampler {
    /// Create an oversampler for `factor`.
    pub fn new(factor: OversamplingFactor, quality: Quality, mode: PhaseMode) -> Self {
        match factor {
            OversamplingFactor::X2 => Self::X2(Oversampler::new(quality, mode)),
            OversamplingFactor::X4 => Self::X4(Oversampler::new(quality, mode)),
            OversamplingFactor::X8 => Self::X8(Oversampler::new(quality, mode)),
        }
    }

    /// Create an oversampler for an arbitrary integer ratio.
    ///
    /// Unsupported ratios fall back to the nearest supported factor; see
    /// [`OversamplingFactor::from_ratio`].
    pub fn with_ratio(ratio: usize, quality: Quality, mode: PhaseMode) -> Self {
        Self::new(OversamplingFactor::from_ratio(ratio), quality, mode)
    }

    /// Weakest stop-band rejection across the cascade, in dB.
    pub fn stopband_rejection_db(&self) -> f32 {
        dispatch!(self, os => os.stopband_rejection_db())
    }
}

impl Resampler for AnyOversampler {
    fn factor(&self) -> OversamplingFactor {
        dispatch!(self, os => os.factor())
    }

    fn process_up(&mut self, input: &[f32], output: &mut [f32]) -> usize {
        dispatch!(self, os => os.process_up(input, output))
    }

    fn process_down(&mut self, input: &[f32], output: &mut [f32]) -> usize {
        dispatch!(self, os => os.process_down(input, output))
    }

    fn set_mode(&mut self, mode: PhaseMode, quality: Quality) {
        dispatch!(self, os => os.set_mode(mode, quality))
    }

    fn quality(&self) -> Quality {
        dispatch!(self, os => os.quality())
    }

    fn phase_mode(&self) -> PhaseMode {
        dispatch!(self, os => os.phase_mode())
    }

    fn latency(&self) -> u32 {
        dispatch!(self, os => os.latency())
    }

    fn reset(&mut self) {
        dispatch!(self, os => os.reset())
    }
}
