//! Generic wrapper that runs any [`FilterCore`] at an oversampled rate.
//!
//! ```text
//! samples ─→ process_up ─→ core.process (factor × fs) ─→ process_down ─→ samples
//! ```
//!
//! The wrapper owns the core and one oversampler per factor, all allocated
//! up front. It reports the round trip latency so a host can delay a dry
//! signal to match.

use alloc::vec;
use alloc::vec::Vec;

use crate::coeffs::{PhaseMode, Quality};
use crate::factor::OversamplingFactor;
use crate::filter_core::FilterCore;
use crate::oversampler::{AnyOversampler, MAX_BLOCK_SIZE, MAX_FACTOR, Resampler};
use crate::preset::OversamplingPreset;

/// Alias-suppressing wrapper around a filter core.
///
/// The inner core is constructed at `sample_rate × factor`. Cutoff and
/// resonance pass straight through; the last values set are cached so the
/// core can be rebuilt transparently when the factor changes.
///
/// # Example
///
/// ```rust
/// use polyrate_core::{FilterCore, OversampledFilter, OversamplingPreset};
///
/// struct Clip;
///
/// impl FilterCore for Clip {
///     fn with_sample_rate(_sample_rate: f32) -> Self {
///         Clip
///     }
///     fn set_cutoff(&mut self, _hz: f32) {}
///     fn set_resonance(&mut self, _amount: f32) {}
///     fn process(&mut self, buffer: &mut [f32]) {
///         for s in buffer {
///             *s = s.clamp(-0.5, 0.5);
///         }
///     }
/// }
///
/// let mut filter = OversampledFilter::<Clip>::new(48000.0, OversamplingPreset::X4);
/// let mut block = [0.8f32; 256];
/// filter.process(&mut block);
///
/// // Delay to apply to a dry signal for alignment
/// let latency = filter.latency();
/// assert_eq!(latency, 16);
/// ```
#[derive(Debug, Clone)]
pub struct OversampledFilter<F: FilterCore> {
    inner: F,
    /// One oversampler per factor, indexed by `stages() - 1`.
    oversamplers: [AnyOversampler; 3],
    sample_rate: f32,
    preset: OversamplingPreset,
    quality: Quality,
    cutoff: Option<f32>,
    resonance: Option<f32>,
    /// Oversampled signal, sized for the largest block at the largest factor.
    scratch: Vec<f32>,
}

impl<F: FilterCore> OversampledFilter<F> {
    /// Create a wrapper at the default quality.
    pub fn new(sample_rate: f32, preset: OversamplingPreset) -> Self {
        Self::with_quality(sample_rate, preset, Quality::default())
    }

    /// Create a wrapper with an explicit quality.
    pub fn with_quality(sample_rate: f32, preset: OversamplingPreset, quality: Quality) -> Self {
        let mode = preset.phase_mode();
        Self {
            inner: F::with_sample_rate(sample_rate * preset.factor().ratio() as f32),
            oversamplers: OversamplingFactor::ALL.map(|f| AnyOversampler::new(f, quality, mode)),
            sample_rate,
            preset,
            quality,
            cutoff: None,
            resonance: None,
            scratch: vec![0.0; MAX_BLOCK_SIZE * MAX_FACTOR],
        }
    }

    /// Filter `samples` in place. Any length is accepted.
    pub fn process(&mut self, samples: &mut [f32]) {
        let factor = self.preset.factor();
        let oversampler = &mut self.oversamplers[factor.stages() - 1];
        for chunk in samples.chunks_mut(MAX_BLOCK_SIZE) {
            let high = &mut self.scratch[..chunk.len() * factor.ratio()];
            oversampler.process_up(chunk, high);
            self.inner.process(high);
            oversampler.process_down(high, chunk);
        }
    }

    /// Set the cutoff of the inner core, in Hz.
    pub fn set_cutoff(&mut self, hz: f32) {
        self.cutoff = Some(hz);
        self.inner.set_cutoff(hz);
    }

    /// Set the resonance of the inner core.
    pub fn set_resonance(&mut self, amount: f32) {
        self.resonance = Some(amount);
        self.inner.set_resonance(amount);
    }

    /// Switch preset. No-op if unchanged.
    ///
    /// A factor change rebuilds the inner core at the new rate (reapplying
    /// cached cutoff and resonance) and switches to the preallocated
    /// oversampler for that factor. Stage coefficients are swapped in place
    /// and all state is cleared afterwards. The oversampler is never
    /// reallocated.
    ///
    /// Call from the control path, not per sample.
    pub fn set_preset(&mut self, preset: OversamplingPreset) {
        if preset == self.preset {
            return;
        }
        let previous = self.preset;
        self.preset = preset;
        if preset.factor() != previous.factor() {
            self.inner = self.build_inner(preset.factor());
        }
        let quality = self.quality;
        self.oversampler_mut().set_mode(preset.phase_mode(), quality);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            from = previous.name(),
            to = preset.name(),
            latency = self.latency(),
            "oversampling preset changed"
        );

        self.reset();
    }

    /// Switch half-band quality. No-op if unchanged; otherwise clears all state.
    pub fn set_quality(&mut self, quality: Quality) {
        if quality == self.quality {
            return;
        }
        self.quality = quality;
        let mode = self.preset.phase_mode();
        self.oversampler_mut().set_mode(mode, quality);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            quality = quality.name(),
            latency = self.latency(),
            "oversampling quality changed"
        );

        self.reset();
    }

    fn build_inner(&self, factor: OversamplingFactor) -> F {
        let mut inner = F::with_sample_rate(self.sample_rate * factor.ratio() as f32);
        if let Some(hz) = self.cutoff {
            inner.set_cutoff(hz);
        }
        if let Some(amount) = self.resonance {
            inner.set_resonance(amount);
        }
        inner
    }

    /// Round-trip latency in external-rate samples.
    pub fn latency(&self) -> u32 {
        self.oversampler().latency()
    }

    /// Clear oversampler and inner core state. Nothing is reallocated.
    pub fn reset(&mut self) {
        self.oversampler_mut().reset();
        self.inner.reset();
    }

    /// The oversampler serving the active factor.
    pub fn oversampler(&self) -> &AnyOversampler {
        &self.oversamplers[self.preset.factor().stages() - 1]
    }

    fn oversampler_mut(&mut self) -> &mut AnyOversampler {
        &mut self.oversamplers[self.preset.factor().stages() - 1]
    }

    /// External sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Active preset.
    pub fn preset(&self) -> OversamplingPreset {
        self.preset
    }

    /// Active oversampling factor.
    pub fn factor(&self) -> OversamplingFactor {
        self.preset.factor()
    }

    /// Active phase mode.
    pub fn phase_mode(&self) -> PhaseMode {
        self.preset.phase_mode()
    }

    /// Active quality.
    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Last cutoff set, if any.
    pub fn cutoff(&self) -> Option<f32> {
        self.cutoff
    }

    /// Last resonance set, if any.
    pub fn resonance(&self) -> Option<f32> {
        self.resonance
    }

    /// The inner core.
    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// The inner core, mutably.
    pub fn inner_mut(&mut self) -> &mut F {
        &mut self.inner
    }
}

impl<F: FilterCore> FilterCore for OversampledFilter<F> {
    fn with_sample_rate(sample_rate: f32) -> Self {
        Self::new(sample_rate, OversamplingPreset::default())
    }

    fn set_cutoff(&mut self, hz: f32) {
        OversampledFilter::set_cutoff(self, hz);
    }

    fn set_resonance(&mut self, amount: f32) {
        OversampledFilter::set_resonance(self, amount);
    }

    fn process(&mut self, buffer: &mut [f32]) {
        OversampledFilter::process(self, buffer);
    }

    fn reset(&mut self) {
        OversampledFilter::reset(self);
    }
}
