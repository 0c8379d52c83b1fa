//! The interface a filter core implements to be hosted by [`OversampledFilter`].
//!
//! [`OversampledFilter`]: crate::OversampledFilter

/// An in-place block filter that can be run at an elevated sample rate.
///
/// The wrapper constructs cores itself (again whenever the oversampling
/// factor changes), so construction goes through the trait. Cutoff and
/// resonance are given in the caller's external convention; a core that
/// needs to rescale for its internal rate does that itself.
///
/// # Real-Time Safety
///
/// [`process`](Self::process), [`set_cutoff`](Self::set_cutoff),
/// [`set_resonance`](Self::set_resonance) and [`reset`](Self::reset) are
/// called from the audio thread and must not allocate or block.
/// [`with_sample_rate`](Self::with_sample_rate) is only called at
/// construction or preset changes.
///
/// # Example
///
/// ```rust
/// use polyrate_core::FilterCore;
///
/// struct Drive {
///     gain: f32,
/// }
///
/// impl FilterCore for Drive {
///     fn with_sample_rate(_sample_rate: f32) -> Self {
///         Self { gain: 1.0 }
///     }
///
///     fn set_cutoff(&mut self, _hz: f32) {}
///
///     fn set_resonance(&mut self, amount: f32) {
///         self.gain = 1.0 + amount * 4.0;
///     }
///
///     fn process(&mut self, buffer: &mut [f32]) {
///         for s in buffer {
///             *s = (*s * self.gain).clamp(-1.0, 1.0);
///         }
///     }
/// }
/// ```
pub trait FilterCore {
    /// Construct a core running at `sample_rate` Hz.
    fn with_sample_rate(sample_rate: f32) -> Self
    where
        Self: Sized;

    /// Set the cutoff frequency in Hz.
    fn set_cutoff(&mut self, hz: f32);

    /// Set the resonance amount.
    fn set_resonance(&mut self, amount: f32);

    /// Filter `buffer` in place.
    fn process(&mut self, buffer: &mut [f32]);

    /// Clear internal state. Parameters are kept.
    fn reset(&mut self) {}
}
