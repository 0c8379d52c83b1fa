//! First- and second-order IIR allpass sections and the chain that cascades them.
//!
//! These are the building blocks of the polyphase half-band filter. Each
//! section has unity magnitude at every frequency and only shapes phase; the
//! half-band low-pass response appears when two chains are summed.
//!
//! All arithmetic runs in `f64`. The sections are short recursions that are
//! evaluated at the lower of the two rates of a 2x stage, so the cost of
//! double precision is small while the phase matching between the two
//! branches (which is what sets stop-band depth) stays accurate.

use crate::math::flush_denormal;

/// Maximum number of sections in one [`AllpassChain`].
pub const MAX_SECTIONS: usize = 4;

/// Coefficient description of a single allpass section.
///
/// This is the unit the coefficient tables are written in. Order matters
/// when several are listed: [`AllpassChain::configure`] replays them in the
/// order given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AllpassCoeff {
    /// First-order section `(a + z⁻¹) / (1 + a·z⁻¹)`.
    FirstOrder(f64),
    /// Second-order section `(a2 + a1·z⁻¹ + z⁻²) / (1 + a1·z⁻¹ + a2·z⁻²)`.
    SecondOrder(f64, f64),
}

impl AllpassCoeff {
    /// Polynomial order contributed by this section.
    pub fn order(&self) -> usize {
        match self {
            Self::FirstOrder(_) => 1,
            Self::SecondOrder(..) => 2,
        }
    }
}

/// First-order allpass section.
///
/// ```text
/// y[n] = a·x[n] + s
/// s    = x[n] - a·y[n]
/// ```
///
/// Stable for `|a| < 1`. Coefficients are trusted input and are not checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllpassFirstOrder {
    a1: f64,
    state: f64,
}

impl AllpassFirstOrder {
    /// Create a section with the given coefficient and cleared state.
    pub fn new(a1: f64) -> Self {
        Self { a1, state: 0.0 }
    }

    /// Replace the coefficient. State is kept.
    pub fn set_coeff(&mut self, a1: f64) {
        self.a1 = a1;
    }

    /// Current coefficient.
    pub fn coeff(&self) -> f64 {
        self.a1
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, x: f64) -> f64 {
        let y = self.a1 * x + self.state;
        self.state = flush_denormal(x - self.a1 * y);
        y
    }

    /// Clear the state.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}

/// Second-order allpass section in direct form II.
///
/// ```text
/// w[n] = x[n] - a1·w[n-1] - a2·w[n-2]
/// y[n] = a2·w[n] + a1·w[n-1] + w[n-2]
/// ```
///
/// With `a1 = a2 = 0` the section degenerates to a two-sample delay, which
/// the quasi-linear-phase tables use to build pure-delay branches.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllpassSecondOrder {
    a1: f64,
    a2: f64,
    w0: f64,
    w1: f64,
}

impl AllpassSecondOrder {
    /// Create a section with the given coefficients and cleared state.
    pub fn new(a1: f64, a2: f64) -> Self {
        Self {
            a1,
            a2,
            w0: 0.0,
            w1: 0.0,
        }
    }

    /// Replace both coefficients. State is kept.
    pub fn set_coeffs(&mut self, a1: f64, a2: f64) {
        self.a1 = a1;
        self.a2 = a2;
    }

    /// Current `(a1, a2)` pair.
    pub fn coeffs(&self) -> (f64, f64) {
        (self.a1, self.a2)
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, x: f64) -> f64 {
        let w = x - self.a1 * self.w0 - self.a2 * self.w1;
        let y = self.a2 * w + self.a1 * self.w0 + self.w1;
        self.w1 = self.w0;
        self.w0 = flush_denormal(w);
        y
    }

    /// Clear the state.
    pub fn reset(&mut self) {
        self.w0 = 0.0;
        self.w1 = 0.0;
    }
}

/// One slot of an [`AllpassChain`]: a section of either order with its own state.
#[derive(Debug, Clone, Copy)]
pub enum AllpassSection {
    /// First-order slot.
    First(AllpassFirstOrder),
    /// Second-order slot.
    Second(AllpassSecondOrder),
}

impl AllpassSection {
    fn from_coeff(coeff: AllpassCoeff) -> Self {
        match coeff {
            AllpassCoeff::FirstOrder(a) => Self::First(AllpassFirstOrder::new(a)),
            AllpassCoeff::SecondOrder(a1, a2) => Self::Second(AllpassSecondOrder::new(a1, a2)),
        }
    }

    /// Process one sample through this slot.
    #[inline]
    pub fn process(&mut self, x: f64) -> f64 {
        match self {
            Self::First(s) => s.process(x),
            Self::Second(s) => s.process(x),
        }
    }

    /// Clear this slot's state.
    pub fn reset(&mut self) {
        match self {
            Self::First(s) => s.reset(),
            Self::Second(s) => s.reset(),
        }
    }
}

impl Default for AllpassSection {
    fn default() -> Self {
        Self::First(AllpassFirstOrder::default())
    }
}

/// Ordered cascade of up to [`MAX_SECTIONS`] allpass sections.
///
/// Storage is a fixed array of tagged slots, so first- and second-order
/// sections can be mixed while their configured order is preserved.
/// No allocation happens after construction.
///
/// # Example
///
/// ```rust
/// use polyrate_core::{AllpassChain, AllpassCoeff};
///
/// let mut chain = AllpassChain::new();
/// chain.configure(&[AllpassCoeff::SecondOrder(0.0, 0.0)]);
///
/// // Two-sample pure delay
/// assert_eq!(chain.process(1.0), 0.0);
/// assert_eq!(chain.process(0.0), 0.0);
/// assert_eq!(chain.process(0.0), 1.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AllpassChain {
    sections: [AllpassSection; MAX_SECTIONS],
    len: usize,
}

impl AllpassChain {
    /// Create an empty chain. An empty chain passes input through unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the chain from a coefficient list.
    ///
    /// Entries beyond [`MAX_SECTIONS`] are ignored. All section state starts
    /// cleared.
    pub fn configure(&mut self, coeffs: &[AllpassCoeff]) {
        self.len = coeffs.len().min(MAX_SECTIONS);
        for (slot, &coeff) in self.sections.iter_mut().zip(coeffs) {
            *slot = AllpassSection::from_coeff(coeff);
        }
        for slot in &mut self.sections[self.len..] {
            *slot = AllpassSection::default();
        }
    }

    /// Number of active sections.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no sections are configured.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total polynomial order of the configured sections.
    pub fn order(&self) -> usize {
        self.sections[..self.len]
            .iter()
            .map(|s| match s {
                AllpassSection::First(_) => 1,
                AllpassSection::Second(_) => 2,
            })
            .sum()
    }

    /// Process one sample through every section, in configured order.
    #[inline]
    pub fn process(&mut self, x: f64) -> f64 {
        self.sections[..self.len]
            .iter_mut()
            .fold(x, |acc, section| section.process(acc))
    }

    /// Clear every section's state. Coefficients are kept.
    pub fn reset(&mut self) {
        for section in &mut self.sections {
            section.reset();
        }
    }
}
