//! Supported oversampling factors.

/// Ratio between the internal processing rate and the external stream rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum OversamplingFactor {
    /// One 2x stage.
    #[default]
    X2,
    /// Two cascaded 2x stages.
    X4,
    /// Three cascaded 2x stages.
    X8,
}

impl OversamplingFactor {
    /// All factors, smallest first.
    pub const ALL: [OversamplingFactor; 3] = [Self::X2, Self::X4, Self::X8];

    /// Integer rate ratio (2, 4 or 8).
    pub const fn ratio(self) -> usize {
        match self {
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
        }
    }

    /// Number of cascaded 2x stages (`log2(ratio)`).
    pub const fn stages(self) -> usize {
        match self {
            Self::X2 => 1,
            Self::X4 => 2,
            Self::X8 => 3,
        }
    }

    /// Map an arbitrary ratio onto a supported factor.
    ///
    /// Exact matches map to themselves. Anything else becomes the nearest
    /// supported factor, ties resolving to the smaller one; 0 and 1 become
    /// [`X2`](Self::X2). Never fails.
    pub fn from_ratio(ratio: usize) -> Self {
        let factor = match ratio {
            0..=3 => Self::X2,
            4..=6 => Self::X4,
            _ => Self::X8,
        };
        #[cfg(feature = "tracing")]
        if factor.ratio() != ratio {
            tracing::warn!(
                requested = ratio,
                using = factor.ratio(),
                "unsupported oversampling factor, falling back"
            );
        }
        factor
    }
}

impl core::fmt::Display for OversamplingFactor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x", self.ratio())
    }
}
