//! Error type for the textual forms of engine settings.
//!
//! Processing itself never fails; the only fallible operations in this crate
//! are parsing user-facing names such as `"x4-low-latency"` or `"high"`.

use alloc::string::String;

/// A setting name could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Not one of `draft`, `standard`, `high`.
    UnknownQuality(String),
    /// Not one of `quasi-linear`, `minimum`.
    UnknownPhaseMode(String),
    /// Not one of the preset names, e.g. `x2` or `x8-low-latency`.
    UnknownPreset(String),
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownQuality(s) => {
                write!(f, "unknown quality '{s}' (expected draft, standard or high)")
            }
            Self::UnknownPhaseMode(s) => {
                write!(f, "unknown phase mode '{s}' (expected quasi-linear or minimum)")
            }
            Self::UnknownPreset(s) => write!(
                f,
                "unknown oversampling preset '{s}' (expected x2, x4, x8 or x2/x4/x8-low-latency)"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}
