//! Named (factor, phase mode) combinations used as the external configuration unit.

use core::str::FromStr;

use alloc::string::ToString;

use crate::coeffs::PhaseMode;
use crate::error::ParseError;
use crate::factor::OversamplingFactor;

/// Oversampling preset.
///
/// The plain presets use quasi-linear-phase half-bands; the `LowLatency`
/// variants use minimum-phase half-bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OversamplingPreset {
    /// 2x, quasi-linear phase.
    #[default]
    X2,
    /// 4x, quasi-linear phase.
    X4,
    /// 8x, quasi-linear phase.
    X8,
    /// 2x, minimum phase.
    X2LowLatency,
    /// 4x, minimum phase.
    X4LowLatency,
    /// 8x, minimum phase.
    X8LowLatency,
}

impl OversamplingPreset {
    /// Every preset.
    pub const ALL: [OversamplingPreset; 6] = [
        Self::X2,
        Self::X4,
        Self::X8,
        Self::X2LowLatency,
        Self::X4LowLatency,
        Self::X8LowLatency,
    ];

    /// Build a preset from its parts.
    pub fn from_parts(factor: OversamplingFactor, mode: PhaseMode) -> Self {
        match (factor, mode) {
            (OversamplingFactor::X2, PhaseMode::QuasiLinearPhase) => Self::X2,
            (OversamplingFactor::X4, PhaseMode::QuasiLinearPhase) => Self::X4,
            (OversamplingFactor::X8, PhaseMode::QuasiLinearPhase) => Self::X8,
            (OversamplingFactor::X2, PhaseMode::MinimumPhase) => Self::X2LowLatency,
            (OversamplingFactor::X4, PhaseMode::MinimumPhase) => Self::X4LowLatency,
            (OversamplingFactor::X8, PhaseMode::MinimumPhase) => Self::X8LowLatency,
        }
    }

    /// Oversampling factor of this preset.
    pub fn factor(self) -> OversamplingFactor {
        match self {
            Self::X2 | Self::X2LowLatency => OversamplingFactor::X2,
            Self::X4 | Self::X4LowLatency => OversamplingFactor::X4,
            Self::X8 | Self::X8LowLatency => OversamplingFactor::X8,
        }
    }

    /// Half-band phase mode of this preset.
    pub fn phase_mode(self) -> PhaseMode {
        match self {
            Self::X2 | Self::X4 | Self::X8 => PhaseMode::QuasiLinearPhase,
            Self::X2LowLatency | Self::X4LowLatency | Self::X8LowLatency => {
                PhaseMode::MinimumPhase
            }
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::X2 => "x2",
            Self::X4 => "x4",
            Self::X8 => "x8",
            Self::X2LowLatency => "x2-low-latency",
            Self::X4LowLatency => "x4-low-latency",
            Self::X8LowLatency => "x8-low-latency",
        }
    }
}

impl FromStr for OversamplingPreset {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::UnknownPreset(s.to_string()))
    }
}

impl core::fmt::Display for OversamplingPreset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
