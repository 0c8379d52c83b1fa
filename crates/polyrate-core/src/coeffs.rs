//! Half-band coefficient tables.
//!
//! Every 2x stage is a two-path polyphase half-band filter
//! `H(z) = 0.5·[A0(z²) + z⁻¹·A1(z²)]`. This module provides the allpass
//! coefficients of `A0`/`A1` for each combination of [`Quality`],
//! [`PhaseMode`] and [`StageRole`], together with the round-trip latency
//! and the guaranteed stop-band rejection of that design.
//!
//! # Designs
//!
//! - **Minimum phase**: elliptic two-path half-band. Both branches are
//!   cascades of first-order allpass sections in `z²`; adjacent pairs are
//!   merged into second-order sections (`a1 = a + b`, `a2 = a·b`).
//! - **Quasi-linear phase**: `A0` is a pure delay `z⁻ᴺ`, `A1` an order-`N`
//!   equiripple allpass approximating a delay of `N - ½`. The passband group
//!   delay is flat, at the cost of a longer delay.
//!
//! # Stage roles
//!
//! The first stage of a cascade faces the external rate and needs the steep
//! transition band (0.2 fs to 0.3 fs of its upper rate). Stages above it
//! only see content that stage 0 already band-limited, so they use
//! [`StageRole::Relaxed`] designs with a wide transition band (0.15 fs to
//! 0.35 fs), which are cheaper and shorter.
//!
//! # Latency
//!
//! | Quality  | Phase        | 2x | 4x | 8x |
//! |----------|--------------|----|----|----|
//! | Draft    | QuasiLinear  | 8  | 10 | 11 |
//! | Standard | QuasiLinear  | 12 | 16 | 18 |
//! | High     | QuasiLinear  | 16 | 20 | 22 |
//! | Draft    | Minimum      | 2  | 3  | 3  |
//! | Standard | Minimum      | 2  | 3  | 4  |
//! | High     | Minimum      | 3  | 5  | 5  |

use core::str::FromStr;

use alloc::string::ToString;

use crate::allpass::AllpassCoeff::{self, FirstOrder, SecondOrder};
use crate::error::ParseError;

/// Steepness of the half-band design.
///
/// Higher quality means more allpass sections, deeper stop-band rejection,
/// higher latency and more arithmetic per sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Quality {
    /// Cheapest design, roughly 45-53 dB of image rejection.
    Draft,
    /// Roughly 59-70 dB of image rejection.
    #[default]
    Standard,
    /// Roughly 72-86 dB of image rejection.
    High,
}

impl Quality {
    /// All qualities, cheapest first.
    pub const ALL: [Quality; 3] = [Quality::Draft, Quality::Standard, Quality::High];

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Standard => "standard",
            Self::High => "high",
        }
    }
}

impl FromStr for Quality {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|q| q.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::UnknownQuality(s.to_string()))
    }
}

impl core::fmt::Display for Quality {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Phase characteristic of the half-band design.
///
/// A pure trade-off chosen by the caller; the engine never switches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PhaseMode {
    /// Flat passband group delay. Transients keep their shape; latency is higher.
    #[default]
    QuasiLinearPhase,
    /// Lowest latency. Group delay rises towards the band edge.
    MinimumPhase,
}

impl PhaseMode {
    /// Both modes.
    pub const ALL: [PhaseMode; 2] = [PhaseMode::QuasiLinearPhase, PhaseMode::MinimumPhase];

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::QuasiLinearPhase => "quasi-linear",
            Self::MinimumPhase => "minimum",
        }
    }
}

impl FromStr for PhaseMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::UnknownPhaseMode(s.to_string()))
    }
}

impl core::fmt::Display for PhaseMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Position of a 2x stage within a cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageRole {
    /// Stage 0, bordering the external rate. Steep transition band.
    Primary,
    /// Any stage above stage 0. Wide transition band.
    Relaxed,
}

impl StageRole {
    /// Role of the stage at `index` (0 = closest to the external rate).
    pub fn for_stage(index: usize) -> Self {
        if index == 0 {
            Self::Primary
        } else {
            Self::Relaxed
        }
    }
}

/// One half-band design: two allpass branches plus its measured properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfBandCoeffs {
    /// Sections of `A0`, in processing order.
    pub branch0: &'static [AllpassCoeff],
    /// Sections of `A1`, in processing order.
    pub branch1: &'static [AllpassCoeff],
    /// Delay of one upsample + downsample round trip through this stage,
    /// in samples of the stage's lower rate.
    pub latency_samples: u32,
    /// Minimum attenuation over the stop band, in dB.
    pub stopband_rejection_db: f32,
}

const DELAY2: AllpassCoeff = SecondOrder(0.0, 0.0);

// Quasi-linear phase, primary stage (passband edge 0.2 fs).

const QL_DRAFT: HalfBandCoeffs = HalfBandCoeffs {
    branch0: &[DELAY2, DELAY2],
    branch1: &[
        SecondOrder(0.0192228945149746, 0.0910466861631091),
        SecondOrder(0.4663037794297821, -0.20434943941813954),
    ],
    latency_samples: 8,
    stopband_rejection_db: 45.0,
};

const QL_STANDARD: HalfBandCoeffs = HalfBandCoeffs {
    branch0: &[DELAY2, DELAY2, DELAY2],
    branch1: &[
        SecondOrder(-0.33733894794116803, 0.11312555523079024),
        SecondOrder(0.3710483296488182, 0.14371896829880987),
        SecondOrder(0.455727233681393, -0.2568315670889835),
    ],
    latency_samples: 12,
    stopband_rejection_db: 59.0,
};

const QL_HIGH: HalfBandCoeffs = HalfBandCoeffs {
    branch0: &[DELAY2, DELAY2, DELAY2, DELAY2],
    branch1: &[
        SecondOrder(-0.5217063310854828, 0.13354470509307115),
        SecondOrder(0.5846829555078242, 0.18697992245916933),
        SecondOrder(-0.019370775797914734, 0.14572069099635918),
        SecondOrder(0.4480873071255881, -0.2924917321807872),
    ],
    latency_samples: 16,
    stopband_rejection_db: 72.0,
};

// Quasi-linear phase, relaxed stages (passband edge 0.15 fs).

const QL_RELAXED_DRAFT: HalfBandCoeffs = HalfBandCoeffs {
    branch0: &[DELAY2],
    branch1: &[SecondOrder(0.44495354767321227, -0.05897069856630889)],
    latency_samples: 4,
    stopband_rejection_db: 45.0,
};

const QL_RELAXED: HalfBandCoeffs = HalfBandCoeffs {
    branch0: &[DELAY2, DELAY2],
    branch1: &[
        SecondOrder(-0.0255129446529689, 0.03767969800982327),
        SecondOrder(0.4939458110775285, -0.10860494123010317),
    ],
    latency_samples: 8,
    stopband_rejection_db: 74.0,
};

// Minimum phase, primary stage (transition band 0.2 fs to 0.3 fs).

const MP_DRAFT: HalfBandCoeffs = HalfBandCoeffs {
    branch0: &[SecondOrder(0.9191318530921275, 0.10156728879239352)],
    branch1: &[FirstOrder(0.429566740739692)],
    latency_samples: 2,
    stopband_rejection_db: 53.0,
};

const MP_STANDARD: HalfBandCoeffs = HalfBandCoeffs {
    branch0: &[SecondOrder(0.6251900773074898, 0.04355305115321374)],
    branch1: &[SecondOrder(1.118241236354848, 0.23683058051414477)],
    latency_samples: 2,
    stopband_rejection_db: 70.0,
};

const MP_HIGH: HalfBandCoeffs = HalfBandCoeffs {
    branch0: &[
        SecondOrder(0.4530277544295874, 0.021627071287008057),
        FirstOrder(0.8629178126505029),
    ],
    branch1: &[SecondOrder(0.8207964245468314, 0.12403277875358354)],
    latency_samples: 3,
    stopband_rejection_db: 86.0,
};

// Minimum phase, relaxed stages (transition band 0.15 fs to 0.35 fs).

const MP_RELAXED_DRAFT: HalfBandCoeffs = HalfBandCoeffs {
    branch0: &[FirstOrder(0.15760560862290904)],
    branch1: &[FirstOrder(0.6148404765855449)],
    latency_samples: 1,
    stopband_rejection_db: 52.0,
};

const MP_RELAXED_STANDARD: HalfBandCoeffs = HalfBandCoeffs {
    branch0: &[SecondOrder(0.791200823279093, 0.0577966527024299)],
    branch1: &[FirstOrder(0.31565984021665966)],
    latency_samples: 2,
    stopband_rejection_db: 76.0,
};

const MP_RELAXED_HIGH: HalfBandCoeffs = HalfBandCoeffs {
    branch0: &[SecondOrder(0.47628772406949355, 0.02114524473393322)],
    branch1: &[SecondOrder(0.9606403991604854, 0.14848200432575512)],
    latency_samples: 3,
    stopband_rejection_db: 100.0,
};

/// Look up the half-band design for a stage.
///
/// Total over every combination; there is no missing entry.
pub fn half_band_coeffs(
    quality: Quality,
    mode: PhaseMode,
    role: StageRole,
) -> &'static HalfBandCoeffs {
    use PhaseMode::{MinimumPhase, QuasiLinearPhase};
    use Quality::{Draft, High, Standard};
    use StageRole::{Primary, Relaxed};

    match (mode, role, quality) {
        (QuasiLinearPhase, Primary, Draft) => &QL_DRAFT,
        (QuasiLinearPhase, Primary, Standard) => &QL_STANDARD,
        (QuasiLinearPhase, Primary, High) => &QL_HIGH,
        (QuasiLinearPhase, Relaxed, Draft) => &QL_RELAXED_DRAFT,
        (QuasiLinearPhase, Relaxed, Standard | High) => &QL_RELAXED,
        (MinimumPhase, Primary, Draft) => &MP_DRAFT,
        (MinimumPhase, Primary, Standard) => &MP_STANDARD,
        (MinimumPhase, Primary, High) => &MP_HIGH,
        (MinimumPhase, Relaxed, Draft) => &MP_RELAXED_DRAFT,
        (MinimumPhase, Relaxed, Standard) => &MP_RELAXED_STANDARD,
        (MinimumPhase, Relaxed, High) => &MP_RELAXED_HIGH,
    }
}

/// Round-trip latency of a cascade of `stages` 2x stages, in external samples.
///
/// Stage `i` runs at `2^i` times the external rate, so its table latency
/// contributes `Lᵢ / 2^i`. The sum is rounded to the nearest sample, halves
/// rounding up.
pub fn cascade_latency(stages: usize, quality: Quality, mode: PhaseMode) -> u32 {
    if stages == 0 {
        return 0;
    }
    // Accumulate in units of the top stage's rate to stay in integers.
    let top = stages as u32 - 1;
    let scaled: u32 = (0..stages)
        .map(|i| {
            let l = half_band_coeffs(quality, mode, StageRole::for_stage(i)).latency_samples;
            l << (top - i as u32)
        })
        .sum();
    let denom = 1u32 << top;
    (scaled + denom / 2) / denom
}

/// Smallest stop-band rejection across the stages of a cascade, in dB.
pub fn cascade_rejection_db(stages: usize, quality: Quality, mode: PhaseMode) -> f32 {
    (0..stages)
        .map(|i| half_band_coeffs(quality, mode, StageRole::for_stage(i)).stopband_rejection_db)
        .fold(f32::INFINITY, f32::min)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROLES: [StageRole; 2] = [StageRole::Primary, StageRole::Relaxed];

    fn magnitude_at(coeffs: &HalfBandCoeffs, w: f64) -> f64 {
        // Phase of an allpass chain evaluated at low-rate frequency 2w,
        // then |0.5 (A0(e^{2jw}) + e^{-jw} A1(e^{2jw}))|.
        fn phase(chain: &[AllpassCoeff], theta: f64) -> f64 {
            chain
                .iter()
                .map(|c| match *c {
                    FirstOrder(a) => {
                        // (a + e^{-jθ}) / (1 + a e^{-jθ})
                        let num = libm::atan2(-libm::sin(theta), a + libm::cos(theta));
                        let den = libm::atan2(-a * libm::sin(theta), 1.0 + a * libm::cos(theta));
                        num - den
                    }
                    SecondOrder(a1, a2) => {
                        let (s1, c1) = (libm::sin(theta), libm::cos(theta));
                        let (s2, c2) = (libm::sin(2.0 * theta), libm::cos(2.0 * theta));
                        let num = libm::atan2(-a1 * s1 - s2, a2 + a1 * c1 + c2);
                        let den = libm::atan2(-a1 * s1 - a2 * s2, 1.0 + a1 * c1 + a2 * c2);
                        num - den
                    }
                })
                .sum()
        }
        let p0 = phase(coeffs.branch0, 2.0 * w);
        let p1 = phase(coeffs.branch1, 2.0 * w) - w;
        libm::fabs(libm::cos((p0 - p1) / 2.0))
    }

    #[test]
    fn test_every_table_is_lowpass() {
        for &q in &Quality::ALL {
            for &m in &PhaseMode::ALL {
                for &r in &ROLES {
                    let c = half_band_coeffs(q, m, r);
                    let dc = magnitude_at(c, 1e-6);
                    let nyquist = magnitude_at(c, core::f64::consts::PI - 1e-6);
                    assert!((dc - 1.0).abs() < 1e-6, "{q:?} {m:?} {r:?}: dc = {dc}");
                    assert!(nyquist < 1e-3, "{q:?} {m:?} {r:?}: nyquist = {nyquist}");
                }
            }
        }
    }

    #[test]
    fn test_stopband_meets_documented_rejection() {
        for &q in &Quality::ALL {
            for &m in &PhaseMode::ALL {
                for &r in &ROLES {
                    let c = half_band_coeffs(q, m, r);
                    let edge = match r {
                        StageRole::Primary => 0.3,
                        StageRole::Relaxed => 0.35,
                    };
                    let floor = libm::pow(10.0, -(c.stopband_rejection_db as f64) / 20.0);
                    for i in 0..=400 {
                        let f = edge + (0.5 - edge) * i as f64 / 400.0;
                        let w = 2.0 * core::f64::consts::PI * f;
                        let mag = magnitude_at(c, w);
                        assert!(mag <= floor, "{q:?} {m:?} {r:?} at {f}: {mag} > {floor}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_higher_quality_rejects_more() {
        for &m in &PhaseMode::ALL {
            let draft = half_band_coeffs(Quality::Draft, m, StageRole::Primary);
            let standard = half_band_coeffs(Quality::Standard, m, StageRole::Primary);
            let high = half_band_coeffs(Quality::High, m, StageRole::Primary);
            assert!(draft.stopband_rejection_db < standard.stopband_rejection_db);
            assert!(standard.stopband_rejection_db < high.stopband_rejection_db);
        }
    }

    #[test]
    fn test_tables_fit_in_chain() {
        for &q in &Quality::ALL {
            for &m in &PhaseMode::ALL {
                for &r in &ROLES {
                    let c = half_band_coeffs(q, m, r);
                    assert!(c.branch0.len() <= crate::allpass::MAX_SECTIONS);
                    assert!(c.branch1.len() <= crate::allpass::MAX_SECTIONS);
                }
            }
        }
    }

    #[test]
    fn test_quasi_linear_branch0_is_pure_delay() {
        for &q in &Quality::ALL {
            for &r in &ROLES {
                let c = half_band_coeffs(q, PhaseMode::QuasiLinearPhase, r);
                assert!(c.branch0.iter().all(|s| *s == DELAY2));
                // Round trip delay is 2N low-rate samples for an N-sample delay branch.
                let n: usize = c.branch0.iter().map(AllpassCoeff::order).sum();
                assert_eq!(c.latency_samples as usize, 2 * n);
            }
        }
    }

    #[test]
    fn test_cascade_latency_table() {
        use PhaseMode::{MinimumPhase, QuasiLinearPhase};
        let expected = [
            (Quality::Draft, QuasiLinearPhase, [8, 10, 11]),
            (Quality::Standard, QuasiLinearPhase, [12, 16, 18]),
            (Quality::High, QuasiLinearPhase, [16, 20, 22]),
            (Quality::Draft, MinimumPhase, [2, 3, 3]),
            (Quality::Standard, MinimumPhase, [2, 3, 4]),
            (Quality::High, MinimumPhase, [3, 5, 5]),
        ];
        for (q, m, latencies) in expected {
            for (stages, &l) in (1..=3).zip(&latencies) {
                assert_eq!(cascade_latency(stages, q, m), l, "{q:?} {m:?} stages={stages}");
            }
        }
        assert_eq!(cascade_latency(0, Quality::High, QuasiLinearPhase), 0);
    }

    #[test]
    fn test_cascade_rejection_is_weakest_stage() {
        let r = cascade_rejection_db(2, Quality::Standard, PhaseMode::QuasiLinearPhase);
        assert_eq!(r, 59.0);
        let r = cascade_rejection_db(3, Quality::Draft, PhaseMode::MinimumPhase);
        assert_eq!(r, 52.0);
    }

    #[test]
    fn test_stage_roles() {
        assert_eq!(StageRole::for_stage(0), StageRole::Primary);
        assert_eq!(StageRole::for_stage(1), StageRole::Relaxed);
        assert_eq!(StageRole::for_stage(2), StageRole::Relaxed);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("high".parse::<Quality>(), Ok(Quality::High));
        assert_eq!(" Standard ".parse::<Quality>(), Ok(Quality::Standard));
        assert!("ultra".parse::<Quality>().is_err());

        assert_eq!("minimum".parse::<PhaseMode>(), Ok(PhaseMode::MinimumPhase));
        assert_eq!("QUASI-LINEAR".parse::<PhaseMode>(), Ok(PhaseMode::QuasiLinearPhase));
        assert!("linear".parse::<PhaseMode>().is_err());

        for q in Quality::ALL {
            assert_eq!(q.to_string().parse::<Quality>(), Ok(q));
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Quality::default(), Quality::Standard);
        assert_eq!(PhaseMode::default(), PhaseMode::QuasiLinearPhase);
    }
}
