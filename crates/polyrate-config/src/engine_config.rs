//! Engine configuration file format.

use serde::Deserialize;
use std::path::Path;

use polyrate_core::{FilterCore, OversampledFilter, OversamplingPreset, Quality};

use crate::error::ConfigError;

/// Oversampling engine settings as written in a TOML file.
///
/// Every field is optional and falls back to its default.
///
/// # TOML Format
///
/// ```toml
/// sample_rate = 48000.0
/// preset = "x4-low-latency"
/// quality = "high"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// External stream rate in Hz.
    pub sample_rate: f32,

    /// Preset name: `x2`, `x4`, `x8`, or one of those with `-low-latency`.
    pub preset: String,

    /// Quality name: `draft`, `standard` or `high`.
    pub quality: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100.0,
            preset: OversamplingPreset::default().name().to_string(),
            quality: Quality::default().name().to_string(),
        }
    }
}

/// An [`EngineConfig`] whose names have been resolved and checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedConfig {
    /// External stream rate in Hz (positive and finite).
    pub sample_rate: f32,
    /// Resolved preset.
    pub preset: OversamplingPreset,
    /// Resolved quality.
    pub quality: Quality,
}

impl EngineConfig {
    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading engine config");
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Resolve names and check ranges.
    pub fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }
        let validated = ValidatedConfig {
            sample_rate: self.sample_rate,
            preset: self.preset.parse()?,
            quality: self.quality.parse()?,
        };
        tracing::debug!(
            sample_rate = validated.sample_rate,
            preset = validated.preset.name(),
            quality = validated.quality.name(),
            "engine config validated"
        );
        Ok(validated)
    }

    /// Validate, then construct a wrapper around `F`.
    pub fn build<F: FilterCore>(&self) -> Result<OversampledFilter<F>, ConfigError> {
        Ok(self.validate()?.build())
    }
}

impl ValidatedConfig {
    /// Construct a wrapper around `F` with these settings.
    pub fn build<F: FilterCore>(&self) -> OversampledFilter<F> {
        OversampledFilter::with_quality(self.sample_rate, self.preset, self.quality)
    }

    /// Latency a wrapper built from this configuration will report.
    pub fn latency(&self) -> u32 {
        polyrate_core::cascade_latency(
            self.preset.factor().stages(),
            self.quality,
            self.preset.phase_mode(),
        )
    }
}
