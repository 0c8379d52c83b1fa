//! Configuration loading for the polyrate oversampling engine.
//!
//! Reads the engine's settings (stream sample rate, oversampling preset,
//! half-band quality) from TOML, resolves the names into
//! [`polyrate_core`] types, and builds a configured
//! [`OversampledFilter`](polyrate_core::OversampledFilter).
//!
//! Configuration is read-only: nothing here writes files.
//!
//! # Example
//!
//! ```rust,no_run
//! use polyrate_config::EngineConfig;
//! # use polyrate_core::FilterCore;
//! # struct Ladder;
//! # impl FilterCore for Ladder {
//! #     fn with_sample_rate(_: f32) -> Self { Ladder }
//! #     fn set_cutoff(&mut self, _: f32) {}
//! #     fn set_resonance(&mut self, _: f32) {}
//! #     fn process(&mut self, _: &mut [f32]) {}
//! # }
//!
//! let config = EngineConfig::load("engine.toml").unwrap();
//! let filter = config.build::<Ladder>().unwrap();
//! println!("latency: {} samples", filter.latency());
//! ```

mod engine_config;
mod error;

pub use engine_config::{EngineConfig, ValidatedConfig};
pub use error::ConfigError;
