//! Configuration management
//!
//! Settings for the minimum fee check: address prefix, delegation depth,
//! flat-fee enforcement and where the registry database lives. Values come
//! from defaults, an optional TOML file and environment overrides.

pub mod settings;

pub use settings::{Config, Settings, GLOBAL_CONFIG};
