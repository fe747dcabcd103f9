//! Tunable constants the distilled spec named as open questions
//! (spec.md §9) rather than hard constants, loaded from the
//! environment via `dotenv` the way the teacher crate's example
//! binaries do.

use std::env;

use crate::model::{Weight, INVALID_EDGE_WEIGHT};

/// Runtime-tunable knobs for the query engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Alternative-path approximate length bound: a candidate's own
    /// length must stay under `length_bound_factor * upper_bound`
    /// (spec.md §4.4, default 1.25).
    pub length_bound_factor: f64,
    /// Alternative-path approximate sharing bound: a candidate's
    /// shared length with the shortest path must stay under
    /// `sharing_bound_factor * upper_bound` (spec.md §4.4, default 0.8).
    pub sharing_bound_factor: f64,
    /// How many settled nodes the search core processes between
    /// cancellation-token checks (spec.md §5).
    pub cancellation_check_interval: u32,
    /// Sentinel starting value for a leg's `upper_bound` before any
    /// middle node has been found.
    pub initial_upper_bound: Weight,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            length_bound_factor: 1.25,
            sharing_bound_factor: 0.8,
            cancellation_check_interval: 1_000,
            initial_upper_bound: INVALID_EDGE_WEIGHT,
        }
    }
}

impl EngineConfig {
    /// Starts from [`EngineConfig::default`] and overrides any field
    /// named by a matching `CRATE_*` environment variable, loading a
    /// `.env` file first if one is present. Malformed values are
    /// ignored (the default for that field is kept) rather than
    /// failing construction.
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        let mut config = EngineConfig::default();

        if let Some(v) = parse_env("CRATE_LENGTH_BOUND_FACTOR") {
            config.length_bound_factor = v;
        }
        if let Some(v) = parse_env("CRATE_SHARING_BOUND_FACTOR") {
            config.sharing_bound_factor = v;
        }
        if let Some(v) = parse_env::<u32>("CRATE_CANCELLATION_CHECK_INTERVAL") {
            config.cancellation_check_interval = v;
        }

        config
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
