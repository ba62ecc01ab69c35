//! Global configuration models for `.job-kit/config.toml`.
//!
//! This module defines the structure of the global configuration file that
//! controls project-wide settings for job-kit.

use serde::Deserialize;
use serde::Serialize;
use ts_rs::TS;

fn default_event_capacity() -> usize {
    100
}

/// Represents global settings from `.job-kit/config.toml`.
///
/// # Example
///
/// ```toml
/// # .job-kit/config.toml
/// tick-timeout-ms = 50
/// event-capacity = 100
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, TS)]
#[serde(rename_all = "kebab-case")]
pub struct GlobalConfig {
    /// Extra delay applied on the worker after every tick that still has
    /// work remaining. Zero disables the delay.
    #[serde(default)]
    pub tick_timeout_ms: u64,

    /// Capacity of the core-to-UI event channel.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            tick_timeout_ms: 0,
            event_capacity: default_event_capacity(),
        }
    }
}
