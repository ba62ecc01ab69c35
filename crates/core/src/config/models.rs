//! Configuration models that aggregate all settings.
//!
//! This module provides the unified `AppConfig` structure that combines
//! global settings and procedure definitions into a single configuration
//! object.

use jk_protocol::config_models::GlobalConfig;
use jk_protocol::procedure_models::Procedure;

/// Unified application configuration loaded from the `.job-kit/` directory.
///
/// This structure aggregates all configuration sources:
/// - `config.toml`: Global settings
/// - `procedures/*.yaml`: Procedure definitions
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Global settings from `config.toml`.
    pub global: GlobalConfig,

    /// All procedure definitions loaded from `procedures/*.yaml`.
    pub procedures: Vec<Procedure>,
}

impl AppConfig {
    /// Look up a procedure by name.
    pub fn find_procedure(&self, name: &str) -> Option<&Procedure> {
        self.procedures.iter().find(|p| p.name == name)
    }
}
