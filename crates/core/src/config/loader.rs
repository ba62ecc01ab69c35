//! Configuration file loader for the `.job-kit/` directory structure.
//!
//! This module provides functionality to load and parse all configuration
//! files from the `.job-kit/` directory, including:
//! - `config.toml`: Global settings
//! - `procedures/*.yaml`: Procedure definitions

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::AppConfig;
use jk_protocol::config_models::GlobalConfig;
use jk_protocol::procedure_models::Procedure;
use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

/// Loads all configuration from the `.job-kit/` directory.
///
/// This function scans the `.job-kit/` directory and loads:
/// - Global configuration from `config.toml`
/// - Procedure definitions from `procedures/*.yaml` files
///
/// # Arguments
///
/// * `root` - Root directory containing the `.job-kit/` folder
///
/// # Returns
///
/// An `AppConfig` containing all loaded configuration. If directories or
/// files are missing (but the root exists), returns an empty/default
/// configuration rather than an error.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - Files exist but cannot be read
/// - Files have invalid syntax (TOML or YAML)
/// - Two procedures share a name
///
/// # Example
///
/// ```rust,no_run
/// use jk_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Loaded {} procedures", config.procedures.len());
/// # Ok(())
/// # }
/// ```
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    let jk_dir = root.join(".job-kit");

    // If .job-kit doesn't exist, return default config
    if !jk_dir.exists() {
        return Ok(AppConfig::default());
    }

    // Load global config
    let global = load_global_config(&jk_dir)?;

    // Load procedures
    let procedures = load_procedures(&jk_dir)?;

    Ok(AppConfig { global, procedures })
}

/// Loads global configuration from `config.toml`.
fn load_global_config(jk_dir: &Path) -> ConfigResult<GlobalConfig> {
    let config_path = jk_dir.join("config.toml");

    // If config.toml doesn't exist, return default
    if !config_path.exists() {
        return Ok(GlobalConfig::default());
    }

    let content =
        std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    let config: GlobalConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path,
            source,
        })?;

    Ok(config)
}

/// Loads all procedure definitions from `procedures/*.yaml`.
fn load_procedures(jk_dir: &Path) -> ConfigResult<Vec<Procedure>> {
    let procedures_dir = jk_dir.join("procedures");

    // If procedures directory doesn't exist, return empty vector
    if !procedures_dir.exists() {
        return Ok(Vec::new());
    }

    let mut procedures = Vec::new();
    let mut seen_names = HashSet::new();

    // Walk through all .yaml and .yml files in the procedures directory
    for entry in WalkDir::new(&procedures_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
    {
        let entry = entry.map_err(|source| ConfigError::DirectoryWalk {
            path: procedures_dir.clone(),
            source,
        })?;

        let path = entry.path();

        // Only process .yaml and .yml files
        let ext = path.extension().and_then(|s| s.to_str());
        if ext != Some("yaml") && ext != Some("yml") {
            continue;
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let procedure: Procedure =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::YamlParse {
                path: path.to_path_buf(),
                source,
            })?;

        if !seen_names.insert(procedure.name.clone()) {
            return Err(ConfigError::InvalidConfig {
                path: path.to_path_buf(),
                reason: format!("duplicate procedure name '{}'", procedure.name),
            });
        }

        procedures.push(procedure);
    }

    Ok(procedures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    /// We create a complete `.job-kit/` structure with all required files
    /// and verify that `load_config` correctly parses and loads everything.
    #[tokio::test]
    async fn test_load_config_acceptance() {
        // Setup: Create temporary .job-kit directory structure
        let dir = tempdir().expect("Failed to create temp dir");
        let root = dir.path();
        let jk_dir = root.join(".job-kit");

        fs::create_dir_all(jk_dir.join("procedures")).expect("Failed to create procedures dir");

        // Write config.toml
        let config_toml = "tick-timeout-ms = 25\nevent-capacity = 64\n";
        fs::write(jk_dir.join("config.toml"), config_toml).expect("Failed to write config.toml");

        // Write a procedure definition
        let procedure_yaml = r#"name: review-sequence
description: "Two steps and a user choice"
instructions:
  - kind: counter
    attributes:
      ticks: "2"
  - kind: user-choice
    attributes:
      options: "approve,reject"
      description: "Review the result"
"#;
        fs::write(jk_dir.join("procedures/review.yaml"), procedure_yaml)
            .expect("Failed to write procedure file");

        // Act: Load configuration
        let config = load_config(root).await.expect("Failed to load config");

        // Assert: Verify all configuration was loaded correctly
        assert_eq!(config.global.tick_timeout_ms, 25);
        assert_eq!(config.global.event_capacity, 64);

        assert_eq!(config.procedures.len(), 1, "Should load 1 procedure");
        let procedure = &config.procedures[0];
        assert_eq!(procedure.name, "review-sequence");
        assert_eq!(procedure.instructions.len(), 2);
        assert_eq!(procedure.instructions[0].kind, "counter");
        assert_eq!(
            procedure.instructions[1].attributes["options"],
            "approve,reject"
        );
        assert!(config.find_procedure("review-sequence").is_some());
    }

    /// Test loading from an empty directory (no .job-kit folder).
    ///
    /// This should return a default/empty configuration, not an error.
    #[tokio::test]
    async fn test_load_config_empty_directory() {
        let dir = tempdir().expect("Failed to create temp dir");
        let root = dir.path();

        // No .job-kit directory exists
        let config = load_config(root)
            .await
            .expect("Should handle missing .job-kit");

        // Should return empty/default configuration
        assert_eq!(config.global.tick_timeout_ms, 0);
        assert!(config.procedures.is_empty(), "Should have no procedures");
    }

    /// Test partial configuration (only config.toml exists).
    #[tokio::test]
    async fn test_load_config_partial() {
        let dir = tempdir().expect("Failed to create temp dir");
        let root = dir.path();
        let jk_dir = root.join(".job-kit");

        fs::create_dir_all(&jk_dir).expect("Failed to create .job-kit");

        // Only write config.toml
        fs::write(jk_dir.join("config.toml"), "tick-timeout-ms = 5")
            .expect("Failed to write config.toml");

        let config = load_config(root).await.expect("Should handle partial config");

        assert_eq!(config.global.tick_timeout_ms, 5);
        assert!(config.procedures.is_empty(), "Should have no procedures");
    }

    /// Test invalid TOML syntax.
    #[tokio::test]
    async fn test_load_config_invalid_toml() {
        let dir = tempdir().expect("Failed to create temp dir");
        let root = dir.path();
        let jk_dir = root.join(".job-kit");

        fs::create_dir_all(&jk_dir).expect("Failed to create .job-kit");

        // Write invalid TOML
        fs::write(jk_dir.join("config.toml"), "tick-timeout-ms = [invalid toml")
            .expect("Failed to write config.toml");

        let result = load_config(root).await;
        assert!(result.is_err(), "Should fail on invalid TOML");

        if let Err(ConfigError::TomlParse { path, .. }) = result {
            assert!(path.ends_with("config.toml"));
        } else {
            panic!("Expected TomlParse error");
        }
    }

    /// Test invalid YAML in a procedure file.
    #[tokio::test]
    async fn test_load_config_invalid_yaml() {
        let dir = tempdir().expect("Failed to create temp dir");
        let root = dir.path();
        let jk_dir = root.join(".job-kit");

        fs::create_dir_all(jk_dir.join("procedures")).expect("Failed to create procedures dir");

        // Write invalid YAML
        let invalid_yaml = "name: test\n  invalid: [yaml";
        fs::write(jk_dir.join("procedures/test.yaml"), invalid_yaml)
            .expect("Failed to write procedure file");

        let result = load_config(root).await;
        assert!(result.is_err(), "Should fail on invalid YAML");

        if let Err(ConfigError::YamlParse { path, .. }) = result {
            assert!(path.ends_with("test.yaml"));
        } else {
            panic!("Expected YamlParse error");
        }
    }

    /// Test loading multiple procedures.
    #[tokio::test]
    async fn test_load_config_multiple_files() {
        let dir = tempdir().expect("Failed to create temp dir");
        let root = dir.path();
        let jk_dir = root.join(".job-kit");

        fs::create_dir_all(jk_dir.join("procedures")).expect("Failed to create procedures dir");

        for i in 1..=3 {
            let procedure_yaml = format!(
                r#"name: procedure-{i}
instructions:
  - kind: counter
    attributes:
      ticks: "{i}"
"#
            );
            fs::write(
                jk_dir.join(format!("procedures/procedure-{i}.yaml")),
                procedure_yaml,
            )
            .expect("Failed to write procedure file");
        }

        let config = load_config(root).await.expect("Should load multiple files");

        assert_eq!(config.procedures.len(), 3, "Should load 3 procedures");
    }

    /// Test that duplicate procedure names are rejected.
    #[tokio::test]
    async fn test_load_config_duplicate_names() {
        let dir = tempdir().expect("Failed to create temp dir");
        let root = dir.path();
        let jk_dir = root.join(".job-kit");

        fs::create_dir_all(jk_dir.join("procedures")).expect("Failed to create procedures dir");

        let procedure_yaml = "name: duplicated\ninstructions: []\n";
        fs::write(jk_dir.join("procedures/a.yaml"), procedure_yaml)
            .expect("Failed to write procedure file");
        fs::write(jk_dir.join("procedures/b.yaml"), procedure_yaml)
            .expect("Failed to write procedure file");

        let result = load_config(root).await;
        assert!(result.is_err(), "Should fail on duplicate names");

        if let Err(ConfigError::InvalidConfig { reason, .. }) = result {
            assert!(reason.contains("duplicated"));
        } else {
            panic!("Expected InvalidConfig error");
        }
    }

    /// Test that non-matching files are ignored.
    #[tokio::test]
    async fn test_load_config_ignores_non_matching_files() {
        let dir = tempdir().expect("Failed to create temp dir");
        let root = dir.path();
        let jk_dir = root.join(".job-kit");

        fs::create_dir_all(jk_dir.join("procedures")).expect("Failed to create procedures dir");

        // Write a file with the wrong extension
        fs::write(jk_dir.join("procedures/notes.txt"), "Not a yaml file")
            .expect("Failed to write txt file");

        // Write one valid file
        let procedure_yaml = "name: valid\ninstructions:\n  - kind: counter\n";
        fs::write(jk_dir.join("procedures/valid.yaml"), procedure_yaml)
            .expect("Failed to write procedure file");

        let config = load_config(root)
            .await
            .expect("Should ignore non-matching files");

        assert_eq!(config.procedures.len(), 1, "Should only load .yaml files");
    }

    /// Test loading with .yml extension (alternative to .yaml).
    #[tokio::test]
    async fn test_load_config_yml_extension() {
        let dir = tempdir().expect("Failed to create temp dir");
        let root = dir.path();
        let jk_dir = root.join(".job-kit");

        fs::create_dir_all(jk_dir.join("procedures")).expect("Failed to create procedures dir");

        let procedure_yaml = "name: yml-procedure\ninstructions:\n  - kind: counter\n";
        fs::write(jk_dir.join("procedures/test.yml"), procedure_yaml)
            .expect("Failed to write procedure file");

        let config = load_config(root).await.expect("Should load .yml files");

        assert_eq!(config.procedures.len(), 1, "Should load .yml files");
        assert_eq!(config.procedures[0].name, "yml-procedure");
    }
}
