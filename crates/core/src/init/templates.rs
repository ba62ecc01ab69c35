//! Embedded template files for .job-kit initialization.
//!
//! This module uses `rust-embed` to embed template files from the project
//! root `templates/` directory into the binary at compile time. This allows
//! generating `.job-kit/` structures without external file dependencies.

use rust_embed::RustEmbed;

/// Embedded template files from the `templates/` directory.
///
/// At compile time, all files in the project root `templates/` directory
/// are embedded into the binary. The path is calculated relative to the
/// crate root:
/// - `CARGO_MANIFEST_DIR` = `crates/core`
/// - `../../templates` = project root `templates/`
///
/// The `debug-embed` feature embeds the files in debug builds too, so
/// tests exercise the same assets a release binary ships with.
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../templates"]
pub struct TemplateAssets;

/// Get template file content by path.
///
/// # Arguments
/// * `path` - Relative path from templates root (e.g., "config.toml",
///   "procedures/simple-task.yaml")
///
/// # Returns
/// The file content as a String, or None if the file doesn't exist.
///
/// # Example
/// ```
/// use jk_core::init::templates::get_template;
///
/// let config = get_template("config.toml").expect("config.toml should exist");
/// assert!(config.contains("tick-timeout-ms"));
/// ```
pub fn get_template(path: &str) -> Option<String> {
    TemplateAssets::get(path).map(|file| String::from_utf8_lossy(file.data.as_ref()).to_string())
}

/// List all template files in a directory.
///
/// # Arguments
/// * `prefix` - Directory prefix (e.g., "procedures/")
///
/// # Returns
/// A vector of file paths that match the prefix.
///
/// # Example
/// ```
/// use jk_core::init::templates::list_templates;
///
/// let procedures = list_templates("procedures/");
/// assert!(procedures.contains(&"procedures/simple-task.yaml".to_string()));
/// ```
pub fn list_templates(prefix: &str) -> Vec<String> {
    TemplateAssets::iter()
        .filter(|path| path.starts_with(prefix))
        .map(|path| path.to_string())
        .collect()
}
