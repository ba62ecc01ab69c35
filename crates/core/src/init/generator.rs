//! Directory structure and file generation for .job-kit initialization.

use super::error::{InitError, InitResult};
use super::templates::{get_template, list_templates};
use std::fs;
use std::path::{Path, PathBuf};

/// Options for initializing a .job-kit directory.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Target directory where .job-kit will be created.
    pub target_dir: PathBuf,

    /// Overwrite existing .job-kit directory if it exists.
    pub force: bool,

    /// Create minimal template (only 1 procedure).
    pub minimal: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            target_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            force: false,
            minimal: false,
        }
    }
}

/// Generate a complete .job-kit directory structure with templates.
///
/// This function creates the following structure:
/// ```text
/// .job-kit/
/// ├── config.toml
/// └── procedures/
///     ├── simple-task.yaml
///     └── interactive-review.yaml (unless minimal)
/// ```
///
/// # Arguments
/// * `options` - Configuration for the initialization process
///
/// # Returns
/// `Ok(())` if successful, or an `InitError` if:
/// - The .job-kit directory already exists (without force flag)
/// - A template file cannot be found
/// - File system operations fail
pub async fn generate_job_kit_structure(options: InitOptions) -> InitResult<()> {
    let jk_dir = options.target_dir.join(".job-kit");

    // Check if directory exists
    if jk_dir.exists() && !options.force {
        return Err(InitError::DirectoryExists(jk_dir));
    }

    // Create directory structure
    fs::create_dir_all(jk_dir.join("procedures")).map_err(|source| InitError::DirectoryCreate {
        path: jk_dir.join("procedures"),
        source,
    })?;

    // Generate config.toml
    write_template_file(&jk_dir, "config.toml")?;

    // Generate procedure templates
    if options.minimal {
        // Only create the simple-task procedure
        write_template_file(&jk_dir, "procedures/simple-task.yaml")?;
    } else {
        // Create all procedure templates
        for procedure_path in list_templates("procedures/") {
            write_template_file(&jk_dir, &procedure_path)?;
        }
    }

    Ok(())
}

/// Helper function to write a template file to the target directory.
///
/// # Arguments
/// * `jk_dir` - The .job-kit directory path
/// * `template_path` - Relative path of the template (e.g.,
///   "procedures/simple-task.yaml")
///
/// # Returns
/// `Ok(())` if successful, or an `InitError` if the template is not found
/// or writing fails.
fn write_template_file(jk_dir: &Path, template_path: &str) -> InitResult<()> {
    let content = get_template(template_path)
        .ok_or_else(|| InitError::TemplateNotFound(template_path.to_string()))?;

    let target_path = jk_dir.join(template_path);

    // Ensure parent directory exists
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|source| InitError::DirectoryCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&target_path, content).map_err(|source| InitError::FileWrite {
        path: target_path,
        source,
    })?;

    Ok(())
}
