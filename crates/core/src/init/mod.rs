//! Initialization module for creating .job-kit directory structures.
//!
//! This module provides functionality to initialize a new job-kit project
//! by generating a `.job-kit/` directory with pre-configured templates for:
//! - Global configuration (`config.toml`)
//! - Procedure definitions (`procedures/*.yaml`)
//!
//! # Example
//!
//! ```no_run
//! use jk_core::init::{InitOptions, generate_job_kit_structure};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = InitOptions {
//!     target_dir: PathBuf::from("."),
//!     force: false,
//!     minimal: false,
//! };
//!
//! generate_job_kit_structure(options).await?;
//! println!("job-kit initialized successfully!");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generator;
pub mod templates;

// Re-export commonly used types for convenience
pub use error::{InitError, InitResult};
pub use generator::{generate_job_kit_structure, InitOptions};
pub use templates::{get_template, list_templates};
