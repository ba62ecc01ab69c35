//! # jk-protocol
//!
//! Core protocol definitions and data models for job-kit.
//!
//! This crate defines all shared data structures used for:
//! - Procedure definition parsing (YAML procedures, TOML config)
//! - Runtime job state management
//! - Communication between the interaction layer (UI) and the Core
//!
//! ## Modules
//!
//! - [`config_models`]: Global configuration from config.toml
//! - [`procedure_models`]: Procedure definitions and instruction trees
//! - [`job_models`]: Runtime job state, status and log events
//! - [`request_models`]: Blocking user-choice/user-input request payloads
//! - [`ipc`]: Operations and Events for Core-UI communication
//!
//! ## Design Principles
//!
//! - Minimal dependencies: serde, ts-rs, uuid, chrono
//! - TypeScript generation: All types derive `TS` for client compatibility
//! - Independent compilation: No dependencies on other job-kit crates

pub mod config_models;
pub mod ipc;
pub mod job_models;
pub mod procedure_models;
pub mod request_models;

// Re-export all public types for convenience
pub use config_models::*;
pub use ipc::*;
pub use job_models::*;
pub use procedure_models::*;
pub use request_models::*;
