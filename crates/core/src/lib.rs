//! # jk-core
//!
//! Core job execution control layer for job-kit.
//!
//! This crate provides:
//! - Configuration loading from the `.job-kit/` directory
//! - The domain executor contract and a scripted reference executor
//! - The per-job worker loop with pause/step/stop gating
//! - A multi-job manager with a single active job
//! - Breakpoint save/restore across rebuilt instruction trees
//! - A blocking request/response bridge for user-choice prompts
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and management
//! - [`executor`]: Executor trait and adapter implementations
//! - [`jobs`]: Job runner, manager, pacing and breakpoints
//! - [`bridge`]: Cross-task blocking request bridge
//! - [`init`]: `.job-kit/` directory scaffolding

pub mod bridge;
pub mod config;
pub mod executor;
pub mod init;
pub mod jobs;
