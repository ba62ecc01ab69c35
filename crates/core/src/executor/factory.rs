//! Executor factory for creating executor instances per submitted job.

use crate::bridge::UserContext;
use crate::executor::adapters::ScriptedExecutor;
use crate::executor::base::ProcedureExecutor;
use anyhow::Result;
use jk_protocol::procedure_models::Procedure;
use std::sync::Arc;
use std::time::Duration;

/// Creates one executor per submitted procedure.
///
/// The factory is the seam where an embedding application plugs in its real
/// execution engine; everything above it (runner, handler, manager) only
/// sees the [`ProcedureExecutor`] contract.
pub trait ExecutorFactory: Send + Sync {
    /// Create a fresh, unbound executor for the given procedure.
    ///
    /// Binding (`set_procedure`) happens later, during job preparation.
    fn create(&self, procedure: &Procedure) -> Result<Arc<dyn ProcedureExecutor>>;
}

/// Factory producing [`ScriptedExecutor`] instances.
#[derive(Default)]
pub struct ScriptedExecutorFactory {
    user: Option<UserContext>,
    tick_duration: Option<Duration>,
}

impl ScriptedExecutorFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand every created executor the request bridge for
    /// `user-choice`/`user-input` instructions.
    pub fn with_user_context(mut self, user: UserContext) -> Self {
        self.user = Some(user);
        self
    }

    /// Add a fixed amount of simulated work to every tick of every
    /// created executor.
    pub fn with_tick_duration(mut self, duration: Duration) -> Self {
        self.tick_duration = Some(duration);
        self
    }
}

impl ExecutorFactory for ScriptedExecutorFactory {
    fn create(&self, _procedure: &Procedure) -> Result<Arc<dyn ProcedureExecutor>> {
        let mut executor = ScriptedExecutor::new();
        if let Some(user) = &self.user {
            executor = executor.with_user_context(user.clone());
        }
        if let Some(duration) = self.tick_duration {
            executor = executor.with_tick_duration(duration);
        }
        Ok(Arc::new(executor))
    }
}
