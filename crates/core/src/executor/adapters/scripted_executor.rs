//! A deterministic executor that interprets instruction trees literally.
//!
//! Every instruction node consumes exactly one tick (plain nodes can repeat
//! via a `ticks` attribute). A handful of instruction kinds get special
//! treatment so tests and demos can script timing, failures, user
//! interaction and never-ending work:
//!
//! - `wait` sleeps for `timeout` seconds on its tick
//! - `fail` fails its tick with `message`
//! - `user-choice` / `user-input` raises a blocking user request
//! - `endless` keeps reporting more work until halted
//!
//! Anything else is one unit of plain work per tick.

use crate::bridge::UserContext;
use crate::executor::base::{ExecutorError, ProcedureExecutor};
use async_trait::async_trait;
use jk_protocol::procedure_models::{visit_instructions, InstructionItem, Procedure};
use jk_protocol::request_models::{
    UserChoiceArgs, UserChoiceResult, UserInputArgs, UserInputResult,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;

/// One scripted unit of execution.
#[derive(Debug, Clone)]
enum TickAction {
    Work,
    Sleep(Duration),
    Fail(String),
    UserChoice(UserChoiceArgs),
    UserInput(UserInputArgs),
    Endless,
}

fn compile_instruction(item: &InstructionItem, program: &mut Vec<TickAction>) -> Result<(), ExecutorError> {
    match item.kind.as_str() {
        "wait" => {
            let seconds = match item.attributes.get("timeout") {
                Some(raw) => raw.parse::<f64>().ok().filter(|s| s.is_finite() && *s >= 0.0).ok_or_else(|| {
                    ExecutorError::InvalidProcedure(format!(
                        "wait instruction has invalid timeout '{raw}'"
                    ))
                })?,
                None => 0.0,
            };
            program.push(TickAction::Sleep(Duration::from_secs_f64(seconds)));
        }
        "fail" => {
            let message = item
                .attributes
                .get("message")
                .cloned()
                .unwrap_or_else(|| "instruction failed".to_string());
            program.push(TickAction::Fail(message));
        }
        "user-choice" => {
            let options = item
                .attributes
                .get("options")
                .map(|raw| raw.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_default();
            let description = item.attributes.get("description").cloned().unwrap_or_default();
            program.push(TickAction::UserChoice(UserChoiceArgs {
                options,
                description,
            }));
        }
        "user-input" => {
            let current_value = item
                .attributes
                .get("current-value")
                .cloned()
                .unwrap_or_default();
            let description = item.attributes.get("description").cloned().unwrap_or_default();
            program.push(TickAction::UserInput(UserInputArgs {
                current_value,
                description,
            }));
        }
        "endless" => program.push(TickAction::Endless),
        _ => {
            let ticks = match item.attributes.get("ticks") {
                Some(raw) => raw.parse::<u64>().map_err(|_| {
                    ExecutorError::InvalidProcedure(format!(
                        "instruction '{}' has non-numeric ticks '{raw}'",
                        item.kind
                    ))
                })?,
                None => 1,
            };
            for _ in 0..ticks {
                program.push(TickAction::Work);
            }
        }
    }
    Ok(())
}

/// Deterministic in-process executor, used as the reference implementation
/// of the [`ProcedureExecutor`] contract and by the test suites.
pub struct ScriptedExecutor {
    program: Mutex<Vec<TickAction>>,
    queue: Mutex<VecDeque<TickAction>>,
    halted: AtomicBool,
    halt_signal: Notify,
    user: Option<UserContext>,
    tick_duration: Option<Duration>,
    choice_results: Mutex<Vec<UserChoiceResult>>,
    input_results: Mutex<Vec<UserInputResult>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self {
            program: Mutex::new(Vec::new()),
            queue: Mutex::new(VecDeque::new()),
            halted: AtomicBool::new(false),
            halt_signal: Notify::new(),
            user: None,
            tick_duration: None,
            choice_results: Mutex::new(Vec::new()),
            input_results: Mutex::new(Vec::new()),
        }
    }

    /// Attach the request bridge used by `user-choice`/`user-input`
    /// instructions. Without it those instructions are skipped.
    pub fn with_user_context(mut self, user: UserContext) -> Self {
        self.user = Some(user);
        self
    }

    /// Add a fixed amount of simulated work to every tick.
    pub fn with_tick_duration(mut self, duration: Duration) -> Self {
        self.tick_duration = Some(duration);
        self
    }

    /// Answers received for `user-choice` instructions so far.
    pub fn user_choice_results(&self) -> Vec<UserChoiceResult> {
        self.choice_results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Answers received for `user-input` instructions so far.
    pub fn user_input_results(&self) -> Vec<UserInputResult> {
        self.input_results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn interruptible_sleep(&self, duration: Duration) {
        tokio::select! {
            () = tokio::time::sleep(duration) => {}
            () = self.halt_signal.notified() => {}
        }
    }
}

impl Default for ScriptedExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcedureExecutor for ScriptedExecutor {
    async fn set_procedure(&self, procedure: Procedure) -> Result<(), ExecutorError> {
        let mut program = Vec::new();
        let mut compile_error = None;
        visit_instructions(&procedure.instructions, &mut |item| {
            if compile_error.is_none() {
                if let Err(err) = compile_instruction(item, &mut program) {
                    compile_error = Some(err);
                }
            }
        });
        if let Some(err) = compile_error {
            return Err(err);
        }

        *self
            .program
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = program.clone();
        *self.queue.lock().unwrap_or_else(PoisonError::into_inner) = program.into();
        self.halted.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn execute_single(&self) -> Result<bool, ExecutorError> {
        if self.halted.load(Ordering::SeqCst) {
            return Ok(false);
        }

        let action = self
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        let Some(action) = action else {
            return Ok(false);
        };

        if let Some(duration) = self.tick_duration {
            self.interruptible_sleep(duration).await;
        }

        match action {
            TickAction::Work => {}
            TickAction::Sleep(duration) => self.interruptible_sleep(duration).await,
            TickAction::Fail(message) => {
                return Err(ExecutorError::ExecutionError(message));
            }
            TickAction::UserChoice(args) => {
                if let Some(user) = &self.user {
                    let result = user.get_user_choice(args).await;
                    self.choice_results
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push(result);
                }
            }
            TickAction::UserInput(args) => {
                if let Some(user) = &self.user {
                    let result = user.get_user_input(args).await;
                    self.input_results
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push(result);
                }
            }
            TickAction::Endless => {
                self.queue
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push_front(TickAction::Endless);
                self.interruptible_sleep(Duration::from_millis(1)).await;
            }
        }

        if self.halted.load(Ordering::SeqCst) {
            return Ok(false);
        }
        Ok(!self
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty())
    }

    fn is_finished(&self) -> bool {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    fn halt(&self) {
        self.halted.store(true, Ordering::SeqCst);
        self.halt_signal.notify_waiters();
    }

    async fn reset(&self) -> Result<(), ExecutorError> {
        let program = self
            .program
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        *self.queue.lock().unwrap_or_else(PoisonError::into_inner) = program.into();
        self.halted.store(false, Ordering::SeqCst);
        Ok(())
    }
}
