//! Tick pacing for the worker loop.
//!
//! `FlowController` decides, on each tick boundary, whether the worker
//! proceeds immediately, sleeps for a fixed duration, or blocks until
//! explicitly released. It is the only gating primitive of the worker
//! loop; every mode transition away from `WaitForRelease` performs an
//! implicit release, so a blocked worker is never left stranded.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;

/// Pacing policy applied between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitingMode {
    /// Continue to the next tick immediately.
    Proceed,
    /// Sleep for the given duration between ticks.
    SleepFor(Duration),
    /// Block until a step token is pushed or the mode changes.
    WaitForRelease,
}

#[derive(Debug)]
struct FlowState {
    mode: WaitingMode,
    interrupted: bool,
}

/// Wait/step gating state machine for a single job's worker.
///
/// All methods are callable from any task; only `wait_if_necessary` is
/// meant to run on the worker itself. None of the operations report
/// errors: an interrupted controller simply stays in pass-through mode
/// forever.
pub struct FlowController {
    state: Mutex<FlowState>,
    // single-token step slot: a stored notification is the release token
    step_slot: Notify,
}

impl FlowController {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FlowState {
                mode: WaitingMode::Proceed,
                interrupted: false,
            }),
            step_slot: Notify::new(),
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, FlowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Change the pacing mode. A no-op when the mode is unchanged or the
    /// controller was interrupted. Leaving `WaitForRelease` pushes a
    /// release token first, so a currently blocked worker wakes up.
    pub fn set_waiting_mode(&self, mode: WaitingMode) {
        let release = {
            let mut state = self.lock_state();
            if state.interrupted || state.mode == mode {
                return;
            }
            let was_waiting = state.mode == WaitingMode::WaitForRelease;
            state.mode = mode;
            was_waiting
        };
        if release {
            self.step_slot.notify_one();
        }
    }

    /// Current pacing mode.
    pub fn waiting_mode(&self) -> WaitingMode {
        self.lock_state().mode
    }

    /// Apply the current pacing policy on the calling task.
    ///
    /// Under `Proceed` this returns immediately; under `SleepFor` it
    /// sleeps; under `WaitForRelease` it suspends until a token arrives.
    pub async fn wait_if_necessary(&self) {
        let (mode, interrupted) = {
            let state = self.lock_state();
            (state.mode, state.interrupted)
        };
        if interrupted {
            return;
        }
        match mode {
            WaitingMode::Proceed => {}
            WaitingMode::SleepFor(duration) => tokio::time::sleep(duration).await,
            WaitingMode::WaitForRelease => self.step_slot.notified().await,
        }
    }

    /// Push exactly one release token into the step slot.
    ///
    /// The slot holds at most one token: a second request before the
    /// worker consumed the first has no additional effect.
    pub fn step_request(&self) {
        self.step_slot.notify_one();
    }

    /// Force pass-through mode permanently and unblock any pending wait.
    ///
    /// Used on shutdown/cancellation; the controller cannot be re-armed
    /// afterwards.
    pub fn interrupt(&self) {
        {
            let mut state = self.lock_state();
            state.interrupted = true;
            state.mode = WaitingMode::Proceed;
        }
        self.step_slot.notify_one();
    }

    /// True iff the controller is armed to block at the next boundary.
    pub fn is_paused(&self) -> bool {
        let state = self.lock_state();
        state.mode == WaitingMode::WaitForRelease && !state.interrupted
    }
}

impl Default for FlowController {
    fn default() -> Self {
        Self::new()
    }
}
