//! Breakpoint placement decoupled from a specific tree instance.
//!
//! Breakpoints live on instruction items, but instruction trees get
//! rebuilt (reload from file, undo/redo, job reset). `BreakpointController`
//! snapshots placement as `(pre-order position, state)` pairs so it can be
//! reapplied to a *different* tree of identical shape.

use crate::jobs::error::JobError;
use jk_protocol::procedure_models::{
    visit_instructions, visit_instructions_mut, BreakpointState, InstructionItem,
};

/// Saves and restores breakpoint placement across structurally identical
/// instruction trees.
pub struct BreakpointController {
    // one entry per pre-order position of the saved tree
    snapshot: Option<Vec<BreakpointState>>,
}

impl BreakpointController {
    pub fn new() -> Self {
        Self { snapshot: None }
    }

    /// Snapshot breakpoint states of every node, in pre-order.
    ///
    /// Overwrites any previous snapshot: only the most recent one is kept.
    pub fn save_breakpoints(&mut self, instructions: &[InstructionItem]) {
        let mut states = Vec::new();
        visit_instructions(instructions, &mut |item| states.push(item.breakpoint));
        self.snapshot = Some(states);
    }

    /// Apply the saved snapshot positionally to another tree.
    ///
    /// The target must have the same shape as the tree the snapshot was
    /// taken from; this is a caller contract, not something the controller
    /// can detect. A mismatched tree gets states assigned to whatever
    /// positions line up.
    pub fn restore_breakpoints(
        &self,
        instructions: &mut [InstructionItem],
    ) -> Result<(), JobError> {
        let snapshot = self
            .snapshot
            .as_ref()
            .ok_or(JobError::MissingBreakpointSnapshot)?;
        let mut position = 0;
        visit_instructions_mut(instructions, &mut |item| {
            if let Some(state) = snapshot.get(position) {
                item.breakpoint = *state;
            }
            position += 1;
        });
        Ok(())
    }

    /// True once a snapshot has been taken.
    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }
}

impl Default for BreakpointController {
    fn default() -> Self {
        Self::new()
    }
}

/// Cycle a node's breakpoint: NotSet -> Set -> Disabled -> NotSet.
pub fn toggle_breakpoint(item: &mut InstructionItem) -> BreakpointState {
    item.breakpoint = match item.breakpoint {
        BreakpointState::NotSet => BreakpointState::Set,
        BreakpointState::Set => BreakpointState::Disabled,
        BreakpointState::Disabled => BreakpointState::NotSet,
    };
    item.breakpoint
}

/// Breakpoint of the node at the given pre-order position, if any.
pub fn breakpoint_at(instructions: &[InstructionItem], position: usize) -> Option<BreakpointState> {
    let mut current = 0;
    let mut found = None;
    visit_instructions(instructions, &mut |item| {
        if current == position {
            found = Some(item.breakpoint);
        }
        current += 1;
    });
    found
}

/// Cycle the breakpoint of the node at the given pre-order position.
pub fn toggle_breakpoint_at(
    instructions: &mut [InstructionItem],
    position: usize,
) -> Result<BreakpointState, JobError> {
    let mut current = 0;
    let mut toggled = None;
    visit_instructions_mut(instructions, &mut |item| {
        if current == position {
            toggled = Some(toggle_breakpoint(item));
        }
        current += 1;
    });
    toggled.ok_or(JobError::InvalidInstructionPosition(position))
}
