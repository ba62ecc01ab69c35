//! Procedure definition models for `.job-kit/procedures/*.yaml`.
//!
//! This module defines the instruction-tree handle the control layer works
//! with. The tree is pure data: instruction semantics (what a "wait" or a
//! "sequence" actually does) live in the domain executor, not here.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

/// Breakpoint marker carried by every instruction.
///
/// `Disabled` keeps the marker visible in the tree without pausing
/// execution.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BreakpointState {
    #[default]
    NotSet,
    Set,
    Disabled,
}

/// A single node in a procedure's instruction tree.
///
/// Instructions are identified by their structural position (pre-order
/// index), not by identity: two trees built from the same definition have
/// matching positions, which is what breakpoint save/restore relies on.
///
/// # Example
///
/// ```yaml
/// kind: sequence
/// children:
///   - kind: wait
///     attributes:
///       timeout: "1.0"
///   - kind: message
///     attributes:
///       text: "done"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct InstructionItem {
    /// Domain instruction type (e.g. "sequence", "wait", "user-choice").
    pub kind: String,

    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Free-form instruction attributes interpreted by the executor.
    #[serde(default)]
    pub attributes: HashMap<String, String>,

    /// Breakpoint marker for this node.
    #[serde(default)]
    pub breakpoint: BreakpointState,

    /// Child instructions, in execution order.
    #[serde(default)]
    pub children: Vec<InstructionItem>,
}

impl InstructionItem {
    /// Create an instruction of the given kind with no attributes.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: None,
            attributes: HashMap::new(),
            breakpoint: BreakpointState::default(),
            children: Vec::new(),
        }
    }

    /// Append a child instruction.
    pub fn with_child(mut self, child: InstructionItem) -> Self {
        self.children.push(child);
        self
    }

    /// Set an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Defines a full procedure: a named forest of instruction trees.
///
/// Procedures are defined in `.job-kit/procedures/*.yaml` files.
///
/// # Example
///
/// ```yaml
/// name: count-twice
/// description: "Two counters in sequence"
/// instructions:
///   - kind: counter
///     attributes:
///       ticks: "2"
///   - kind: counter
///     attributes:
///       ticks: "3"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct Procedure {
    /// Unique name identifying this procedure.
    pub name: String,

    /// Human-readable description.
    #[serde(default)]
    pub description: String,

    /// Top-level instructions, in execution order.
    #[serde(default)]
    pub instructions: Vec<InstructionItem>,
}

impl Procedure {
    /// Create an empty procedure with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            instructions: Vec::new(),
        }
    }
}

/// Visit every instruction of a forest in pre-order (parent before
/// children, siblings left to right).
pub fn visit_instructions<'a, F>(instructions: &'a [InstructionItem], visit: &mut F)
where
    F: FnMut(&'a InstructionItem),
{
    for instruction in instructions {
        visit(instruction);
        visit_instructions(&instruction.children, visit);
    }
}

/// Mutable pre-order visit over a forest, same ordering as
/// [`visit_instructions`].
pub fn visit_instructions_mut<F>(instructions: &mut [InstructionItem], visit: &mut F)
where
    F: FnMut(&mut InstructionItem),
{
    for instruction in instructions {
        visit(instruction);
        visit_instructions_mut(&mut instruction.children, visit);
    }
}
