//! Payloads for blocking user requests raised by a running procedure.
//!
//! A worker raising one of these requests blocks until the interaction
//! layer answers or the request bridge shuts down. Every result carries a
//! `processed` flag: `false` means the request was abandoned (queue stopped,
//! dialog dismissed), which is distinct from any answered value.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Arguments of a user-choice request: pick one option out of a list.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
pub struct UserChoiceArgs {
    /// The options to choose from, in display order.
    pub options: Vec<String>,

    /// Free-text description shown alongside the options.
    pub description: String,
}

/// Answer to a user-choice request.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
pub struct UserChoiceResult {
    /// Index of the chosen option. Only meaningful when `processed` is true.
    pub index: usize,

    /// True when the user actually answered; false for an abandoned request.
    pub processed: bool,
}

/// Arguments of a user-input request: edit a text value.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
pub struct UserInputArgs {
    /// Current value presented for editing.
    pub current_value: String,

    /// Free-text description of what is being asked.
    pub description: String,
}

/// Answer to a user-input request.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
pub struct UserInputResult {
    /// The entered value. Only meaningful when `processed` is true.
    pub value: String,

    /// True when the user actually answered; false for an abandoned request.
    pub processed: bool,
}
