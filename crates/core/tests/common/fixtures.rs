//! Test fixtures for creating sample procedures and managers.

use jk_core::executor::ScriptedExecutorFactory;
use jk_core::jobs::{JobManager, LocalJobHandlerFactory};
use jk_protocol::ipc::Event;
use jk_protocol::procedure_models::{InstructionItem, Procedure};
use std::sync::Arc;
use tokio::sync::mpsc;

/// A procedure with two top-level instructions, each one tick.
#[allow(dead_code)]
pub fn two_instruction_procedure() -> Procedure {
    let mut procedure = Procedure::new("two-instructions");
    procedure.instructions.push(InstructionItem::new("first"));
    procedure.instructions.push(InstructionItem::new("second"));
    procedure
}

/// A procedure counting the given number of ticks.
#[allow(dead_code)]
pub fn counting_procedure(ticks: u64) -> Procedure {
    let mut procedure = Procedure::new("counting");
    procedure
        .instructions
        .push(InstructionItem::new("counter").with_attribute("ticks", ticks.to_string()));
    procedure
}

/// A procedure that never finishes on its own.
#[allow(dead_code)]
pub fn endless_procedure() -> Procedure {
    let mut procedure = Procedure::new("endless");
    procedure.instructions.push(InstructionItem::new("endless"));
    procedure
}

/// A procedure whose second tick fails.
#[allow(dead_code)]
pub fn failing_procedure() -> Procedure {
    let mut procedure = Procedure::new("failing");
    procedure.instructions.push(InstructionItem::new("work"));
    procedure
        .instructions
        .push(InstructionItem::new("fail").with_attribute("message", "scripted failure"));
    procedure
}

/// A procedure that raises one user choice between two work ticks.
#[allow(dead_code)]
pub fn user_choice_procedure() -> Procedure {
    let mut procedure = Procedure::new("user-choice");
    procedure.instructions.push(InstructionItem::new("work"));
    procedure.instructions.push(
        InstructionItem::new("user-choice")
            .with_attribute("options", "yes,no")
            .with_attribute("description", "continue?"),
    );
    procedure.instructions.push(InstructionItem::new("work"));
    procedure
}

/// A manager over scripted executors plus the receiving end of its event
/// channel.
#[allow(dead_code)]
pub fn scripted_manager() -> (JobManager, mpsc::Receiver<Event>) {
    let factory = Arc::new(LocalJobHandlerFactory::new(Arc::new(
        ScriptedExecutorFactory::new(),
    )));
    let (tx, rx) = mpsc::channel(100);
    (JobManager::new(factory, tx), rx)
}
