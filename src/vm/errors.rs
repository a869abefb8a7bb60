//! VM fault conditions

use thiserror::Error;

/// Abnormal halt conditions
///
/// A fault is a terminal machine state, not an error value: execution
/// stops, the status becomes [`VMStatus::Faulted`], and the caller still
/// reads a result from memory. Nothing here is ever propagated as `Err`.
///
/// [`VMStatus::Faulted`]: crate::vm::VMStatus::Faulted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("jump target {0:#04x} outside the instruction stream")]
    JumpOutOfBounds(u8),

    #[error("call target {0:#04x} outside the instruction stream")]
    CallOutOfBounds(u8),

    #[error("return target {0:#04x} outside the instruction stream")]
    ReturnOutOfBounds(u8),

    #[error("step limit of {0} instructions exhausted")]
    StepLimit(u64),
}
