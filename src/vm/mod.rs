//! MysticLang virtual machine
//!
//! This module contains the byte-code interpreter: a fixed-register,
//! fixed-memory machine executing an immutable instruction stream.

pub use errors::Fault;
pub use executor::{
    execute, execute_with_config, RegisterFile, VMConfig, VMStatus, DEFAULT_STEP_LIMIT,
    MEMORY_SIZE, REGISTER_COUNT, STACK_POINTER, VM,
};
pub use instructions::Instruction;
pub use opcode::Opcode;

mod errors;
mod executor;
mod instructions;
mod opcode;

#[cfg(test)]
mod tests;
