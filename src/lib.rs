//! MysticLang virtual machine
//!
//! A fixed-register byte-code interpreter plus the challenge pipeline that
//! feeds it: base64-encoded JSON batches in, one report line per case out.
//!
//! # Example
//!
//! ```
//! use mysticvm::vm::execute;
//!
//! // set 7 -> r0, store r0 -> mem[50], halt
//! let program = [0x01, 7, 0, 0x07, 0, 50, 0xFF];
//! assert_eq!(execute(&program, 50), 7);
//! ```

#![doc(html_root_url = "https://docs.rs/mysticvm")]
#![warn(rust_2018_idioms)]

// Public modules
pub mod challenge;
pub mod vm;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use thiserror::Error;

use tracing::debug;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tool name
pub const NAME: &str = "mysticvm";

use std::fs;
use std::io;
use std::path::Path;

/// Execute a raw MysticLang bytecode file and report one memory cell
pub fn run_file(
    path: &Path,
    address: i64,
    config: vm::VMConfig,
) -> Result<u8> {
    debug!("running {}", path.display());
    let program = fs::read(path)
        .with_context(|| format!("Failed to read program: {}", path.display()))?;
    Ok(vm::execute_with_config(&program, address, config))
}

/// Solve a challenge payload from stdin, writing report lines to stdout
pub fn solve_stdin(
    vm_config: &vm::VMConfig,
    parallel: bool,
) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    challenge::solve_stream(stdin.lock(), stdout.lock(), vm_config, parallel)
        .context("Failed to write report")
}

/// Print a disassembly listing of a bytecode file
pub fn dump_file(path: &Path) -> Result<()> {
    let program = fs::read(path)
        .with_context(|| format!("Failed to read program: {}", path.display()))?;

    println!("=== Disassembly for {} ===\n", path.display());
    println!("{} bytes\n", program.len());

    let mut ip = 0;
    while let Some((instr, len)) = vm::Instruction::decode(&program, ip) {
        if instr == vm::Instruction::Nop {
            // Raw byte: unknown opcode or operands cut off by the stream end.
            println!("  [{:3}] byte 0x{:02X}", ip, program[ip]);
        } else {
            println!("  [{:3}] {:?}", ip, instr);
        }
        ip += len;
    }

    Ok(())
}
