//! MysticLang machine executor
//!
//! A closed state machine over a fixed register file, a fixed 256-byte
//! memory and a zero flag. The executor decodes one instruction at a time
//! from an immutable byte stream and halts on an explicit halt, on running
//! off the end of the stream, on an out-of-range control transfer, or on
//! exhausting the configured step ceiling. It never returns an error:
//! every abnormal condition degrades to a terminal status and the caller
//! reads a plain byte out of memory.

use crate::vm::errors::Fault;
use crate::vm::instructions::Instruction;
use tracing::debug;

/// Number of general registers
pub const REGISTER_COUNT: usize = 16;

/// Size of the data/stack memory in bytes
pub const MEMORY_SIZE: usize = 256;

/// Register reserved as the stack pointer
pub const STACK_POINTER: u8 = 15;

/// Initial stack pointer value (stack grows downward from the top of memory)
const STACK_TOP: u8 = 255;

/// Default instruction ceiling
///
/// The instruction set has no built-in fuel, so a stray `goto` can loop
/// forever. The ceiling is generous enough that no terminating program of
/// realistic size ever reaches it.
pub const DEFAULT_STEP_LIMIT: u64 = 1 << 20;

/// VM configuration
#[derive(Debug, Clone)]
pub struct VMConfig {
    /// Maximum number of executed instructions before a forced fault
    pub step_limit: u64,
    /// Emit a debug line per executed instruction
    pub trace: bool,
}

impl Default for VMConfig {
    fn default() -> Self {
        Self {
            step_limit: DEFAULT_STEP_LIMIT,
            trace: false,
        }
    }
}

/// Execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VMStatus {
    /// Created, not yet run
    Ready,
    /// Executing
    Running,
    /// Halted normally (explicit halt or end of stream)
    Finished,
    /// Halted abnormally (bad control transfer or step ceiling)
    Faulted,
}

/// Register file with silent out-of-range access
///
/// Reads from an invalid index yield 0, writes to one are dropped. This is
/// the machine's contract for malformed operands, not a convenience.
#[derive(Debug, Clone)]
pub struct RegisterFile {
    regs: [u8; REGISTER_COUNT],
}

impl RegisterFile {
    fn new() -> Self {
        let mut regs = [0u8; REGISTER_COUNT];
        regs[STACK_POINTER as usize] = STACK_TOP;
        Self { regs }
    }

    /// Read a register, 0 when the index is out of range
    pub fn read(
        &self,
        idx: u8,
    ) -> u8 {
        self.regs.get(idx as usize).copied().unwrap_or(0)
    }

    /// Write a register, dropped when the index is out of range
    pub fn write(
        &mut self,
        idx: u8,
        value: u8,
    ) {
        if let Some(cell) = self.regs.get_mut(idx as usize) {
            *cell = value;
        }
    }

    /// Whether the index names a real register
    pub fn is_valid(idx: u8) -> bool {
        (idx as usize) < REGISTER_COUNT
    }
}

/// Outcome of a single dispatched instruction
enum Step {
    Continue,
    Halted,
    Faulted(Fault),
}

/// MysticLang virtual machine
///
/// All state is per-run. Construct, [`run`](VM::run) once, read the result
/// cell; concurrent runs need no synchronization because nothing is shared.
#[derive(Debug, Clone)]
pub struct VM {
    /// Configuration
    config: VMConfig,
    /// Status
    status: VMStatus,
    /// Fault recorded when the status is `Faulted`
    fault: Option<Fault>,
    /// Register file (register 15 is the stack pointer)
    regs: RegisterFile,
    /// Data memory, shared with the call stack
    memory: [u8; MEMORY_SIZE],
    /// Zero flag, written only by `sub`
    zero: bool,
    /// Instruction pointer
    ip: usize,
    /// Executed instruction count
    steps: u64,
}

impl Default for VM {
    fn default() -> Self {
        Self::new_with_config(VMConfig::default())
    }
}

impl VM {
    /// Create a machine with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a machine with a custom configuration
    pub fn new_with_config(config: VMConfig) -> Self {
        Self {
            config,
            status: VMStatus::Ready,
            fault: None,
            regs: RegisterFile::new(),
            memory: [0u8; MEMORY_SIZE],
            zero: false,
            ip: 0,
            steps: 0,
        }
    }

    /// Current status
    pub fn status(&self) -> VMStatus {
        self.status
    }

    /// Fault that ended the run, if any
    pub fn fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }

    /// Read a register, 0 when the index is out of range
    pub fn register(
        &self,
        idx: u8,
    ) -> u8 {
        self.regs.read(idx)
    }

    /// Current zero flag
    pub fn zero_flag(&self) -> bool {
        self.zero
    }

    /// Read a memory cell by an untrusted address
    ///
    /// Anything outside 0..=255 reads as 0.
    pub fn memory_cell(
        &self,
        address: i64,
    ) -> u8 {
        u8::try_from(address)
            .map(|addr| self.memory[addr as usize])
            .unwrap_or(0)
    }

    /// Run the program to a terminal state
    ///
    /// The stream is never mutated; jump targets are validated against its
    /// length, not against the memory size.
    pub fn run(
        &mut self,
        program: &[u8],
    ) {
        self.status = VMStatus::Running;

        loop {
            if self.steps >= self.config.step_limit {
                self.fault_halt(Fault::StepLimit(self.config.step_limit));
                return;
            }

            // Running off the end of the stream is a normal halt.
            let Some((instr, len)) = Instruction::decode(program, self.ip) else {
                self.status = VMStatus::Finished;
                return;
            };

            if self.config.trace {
                debug!("ip={:#05x} {:?}", self.ip, instr);
            }

            self.steps += 1;
            self.ip += len;

            match self.dispatch(instr, program.len()) {
                Step::Continue => {}
                Step::Halted => {
                    self.status = VMStatus::Finished;
                    return;
                }
                Step::Faulted(fault) => {
                    self.fault_halt(fault);
                    return;
                }
            }
        }
    }

    fn fault_halt(
        &mut self,
        fault: Fault,
    ) {
        debug!("halted: {}", fault);
        self.status = VMStatus::Faulted;
        self.fault = Some(fault);
    }

    /// Execute one decoded instruction
    ///
    /// The instruction pointer has already been advanced past the
    /// instruction; control-transfer arms overwrite it.
    fn dispatch(
        &mut self,
        instr: Instruction,
        program_len: usize,
    ) -> Step {
        match instr {
            Instruction::Set { value, reg } => {
                self.regs.write(reg, value);
            }

            Instruction::Sum { src, dst } => {
                if RegisterFile::is_valid(src) && RegisterFile::is_valid(dst) {
                    let result = self.regs.read(dst).wrapping_add(self.regs.read(src));
                    self.regs.write(dst, result);
                }
            }

            Instruction::Sub { src, dst } => {
                // The flag write sits inside the guard: a malformed sub
                // leaves Z untouched.
                if RegisterFile::is_valid(src) && RegisterFile::is_valid(dst) {
                    let result = self.regs.read(dst).wrapping_sub(self.regs.read(src));
                    self.regs.write(dst, result);
                    self.zero = result == 0;
                }
            }

            Instruction::Goto { target } => {
                if (target as usize) < program_len {
                    self.ip = target as usize;
                } else {
                    return Step::Faulted(Fault::JumpOutOfBounds(target));
                }
            }

            Instruction::IfZero { target } => {
                if self.zero {
                    if (target as usize) < program_len {
                        self.ip = target as usize;
                    } else {
                        return Step::Faulted(Fault::JumpOutOfBounds(target));
                    }
                }
            }

            Instruction::Load { addr, reg } => {
                self.regs.write(reg, self.memory[addr as usize]);
            }

            Instruction::Store { reg, addr } => {
                if RegisterFile::is_valid(reg) {
                    self.memory[addr as usize] = self.regs.read(reg);
                }
            }

            Instruction::Call { target } => {
                if (target as usize) < program_len {
                    // The return address lives in a byte-wide cell; a call
                    // encoded past offset 253 pushes a wrapped address.
                    let return_addr = (self.ip & 0xFF) as u8;
                    let sp = self.regs.read(STACK_POINTER).wrapping_sub(1);
                    self.memory[sp as usize] = return_addr;
                    self.regs.write(STACK_POINTER, sp);
                    self.ip = target as usize;
                } else {
                    return Step::Faulted(Fault::CallOutOfBounds(target));
                }
            }

            Instruction::Ret => {
                let sp = self.regs.read(STACK_POINTER);
                let return_addr = self.memory[sp as usize];
                self.regs.write(STACK_POINTER, sp.wrapping_add(1));
                if (return_addr as usize) < program_len {
                    self.ip = return_addr as usize;
                } else {
                    return Step::Faulted(Fault::ReturnOutOfBounds(return_addr));
                }
            }

            Instruction::Halt => return Step::Halted,

            Instruction::Nop => {}
        }

        Step::Continue
    }
}

/// Execute a program and report one memory cell
///
/// The single entry point for untrusted input: builds a fresh machine,
/// runs `program` to a terminal state and returns the byte held at
/// `target_address`, or 0 when the address is outside 0..=255. Identical
/// inputs always produce identical results.
pub fn execute(
    program: &[u8],
    target_address: i64,
) -> u8 {
    execute_with_config(program, target_address, VMConfig::default())
}

/// [`execute`] with an explicit configuration
pub fn execute_with_config(
    program: &[u8],
    target_address: i64,
    config: VMConfig,
) -> u8 {
    let mut vm = VM::new_with_config(config);
    vm.run(program);
    vm.memory_cell(target_address)
}
