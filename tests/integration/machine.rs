//! Whole-machine integration tests
//!
//! Larger programs exercising loops, subroutines and the stack through
//! the public API, plus property tests over arbitrary byte programs.

use mysticvm::vm::{execute, execute_with_config, VMConfig, VMStatus, VM};
use proptest::prelude::*;

#[test]
fn test_countdown_loop() {
    // r0 counts down from 5; each pass adds 10 into r2; the result lands
    // in mem[100] once the counter hits zero.
    let program = [
        0x01, 5, 0, // 0: set 5 -> r0 (counter)
        0x01, 1, 1, // 3: set 1 -> r1 (decrement)
        0x01, 10, 3, // 6: set 10 -> r3 (addend)
        // loop:
        0x02, 3, 2, // 9: sum r3 into r2
        0x03, 1, 0, // 12: sub r1 from r0, Z when done
        0x05, 19, // 15: ifzero 19 (exit)
        0x04, 9, // 17: goto 9
        // exit:
        0x07, 2, 100, // 19: store r2 -> mem[100]
        0xFF, // 22: halt
    ];
    assert_eq!(execute(&program, 100), 50);
}

#[test]
fn test_subroutine_called_twice() {
    // The subroutine adds r1 into r2; calling it twice doubles the sum
    // and leaves the stack pointer balanced.
    let program = [
        0x01, 21, 1, // 0: set 21 -> r1
        0x08, 12, // 3: call 12
        0x08, 12, // 5: call 12
        0x07, 2, 60, // 7: store r2 -> mem[60]
        0xFF, // 10: halt
        0x00, // 11: padding
        0x02, 1, 2, // 12: sum r1 into r2
        0x09, // 15: ret
    ];
    let mut vm = VM::new();
    vm.run(&program);
    assert_eq!(vm.status(), VMStatus::Finished);
    assert_eq!(vm.memory_cell(60), 42);
    assert_eq!(vm.register(15), 255);
}

#[test]
fn test_memory_accumulator_across_cells() {
    // Walk three cells, summing them into one output cell via load/sum.
    let program = [
        0x01, 11, 0, 0x07, 0, 30, // mem[30] = 11
        0x01, 22, 0, 0x07, 0, 31, // mem[31] = 22
        0x01, 33, 0, 0x07, 0, 32, // mem[32] = 33
        0x06, 30, 4, // load mem[30] -> r4
        0x06, 31, 5, // load mem[31] -> r5
        0x06, 32, 6, // load mem[32] -> r6
        0x02, 4, 7, // sum r4 into r7
        0x02, 5, 7, // sum r5 into r7
        0x02, 6, 7, // sum r6 into r7
        0x07, 7, 40, // store r7 -> mem[40]
        0xFF,
    ];
    assert_eq!(execute(&program, 40), 66);
}

#[test]
fn test_all_zero_program_finishes() {
    // 256 unknown opcodes: every byte a no-op, normal halt at the end
    let program = [0x00u8; 256];
    let mut vm = VM::new();
    vm.run(&program);
    assert_eq!(vm.status(), VMStatus::Finished);
}

proptest! {
    /// Arbitrary programs always terminate without panicking.
    #[test]
    fn prop_arbitrary_programs_terminate(
        program in proptest::collection::vec(any::<u8>(), 0..512),
        address in any::<i64>(),
    ) {
        let config = VMConfig { step_limit: 50_000, trace: false };
        let _ = execute_with_config(&program, address, config);
    }

    /// Execution is a pure function of its inputs.
    #[test]
    fn prop_execution_is_idempotent(
        program in proptest::collection::vec(any::<u8>(), 0..256),
        address in -512i64..512,
    ) {
        let config = VMConfig { step_limit: 50_000, trace: false };
        let first = execute_with_config(&program, address, config.clone());
        let second = execute_with_config(&program, address, config);
        prop_assert_eq!(first, second);
    }

    /// Out-of-range target addresses always report 0.
    #[test]
    fn prop_out_of_range_address_reads_zero(
        program in proptest::collection::vec(any::<u8>(), 0..128),
        address in prop_oneof![Just(-1i64), Just(256i64), 256i64..i64::MAX, i64::MIN..0],
    ) {
        let config = VMConfig { step_limit: 50_000, trace: false };
        prop_assert_eq!(execute_with_config(&program, address, config), 0);
    }
}
