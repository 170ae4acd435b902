// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! N64 Machine Support
//!
//! Coprocessor-0 register layout for the MIPS64 (VR4300) CPU, the
//! hazard-safe TLB write sequence, and the small amount of machine glue
//! that early boot and fault-handling code needs: bootloader-provided
//! boot information, the unhandled-exception report and a fail-safe
//! ISViewer console.
//!
//! Everything that only describes the hardware (register indices, flag
//! masks, instruction words) is available on every target. Code that
//! actually executes CP0 instructions is compiled for `mips64` only.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(target_arch = "mips64", feature(asm_experimental_arch))]

#[macro_use]
pub mod debug;

pub mod bits;
pub mod err;
pub mod reg;

#[macro_use]
pub mod arch;

pub mod cpu;
pub mod machine;
pub mod syswriter;

pub use arch::mips64::exception::{report, ExceptionFrame};
pub use arch::mips64::hazard::{
    emit_tlbwi, CodeBuffer, InstructionSink, NOP, TLBWI_OPCODE, TLBWI_SEQUENCE,
};
pub use arch::mips64::registers::*;
pub use err::{Error, Result};

#[cfg(test)]
mod tests {
    // Importing the table through two paths must not conflict.
    #[allow(unused_imports)]
    use crate::arch::mips64::registers::*;
    #[allow(unused_imports)]
    use crate::*;

    #[test]
    fn test_table_imported_twice() {
        assert_eq!(C0_SR, crate::arch::mips64::registers::C0_SR);
        assert_eq!(SR_CU1, crate::SR_CU1);
        assert_eq!(TLBWI_SEQUENCE, crate::arch::mips64::hazard::TLBWI_SEQUENCE);
    }
}
