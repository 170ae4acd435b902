// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! MIPS64 coprocessor-0 register definitions
//!
//! Register numbers as used by the `mfc0`/`mtc0` family of instructions,
//! Status register bit masks, and decoding of the Cause register. Values
//! are fixed by the MIPS64 architecture (R4000 family).

use crate::bits::{bits_shift, is_bit_set, masks_disjoint};
use crate::err::{Error, Result};

// CP0 register indices
pub const C0_INDEX: u32 = 0;        // Index of TLB entry
pub const C0_ENTRYLO0: u32 = 2;     // TLB entry's first PFN
pub const C0_ENTRYLO1: u32 = 3;     // TLB entry's second PFN
pub const C0_PAGEMASK: u32 = 5;     // Size of TLB entries
pub const C0_BADVADDR: u32 = 8;     // Address that caused the last fault
pub const C0_COUNT: u32 = 9;        // Timer count
pub const C0_ENTRYHI: u32 = 10;     // VPN and ASID of a TLB entry
pub const C0_COMPARE: u32 = 11;     // Timer compare
pub const C0_SR: u32 = 12;          // Status register
pub const C0_CAUSE: u32 = 13;       // Last exception description
pub const C0_EPC: u32 = 14;         // Exception return address
pub const C0_PRID: u32 = 15;        // Processor revision ID
pub const C0_CONFIG: u32 = 16;      // CPU configuration
pub const C0_WATCHLO: u32 = 18;     // Watchpoint

/// Number of architectural CP0 register slots
pub const CP0_REGISTER_COUNT: u32 = 32;

// Status register fields
pub const SR_CU1: u32 = 0x2000_0000;  // Mark CP1 as usable
pub const SR_FR: u32 = 0x0400_0000;   // Enable MIPS III FP registers
pub const SR_BEV: u32 = 0x0040_0000;  // Boot exception vectors
pub const SR_PE: u32 = 0x0010_0000;   // Mark soft reset (clear parity error)

const _: () = assert!(masks_disjoint(&[SR_CU1, SR_FR, SR_BEV, SR_PE]),
                      "status register flags must not alias");
const _: () = {
    let mut i = 0;
    while i < Cp0Register::ALL.len() {
        assert!(Cp0Register::ALL[i].index() < CP0_REGISTER_COUNT,
                "CP0 register index out of range");
        i += 1;
    }
};

/// Named CP0 registers
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cp0Register {
    Index = C0_INDEX,
    EntryLo0 = C0_ENTRYLO0,
    EntryLo1 = C0_ENTRYLO1,
    PageMask = C0_PAGEMASK,
    BadVAddr = C0_BADVADDR,
    Count = C0_COUNT,
    EntryHi = C0_ENTRYHI,
    Compare = C0_COMPARE,
    Status = C0_SR,
    Cause = C0_CAUSE,
    Epc = C0_EPC,
    PrId = C0_PRID,
    Config = C0_CONFIG,
    WatchLo = C0_WATCHLO,
}

impl Cp0Register {
    /// Every named register, in index order
    pub const ALL: [Cp0Register; 14] = [
        Cp0Register::Index,
        Cp0Register::EntryLo0,
        Cp0Register::EntryLo1,
        Cp0Register::PageMask,
        Cp0Register::BadVAddr,
        Cp0Register::Count,
        Cp0Register::EntryHi,
        Cp0Register::Compare,
        Cp0Register::Status,
        Cp0Register::Cause,
        Cp0Register::Epc,
        Cp0Register::PrId,
        Cp0Register::Config,
        Cp0Register::WatchLo,
    ];

    /// Register number as encoded in the `rd` field of `mfc0`/`mtc0`
    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// Reports whether writes to the register are ignored by hardware
    pub const fn is_read_only(self) -> bool {
        matches!(self, Cp0Register::BadVAddr | Cp0Register::PrId)
    }

    /// Named register for `index`, usable in constant expressions
    pub const fn from_index(index: u32) -> Option<Self> {
        let mut i = 0;
        while i < Cp0Register::ALL.len() {
            if Cp0Register::ALL[i].index() == index {
                return Some(Cp0Register::ALL[i]);
            }
            i += 1;
        }
        None
    }

    /// Symbolic name of the register
    pub const fn name(self) -> &'static str {
        match self {
            Cp0Register::Index => "C0_INDEX",
            Cp0Register::EntryLo0 => "C0_ENTRYLO0",
            Cp0Register::EntryLo1 => "C0_ENTRYLO1",
            Cp0Register::PageMask => "C0_PAGEMASK",
            Cp0Register::BadVAddr => "C0_BADVADDR",
            Cp0Register::Count => "C0_COUNT",
            Cp0Register::EntryHi => "C0_ENTRYHI",
            Cp0Register::Compare => "C0_COMPARE",
            Cp0Register::Status => "C0_SR",
            Cp0Register::Cause => "C0_CAUSE",
            Cp0Register::Epc => "C0_EPC",
            Cp0Register::PrId => "C0_PRID",
            Cp0Register::Config => "C0_CONFIG",
            Cp0Register::WatchLo => "C0_WATCHLO",
        }
    }
}

impl TryFrom<u32> for Cp0Register {
    type Error = Error;

    fn try_from(index: u32) -> Result<Self> {
        if index >= CP0_REGISTER_COUNT {
            return Err(Error::OutOfRange(index));
        }
        Cp0Register::from_index(index).ok_or(Error::UnknownRegister(index))
    }
}

impl core::fmt::Display for Cp0Register {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

bitflags::bitflags! {
    /// Status register (CP0 register 12) flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StatusFlags: u32 {
        /// Coprocessor 1 (FPU) usable
        const CU1 = SR_CU1;

        /// 32 64-bit floating point registers
        const FR = SR_FR;

        /// Exception vectors at the boot (uncached ROM) location
        const BEV = SR_BEV;

        /// Soft reset / parity error
        const PE = SR_PE;

        /// Everything needed to run FPU code in 64-bit register mode
        const FPU = SR_CU1 | SR_FR;
    }
}

impl StatusFlags {
    /// Interpret a full Status register word, keeping bits without a name
    #[inline]
    pub const fn from_register(value: u32) -> Self {
        Self::from_bits_retain(value)
    }
}

/// Status register value with the FPU made usable in 64-bit register mode
///
/// Every other bit of `sr` is preserved.
#[inline]
pub const fn with_fpu(sr: u32) -> u32 {
    sr | StatusFlags::FPU.bits()
}

// Cause register fields
pub const CAUSE_EXC_CODE_HIGH: u32 = 6;
pub const CAUSE_EXC_CODE_LOW: u32 = 2;
pub const CAUSE_BD: u32 = 31;

/// Extract the ExcCode field from a Cause register value
#[inline]
pub const fn exc_code(cause: u32) -> u32 {
    bits_shift(cause, CAUSE_EXC_CODE_HIGH, CAUSE_EXC_CODE_LOW)
}

/// Reports whether the faulting instruction sat in a branch delay slot
#[inline]
pub const fn branch_delay(cause: u32) -> bool {
    is_bit_set(cause, CAUSE_BD)
}

/// Exception codes reported in Cause.ExcCode
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionCode {
    Interrupt = 0,
    TlbModification = 1,
    TlbLoad = 2,
    TlbStore = 3,
    AddressErrorLoad = 4,
    AddressErrorStore = 5,
    InstructionBusError = 6,
    DataBusError = 7,
    Syscall = 8,
    Breakpoint = 9,
    ReservedInstruction = 10,
    CoprocessorUnusable = 11,
    Overflow = 12,
    Trap = 13,
    FloatingPoint = 15,
    Watch = 23,
}

impl ExceptionCode {
    /// Decode the exception code of a raw Cause register value
    pub fn from_cause(cause: u32) -> Result<Self> {
        Self::try_from(exc_code(cause))
    }

    /// Mnemonic used by the architecture manual
    pub const fn mnemonic(self) -> &'static str {
        match self {
            ExceptionCode::Interrupt => "Int",
            ExceptionCode::TlbModification => "Mod",
            ExceptionCode::TlbLoad => "TLBL",
            ExceptionCode::TlbStore => "TLBS",
            ExceptionCode::AddressErrorLoad => "AdEL",
            ExceptionCode::AddressErrorStore => "AdES",
            ExceptionCode::InstructionBusError => "IBE",
            ExceptionCode::DataBusError => "DBE",
            ExceptionCode::Syscall => "Sys",
            ExceptionCode::Breakpoint => "Bp",
            ExceptionCode::ReservedInstruction => "RI",
            ExceptionCode::CoprocessorUnusable => "CpU",
            ExceptionCode::Overflow => "Ov",
            ExceptionCode::Trap => "Tr",
            ExceptionCode::FloatingPoint => "FPE",
            ExceptionCode::Watch => "WATCH",
        }
    }
}

impl TryFrom<u32> for ExceptionCode {
    type Error = Error;

    fn try_from(code: u32) -> Result<Self> {
        Ok(match code {
            0 => ExceptionCode::Interrupt,
            1 => ExceptionCode::TlbModification,
            2 => ExceptionCode::TlbLoad,
            3 => ExceptionCode::TlbStore,
            4 => ExceptionCode::AddressErrorLoad,
            5 => ExceptionCode::AddressErrorStore,
            6 => ExceptionCode::InstructionBusError,
            7 => ExceptionCode::DataBusError,
            8 => ExceptionCode::Syscall,
            9 => ExceptionCode::Breakpoint,
            10 => ExceptionCode::ReservedInstruction,
            11 => ExceptionCode::CoprocessorUnusable,
            12 => ExceptionCode::Overflow,
            13 => ExceptionCode::Trap,
            15 => ExceptionCode::FloatingPoint,
            23 => ExceptionCode::Watch,
            _ => return Err(Error::UnknownExceptionCode(code)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_indices() {
        assert_eq!(C0_INDEX, 0);
        assert_eq!(C0_ENTRYLO0, 2);
        assert_eq!(C0_ENTRYLO1, 3);
        assert_eq!(C0_PAGEMASK, 5);
        assert_eq!(C0_BADVADDR, 8);
        assert_eq!(C0_COUNT, 9);
        assert_eq!(C0_ENTRYHI, 10);
        assert_eq!(C0_COMPARE, 11);
        assert_eq!(C0_SR, 12);
        assert_eq!(C0_CAUSE, 13);
        assert_eq!(C0_EPC, 14);
        assert_eq!(C0_PRID, 15);
        assert_eq!(C0_CONFIG, 16);
        assert_eq!(C0_WATCHLO, 18);
    }

    #[test]
    fn test_status_flag_values() {
        assert_eq!(SR_CU1, 0x2000_0000);
        assert_eq!(SR_FR, 0x0400_0000);
        assert_eq!(SR_BEV, 0x0040_0000);
        assert_eq!(SR_PE, 0x0010_0000);
    }

    #[test]
    fn test_status_flags_pairwise_disjoint() {
        let flags = [SR_CU1, SR_FR, SR_BEV, SR_PE];
        for (i, a) in flags.iter().enumerate() {
            assert_ne!(*a, 0);
            for b in &flags[i + 1..] {
                assert_eq!(a & b, 0, "{:#x} overlaps {:#x}", a, b);
            }
        }
    }

    #[test]
    fn test_indices_in_architectural_range() {
        for reg in Cp0Register::ALL {
            assert!(reg.index() < CP0_REGISTER_COUNT, "{} out of range", reg);
        }
    }

    #[test]
    fn test_register_enum_matches_table() {
        assert_eq!(Cp0Register::Status.index(), C0_SR);
        assert_eq!(Cp0Register::Status.name(), "C0_SR");
        assert_eq!(Cp0Register::WatchLo.index(), C0_WATCHLO);
        assert!(Cp0Register::ALL.windows(2).all(|w| w[0].index() < w[1].index()));
        for reg in Cp0Register::ALL {
            assert_eq!(Cp0Register::try_from(reg.index()), Ok(reg));
        }
    }

    #[test]
    fn test_register_lookup_errors() {
        assert_eq!(Cp0Register::try_from(1), Err(Error::UnknownRegister(1)));
        assert_eq!(Cp0Register::try_from(31), Err(Error::UnknownRegister(31)));
        assert_eq!(Cp0Register::try_from(32), Err(Error::OutOfRange(32)));
    }

    #[test]
    fn test_status_flags_compose() {
        let sr = StatusFlags::CU1 | StatusFlags::FR;
        assert_eq!(sr, StatusFlags::FPU);
        assert_eq!(sr.bits(), 0x2400_0000);
        assert!(!sr.contains(StatusFlags::BEV));

        let raw = StatusFlags::from_register(0x3440_ff01);
        assert!(raw.contains(StatusFlags::FPU | StatusFlags::BEV));
        assert_eq!(raw.bits(), 0x3440_ff01);
    }

    #[test]
    fn test_with_fpu() {
        assert_eq!(with_fpu(0), SR_CU1 | SR_FR);
        // Boot vectors, interrupt mask and IE survive.
        assert_eq!(with_fpu(0x0040_ff01), 0x2440_ff01);
        assert_eq!(with_fpu(0x2400_0000), 0x2400_0000);
    }

    #[test]
    fn test_read_only_registers() {
        let read_only: Vec<_> = Cp0Register::ALL.into_iter().filter(|r| r.is_read_only()).collect();
        assert_eq!(read_only, [Cp0Register::BadVAddr, Cp0Register::PrId]);
        assert_eq!(Cp0Register::from_index(C0_SR), Some(Cp0Register::Status));
        assert_eq!(Cp0Register::from_index(1), None);
    }

    #[test]
    fn test_cause_decoding() {
        // TLB refill on store, in a delay slot
        let cause = 0x8000_000c;
        assert_eq!(exc_code(cause), 3);
        assert!(branch_delay(cause));
        assert_eq!(ExceptionCode::from_cause(cause), Ok(ExceptionCode::TlbStore));
        assert_eq!(ExceptionCode::TlbStore.mnemonic(), "TLBS");

        assert_eq!(ExceptionCode::from_cause(23 << 2), Ok(ExceptionCode::Watch));
        assert!(!branch_delay(23 << 2));
        assert_eq!(
            ExceptionCode::from_cause(14 << 2),
            Err(Error::UnknownExceptionCode(14))
        );
    }
}
