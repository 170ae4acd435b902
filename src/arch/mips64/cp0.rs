// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! CP0 register accessors
//!
//! One accessor pair per named register (no writer for read-only ones),
//! plus `read_cp0`/`write_cp0` taking the register number as a const
//! parameter. 32-bit registers use `mfc0`/`mtc0`, registers that hold
//! addresses use the doubleword forms.

use super::registers::*;

macro_rules! cp0_register {
    (@read $(#[$doc:meta])* $read:ident, u32, $idx:literal) => {
        $(#[$doc])*
        #[inline(always)]
        pub fn $read() -> u32 {
            let value: u32;
            unsafe {
                core::arch::asm!(
                    concat!("mfc0 {0}, $", stringify!($idx)),
                    out(reg) value,
                    options(nomem, nostack, preserves_flags),
                );
            }
            value
        }
    };
    (@read $(#[$doc:meta])* $read:ident, u64, $idx:literal) => {
        $(#[$doc])*
        #[inline(always)]
        pub fn $read() -> u64 {
            let value: u64;
            unsafe {
                core::arch::asm!(
                    concat!("dmfc0 {0}, $", stringify!($idx)),
                    out(reg) value,
                    options(nomem, nostack, preserves_flags),
                );
            }
            value
        }
    };
    (@write $(#[$doc:meta])* $write:ident, u32, $idx:literal) => {
        $(#[$doc])*
        ///
        /// # Safety
        ///
        /// Changes privileged CPU state.
        #[inline(always)]
        pub unsafe fn $write(value: u32) {
            core::arch::asm!(
                concat!("mtc0 {0}, $", stringify!($idx)),
                in(reg) value,
                options(nostack, preserves_flags),
            );
        }
    };
    (@write $(#[$doc:meta])* $write:ident, u64, $idx:literal) => {
        $(#[$doc])*
        ///
        /// # Safety
        ///
        /// Changes privileged CPU state.
        #[inline(always)]
        pub unsafe fn $write(value: u64) {
            core::arch::asm!(
                concat!("dmtc0 {0}, $", stringify!($idx)),
                in(reg) value,
                options(nostack, preserves_flags),
            );
        }
    };
    // Read-only: no writer is generated.
    ($(#[$doc:meta])* $read:ident, $ty:ident, $idx:literal == $name:ident) => {
        const _: () = assert!($idx == $name);
        const _: () = assert!(matches!(Cp0Register::from_index($name),
                                       Some(reg) if reg.is_read_only()));
        cp0_register!(@read $(#[$doc])* $read, $ty, $idx);
    };
    ($(#[$doc:meta])* $read:ident, $write:ident, $ty:ident, $idx:literal == $name:ident) => {
        const _: () = assert!($idx == $name);
        cp0_register!(@read $(#[$doc])* $read, $ty, $idx);
        cp0_register!(@write $(#[$doc])* $write, $ty, $idx);
    };
}

cp0_register!(/// TLB index
              read_index, write_index, u32, 0 == C0_INDEX);
cp0_register!(/// TLB entry, even page
              read_entrylo0, write_entrylo0, u64, 2 == C0_ENTRYLO0);
cp0_register!(/// TLB entry, odd page
              read_entrylo1, write_entrylo1, u64, 3 == C0_ENTRYLO1);
cp0_register!(/// TLB page size mask
              read_pagemask, write_pagemask, u32, 5 == C0_PAGEMASK);
cp0_register!(/// Faulting virtual address
              read_badvaddr, u64, 8 == C0_BADVADDR);
cp0_register!(/// Timer count
              read_count, write_count, u32, 9 == C0_COUNT);
cp0_register!(/// TLB entry VPN and ASID
              read_entryhi, write_entryhi, u64, 10 == C0_ENTRYHI);
cp0_register!(/// Timer compare, writing it acknowledges the timer interrupt
              read_compare, write_compare, u32, 11 == C0_COMPARE);
cp0_register!(/// Status register
              read_status, write_status, u32, 12 == C0_SR);
cp0_register!(/// Cause register
              read_cause, write_cause, u32, 13 == C0_CAUSE);
cp0_register!(/// Exception program counter
              read_epc, write_epc, u64, 14 == C0_EPC);
cp0_register!(/// Processor revision ID
              read_prid, u32, 15 == C0_PRID);
cp0_register!(/// CPU configuration
              read_config, write_config, u32, 16 == C0_CONFIG);
cp0_register!(/// Watchpoint address
              read_watchlo, write_watchlo, u32, 18 == C0_WATCHLO);

/// Compile-time checks on a register number used as a const parameter
struct Checked<const REG: u32>;

impl<const REG: u32> Checked<REG> {
    const REGISTER: Cp0Register = match Cp0Register::from_index(REG) {
        Some(reg) => reg,
        None => panic!("no named CP0 register with this index"),
    };

    const WRITABLE: () = assert!(!Self::REGISTER.is_read_only(), "CP0 register is read-only");
}

/// Read CP0 register `REG`, zero-extending 32-bit registers
///
/// `REG` must name a register from the `C0_*` table; anything else is a
/// compile error.
#[inline(always)]
pub fn read_cp0<const REG: u32>() -> u64 {
    match Checked::<REG>::REGISTER {
        Cp0Register::Index => read_index() as u64,
        Cp0Register::EntryLo0 => read_entrylo0(),
        Cp0Register::EntryLo1 => read_entrylo1(),
        Cp0Register::PageMask => read_pagemask() as u64,
        Cp0Register::BadVAddr => read_badvaddr(),
        Cp0Register::Count => read_count() as u64,
        Cp0Register::EntryHi => read_entryhi(),
        Cp0Register::Compare => read_compare() as u64,
        Cp0Register::Status => read_status() as u64,
        Cp0Register::Cause => read_cause() as u64,
        Cp0Register::Epc => read_epc(),
        Cp0Register::PrId => read_prid() as u64,
        Cp0Register::Config => read_config() as u64,
        Cp0Register::WatchLo => read_watchlo() as u64,
    }
}

/// Write CP0 register `REG`, truncating for 32-bit registers
///
/// Read-only registers (`C0_BADVADDR`, `C0_PRID`) are rejected at
/// compile time.
///
/// # Safety
///
/// Changes privileged CPU state.
#[inline(always)]
pub unsafe fn write_cp0<const REG: u32>(value: u64) {
    #[allow(clippy::let_unit_value)]
    let () = Checked::<REG>::WRITABLE;
    match Checked::<REG>::REGISTER {
        Cp0Register::Index => write_index(value as u32),
        Cp0Register::EntryLo0 => write_entrylo0(value),
        Cp0Register::EntryLo1 => write_entrylo1(value),
        Cp0Register::PageMask => write_pagemask(value as u32),
        Cp0Register::Count => write_count(value as u32),
        Cp0Register::EntryHi => write_entryhi(value),
        Cp0Register::Compare => write_compare(value as u32),
        Cp0Register::Status => write_status(value as u32),
        Cp0Register::Cause => write_cause(value as u32),
        Cp0Register::Epc => write_epc(value),
        Cp0Register::Config => write_config(value as u32),
        Cp0Register::WatchLo => write_watchlo(value as u32),
        Cp0Register::BadVAddr | Cp0Register::PrId => {}
    }
}

/// Current Status register contents
#[inline]
pub fn status() -> StatusFlags {
    StatusFlags::from_register(read_status())
}

/// Replace the Status register
///
/// # Safety
///
/// Changes interrupt masking, privilege and coprocessor usability.
#[inline]
pub unsafe fn set_status(flags: StatusFlags) {
    write_status(flags.bits());
}

/// Make the FPU usable with 32 64-bit floating point registers
///
/// # Safety
///
/// Switching `FR` reinterprets the FPU register file; it must happen
/// before any floating point state is live.
pub unsafe fn enable_fpu() {
    let sr = read_status();
    log_trace!("enabling FPU, status {:#010x}", sr);
    write_cp0::<C0_SR>(with_fpu(sr) as u64);
}
