// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Unhandled exception report
//!
//! The low-level vector saves the CP0 fault registers and the stack
//! pointer into an [`ExceptionFrame`] and hands it to [`report`], which
//! prints it without allocating or using `core::fmt` number formatting.

use core::fmt::Write;

use memoffset::offset_of;

use super::registers::ExceptionCode;
use crate::err::Result;

/// Registers captured by the exception vector
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExceptionFrame {
    pub cause: u64,
    pub epc: u64,
    pub status: u64,
    pub badvaddr: u64,
    pub sp: u64,
}

// Byte offsets used by the assembly that fills the frame
pub const FRAME_CAUSE: usize = 0;
pub const FRAME_EPC: usize = 8;
pub const FRAME_STATUS: usize = 16;
pub const FRAME_BADVADDR: usize = 24;
pub const FRAME_SP: usize = 32;
pub const FRAME_SIZE: usize = 40;

const _: () = assert!(offset_of!(ExceptionFrame, cause) == FRAME_CAUSE,
                      "check exception vector assembly");
const _: () = assert!(offset_of!(ExceptionFrame, epc) == FRAME_EPC,
                      "check exception vector assembly");
const _: () = assert!(offset_of!(ExceptionFrame, status) == FRAME_STATUS,
                      "check exception vector assembly");
const _: () = assert!(offset_of!(ExceptionFrame, badvaddr) == FRAME_BADVADDR,
                      "check exception vector assembly");
const _: () = assert!(offset_of!(ExceptionFrame, sp) == FRAME_SP,
                      "check exception vector assembly");
const _: () = assert!(core::mem::size_of::<ExceptionFrame>() == FRAME_SIZE,
                      "check exception vector assembly");

impl ExceptionFrame {
    /// Decoded Cause.ExcCode, if it is one the architecture defines
    pub fn exception_code(&self) -> Option<ExceptionCode> {
        ExceptionCode::from_cause(self.cause as u32).ok()
    }
}

/// Format `num` as exactly 16 lowercase hex digits
pub fn hex16(num: u64) -> [u8; 16] {
    let mut buf = [0u8; 16];
    for (i, slot) in buf.iter_mut().enumerate() {
        let nibble = ((num >> (60 - 4 * i)) & 0xf) as u8;
        *slot = if nibble > 9 {
            b'a' + nibble - 10
        } else {
            b'0' + nibble
        };
    }
    buf
}

fn write_field<W: Write + ?Sized>(out: &mut W, label: &str, value: u64) -> Result {
    let digits = hex16(value);
    out.write_str(label)?;
    // hex16 only produces ASCII digits
    out.write_str(core::str::from_utf8(&digits).unwrap_or("????????????????"))?;
    Ok(())
}

/// Print the report for an exception nobody handled
pub fn report<W: Write + ?Sized>(frame: &ExceptionFrame, out: &mut W) -> Result {
    match frame.exception_code() {
        Some(code) => log_error!("unhandled exception {} at epc {:#x}", code.mnemonic(), frame.epc),
        None => log_error!("unhandled exception, cause {:#x} at epc {:#x}", frame.cause, frame.epc),
    }

    out.write_str("UNHANDLED EXCEPTION")?;
    write_field(out, "\ncause    0x", frame.cause)?;
    write_field(out, "\nepc      0x", frame.epc)?;
    write_field(out, "\nstatus   0x", frame.status)?;
    write_field(out, "\nbadvaddr 0x", frame.badvaddr)?;
    write_field(out, "\nsp       0x", frame.sp)?;
    Ok(())
}

/// Entry point for the exception vector once no handler claimed the fault
#[cfg(target_arch = "mips64")]
#[no_mangle]
pub extern "C" fn unhandled_exception(frame: &ExceptionFrame) {
    // Nowhere left to report a failing console to.
    let _ = report(frame, &mut crate::syswriter::IsViewer::new());
}
