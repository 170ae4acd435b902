// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! CP0 hazard-safe TLB write
//!
//! Writing a TLB entry right after an instruction that touched CP0 state
//! is a pipeline hazard on the R4000 family. `tlbwi` is therefore always
//! issued as a `nop` followed by the raw `tlbwi` instruction word, never
//! on its own.
//!
//! The sequence is available in three forms:
//!
//! - [`tlbwi_asm!`](crate::tlbwi_asm), the assembly text for `asm!` and
//!   `global_asm!` blocks,
//! - [`emit_tlbwi`], which writes the machine words into an
//!   [`InstructionSink`] (code generation, trampolines, tests),
//! - `tlbwi()`, which executes it (mips64 only).

use crate::err::{Error, Result};

const LOCAL_TRACE: bool = false;

/// `sll $zero, $zero, 0`
pub const NOP: u32 = 0x0000_0000;

/// COP0 `tlbwi`: write indexed TLB entry
pub const TLBWI_OPCODE: u32 = 0x4200_0002;

/// The hazard-safe TLB write, in execution order
pub const TLBWI_SEQUENCE: [u32; 2] = [NOP, TLBWI_OPCODE];

/// Assembly text of the hazard-safe TLB write
///
/// Expands to a string literal, so it composes with `concat!`:
///
/// ```
/// assert_eq!(n64_machine::tlbwi_asm!(), "nop\n.word 0x42000002");
/// ```
#[macro_export]
macro_rules! tlbwi_asm {
    () => {
        "nop\n.word 0x42000002"
    };
}

/// Destination for encoded instruction words
pub trait InstructionSink {
    /// Number of words that can still be emitted
    fn remaining(&self) -> usize;

    /// Append one instruction word
    fn emit(&mut self, word: u32) -> Result;
}

/// Emit the hazard-safe TLB write into `sink`
///
/// Either both words are emitted, in order, or nothing is.
pub fn emit_tlbwi<S: InstructionSink + ?Sized>(sink: &mut S) -> Result {
    if sink.remaining() < TLBWI_SEQUENCE.len() {
        log_debug!("no room for tlbwi sequence ({} words left)", sink.remaining());
        return Err(Error::BufferFull);
    }
    for word in TLBWI_SEQUENCE {
        sink.emit(word)?;
    }
    log_trace_if!(LOCAL_TRACE, "emitted tlbwi, {} words left", sink.remaining());
    Ok(())
}

/// Fixed-capacity instruction buffer over borrowed storage
pub struct CodeBuffer<'a> {
    storage: &'a mut [u32],
    len: usize,
}

impl<'a> CodeBuffer<'a> {
    /// Create an empty buffer writing into `storage`
    pub fn new(storage: &'a mut [u32]) -> Self {
        Self { storage, len: 0 }
    }

    /// Words emitted so far
    pub fn words(&self) -> &[u32] {
        &self.storage[..self.len]
    }

    /// Number of words emitted so far
    pub fn len(&self) -> usize {
        self.len
    }

    /// Reports whether nothing has been emitted yet
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl InstructionSink for CodeBuffer<'_> {
    fn remaining(&self) -> usize {
        self.storage.len() - self.len
    }

    fn emit(&mut self, word: u32) -> Result {
        let slot = self.storage.get_mut(self.len).ok_or(Error::BufferFull)?;
        *slot = word;
        self.len += 1;
        Ok(())
    }
}

/// Write the TLB entry selected by `C0_INDEX` from EntryHi/EntryLo0/EntryLo1/PageMask
///
/// # Safety
///
/// Must run in kernel mode with the TLB staging registers already loaded.
/// Replacing a live mapping changes the meaning of virtual addresses for
/// all code, including the caller.
#[cfg(target_arch = "mips64")]
#[inline(always)]
pub unsafe fn tlbwi() {
    core::arch::asm!(
        ".set push",
        ".set noreorder",
        crate::tlbwi_asm!(),
        ".set pop",
        options(nostack, preserves_flags),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_nop_then_tlbwi() {
        assert_eq!(TLBWI_SEQUENCE, [0x0000_0000, 0x4200_0002]);
    }

    #[test]
    fn test_emit_order() {
        let mut storage = [0xffff_ffffu32; 4];
        let mut buf = CodeBuffer::new(&mut storage);
        buf.emit(0x2408_0001).unwrap(); // li $t0, 1
        emit_tlbwi(&mut buf).unwrap();
        assert_eq!(buf.words(), &[0x2408_0001, NOP, TLBWI_OPCODE]);
        assert_eq!(buf.remaining(), 1);
    }

    #[test]
    fn test_emit_is_all_or_nothing() {
        let mut storage = [0u32; 3];
        let mut buf = CodeBuffer::new(&mut storage);
        emit_tlbwi(&mut buf).unwrap();
        assert_eq!(emit_tlbwi(&mut buf), Err(Error::BufferFull));
        // The lone nop must not be left dangling without its tlbwi.
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.remaining(), 1);
    }

    #[test]
    fn test_emit_into_empty_storage() {
        let mut storage: [u32; 0] = [];
        let mut buf = CodeBuffer::new(&mut storage);
        assert_eq!(buf.emit(NOP), Err(Error::BufferFull));
        assert_eq!(emit_tlbwi(&mut buf), Err(Error::BufferFull));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_asm_text_matches_words() {
        let text = crate::tlbwi_asm!();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("nop"));
        let word = lines
            .next()
            .and_then(|l| l.strip_prefix(".word 0x"))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok());
        assert_eq!(word, Some(TLBWI_OPCODE));
        assert_eq!(lines.next(), None);
    }
}
