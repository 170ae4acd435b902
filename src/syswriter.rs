// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Fail-safe system writer
//!
//! Writes go straight to the ISViewer register block with plain word
//! stores, whether or not an ISViewer is present. It is slow and avoids
//! DMA, which makes it usable from exception handlers and very early boot.

use memoffset::offset_of;

use crate::cpu;
use crate::reg::write_reg32;

/// Base of the ISViewer register block
pub const ISVIEWER_BASE: u64 = cpu::uncached(0x13ff_0014);

/// Bytes accepted per write
pub const BUFFER_SIZE: usize = 512;

const BUFFER_WORDS: usize = BUFFER_SIZE / 4;

/// ISViewer register layout
#[repr(C)]
pub struct IsViewerRegs {
    pub write_len: u32,
    _reserved: [u32; 2],
    pub buf: [u32; BUFFER_WORDS],
}

const _: () = assert!(offset_of!(IsViewerRegs, write_len) == 0x00);
const _: () = assert!(offset_of!(IsViewerRegs, buf) == 0x0c);

/// Pack up to four bytes big-endian, left-aligned in the word
#[inline]
pub fn pack_word(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .take(4)
        .enumerate()
        .fold(0, |word, (i, &b)| word | (b as u32) << ((3 - i) * 8))
}

/// Destination of ISViewer register stores
pub trait WordStore {
    /// Store `value` at byte `offset` into the register block
    fn store(&mut self, offset: usize, value: u32);
}

/// Register block reached through volatile memory stores
pub struct Mmio {
    base: usize,
}

impl WordStore for Mmio {
    fn store(&mut self, offset: usize, value: u32) {
        // Safety: `IsViewer::at`/`IsViewer::new` guarantee the block is valid.
        unsafe { write_reg32(self.base + offset, value) }
    }
}

/// Handle to an ISViewer register block
pub struct IsViewer<S: WordStore = Mmio> {
    regs: S,
}

impl IsViewer<Mmio> {
    /// ISViewer at its fixed cartridge address
    #[cfg(target_arch = "mips64")]
    pub const fn new() -> Self {
        Self { regs: Mmio { base: ISVIEWER_BASE as usize } }
    }

    /// ISViewer register block at `base`
    ///
    /// # Safety
    ///
    /// `base` must point to writable, 4-byte aligned memory laid out as
    /// [`IsViewerRegs`] for as long as the handle is used.
    pub const unsafe fn at(base: usize) -> Self {
        Self { regs: Mmio { base } }
    }
}

impl<S: WordStore> IsViewer<S> {
    /// ISViewer whose register stores go to `regs`
    pub const fn with_store(regs: S) -> Self {
        Self { regs }
    }

    /// Write at most [`BUFFER_SIZE`] bytes of `bytes`, returning how many
    ///
    /// The buffer words are stored before the length register, which is
    /// what triggers the host side to pick the data up.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        let n = bytes.len().min(BUFFER_SIZE);
        let buf = offset_of!(IsViewerRegs, buf);
        for (i, chunk) in bytes[..n].chunks(4).enumerate() {
            self.regs.store(buf + 4 * i, pack_word(chunk));
        }
        self.regs.store(offset_of!(IsViewerRegs, write_len), n as u32);
        n
    }
}

impl<S: WordStore> core::fmt::Write for IsViewer<S> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let mut rest = s.as_bytes();
        while !rest.is_empty() {
            let n = self.write_bytes(rest);
            rest = &rest[n..];
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    fn regs() -> Box<IsViewerRegs> {
        Box::new(IsViewerRegs {
            write_len: 0,
            _reserved: [0; 2],
            buf: [0xdead_beef; BUFFER_WORDS],
        })
    }

    #[test]
    fn test_pack_word() {
        assert_eq!(pack_word(b"UNHA"), 0x554e_4841);
        assert_eq!(pack_word(b"ab"), 0x6162_0000);
        assert_eq!(pack_word(b""), 0);
        assert_eq!(pack_word(b"abcdef"), 0x6162_6364);
    }

    #[test]
    fn test_write_bytes_packs_and_sets_length() {
        let mut block = regs();
        let mut isv = unsafe { IsViewer::at(&mut *block as *mut IsViewerRegs as usize) };
        assert_eq!(isv.write_bytes(b"hello"), 5);
        assert_eq!(block.write_len, 5);
        assert_eq!(block.buf[0], 0x6865_6c6c);
        assert_eq!(block.buf[1], 0x6f00_0000);
        assert_eq!(block.buf[2], 0xdead_beef);
    }

    #[test]
    fn test_write_bytes_truncates() {
        let mut block = regs();
        let mut isv = unsafe { IsViewer::at(&mut *block as *mut IsViewerRegs as usize) };
        let data = [b'x'; BUFFER_SIZE + 3];
        assert_eq!(isv.write_bytes(&data), BUFFER_SIZE);
        assert_eq!(block.write_len, BUFFER_SIZE as u32);
        assert!(block.buf.iter().all(|&w| w == 0x7878_7878));
    }

    #[derive(Default)]
    struct Recorder {
        stores: Vec<(usize, u32)>,
    }

    impl WordStore for Recorder {
        fn store(&mut self, offset: usize, value: u32) {
            self.stores.push((offset, value));
        }
    }

    #[test]
    fn test_length_stored_last() {
        let mut isv = IsViewer::with_store(Recorder::default());
        assert_eq!(isv.write_bytes(b"UNHANDLED"), 9);
        assert_eq!(
            isv.regs.stores,
            [
                (0x0c, 0x554e_4841),
                (0x10, 0x4e44_4c45),
                (0x14, 0x4400_0000),
                (0x00, 9),
            ]
        );
    }

    #[test]
    fn test_length_stored_last_on_each_chunk() {
        let mut isv = IsViewer::with_store(Recorder::default());
        write!(isv, "{}", "z".repeat(BUFFER_SIZE + 1)).unwrap();
        let stores = &isv.regs.stores;
        let len_stores: Vec<_> = stores
            .iter()
            .enumerate()
            .filter(|(_, (offset, _))| *offset == 0x00)
            .collect();
        // One full chunk then a single byte, each closed by its length.
        assert_eq!(len_stores.len(), 2);
        assert_eq!(len_stores[0], (BUFFER_WORDS, &(0x00, BUFFER_SIZE as u32)));
        assert_eq!(len_stores[1], (stores.len() - 1, &(0x00, 1)));
        assert_eq!(stores[BUFFER_WORDS + 1], (0x0c, 0x7a00_0000));
    }

    #[test]
    fn test_fmt_write_chunks_long_strings() {
        let mut block = regs();
        let mut isv = unsafe { IsViewer::at(&mut *block as *mut IsViewerRegs as usize) };
        let long = "y".repeat(BUFFER_SIZE + 4);
        write!(isv, "{}", long).unwrap();
        // Only the final chunk remains visible in the block.
        assert_eq!(block.write_len, 4);
        assert_eq!(block.buf[0], 0x7979_7979);
    }
}
