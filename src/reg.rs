// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Register Access Module
//!
//! Volatile word access to memory-mapped registers.

/// Read a 32-bit register
///
/// # Safety
///
/// `addr` must be a valid, 4-byte aligned address for a 32-bit read.
#[inline]
pub unsafe fn read_reg32(addr: usize) -> u32 {
    core::ptr::read_volatile(addr as *const u32)
}

/// Write a 32-bit register
///
/// # Safety
///
/// `addr` must be a valid, 4-byte aligned address for a 32-bit write.
#[inline]
pub unsafe fn write_reg32(addr: usize, val: u32) {
    core::ptr::write_volatile(addr as *mut u32, val)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_through_memory() {
        let mut word = 0u32;
        let addr = &mut word as *mut u32 as usize;
        unsafe {
            write_reg32(addr, 0x4200_0002);
            assert_eq!(read_reg32(addr), 0x4200_0002);
        }
        assert_eq!(word, 0x4200_0002);
    }
}
