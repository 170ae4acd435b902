// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! CPU constants and kernel segment addressing

/// CPU clock in Hz
pub const CLOCK_SPEED_HZ: u64 = 93_750_000;

/// CP0 Count increments once every two CPU cycles
pub const COUNT_HZ: u64 = CLOCK_SPEED_HZ / 2;

// Memory regions in 32-bit kernel mode, sign-extended
pub const KSEG0: u64 = 0xffff_ffff_8000_0000; // unmapped, cached
pub const KSEG1: u64 = 0xffff_ffff_a000_0000; // unmapped, uncached

/// Segment selector bits cleared to obtain a physical address
const SEGMENT_MASK: u64 = 0xe000_0000;

/// Physical address of an address in KSEG0 or KSEG1
#[inline]
pub const fn physical_address(addr: u64) -> u32 {
    (addr & !SEGMENT_MASK) as u32
}

/// Uncached (KSEG1) alias of a physical address
#[inline]
pub const fn uncached(paddr: u32) -> u64 {
    KSEG1 | paddr as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_address() {
        assert_eq!(physical_address(KSEG0 | 0x0040_0000), 0x0040_0000);
        assert_eq!(physical_address(KSEG1 | 0x1fc0_07c0), 0x1fc0_07c0);
        assert_eq!(physical_address(0x0000_1000), 0x0000_1000);
    }

    #[test]
    fn test_uncached_alias() {
        assert_eq!(uncached(0x0000_0300), 0xffff_ffff_a000_0300);
        assert_eq!(physical_address(uncached(0x13ff_0014)), 0x13ff_0014);
    }
}
