// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Bit Manipulation Utilities
//!
//! Bit-level helpers used for decoding hardware register contents.

/// Extract a bitfield from a value
///
/// # Arguments
///
/// * `value` - The value to extract from
/// * `high` - High bit position (inclusive)
/// * `low` - Low bit position (inclusive)
///
/// # Examples
///
/// ```
/// use n64_machine::bits::bits_shift;
///
/// assert_eq!(bits_shift(0x0000_007cu32, 6, 2), 0x1f);
/// ```
#[inline]
pub const fn bits_shift(value: u32, high: u32, low: u32) -> u32 {
    let width = high - low + 1;
    let mask = if width >= 32 { u32::MAX } else { (1 << width) - 1 };
    (value >> low) & mask
}

/// Check if a bit is set
#[inline]
pub const fn is_bit_set(value: u32, bit: u32) -> bool {
    (value & (1 << bit)) != 0
}

/// Check that every mask in `masks` is non-zero and that no two overlap
pub const fn masks_disjoint(masks: &[u32]) -> bool {
    let mut seen = 0u32;
    let mut i = 0;
    while i < masks.len() {
        if masks[i] == 0 || seen & masks[i] != 0 {
            return false;
        }
        seen |= masks[i];
        i += 1;
    }
    true
}
