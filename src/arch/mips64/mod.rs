// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! MIPS64 Architecture Implementation
//!
//! Coprocessor-0 definitions for the R4000-family core used by the N64.

pub mod registers;

#[macro_use]
pub mod hazard;

pub mod exception;

#[cfg(target_arch = "mips64")]
pub mod cp0;

// Re-exports
pub use registers::{Cp0Register, ExceptionCode, StatusFlags};
