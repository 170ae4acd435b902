// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Error Codes
//!
//! This module provides the error type shared by every fallible
//! operation in the crate, together with the numeric status codes
//! assembly and C callers see.

use core::fmt;

/// Status code as returned across the assembly/FFI boundary
pub type Status = i32;

/// Success status code
pub const STATUS_OK: Status = 0;

/// Result type for operations that can fail
pub type Result<T = ()> = core::result::Result<T, Error>;

/// Common error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// CP0 index in 0..=31 that has no named register
    UnknownRegister(u32),

    /// Value outside the architectural range
    OutOfRange(u32),

    /// Cause register exception code with no known meaning
    UnknownExceptionCode(u32),

    /// Bootloader-provided word with an unexpected value
    InvalidBootInfo(u32),

    /// Instruction sink has no room left
    BufferFull,

    /// Output sink refused the write
    Io,
}

impl Error {
    /// Convert error to status code
    pub fn to_status(self) -> Status {
        match self {
            Error::UnknownRegister(_) => -3,
            Error::OutOfRange(_) => -33,
            Error::UnknownExceptionCode(_) => -10,
            Error::InvalidBootInfo(_) => -4,
            Error::BufferFull => -12,
            Error::Io => -11,
        }
    }
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        err.to_status()
    }
}

impl From<fmt::Error> for Error {
    fn from(_: fmt::Error) -> Self {
        Error::Io
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownRegister(index) => write!(f, "no CP0 register named for index {}", index),
            Error::OutOfRange(value) => write!(f, "value {:#x} out of range", value),
            Error::UnknownExceptionCode(code) => write!(f, "unknown exception code {}", code),
            Error::InvalidBootInfo(value) => write!(f, "invalid boot info word {:#x}", value),
            Error::BufferFull => f.write_str("instruction buffer full"),
            Error::Io => f.write_str("output error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_are_negative() {
        let all = [
            Error::UnknownRegister(1),
            Error::OutOfRange(32),
            Error::UnknownExceptionCode(14),
            Error::InvalidBootInfo(7),
            Error::BufferFull,
            Error::Io,
        ];
        for err in all {
            assert!(Status::from(err) < STATUS_OK);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Error::UnknownRegister(1).to_string(),
            "no CP0 register named for index 1"
        );
        assert_eq!(Error::OutOfRange(32).to_string(), "value 0x20 out of range");
        assert_eq!(Error::from(fmt::Error), Error::Io);
    }
}
