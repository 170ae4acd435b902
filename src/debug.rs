// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Logging and Diagnostics
//!
//! Thin logging macros over the `log` facade. The crate never installs a
//! logger itself; whatever the embedding runtime registers receives the
//! records. With the `log` feature disabled the macros still type-check
//! their arguments but emit nothing.
//!
//! # Usage
//!
//! ```ignore
//! log_info!("boot info: {:?}", info);
//! log_trace_if!(LOCAL_TRACE, "status {:#x}", status);
//! ```

// Some macros are only used by target-only code.
#![allow(unused_macros)]

/// Target string attached to every record emitted by this crate
pub const LOG_TARGET: &str = "n64_machine";

#[cfg(feature = "log")]
macro_rules! log_print {
    ($level:ident, $($arg:tt)*) => {
        ::log::$level!(target: $crate::debug::LOG_TARGET, $($arg)*)
    };
}

#[cfg(not(feature = "log"))]
macro_rules! log_print {
    ($level:ident, $($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}

/// Log a trace message
macro_rules! log_trace {
    ($($arg:tt)*) => {
        log_print!(trace, $($arg)*)
    };
}

/// Log a trace message if condition is true
macro_rules! log_trace_if {
    ($cond:expr, $($arg:tt)*) => {
        if $cond {
            log_trace!($($arg)*);
        }
    };
}

/// Log a debug message
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log_print!(debug, $($arg)*)
    };
}

/// Log an info message
macro_rules! log_info {
    ($($arg:tt)*) => {
        log_print!(info, $($arg)*)
    };
}

/// Log an error message
macro_rules! log_error {
    ($($arg:tt)*) => {
        log_print!(error, $($arg)*)
    };
}
