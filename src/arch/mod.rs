// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Architecture Support
//!
//! Register layouts are plain data and are compiled for every target so
//! that tools and host tests can use them. Modules that execute
//! privileged instructions gate themselves on `target_arch`.

#[macro_use]
pub mod mips64;
