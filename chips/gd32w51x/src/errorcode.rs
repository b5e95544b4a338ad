// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Errors reported by the GD32W51x drivers.
//!
//! Register operations themselves cannot fail. Errors only come from turning
//! raw numbers into the typed selectors the drivers accept.

use core::fmt;

/// Standard errors, numbered as in the Tock kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum ErrorCode {
    /// Generic failure condition
    FAIL = 0,
    /// An invalid parameter was passed
    INVAL = 5,
}

impl From<ErrorCode> for usize {
    fn from(err: ErrorCode) -> usize {
        err as usize
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorCode::FAIL => f.write_str("FAIL"),
            ErrorCode::INVAL => f.write_str("INVAL"),
        }
    }
}
