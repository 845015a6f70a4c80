// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

use core::fmt;

/// The error type for device lifecycle operations.
///
/// Flag transitions themselves never fail; only device creation and
/// administrative operations report errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// Invalid parameter/argument.
    InvalidInput,
    /// No such device, the hardware is not attached.
    NoSuchDevice,
}

impl LinkError {
    /// Stable error message for display/logging.
    pub const fn message(&self) -> &'static str {
        match self {
            LinkError::InvalidInput => "Invalid parameter",
            LinkError::NoSuchDevice => "No such device",
        }
    }
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A specialized `Result` type for device lifecycle operations.
pub type LinkResult<T = ()> = Result<T, LinkError>;
