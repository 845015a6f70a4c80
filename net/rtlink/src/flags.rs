// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Bit layout of the link state word.

use bitflags::bitflags;

bitflags! {
    /// Link and queue state bits of a network device.
    ///
    /// The bits are orthogonal: each one is set and cleared on its own, and
    /// no combination is invalid.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LinkFlags: u32 {
        /// Transmit queue is stopped by flow control.
        const XOFF      = 1 << 0;
        /// Device is administratively up.
        const START     = 1 << 1;
        /// Hardware is attached and usable.
        const PRESENT   = 1 << 2;
        /// Physical link carrier is absent.
        const NOCARRIER = 1 << 3;
    }
}

impl LinkFlags {
    /// Flags that must be set for the device to accept a frame.
    pub const TX_REQUIRED: Self = Self::PRESENT.union(Self::START);
    /// Flags that must be clear for the device to accept a frame.
    pub const TX_BLOCKING: Self = Self::XOFF.union(Self::NOCARRIER);

    /// Whether this snapshot allows transmission, i.e.
    /// `PRESENT && START && !NOCARRIER && !XOFF`.
    #[inline]
    pub const fn is_tx_ready(self) -> bool {
        self.contains(Self::TX_REQUIRED) && !self.intersects(Self::TX_BLOCKING)
    }
}
