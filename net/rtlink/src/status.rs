// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Read-only link reports for administrative tooling.

use core::fmt;

use strum::{Display, IntoStaticStr};

use crate::LinkFlags;

/// Operational state of an interface, as reported by status queries.
///
/// Derived from the link flags with the precedence
/// presence > administrative state > carrier. Flow control does not change
/// the operational state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum OperState {
    /// The hardware is detached.
    #[strum(serialize = "notpresent")]
    NotPresent,
    /// The device is administratively down.
    #[strum(serialize = "down")]
    Down,
    /// The device is up but has no carrier.
    #[strum(serialize = "lowerlayerdown")]
    LowerLayerDown,
    /// The device is up and has carrier.
    #[strum(serialize = "up")]
    Up,
}

impl From<LinkFlags> for OperState {
    fn from(flags: LinkFlags) -> Self {
        if !flags.contains(LinkFlags::PRESENT) {
            OperState::NotPresent
        } else if !flags.contains(LinkFlags::START) {
            OperState::Down
        } else if flags.contains(LinkFlags::NOCARRIER) {
            OperState::LowerLayerDown
        } else {
            OperState::Up
        }
    }
}

/// A consistent snapshot of a device's link state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkStatus {
    /// Hardware is attached.
    pub present: bool,
    /// Device is administratively up.
    pub running: bool,
    /// Link has carrier.
    pub carrier: bool,
    /// Transmit queue is stopped by flow control.
    pub queue_stopped: bool,
}

impl LinkStatus {
    /// Operational state of this snapshot.
    pub fn oper_state(&self) -> OperState {
        OperState::from(LinkFlags::from(*self))
    }

    /// Whether this snapshot allows transmission.
    pub fn can_transmit(&self) -> bool {
        LinkFlags::from(*self).is_tx_ready()
    }
}

impl From<LinkFlags> for LinkStatus {
    fn from(flags: LinkFlags) -> Self {
        Self {
            present: flags.contains(LinkFlags::PRESENT),
            running: flags.contains(LinkFlags::START),
            carrier: !flags.contains(LinkFlags::NOCARRIER),
            queue_stopped: flags.contains(LinkFlags::XOFF),
        }
    }
}

impl From<LinkStatus> for LinkFlags {
    fn from(status: LinkStatus) -> Self {
        let mut flags = LinkFlags::empty();
        flags.set(LinkFlags::PRESENT, status.present);
        flags.set(LinkFlags::START, status.running);
        flags.set(LinkFlags::NOCARRIER, !status.carrier);
        flags.set(LinkFlags::XOFF, status.queue_stopped);
        flags
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "state {} carrier {} queue {}",
            self.oper_state(),
            if self.carrier { "on" } else { "off" },
            if self.queue_stopped {
                "stopped"
            } else {
                "running"
            },
        )
    }
}
