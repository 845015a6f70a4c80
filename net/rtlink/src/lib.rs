// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

//! Link and transmit queue state for real-time network devices.
//!
//! Every network device carries one atomic flag word that gates the
//! real-time transmit path:
//!
//! - [`LinkFlags::PRESENT`]: the hardware is attached.
//! - [`LinkFlags::START`]: the device is administratively up.
//! - [`LinkFlags::XOFF`]: the transmit queue is flow-control stopped.
//! - [`LinkFlags::NOCARRIER`]: the physical link has no carrier.
//!
//! The word is shared between interrupt handlers (ring full, link change,
//! hot unplug), the transmit path and administrative code. All transitions
//! are single atomic read-modify-write operations, so none of them can
//! block, spin or allocate.
//!
//! # Architecture
//!
//! - [`LinkState`]: the raw flag word and its bit operations.
//! - [`RtNetDevice`]: the device object that owns a [`LinkState`] and adds
//!   attach/detach, open/close and edge-triggered notifications.
//! - [`LinkEventHook`]: optional callbacks fired when a stopped queue is woken
//!   or the carrier changes, used to re-arm the transmit scheduler.
//! - [`LinkStatus`] / [`OperState`]: read-only reports for status queries.
//!
//! # Feature Flags
//!
//! - `stats`: count queue stops, queue wakes and carrier changes per device.
//!
//! # Usage
//!
//! ```rust
//! use rtlink::{DeviceConfig, RtNetDevice};
//!
//! let dev = RtNetDevice::new(DeviceConfig::new("rteth0")).unwrap();
//! dev.open().unwrap();
//! dev.carrier_on();
//! assert!(dev.can_transmit());
//!
//! // TX ring full, from the interrupt handler
//! dev.stop_queue();
//! assert!(!dev.can_transmit());
//!
//! // TX completion freed descriptors
//! assert!(dev.wake_queue());
//! assert!(!dev.wake_queue());
//! ```

extern crate alloc;

mod device;
mod error;
mod flags;
mod hook;
mod state;
#[cfg(feature = "stats")]
mod stats;
mod status;

pub use self::{
    device::{DeviceConfig, IFNAMSIZ, RtNetDevice},
    error::{LinkError, LinkResult},
    flags::LinkFlags,
    hook::LinkEventHook,
    state::LinkState,
    status::{LinkStatus, OperState},
};
#[cfg(feature = "stats")]
pub use self::stats::LinkStats;
