// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

use crate::RtNetDevice;

/// Callbacks fired by [`RtNetDevice`] when the device becomes able to
/// transmit again, or loses its link.
///
/// The callbacks run in the context of the caller that caused the
/// transition, which is often an interrupt handler. They must not block,
/// sleep or allocate; a typical implementation raises a scheduler event or
/// wakes a transmit task and returns.
///
/// Each callback fires once per state edge, never for repeated calls that
/// leave the state unchanged.
pub trait LinkEventHook: Send + Sync {
    /// The stopped transmit queue of `dev` was woken.
    fn queue_woken(&self, dev: &RtNetDevice);

    /// The carrier of a running `dev` came back.
    fn carrier_restored(&self, dev: &RtNetDevice) {
        let _ = dev;
    }

    /// The carrier of `dev` was lost.
    fn carrier_lost(&self, dev: &RtNetDevice) {
        let _ = dev;
    }
}
