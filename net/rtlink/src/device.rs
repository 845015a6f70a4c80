// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Real-time network device object.

use alloc::sync::Arc;
use core::fmt;

use log::{debug, info, trace, warn};

#[cfg(feature = "stats")]
use crate::stats::{Counters, LinkStats};
use crate::{LinkError, LinkEventHook, LinkFlags, LinkResult, LinkState, LinkStatus};

/// Size of the interface name buffer, including the terminating NUL.
pub const IFNAMSIZ: usize = 16;

/// Parameters used to create a [`RtNetDevice`].
///
/// The defaults describe a freshly registered device: hardware attached,
/// administratively down, queue running and no carrier yet.
pub struct DeviceConfig<'a> {
    name: &'a str,
    attached: bool,
    carrier: bool,
    hook: Option<Arc<dyn LinkEventHook>>,
}

impl<'a> DeviceConfig<'a> {
    /// Creates a configuration for a device called `name`.
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            attached: true,
            carrier: false,
            hook: None,
        }
    }

    /// Whether the hardware is attached when the device is created.
    pub fn attached(mut self, attached: bool) -> Self {
        self.attached = attached;
        self
    }

    /// Whether the link has carrier when the device is created.
    pub fn carrier(mut self, carrier: bool) -> Self {
        self.carrier = carrier;
        self
    }

    /// Installs the callbacks fired on queue wake and carrier changes.
    pub fn hook(mut self, hook: Arc<dyn LinkEventHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    fn initial_flags(&self) -> LinkFlags {
        let mut flags = LinkFlags::empty();
        flags.set(LinkFlags::PRESENT, self.attached);
        flags.set(LinkFlags::NOCARRIER, !self.carrier);
        flags
    }
}

/// A network device as seen by the real-time stack.
///
/// Drivers report hardware events (ring full, TX completion, link change,
/// hot unplug) through it, the transmit path checks [`can_transmit`] before
/// handing a frame to the driver, and administrative code opens and closes
/// it. All methods take `&self` and can be called concurrently from any
/// context, including interrupt handlers.
///
/// [`can_transmit`]: RtNetDevice::can_transmit
pub struct RtNetDevice {
    name: [u8; IFNAMSIZ],
    name_len: usize,
    link: LinkState,
    hook: Option<Arc<dyn LinkEventHook>>,
    #[cfg(feature = "stats")]
    stats: Counters,
}

impl RtNetDevice {
    /// Creates a device from `config`.
    ///
    /// Fails with [`LinkError::InvalidInput`] if the name is empty, longer
    /// than `IFNAMSIZ - 1` bytes, or contains anything but printable ASCII.
    pub fn new(config: DeviceConfig<'_>) -> LinkResult<Self> {
        let bytes = config.name.as_bytes();
        if bytes.is_empty()
            || bytes.len() >= IFNAMSIZ
            || !bytes.iter().all(u8::is_ascii_graphic)
        {
            warn!("Invalid network device name: {:?}", config.name);
            return Err(LinkError::InvalidInput);
        }
        let mut name = [0; IFNAMSIZ];
        name[..bytes.len()].copy_from_slice(bytes);

        Ok(Self {
            name,
            name_len: bytes.len(),
            link: LinkState::with_flags(config.initial_flags()),
            hook: config.hook,
            #[cfg(feature = "stats")]
            stats: Counters::new(),
        })
    }

    /// The interface name.
    pub fn name(&self) -> &str {
        core::str::from_utf8(&self.name[..self.name_len]).unwrap_or_default()
    }

    /// The underlying link state word.
    #[inline]
    pub fn link(&self) -> &LinkState {
        &self.link
    }

    /// Allows the transmit queue to run.
    #[inline]
    pub fn start_queue(&self) {
        if self.link.test_and_clear(LinkFlags::XOFF) {
            trace!("{}: tx queue started", self.name());
        }
    }

    /// Stops the transmit queue, typically because the TX ring is full.
    #[inline]
    pub fn stop_queue(&self) {
        if !self.link.test_and_set(LinkFlags::XOFF) {
            #[cfg(feature = "stats")]
            self.stats.queue_stopped();
            trace!("{}: tx queue stopped", self.name());
        }
    }

    /// Restarts a stopped transmit queue.
    ///
    /// Returns `true` and fires [`LinkEventHook::queue_woken`] if the queue
    /// was stopped. Returns `false` without side effects otherwise.
    #[inline]
    pub fn wake_queue(&self) -> bool {
        if !self.link.wake_queue() {
            return false;
        }
        #[cfg(feature = "stats")]
        self.stats.queue_woken();
        trace!("{}: tx queue woken", self.name());
        self.notify_tx_ready();
        true
    }

    fn notify_tx_ready(&self) {
        if let Some(hook) = &self.hook {
            hook.queue_woken(self);
        }
    }

    /// Whether the transmit queue is stopped.
    #[inline]
    pub fn is_queue_stopped(&self) -> bool {
        self.link.is_queue_stopped()
    }

    /// Whether the device is administratively up.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.link.is_running()
    }

    /// Whether the hardware is attached.
    #[inline]
    pub fn is_device_present(&self) -> bool {
        self.link.is_device_present()
    }

    /// Marks the carrier as present.
    ///
    /// If the carrier was absent and the device is running, fires
    /// [`LinkEventHook::carrier_restored`].
    pub fn carrier_on(&self) {
        if !self.link.test_and_clear(LinkFlags::NOCARRIER) {
            return;
        }
        #[cfg(feature = "stats")]
        self.stats.carrier_changed();
        info!("{}: link up", self.name());
        if self.is_running() {
            if let Some(hook) = &self.hook {
                hook.carrier_restored(self);
            }
        }
    }

    /// Marks the carrier as lost.
    ///
    /// If the carrier was present, fires [`LinkEventHook::carrier_lost`].
    pub fn carrier_off(&self) {
        if self.link.test_and_set(LinkFlags::NOCARRIER) {
            return;
        }
        #[cfg(feature = "stats")]
        self.stats.carrier_changed();
        info!("{}: link down", self.name());
        if let Some(hook) = &self.hook {
            hook.carrier_lost(self);
        }
    }

    /// Whether the physical link has carrier.
    #[inline]
    pub fn is_carrier_ok(&self) -> bool {
        self.link.is_carrier_ok()
    }

    /// Marks the hardware as attached again, e.g. after resume.
    ///
    /// A running device gets its transmit queue woken and fires
    /// [`LinkEventHook::queue_woken`] once, whether or not the queue was
    /// stopped.
    pub fn attach(&self) {
        if self.link.test_and_set(LinkFlags::PRESENT) {
            return;
        }
        debug!("{}: device attached", self.name());
        if self.is_running() && !self.wake_queue() {
            self.notify_tx_ready();
        }
    }

    /// Marks the hardware as detached, e.g. on suspend or hot unplug.
    ///
    /// A running device gets its transmit queue stopped.
    pub fn detach(&self) {
        if !self.link.test_and_clear(LinkFlags::PRESENT) {
            return;
        }
        debug!("{}: device detached", self.name());
        if self.is_running() {
            self.stop_queue();
        }
    }

    /// Brings the device administratively up and starts its transmit queue.
    ///
    /// Setting `START` and clearing `XOFF` happen in one atomic update that
    /// requires `PRESENT`, so a concurrent [`detach`] either makes the open
    /// fail or observes the device running and stops its queue. On success
    /// [`LinkEventHook::queue_woken`] fires.
    ///
    /// Fails with [`LinkError::NoSuchDevice`] if the hardware is detached.
    /// Opening a running device does nothing.
    ///
    /// [`detach`]: RtNetDevice::detach
    pub fn open(&self) -> LinkResult {
        let opened = self.link.fetch_update(|flags| {
            (flags.contains(LinkFlags::PRESENT) && !flags.contains(LinkFlags::START))
                .then(|| (flags | LinkFlags::START) - LinkFlags::XOFF)
        });
        match opened {
            Ok(_) => {
                info!("{}: opened", self.name());
                self.notify_tx_ready();
                Ok(())
            }
            Err(flags) if flags.contains(LinkFlags::PRESENT) => Ok(()),
            Err(_) => {
                warn!("{}: open on detached device", self.name());
                Err(LinkError::NoSuchDevice)
            }
        }
    }

    /// Brings the device administratively down and stops its transmit queue.
    ///
    /// Closing a device that is down does nothing.
    pub fn close(&self) {
        if self.link.test_and_clear(LinkFlags::START) {
            self.stop_queue();
            info!("{}: closed", self.name());
        }
    }

    /// Whether a frame may be handed to the driver right now.
    ///
    /// Checks `PRESENT && START && !NOCARRIER && !XOFF` on a single snapshot.
    #[inline]
    pub fn can_transmit(&self) -> bool {
        self.link.load().is_tx_ready()
    }

    /// Returns a consistent snapshot of the link state.
    pub fn status(&self) -> LinkStatus {
        LinkStatus::from(self.link.load())
    }

    /// Returns the transition counters of this device.
    #[cfg(feature = "stats")]
    pub fn stats(&self) -> LinkStats {
        self.stats.snapshot()
    }
}

impl fmt::Debug for RtNetDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RtNetDevice")
            .field("name", &self.name())
            .field("link", &self.link)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}
