// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! The atomic link state word.

use core::{
    fmt,
    sync::atomic::{AtomicU32, Ordering},
};

use crate::LinkFlags;

/// Atomic link/queue state of one network device.
///
/// Each operation is a single atomic load or read-modify-write on the word,
/// so it is safe to call from interrupt handlers and never blocks. Only the
/// touched bits change; concurrent updates of other bits are preserved.
///
/// Reads of different flags are not synchronized with each other. Use
/// [`LinkState::load`] to observe all flags at one point in time.
pub struct LinkState {
    bits: AtomicU32,
}

impl LinkState {
    /// Creates a zeroed state: absent, down, queue running, carrier present.
    #[inline]
    pub const fn new() -> Self {
        Self::with_flags(LinkFlags::empty())
    }

    /// Creates a state with `flags` already set.
    #[inline]
    pub const fn with_flags(flags: LinkFlags) -> Self {
        Self {
            bits: AtomicU32::new(flags.bits()),
        }
    }

    /// Returns a snapshot of all flags taken with a single load.
    #[inline]
    pub fn load(&self) -> LinkFlags {
        LinkFlags::from_bits_truncate(self.bits.load(Ordering::Acquire))
    }

    /// Returns `true` if any bit of `flags` is set.
    #[inline]
    pub fn test(&self, flags: LinkFlags) -> bool {
        self.load().intersects(flags)
    }

    /// Sets `flags`.
    #[inline]
    pub fn set(&self, flags: LinkFlags) {
        self.bits.fetch_or(flags.bits(), Ordering::AcqRel);
    }

    /// Clears `flags`.
    #[inline]
    pub fn clear(&self, flags: LinkFlags) {
        self.bits.fetch_and(!flags.bits(), Ordering::AcqRel);
    }

    /// Sets `flags` and returns `true` if any of them was already set.
    #[inline]
    pub fn test_and_set(&self, flags: LinkFlags) -> bool {
        self.bits.fetch_or(flags.bits(), Ordering::AcqRel) & flags.bits() != 0
    }

    /// Clears `flags` and returns `true` if any of them was set.
    #[inline]
    pub fn test_and_clear(&self, flags: LinkFlags) -> bool {
        self.bits.fetch_and(!flags.bits(), Ordering::AcqRel) & flags.bits() != 0
    }

    /// Applies `f` to the flags atomically, for transitions that touch more
    /// than one bit or depend on other bits.
    ///
    /// Returns `Ok(previous)` once `f` returned a new value and it was
    /// stored, or `Err(current)` as soon as `f` returns `None`. `f` may run
    /// more than once under contention, so this is lock-free but not
    /// wait-free; keep it off interrupt paths.
    #[inline]
    pub fn fetch_update<F>(&self, mut f: F) -> Result<LinkFlags, LinkFlags>
    where
        F: FnMut(LinkFlags) -> Option<LinkFlags>,
    {
        self.bits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                f(LinkFlags::from_bits_truncate(bits)).map(|flags| flags.bits())
            })
            .map(LinkFlags::from_bits_truncate)
            .map_err(LinkFlags::from_bits_truncate)
    }

    /// Allows the transmit queue to run.
    #[inline]
    pub fn start_queue(&self) {
        self.clear(LinkFlags::XOFF);
    }

    /// Stops the transmit queue, typically because the TX ring is full.
    #[inline]
    pub fn stop_queue(&self) {
        self.set(LinkFlags::XOFF);
    }

    /// Restarts a stopped transmit queue.
    ///
    /// Returns `true` if the queue was stopped. Only one caller observes
    /// `true` for each stop, and that caller is responsible for notifying
    /// whoever waits for the queue.
    #[inline]
    pub fn wake_queue(&self) -> bool {
        self.test_and_clear(LinkFlags::XOFF)
    }

    /// Whether the transmit queue is stopped.
    #[inline]
    pub fn is_queue_stopped(&self) -> bool {
        self.test(LinkFlags::XOFF)
    }

    /// Whether the device is administratively up.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.test(LinkFlags::START)
    }

    /// Whether the hardware is attached.
    #[inline]
    pub fn is_device_present(&self) -> bool {
        self.test(LinkFlags::PRESENT)
    }

    /// Marks the carrier as present.
    #[inline]
    pub fn carrier_on(&self) {
        self.clear(LinkFlags::NOCARRIER);
    }

    /// Marks the carrier as lost.
    #[inline]
    pub fn carrier_off(&self) {
        self.set(LinkFlags::NOCARRIER);
    }

    /// Whether the physical link has carrier.
    #[inline]
    pub fn is_carrier_ok(&self) -> bool {
        !self.test(LinkFlags::NOCARRIER)
    }
}

impl Default for LinkState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LinkState").field(&self.load()).finish()
    }
}
