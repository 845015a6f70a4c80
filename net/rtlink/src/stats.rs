// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

use core::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub(crate) struct Counters {
    queue_stops: AtomicUsize,
    queue_wakes: AtomicUsize,
    carrier_changes: AtomicUsize,
}

impl Counters {
    pub(crate) const fn new() -> Self {
        Self {
            queue_stops: AtomicUsize::new(0),
            queue_wakes: AtomicUsize::new(0),
            carrier_changes: AtomicUsize::new(0),
        }
    }

    #[inline]
    pub(crate) fn queue_stopped(&self) {
        self.queue_stops.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn queue_woken(&self) {
        self.queue_wakes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn carrier_changed(&self) {
        self.carrier_changes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> LinkStats {
        LinkStats {
            queue_stops: self.queue_stops.load(Ordering::Relaxed),
            queue_wakes: self.queue_wakes.load(Ordering::Relaxed),
            carrier_changes: self.carrier_changes.load(Ordering::Relaxed),
        }
    }
}

/// Statistics about link state transitions of one device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Number of times the transmit queue went from running to stopped.
    pub queue_stops: usize,
    /// Number of times a stopped transmit queue was woken.
    pub queue_wakes: usize,
    /// Number of carrier on/off edges.
    pub carrier_changes: usize,
}
