use std::{
    sync::{
        Arc, Barrier,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
};

use rtlink::{DeviceConfig, LinkEventHook, LinkFlags, LinkState, RtNetDevice};

const ITERATIONS: usize = 100_000;

#[test]
fn concurrent_stop_start_never_tears() {
    let others = LinkFlags::PRESENT | LinkFlags::START;
    let link = Arc::new(LinkState::with_flags(others));
    let barrier = Arc::new(Barrier::new(2));

    let stopper = {
        let link = link.clone();
        let barrier = barrier.clone();
        thread::spawn(move || {
            barrier.wait();
            for _ in 0..ITERATIONS {
                link.stop_queue();
            }
        })
    };
    let starter = {
        let link = link.clone();
        let barrier = barrier.clone();
        thread::spawn(move || {
            barrier.wait();
            for _ in 0..ITERATIONS {
                link.start_queue();
            }
        })
    };

    stopper.join().unwrap();
    starter.join().unwrap();

    let flags = link.load();
    assert!(flags == others || flags == others | LinkFlags::XOFF);
}

#[test]
fn queue_and_carrier_churn_do_not_interfere() {
    let link = Arc::new(LinkState::with_flags(LinkFlags::PRESENT));
    let barrier = Arc::new(Barrier::new(3));
    let mut handles = Vec::new();

    {
        let link = link.clone();
        let barrier = barrier.clone();
        handles.push(thread::spawn(move || {
            barrier.wait();
            for i in 0..ITERATIONS {
                if i % 2 == 0 {
                    link.stop_queue();
                } else {
                    link.wake_queue();
                }
            }
        }));
    }
    {
        let link = link.clone();
        let barrier = barrier.clone();
        handles.push(thread::spawn(move || {
            barrier.wait();
            for i in 0..ITERATIONS {
                if i % 2 == 0 {
                    link.carrier_off();
                } else {
                    link.carrier_on();
                }
            }
        }));
    }
    {
        let link = link.clone();
        let barrier = barrier.clone();
        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..ITERATIONS {
                assert!(link.is_device_present());
                assert!(!link.is_running());
            }
        }));
    }

    for h in handles {
        h.join().unwrap();
    }

    // Both writers finish with an "on" call.
    assert_eq!(link.load(), LinkFlags::PRESENT);
}

#[test]
fn one_waker_wins_per_stop() {
    const NUM_THREADS: usize = 8;
    const ROUNDS: usize = 200;

    let link = Arc::new(LinkState::new());
    let wins = Arc::new(AtomicUsize::new(0));

    for _ in 0..ROUNDS {
        link.stop_queue();
        let barrier = Arc::new(Barrier::new(NUM_THREADS));
        let handles: Vec<_> = (0..NUM_THREADS)
            .map(|_| {
                let link = link.clone();
                let wins = wins.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    if link.wake_queue() {
                        wins.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
    }

    assert_eq!(wins.load(Ordering::SeqCst), ROUNDS);
    assert!(!link.is_queue_stopped());
}

struct WakeCounter(AtomicUsize);

impl LinkEventHook for WakeCounter {
    fn queue_woken(&self, _dev: &RtNetDevice) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn hook_fires_once_per_successful_wake() {
    let hook = Arc::new(WakeCounter(AtomicUsize::new(0)));
    let dev = Arc::new(
        RtNetDevice::new(
            DeviceConfig::new("rteth0")
                .carrier(true)
                .hook(hook.clone()),
        )
        .unwrap(),
    );
    dev.open().unwrap();

    let barrier = Arc::new(Barrier::new(2));
    let producer = {
        let dev = dev.clone();
        let barrier = barrier.clone();
        thread::spawn(move || {
            barrier.wait();
            for _ in 0..ITERATIONS {
                dev.stop_queue();
            }
        })
    };
    let consumer = {
        let dev = dev.clone();
        let barrier = barrier.clone();
        thread::spawn(move || {
            barrier.wait();
            let mut woken = 0;
            for _ in 0..ITERATIONS {
                if dev.wake_queue() {
                    woken += 1;
                }
            }
            woken
        })
    };

    producer.join().unwrap();
    let woken = consumer.join().unwrap();

    // open notified once before the race
    assert_eq!(hook.0.load(Ordering::SeqCst), woken + 1);
    if dev.wake_queue() {
        assert_eq!(hook.0.load(Ordering::SeqCst), woken + 2);
    }
    assert!(dev.can_transmit());
}

#[test]
fn open_racing_detach_never_leaves_detached_device_transmitting() {
    const ROUNDS: usize = 500;

    for _ in 0..ROUNDS {
        let dev = Arc::new(RtNetDevice::new(DeviceConfig::new("rteth1").carrier(true)).unwrap());
        let barrier = Arc::new(Barrier::new(2));

        let opener = {
            let dev = dev.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                dev.open().is_ok()
            })
        };
        let detacher = {
            let dev = dev.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                dev.detach();
            })
        };

        let opened = opener.join().unwrap();
        detacher.join().unwrap();

        let flags = dev.link().load();
        assert!(!flags.contains(LinkFlags::PRESENT));
        assert_eq!(flags.contains(LinkFlags::START), opened);
        if opened {
            assert!(dev.is_queue_stopped());
        }

        dev.attach();
        assert_eq!(dev.can_transmit(), opened);
    }
}
