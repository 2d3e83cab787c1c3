use std::sync::{
    atomic::{AtomicBool, AtomicU32, Ordering},
    Arc,
};
use std::time::{Duration, Instant};

/// A cancellable periodic tick source.
///
/// `poll` reports how many whole periods have elapsed since the previous poll.
/// A stopped driver never reports due ticks, so a late poll after `stop` is
/// harmless.
pub trait TickDriver: Send {
    fn start(&mut self);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
    fn poll(&mut self) -> u32;
}

/// Wall clock driver firing once per `period`
#[derive(Debug, Clone)]
pub struct IntervalDriver {
    period: Duration,
    next_due: Option<Instant>,
}

impl IntervalDriver {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    fn poll_at(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next_due else {
            return 0;
        };
        let mut due = 0;
        while now >= next {
            due += 1;
            next += self.period;
        }
        self.next_due = Some(next);
        due
    }
}

impl TickDriver for IntervalDriver {
    fn start(&mut self) {
        self.next_due = Some(Instant::now() + self.period);
    }

    fn stop(&mut self) {
        self.next_due = None;
    }

    fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    fn poll(&mut self) -> u32 {
        self.poll_at(Instant::now())
    }
}

/// Driver advanced by hand. Clones share state, so a test can keep a handle
/// after giving the driver away.
#[derive(Debug, Clone, Default)]
pub struct ManualDriver {
    running: Arc<AtomicBool>,
    pending: Arc<AtomicU32>,
    stops: Arc<AtomicU32>,
}

impl ManualDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `n` ticks for the next poll
    pub fn advance(&self, n: u32) {
        self.pending.fetch_add(n, Ordering::SeqCst);
    }

    pub fn stop_count(&self) -> u32 {
        self.stops.load(Ordering::SeqCst)
    }
}

impl TickDriver for ManualDriver {
    fn start(&mut self) {
        self.pending.store(0, Ordering::SeqCst);
        self.running.store(true, Ordering::SeqCst);
    }

    fn stop(&mut self) {
        if self.running.swap(false, Ordering::SeqCst) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn poll(&mut self) -> u32 {
        let due = self.pending.swap(0, Ordering::SeqCst);
        if self.is_running() {
            due
        } else {
            0
        }
    }
}
