//! Duration sources feeding the jitter harvester.
//!
//! Every duration source implements [`JitterTimer`]. [`SpinTimer`] is the
//! real one: it times a short decrement loop against the monotonic clock.
//! [`ReplayTimer`] plays back a fixed list of durations so that a whole
//! harvest → whiten → serve pipeline can be reproduced bit for bit.

use std::hint::black_box;
use std::time::Instant;

/// Decrements per [`SpinTimer`] sample.
pub const DEFAULT_SPINS: u32 = 10;

/// A source of signed timing measurements, in nanoseconds.
///
/// Implementations are owned by one harvester and only ever called from the
/// thread currently holding the pool lock, so `&mut self` is fine; `Send` is
/// required so the pool can be shared across threads.
pub trait JitterTimer: Send {
    /// Take one measurement.
    fn sample_ns(&mut self) -> i64;

    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<F> JitterTimer for F
where
    F: FnMut() -> i64 + Send,
{
    fn sample_ns(&mut self) -> i64 {
        self()
    }
}

// ---------------------------------------------------------------------------
// SpinTimer
// ---------------------------------------------------------------------------

/// Times a fixed-count busy loop.
///
/// The loop body is trivial, so the measured duration is dominated by clock
/// read overhead, pipeline state, interrupts, and frequency scaling. Those are
/// the jitter.
#[derive(Debug, Clone, Copy)]
pub struct SpinTimer {
    spins: u32,
}

impl SpinTimer {
    pub fn new(spins: u32) -> Self {
        Self { spins }
    }

    pub fn spins(&self) -> u32 {
        self.spins
    }
}

impl Default for SpinTimer {
    fn default() -> Self {
        Self::new(DEFAULT_SPINS)
    }
}

impl JitterTimer for SpinTimer {
    fn sample_ns(&mut self) -> i64 {
        let mut x = black_box(self.spins);
        let start = Instant::now();
        while x > 0 {
            x = black_box(x - 1);
        }
        let elapsed = start.elapsed();
        i64::try_from(elapsed.as_nanos()).unwrap_or(i64::MAX)
    }

    fn name(&self) -> &'static str {
        "spin"
    }
}

// ---------------------------------------------------------------------------
// ReplayTimer
// ---------------------------------------------------------------------------

/// Replays a fixed sequence of durations, wrapping around at the end.
///
/// An empty sequence yields zero forever.
#[derive(Debug, Clone, Default)]
pub struct ReplayTimer {
    durations: Vec<i64>,
    pos: usize,
}

impl ReplayTimer {
    pub fn new(durations: impl Into<Vec<i64>>) -> Self {
        Self {
            durations: durations.into(),
            pos: 0,
        }
    }

    /// The same duration every time.
    pub fn constant(duration: i64) -> Self {
        Self::new(vec![duration])
    }

    /// Number of samples handed out so far.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl JitterTimer for ReplayTimer {
    fn sample_ns(&mut self) -> i64 {
        if self.durations.is_empty() {
            return 0;
        }
        let d = self.durations[self.pos % self.durations.len()];
        self.pos += 1;
        d
    }

    fn name(&self) -> &'static str {
        "replay"
    }
}
