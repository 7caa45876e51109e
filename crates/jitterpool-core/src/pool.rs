//! Thread-safe pool of whitened bits.
//!
//! Architecture:
//! 1. A caller asks for `n` bits
//! 2. Under the pool lock, the harvester runs until the buffer holds `n` bits
//! 3. The next `n` bits after the read cursor are copied out and the cursor
//!    advances; consumed digits are compacted away only before a refill
//!
//! Refill and extraction happen inside one critical section, so concurrent
//! callers always receive disjoint, FIFO-ordered slices of the same stream.
//! A large request simply runs the harvester more times on the calling
//! thread; nobody can drain bits faster than they are harvested.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::harvester::JitterHarvester;
use crate::helpers::pack_bit_string;
use crate::timer::{JitterTimer, SpinTimer};

/// Everything the lock protects.
struct PoolState<T> {
    buffer: String,
    /// Read cursor: `buffer[head..]` is unserved.
    head: usize,
    harvester: JitterHarvester<T>,
    rounds: u64,
    bits_harvested: u64,
    bits_served: u64,
}

impl<T> PoolState<T> {
    fn available(&self) -> usize {
        self.buffer.len() - self.head
    }

    /// Drop served digits from the front of the buffer.
    fn compact(&mut self) {
        self.buffer.drain(..self.head);
        self.head = 0;
    }
}

/// Mutex-guarded buffer of whitened `'0'`/`'1'` digits.
pub struct EntropyPool<T = SpinTimer> {
    state: Mutex<PoolState<T>>,
}

impl EntropyPool<SpinTimer> {
    /// Pool backed by the default busy-loop timer.
    pub fn new() -> Self {
        Self::with_harvester(JitterHarvester::new())
    }
}

impl Default for EntropyPool<SpinTimer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: JitterTimer> EntropyPool<T> {
    /// Pool whose harvester samples `timer`.
    pub fn with_timer(timer: T) -> Self {
        Self::with_harvester(JitterHarvester::with_timer(timer))
    }

    /// Pool that takes ownership of an existing harvester, keeping its
    /// accumulated mean and window.
    pub fn with_harvester(harvester: JitterHarvester<T>) -> Self {
        Self {
            state: Mutex::new(PoolState {
                buffer: String::new(),
                head: 0,
                harvester,
                rounds: 0,
                bits_harvested: 0,
                bits_served: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PoolState<T>> {
        // The buffer only ever holds whole digits between statements, so a
        // panic in another holder leaves nothing half-written.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return exactly `bits_needed` whitened bits as `'0'`/`'1'` characters.
    ///
    /// Blocks while another caller holds the pool, then refills from the
    /// harvester as often as needed. `get(0)` returns an empty string without
    /// harvesting.
    pub fn get(&self, bits_needed: usize) -> String {
        let mut state = self.lock();

        while state.available() < bits_needed {
            log::debug!(
                "pool refill: {} buffered < {} requested",
                state.available(),
                bits_needed
            );
            state.compact();
            let fresh = state.harvester.run();
            state.rounds += 1;
            state.bits_harvested += fresh.len() as u64;
            state.buffer.push_str(&fresh);
        }

        let start = state.head;
        let out = state.buffer[start..start + bits_needed].to_string();
        state.head += bits_needed;
        state.bits_served += bits_needed as u64;
        log::trace!(
            "served {} bits, {} left in pool",
            bits_needed,
            state.available()
        );
        out
    }

    /// Return `n_bytes` of whitened output: `get(8 * n_bytes)` packed
    /// MSB-first.
    pub fn get_bytes(&self, n_bytes: usize) -> Vec<u8> {
        pack_bit_string(&self.get(n_bytes * 8))
    }

    /// Bits currently buffered and not yet served.
    pub fn buffered_bits(&self) -> usize {
        self.lock().available()
    }

    /// Snapshot of pool and harvester counters.
    pub fn report(&self) -> PoolReport {
        let state = self.lock();
        PoolReport {
            timer: state.harvester.timer().name().to_string(),
            buffered_bits: state.available(),
            harvest_rounds: state.rounds,
            bits_harvested: state.bits_harvested,
            bits_served: state.bits_served,
            samples: state.harvester.sample_count(),
            mean_ns: state.harvester.mean(),
            blocks: state.harvester.blocks_produced(),
        }
    }
}

/// Point-in-time pool counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolReport {
    /// Name of the harvester's duration source.
    pub timer: String,
    /// Bits waiting in the buffer.
    pub buffered_bits: usize,
    /// Harvester runs triggered by refills.
    pub harvest_rounds: u64,
    /// Whitened bits appended to the buffer over the pool's lifetime.
    pub bits_harvested: u64,
    /// Bits handed out to callers.
    pub bits_served: u64,
    /// Timing samples taken by the harvester.
    pub samples: u64,
    /// Harvester's cumulative mean sample duration.
    pub mean_ns: i64,
    /// Whitened blocks produced by the harvester.
    pub blocks: u64,
}

impl PoolReport {
    pub fn print(&self) {
        println!("\n{}", "=".repeat(48));
        println!("ENTROPY POOL REPORT");
        println!("{}", "=".repeat(48));
        println!("Timer:           {}", self.timer);
        println!("Harvest rounds:  {}", self.harvest_rounds);
        println!("Samples:         {}", self.samples);
        println!("Mean duration:   {} ns", self.mean_ns);
        println!("Blocks:          {}", self.blocks);
        println!("Bits harvested:  {}", self.bits_harvested);
        println!("Bits served:     {}", self.bits_served);
        println!("Bits buffered:   {}", self.buffered_bits);
    }
}
