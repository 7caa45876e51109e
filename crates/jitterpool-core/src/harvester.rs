//! Jitter harvester: timing samples → raw bits → SHA-256 whitened blocks.
//!
//! Each sample is reduced to one bit by comparing it with the cumulative mean
//! of every sample this harvester has ever taken (0 if strictly below the
//! mean, 1 otherwise). Bits slide through a 512-bit window; whenever a push
//! leaves the window full, the window is packed into one 64-byte block and
//! hashed, yielding 256 whitened bits.
//!
//! The window slides by one bit per sample, so once it has filled every
//! further sample emits a block. A fresh harvester therefore produces
//! `ITERATIONS_PER_RUN - WINDOW_BITS + 1` blocks on its first run and
//! `ITERATIONS_PER_RUN` blocks on every run after that.
//!
//! The mean and the window live as long as the harvester. They are never
//! reset between runs, so bit extraction depends on the whole sample history.
//!
//! No claim is made that this extraction is unpredictable to an adversary.

use std::collections::VecDeque;

use crate::helpers::pack_bits;
use crate::sha256::{BLOCK_LEN, Sha256};
use crate::timer::{JitterTimer, SpinTimer};

/// Samples taken per [`JitterHarvester::run`].
pub const ITERATIONS_PER_RUN: usize = 1000;

/// Bits per window; exactly one SHA-256 block.
pub const WINDOW_BITS: usize = BLOCK_LEN * 8;

/// Whitened bits emitted per full window.
pub const BLOCK_BITS: usize = 256;

/// Turns timing jitter into whitened bit strings.
pub struct JitterHarvester<T = SpinTimer> {
    timer: T,
    hasher: Sha256,
    window: VecDeque<bool>,
    samples: u64,
    sum: i128,
    mean: i64,
    blocks: u64,
}

impl JitterHarvester<SpinTimer> {
    /// Harvester over the default busy-loop timer.
    pub fn new() -> Self {
        Self::with_timer(SpinTimer::default())
    }
}

impl Default for JitterHarvester<SpinTimer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: JitterTimer> JitterHarvester<T> {
    pub fn with_timer(timer: T) -> Self {
        Self {
            timer,
            hasher: Sha256::new(),
            window: VecDeque::with_capacity(WINDOW_BITS),
            samples: 0,
            sum: 0,
            mean: 0,
            blocks: 0,
        }
    }

    /// Take [`ITERATIONS_PER_RUN`] samples and return the concatenation of
    /// every whitened block they produced.
    ///
    /// The result is always a multiple of [`BLOCK_BITS`] long and may be
    /// empty while the window is still filling.
    pub fn run(&mut self) -> String {
        let mut out = String::with_capacity(ITERATIONS_PER_RUN * BLOCK_BITS);
        let blocks_before = self.blocks;

        for _ in 0..ITERATIONS_PER_RUN {
            let bit = self.sample_bit();

            if self.window.len() >= WINDOW_BITS {
                self.window.pop_front();
            }
            self.window.push_back(bit);

            if self.window.len() == WINDOW_BITS {
                out.push_str(&self.whiten_window());
            }
        }

        log::debug!(
            "harvest round ({}): {} samples total, {} blocks, mean {} ns",
            self.timer.name(),
            self.samples,
            self.blocks - blocks_before,
            self.mean
        );
        out
    }

    /// Take one sample, fold it into the running mean, and reduce it to a bit.
    fn sample_bit(&mut self) -> bool {
        let duration = self.timer.sample_ns();
        self.samples += 1;
        self.sum += i128::from(duration);
        // Truncating integer mean over the whole history, this sample included.
        self.mean = (self.sum / i128::from(self.samples)) as i64;
        duration >= self.mean
    }

    /// Pack the full window into one block and hash it.
    fn whiten_window(&mut self) -> String {
        let block = pack_bits(self.window.iter().copied());
        debug_assert_eq!(block.len(), BLOCK_LEN);
        self.hasher.update(&block);
        self.blocks += 1;
        self.hasher.finalize_reset().to_bits()
    }

    /// Samples taken over the harvester's lifetime.
    pub fn sample_count(&self) -> u64 {
        self.samples
    }

    /// Current cumulative mean duration in nanoseconds.
    pub fn mean(&self) -> i64 {
        self.mean
    }

    /// Bits currently in the window (at most [`WINDOW_BITS`]).
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Whitened blocks emitted over the harvester's lifetime.
    pub fn blocks_produced(&self) -> u64 {
        self.blocks
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sha256::sha256;
    use crate::timer::ReplayTimer;

    #[test]
    fn test_first_run_block_count() {
        let mut h = JitterHarvester::with_timer(ReplayTimer::new(vec![5, 9, 2, 7]));
        let out = h.run();
        let expected_blocks = ITERATIONS_PER_RUN - WINDOW_BITS + 1;
        assert_eq!(out.len(), expected_blocks * BLOCK_BITS);
        assert_eq!(h.blocks_produced(), expected_blocks as u64);
        assert_eq!(h.window_len(), WINDOW_BITS);
    }

    #[test]
    fn test_later_runs_emit_every_sample() {
        let mut h = JitterHarvester::with_timer(ReplayTimer::new(vec![5, 9, 2, 7]));
        h.run();
        let out = h.run();
        assert_eq!(out.len(), ITERATIONS_PER_RUN * BLOCK_BITS);
    }

    #[test]
    fn test_sample_count_strictly_increases() {
        let mut h = JitterHarvester::with_timer(ReplayTimer::new(vec![1, 2, 3]));
        let mut last = h.sample_count();
        for _ in 0..3 {
            let out = h.run();
            assert_eq!(out.len() % BLOCK_BITS, 0);
            assert!(h.sample_count() > last);
            last = h.sample_count();
        }
        assert_eq!(last, 3 * ITERATIONS_PER_RUN as u64);
    }

    #[test]
    fn test_output_is_binary() {
        let mut h = JitterHarvester::new();
        let out = h.run();
        assert!(!out.is_empty());
        assert!(out.bytes().all(|c| c == b'0' || c == b'1'));
    }

    #[test]
    fn test_constant_duration_gives_all_ones() {
        // Every sample equals the mean, and "not below the mean" is a 1.
        let mut h = JitterHarvester::with_timer(ReplayTimer::constant(42));
        let out = h.run();
        assert_eq!(h.mean(), 42);
        assert!(h.window.iter().all(|&b| b));

        let all_ones = sha256([0xFFu8; BLOCK_LEN]).to_bits();
        assert_eq!(&out[..BLOCK_BITS], all_ones);
        // The window never changes, so neither does the block.
        assert_eq!(&out[out.len() - BLOCK_BITS..], all_ones);
    }

    #[test]
    fn test_zero_durations_are_valid() {
        let mut h = JitterHarvester::with_timer(ReplayTimer::constant(0));
        let out = h.run();
        assert_eq!(h.mean(), 0);
        assert_eq!(out.len() % BLOCK_BITS, 0);
    }

    #[test]
    fn test_mean_is_cumulative_and_truncating() {
        let mut h = JitterHarvester::with_timer(ReplayTimer::new(vec![10, 30]));
        assert!(h.sample_bit()); // 10 vs mean 10
        assert!(h.sample_bit()); // 30 vs mean 20
        assert!(!h.sample_bit()); // 10 vs mean 50/3
        assert_eq!(h.mean(), 16);
        assert!(h.sample_bit()); // 30 vs mean 20
        assert_eq!(h.sample_count(), 4);
    }
}
