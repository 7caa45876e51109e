//! # jitterpool-core
//!
//! Harvests timing jitter from the host, whitens it with a from-scratch
//! SHA-256, and serves the result from a thread-safe pool of bits.
//!
//! ## Quick Start
//!
//! ```no_run
//! use jitterpool_core::EntropyPool;
//!
//! let pool = EntropyPool::new();
//!
//! // 256 whitened bits as '0'/'1' characters
//! let bits = pool.get(256);
//! assert_eq!(bits.len(), 256);
//!
//! // Or packed into bytes
//! let bytes = pool.get_bytes(32);
//! assert_eq!(bytes.len(), 32);
//! ```
//!
//! ## Architecture
//!
//! Timer → Harvester (bit per sample, 512-bit window) → SHA-256 → Pool → caller
//!
//! - [`JitterTimer`]: where durations come from. [`SpinTimer`] times a short
//!   busy loop; [`ReplayTimer`] replays fixed durations for reproducible runs.
//! - [`JitterHarvester`]: reduces each duration to one bit against the
//!   lifetime mean and hashes every full window into 256 bits.
//! - [`EntropyPool`]: buffers whitened bits behind a mutex and serves exact
//!   request sizes, refilling on demand.
//!
//! The timing source is not claimed to be unpredictable to a capable
//! adversary. What the crate guarantees is the pipeline: harvest, accumulate,
//! whiten, buffer, serve.

pub mod harvester;
pub mod helpers;
pub mod pool;
pub mod quality;
pub mod sha256;
pub mod split;
pub mod timer;

pub use harvester::{BLOCK_BITS, ITERATIONS_PER_RUN, JitterHarvester, WINDOW_BITS};
pub use pool::{EntropyPool, PoolReport};
pub use quality::{BitQuality, bit_quality, quick_shannon};
pub use sha256::{Digest, Sha256, sha256};
pub use split::BitError;
pub use timer::{JitterTimer, ReplayTimer, SpinTimer};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
