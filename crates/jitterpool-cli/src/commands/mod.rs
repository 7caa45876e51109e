pub mod bits;
pub mod digest;
pub mod report;
pub mod split;

use jitterpool_core::EntropyPool;

/// Build the pool every command draws from.
pub fn make_pool() -> EntropyPool {
    let pool = EntropyPool::new();
    log::debug!("pool created (jitterpool-core {})", jitterpool_core::VERSION);
    pool
}

/// Print an error and exit with status 1.
pub fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

/// Render packed bytes as lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
