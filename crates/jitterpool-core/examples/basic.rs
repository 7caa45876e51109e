//! Basic entropy pool example.
//!
//! Draws whitened bits from a pool backed by the busy-loop timer and prints
//! them, then prints the pool counters.
//!
//! Run: `cargo run --example basic`

use jitterpool_core::EntropyPool;

fn main() {
    let pool = EntropyPool::new();

    // 256 whitened bits as '0'/'1' characters
    let bits = pool.get(256);
    println!("bits: {bits}");

    // 32 bytes packed MSB-first
    let bytes = pool.get_bytes(32);
    print!("hex:  ");
    for b in &bytes {
        print!("{b:02x}");
    }
    println!();

    pool.report().print();
}
