use serde::Serialize;

use jitterpool_core::{BitQuality, EntropyPool, JitterTimer, PoolReport, bit_quality};

#[derive(Serialize)]
pub struct FullReport {
    pub version: &'static str,
    pub requested_bits: usize,
    pub pool: PoolReport,
    pub quality: BitQuality,
}

pub fn run(count: usize, json: bool) {
    let pool = super::make_pool();
    let report = collect(&pool, count);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{s}"),
            Err(e) => super::fail(format!("failed to serialize report: {e}")),
        }
        return;
    }

    report.pool.print();
    let q = &report.quality;
    println!("\nBIT QUALITY ({} bits)", q.bits);
    println!("{}", "-".repeat(48));
    println!("Ones:            {} ({:.4})", q.ones, q.ones_fraction);
    println!("Longest run:     {}", q.longest_run);
    println!("Shannon:         {:.4} / 8.0 bits/byte", q.shannon);
}

/// Draw `count` bits from `pool` and summarize both the bits and the pool.
pub fn collect<T: JitterTimer>(pool: &EntropyPool<T>, count: usize) -> FullReport {
    let bits = pool.get(count);
    FullReport {
        version: jitterpool_core::VERSION,
        requested_bits: count,
        pool: pool.report(),
        quality: bit_quality(&bits),
    }
}
