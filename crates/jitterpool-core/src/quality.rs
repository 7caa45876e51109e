//! Quick statistics over served bit strings.
//!
//! These are sanity checks for reports, not randomness tests.

use serde::Serialize;

use crate::helpers::pack_bits;

/// Summary of a `'0'`/`'1'` string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BitQuality {
    /// Binary digits counted (other characters are skipped).
    pub bits: usize,
    pub ones: usize,
    /// `ones / bits`, 0.0 for an empty input.
    pub ones_fraction: f64,
    /// Longest run of identical consecutive bits.
    pub longest_run: usize,
    /// Shannon entropy of the MSB-first packed bytes, bits/byte (max 8.0).
    pub shannon: f64,
}

/// Shannon entropy in bits/byte for a byte slice.
pub fn quick_shannon(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut counts = [0u64; 256];
    for &b in data {
        counts[b as usize] += 1;
    }
    let n = data.len() as f64;
    let mut h = 0.0;
    for &c in &counts {
        if c > 0 {
            let p = c as f64 / n;
            h -= p * p.log2();
        }
    }
    h
}

/// Summarize a bit string.
pub fn bit_quality(bits: &str) -> BitQuality {
    let digits: Vec<bool> = bits
        .bytes()
        .filter_map(|c| match c {
            b'0' => Some(false),
            b'1' => Some(true),
            _ => None,
        })
        .collect();

    let ones = digits.iter().filter(|&&b| b).count();

    let mut longest_run = 0;
    let mut run = 0;
    let mut prev = None;
    for &b in &digits {
        run = if prev == Some(b) { run + 1 } else { 1 };
        longest_run = longest_run.max(run);
        prev = Some(b);
    }

    let ones_fraction = if digits.is_empty() {
        0.0
    } else {
        ones as f64 / digits.len() as f64
    };

    BitQuality {
        bits: digits.len(),
        ones,
        ones_fraction,
        longest_run,
        shannon: quick_shannon(&pack_bits(digits.iter().copied())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let q = bit_quality("");
        assert_eq!(q.bits, 0);
        assert_eq!(q.ones_fraction, 0.0);
        assert_eq!(q.longest_run, 0);
        assert_eq!(q.shannon, 0.0);
    }

    #[test]
    fn test_counts_and_runs() {
        let q = bit_quality("0011101");
        assert_eq!(q.bits, 7);
        assert_eq!(q.ones, 4);
        assert_eq!(q.longest_run, 3);
        assert!((q.ones_fraction - 4.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_skips_non_binary() {
        let q = bit_quality("1 1\n0");
        assert_eq!(q.bits, 3);
        assert_eq!(q.ones, 2);
    }

    #[test]
    fn test_shannon_uniform_bytes() {
        let data: Vec<u8> = (0..=255).collect();
        assert!((quick_shannon(&data) - 8.0).abs() < 1e-9);
        assert_eq!(quick_shannon(&[7u8; 64]), 0.0);
    }
}
