//! Pure-Rust SHA-256 (FIPS 180-4).
//!
//! The harvester whitens every full bit window through this hasher. The
//! public surface is deliberately narrow: feed bytes with [`Sha256::update`],
//! then either consume the hasher with [`Sha256::finalize`] or take the digest
//! and start over with [`Sha256::finalize_reset`]. Round state never leaves
//! this module.
//!
//! ```
//! use jitterpool_core::sha256::{Sha256, sha256};
//!
//! let mut h = Sha256::new();
//! h.update(b"ab");
//! h.update(b"c");
//! assert_eq!(h.finalize(), sha256(b"abc"));
//! ```

use std::fmt;

use crate::helpers::bytes_to_bit_string;

/// Size of one compression block in bytes.
pub const BLOCK_LEN: usize = 64;

/// Size of a digest in bytes.
pub const DIGEST_LEN: usize = 32;

const H256_INIT: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

const K256: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

// ---------------------------------------------------------------------------
// Round functions
// ---------------------------------------------------------------------------

#[inline(always)]
fn small_sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline(always)]
fn small_sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

#[inline(always)]
fn big_sigma0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

#[inline(always)]
fn big_sigma1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

#[inline(always)]
fn ch(e: u32, f: u32, g: u32) -> u32 {
    (e & f) ^ (!e & g)
}

#[inline(always)]
fn maj(a: u32, b: u32, c: u32) -> u32 {
    (a & b) ^ (a & c) ^ (b & c)
}

/// Run the 64 compression rounds of one block into `state`.
fn compress(state: &mut [u32; 8], block: &[u8; BLOCK_LEN]) {
    let mut w = [0u32; 64];
    for (word, chunk) in w.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    for i in 16..64 {
        w[i] = small_sigma1(w[i - 2])
            .wrapping_add(w[i - 7])
            .wrapping_add(small_sigma0(w[i - 15]))
            .wrapping_add(w[i - 16]);
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for i in 0..64 {
        let t1 = h
            .wrapping_add(big_sigma1(e))
            .wrapping_add(ch(e, f, g))
            .wrapping_add(K256[i])
            .wrapping_add(w[i]);
        let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));

        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    for (s, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *s = s.wrapping_add(v);
    }
}

// ---------------------------------------------------------------------------
// Incremental hasher
// ---------------------------------------------------------------------------

/// Incremental SHA-256 hasher.
///
/// One `update`* / finalize cycle is one message. The 2^64-bit message
/// length ceiling is not checked.
#[derive(Clone)]
pub struct Sha256 {
    state: [u32; 8],
    /// Bits already pushed through `compress`; always a multiple of 512.
    bit_len: u64,
    buffer: [u8; BLOCK_LEN],
    /// Invariant: `buffer_len < BLOCK_LEN` between calls.
    buffer_len: usize,
}

impl Sha256 {
    /// Create a hasher at the SHA-256 initial constants.
    pub fn new() -> Self {
        Self {
            state: H256_INIT,
            bit_len: 0,
            buffer: [0u8; BLOCK_LEN],
            buffer_len: 0,
        }
    }

    /// Absorb `data`, compressing each time the block buffer fills.
    pub fn update(&mut self, data: impl AsRef<[u8]>) {
        let mut data = data.as_ref();
        while !data.is_empty() {
            let take = (BLOCK_LEN - self.buffer_len).min(data.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&data[..take]);
            self.buffer_len += take;
            data = &data[take..];

            if self.buffer_len == BLOCK_LEN {
                compress(&mut self.state, &self.buffer);
                self.bit_len = self.bit_len.wrapping_add(512);
                self.buffer_len = 0;
            }
        }
    }

    /// Pad, run the final compression, and return the digest.
    ///
    /// Consumes the hasher. Use [`Sha256::finalize_reset`] to keep the
    /// instance around for the next message.
    pub fn finalize(mut self) -> Digest {
        self.finish()
    }

    /// Return the digest of the current message and reset to the initial
    /// constants, ready for an unrelated message.
    pub fn finalize_reset(&mut self) -> Digest {
        let digest = self.finish();
        self.reset();
        digest
    }

    /// Discard any absorbed input and return to the initial constants.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn finish(&mut self) -> Digest {
        let total_bits = self.bit_len.wrapping_add((self.buffer_len as u64) * 8);

        let mut block = [0u8; BLOCK_LEN];
        block[..self.buffer_len].copy_from_slice(&self.buffer[..self.buffer_len]);
        block[self.buffer_len] = 0x80;

        // No room for the 8-byte length: flush this block and pad a fresh one.
        if self.buffer_len >= BLOCK_LEN - 8 {
            compress(&mut self.state, &block);
            block = [0u8; BLOCK_LEN];
        }

        block[BLOCK_LEN - 8..].copy_from_slice(&total_bits.to_be_bytes());
        compress(&mut self.state, &block);

        let mut out = [0u8; DIGEST_LEN];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.state) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        Digest(out)
    }
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Sha256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sha256")
            .field("buffered", &self.buffer_len)
            .finish_non_exhaustive()
    }
}

/// One-shot SHA-256 of `data`.
pub fn sha256(data: impl AsRef<[u8]>) -> Digest {
    let mut h = Sha256::new();
    h.update(data);
    h.finalize()
}

// ---------------------------------------------------------------------------
// Digest
// ---------------------------------------------------------------------------

/// A finished 256-bit SHA-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Raw digest bytes, big-endian word order.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// 64 lowercase hexadecimal characters.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// 256 `'0'`/`'1'` characters, most-significant bit of each byte first.
    pub fn to_bits(&self) -> String {
        bytes_to_bit_string(&self.0)
    }
}

impl From<Digest> for [u8; DIGEST_LEN] {
    fn from(d: Digest) -> Self {
        d.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({self})")
    }
}
