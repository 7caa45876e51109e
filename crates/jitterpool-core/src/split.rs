//! XOR secret splitting over `'0'`/`'1'` strings.
//!
//! These helpers consume pool output: split a bit string in half, XOR the
//! halves, keep a key, and later rebuild both halves from the XOR and the key.
//! Every operand is validated; a bad argument aborts only that call.
//!
//! ```
//! use jitterpool_core::split::{reconstruct_from_xor, split_in_half, xor_with_left_key};
//!
//! let (a, b) = split_in_half("10110010").unwrap();
//! let (xored, key) = xor_with_left_key(a, b).unwrap();
//! let (ra, rb) = reconstruct_from_xor(&xored, &key).unwrap();
//! assert_eq!((ra.as_str(), rb.as_str()), (a, b));
//! ```

/// Invalid bit-string argument.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BitError {
    #[error("bit string length must be even, got {0}")]
    OddLength(usize),

    #[error("bit strings must be the same length: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("bit strings must contain only '0' or '1': found {found:?} at position {position}")]
    InvalidDigit { position: usize, found: char },
}

pub type Result<T> = std::result::Result<T, BitError>;

fn check_same_len(a: &str, b: &str) -> Result<()> {
    if a.len() != b.len() {
        return Err(BitError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(())
}

fn digit(s: &str, position: usize, c: u8) -> Result<bool> {
    match c {
        b'0' => Ok(false),
        b'1' => Ok(true),
        _ => Err(BitError::InvalidDigit {
            position,
            found: s[position..].chars().next().unwrap_or(c as char),
        }),
    }
}

/// Validate both operands and yield their bits pairwise.
fn zip_bits(a: &str, b: &str) -> Result<Vec<(bool, bool)>> {
    check_same_len(a, b)?;
    a.bytes()
        .zip(b.bytes())
        .enumerate()
        .map(|(i, (x, y))| -> Result<(bool, bool)> { Ok((digit(a, i, x)?, digit(b, i, y)?)) })
        .collect()
}

fn to_char(bit: bool) -> char {
    if bit { '1' } else { '0' }
}

/// Check that `s` is a pure `'0'`/`'1'` string.
pub fn validate(s: &str) -> Result<()> {
    for (i, c) in s.bytes().enumerate() {
        digit(s, i, c)?;
    }
    Ok(())
}

/// Split `bits` into two equal halves.
pub fn split_in_half(bits: &str) -> Result<(&str, &str)> {
    if bits.len() % 2 != 0 {
        return Err(BitError::OddLength(bits.len()));
    }
    validate(bits)?;
    Ok(bits.split_at(bits.len() / 2))
}

/// Position-wise XOR of two equal-length bit strings.
pub fn xor_bits(a: &str, b: &str) -> Result<String> {
    Ok(zip_bits(a, b)?
        .into_iter()
        .map(|(x, y)| to_char(x ^ y))
        .collect())
}

/// Return `(a XOR b, a)`. The key is the left operand itself.
pub fn xor_with_left_key(a: &str, b: &str) -> Result<(String, String)> {
    let pairs = zip_bits(a, b)?;
    let xored = pairs.iter().map(|&(x, y)| to_char(x ^ y)).collect();
    Ok((xored, a.to_string()))
}

/// Return `(a XOR b, NOT a)`.
///
/// Feeding this key to [`reconstruct_from_xor`] yields the complements of
/// both operands.
pub fn xor_with_right_key(a: &str, b: &str) -> Result<(String, String)> {
    let pairs = zip_bits(a, b)?;
    let xored = pairs.iter().map(|&(x, y)| to_char(x ^ y)).collect();
    let key = pairs.iter().map(|&(x, _)| to_char(!x)).collect();
    Ok((xored, key))
}

/// Rebuild the pair `(key, key XOR xored)` from an XOR value and its key.
pub fn reconstruct_from_xor(xored: &str, key: &str) -> Result<(String, String)> {
    let pairs = zip_bits(xored, key)?;
    let left = pairs.iter().map(|&(_, k)| to_char(k)).collect();
    let right = pairs.iter().map(|&(x, k)| to_char(x ^ k)).collect();
    Ok((left, right))
}
