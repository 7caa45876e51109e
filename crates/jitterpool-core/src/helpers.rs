//! Bit packing shared by the harvester, the pool, and digest rendering.
//!
//! All packing is MSB-first: bit `i` of a stream lands in bit `7 - (i % 8)`
//! of byte `i / 8`.

/// Pack a stream of bits into bytes (MSB-first packing).
///
/// A trailing partial byte is zero-filled in its low bits.
pub fn pack_bits(bits: impl IntoIterator<Item = bool>) -> Vec<u8> {
    let mut bytes = Vec::new();
    for (i, bit) in bits.into_iter().enumerate() {
        if i % 8 == 0 {
            bytes.push(0u8);
        }
        if bit {
            if let Some(last) = bytes.last_mut() {
                *last |= 1 << (7 - (i % 8));
            }
        }
    }
    bytes
}

/// Pack a `'0'`/`'1'` string into bytes. Any character other than `'1'`
/// counts as a zero bit.
pub fn pack_bit_string(bits: &str) -> Vec<u8> {
    pack_bits(bits.bytes().map(|c| c == b'1'))
}

/// Render bytes as a `'0'`/`'1'` string, 8 characters per byte.
pub fn bytes_to_bit_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 8);
    for &b in bytes {
        for i in (0..8).rev() {
            out.push(if (b >> i) & 1 == 1 { '1' } else { '0' });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_bits_msb_first() {
        let bits = [true, false, false, false, false, false, false, true];
        assert_eq!(pack_bits(bits), vec![0x81]);
    }

    #[test]
    fn test_pack_bits_partial_byte() {
        assert_eq!(pack_bits([true, true, true]), vec![0b1110_0000]);
        assert!(pack_bits(std::iter::empty()).is_empty());
    }

    #[test]
    fn test_pack_bit_string() {
        assert_eq!(pack_bit_string("0000000111111110"), vec![0x01, 0xFE]);
    }

    #[test]
    fn test_bytes_to_bit_string() {
        assert_eq!(bytes_to_bit_string(&[0xA5, 0x00]), "1010010100000000");
        assert_eq!(bytes_to_bit_string(&[]), "");
    }

    #[test]
    fn test_pack_and_render_agree() {
        let bytes: Vec<u8> = (0..=255).collect();
        assert_eq!(pack_bit_string(&bytes_to_bit_string(&bytes)), bytes);
    }
}
