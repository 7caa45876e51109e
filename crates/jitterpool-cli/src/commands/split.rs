use jitterpool_core::split::{
    BitError, reconstruct_from_xor, split_in_half, xor_with_left_key, xor_with_right_key,
};

/// Every intermediate of one split/reconstruct walk-through.
#[derive(Debug)]
pub struct SplitDemo {
    pub first: String,
    pub second: String,
    /// Left-key XOR of the two halves.
    pub xored: String,
    pub left_key: String,
    /// Halves of `xored`, XOR-split once more.
    pub xored_first: String,
    pub xored_second: String,
    pub xored2: String,
    pub key2: String,
    pub recovered_xored: (String, String),
    pub recovered: (String, String),
    /// Right-key XOR and its (complemented) reconstruction.
    pub right_xored: String,
    pub right_key: String,
    pub right_recovered: (String, String),
}

impl SplitDemo {
    /// Whether both left-key reconstructions returned the original halves.
    pub fn verified(&self) -> bool {
        self.recovered == (self.first.clone(), self.second.clone())
            && self.recovered_xored == (self.xored_first.clone(), self.xored_second.clone())
    }
}

pub fn run(count: usize) {
    if count == 0 || count % 4 != 0 {
        super::fail(format!("--count must be a positive multiple of 4, got {count}"));
    }

    let pool = super::make_pool();
    let bitstream = pool.get(count);
    println!("bitstream: {bitstream}\n");

    let demo = match walk(&bitstream) {
        Ok(d) => d,
        Err(e) => super::fail(e),
    };

    println!("First half  : {}", demo.first);
    println!("Second half : {}\n", demo.second);
    println!("XOR result  : {}", demo.xored);
    println!("Key         : {}\n", demo.left_key);
    println!("XOR halves  : {} | {}", demo.xored_first, demo.xored_second);
    println!("XOR2 result : {}", demo.xored2);
    println!("Key2        : {}\n", demo.key2);
    println!(
        "Recovered   : {} | {}",
        demo.recovered_xored.0, demo.recovered_xored.1
    );
    println!("Recovered   : {} | {}\n", demo.recovered.0, demo.recovered.1);
    println!("{}", "-".repeat(60));
    println!("Right XOR   : {}", demo.right_xored);
    println!("Right key   : {}", demo.right_key);
    println!(
        "Recovered   : {} | {}  (complements)",
        demo.right_recovered.0, demo.right_recovered.1
    );

    if !demo.verified() {
        super::fail("reconstruction did not return the original halves");
    }
    println!("\nReconstruction verified.");
}

/// Split `bitstream`, XOR-split twice with left keys, and reconstruct.
pub fn walk(bitstream: &str) -> Result<SplitDemo, BitError> {
    let (first, second) = split_in_half(bitstream)?;
    let (xored, left_key) = xor_with_left_key(first, second)?;

    let (xored_first, xored_second) = split_in_half(&xored)?;
    let (xored2, key2) = xor_with_left_key(xored_first, xored_second)?;
    let recovered_xored = reconstruct_from_xor(&xored2, &key2)?;

    let recovered = reconstruct_from_xor(&xored, &left_key)?;

    let (right_xored, right_key) = xor_with_right_key(first, second)?;
    let right_recovered = reconstruct_from_xor(&right_xored, &right_key)?;

    Ok(SplitDemo {
        first: first.to_string(),
        second: second.to_string(),
        xored_first: xored_first.to_string(),
        xored_second: xored_second.to_string(),
        xored,
        left_key,
        xored2,
        key2,
        recovered_xored,
        recovered,
        right_xored,
        right_key,
        right_recovered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jitterpool_core::split::xor_bits;

    #[test]
    fn test_walk_verifies() {
        let demo = walk("1011001011110000").unwrap();
        assert!(demo.verified());
        assert_eq!(demo.first, "10110010");
        assert_eq!(demo.second, "11110000");
        assert_eq!(demo.xored, "01000010");
        assert_eq!(demo.left_key, demo.first);
    }

    #[test]
    fn test_right_key_recovers_complements() {
        let demo = walk("00110101").unwrap();
        assert_eq!(demo.right_recovered.0, "1100");
        assert_eq!(demo.right_recovered.1, "1010");
        assert_eq!(
            xor_bits(&demo.right_recovered.0, &demo.right_recovered.1).unwrap(),
            demo.right_xored
        );
    }

    #[test]
    fn test_walk_on_pool_output() {
        let pool = jitterpool_core::EntropyPool::with_timer(jitterpool_core::ReplayTimer::new(
            vec![3, 14, 15, 92, 65],
        ));
        let demo = walk(&pool.get(256)).unwrap();
        assert!(demo.verified());
        assert_eq!(demo.xored2.len(), 64);
    }

    #[test]
    fn test_walk_rejects_bad_input() {
        assert!(matches!(walk("101"), Err(BitError::OddLength(3))));
        assert!(matches!(walk("10x1"), Err(BitError::InvalidDigit { .. })));
    }
}
