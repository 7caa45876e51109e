use std::io::{self, Read};
use std::path::Path;

use jitterpool_core::{Digest, Sha256};

pub fn run(text: Option<&str>, file: Option<&str>, binary: bool) {
    let digest = match hash_input(text, file.map(Path::new)) {
        Ok(d) => d,
        Err(e) => super::fail(format!("failed to read {}: {e}", file.unwrap_or("stdin"))),
    };

    if binary {
        println!("{}", digest.to_bits());
    } else {
        println!("{digest}");
    }
}

/// Hash the contents of `file` if given, else the UTF-8 bytes of `text`,
/// else everything on stdin.
pub fn hash_input(text: Option<&str>, file: Option<&Path>) -> io::Result<Digest> {
    let mut hasher = Sha256::new();
    match (file, text) {
        (Some(path), _) => {
            hash_reader(&mut hasher, std::fs::File::open(path)?)?;
        }
        (None, Some(text)) => hasher.update(text),
        (None, None) => {
            hash_reader(&mut hasher, io::stdin().lock())?;
        }
    }
    Ok(hasher.finalize())
}

/// Stream everything from `reader` into `hasher`.
pub fn hash_reader(hasher: &mut Sha256, mut reader: impl Read) -> io::Result<u64> {
    let mut buf = [0u8; 8192];
    let mut total = 0u64;
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            return Ok(total);
        }
        hasher.update(&buf[..n]);
        total += n as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_reader_matches_one_shot() {
        let data = vec![0x5Au8; 20_000];
        let mut h = Sha256::new();
        let n = hash_reader(&mut h, &data[..]).unwrap();
        assert_eq!(n, 20_000);
        assert_eq!(h.finalize(), jitterpool_core::sha256(&data));
    }

    #[test]
    fn test_hash_reader_empty() {
        let mut h = Sha256::new();
        assert_eq!(hash_reader(&mut h, std::io::empty()).unwrap(), 0);
        assert_eq!(
            h.finalize().to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hash_input_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), b"abc").unwrap();
        assert_eq!(
            hash_input(None, Some(tmp.path())).unwrap().to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hash_input_file_takes_precedence() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), b"abc").unwrap();
        assert_eq!(
            hash_input(Some("ignored"), Some(tmp.path())).unwrap(),
            jitterpool_core::sha256(b"abc")
        );
    }

    #[test]
    fn test_hash_input_text() {
        assert_eq!(
            hash_input(Some("abc"), None).unwrap(),
            jitterpool_core::sha256(b"abc")
        );
    }

    #[test]
    fn test_hash_input_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let err = hash_input(None, Some(&tmp.path().join("missing.bin"))).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
