use std::io;
use std::path::Path;

use jitterpool_core::EntropyPool;
use jitterpool_core::helpers::pack_bit_string;

pub fn run(count: usize, format: &str, output_path: Option<&str>) {
    let pool = super::make_pool();
    let rendered = match render(&pool, count, format) {
        Ok(r) => r,
        Err(e) => super::fail(e),
    };

    let path = output_path.map(Path::new);
    if let Err(e) = write_output(&rendered, path) {
        super::fail(format!("failed to write {}: {e}", output_path.unwrap_or("stdout")));
    }
    if let Some(path) = output_path {
        eprintln!("Wrote {count} bits to {path}");
    }
}

/// Write `rendered` plus a trailing newline to `path`, or to stdout.
pub fn write_output(rendered: &str, path: Option<&Path>) -> io::Result<()> {
    match path {
        Some(path) => std::fs::write(path, format!("{rendered}\n")),
        None => {
            println!("{rendered}");
            Ok(())
        }
    }
}

/// Draw `count` bits and render them in `format`.
pub fn render<T: jitterpool_core::JitterTimer>(
    pool: &EntropyPool<T>,
    count: usize,
    format: &str,
) -> Result<String, String> {
    match format {
        "bits" => Ok(pool.get(count)),
        "hex" => {
            if count % 8 != 0 {
                return Err(format!("hex output needs a multiple of 8 bits, got {count}"));
            }
            Ok(super::to_hex(&pack_bit_string(&pool.get(count))))
        }
        other => Err(format!("unknown format '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jitterpool_core::ReplayTimer;

    fn pool() -> EntropyPool<ReplayTimer> {
        EntropyPool::with_timer(ReplayTimer::new(vec![9, 4, 22, 16, 1]))
    }

    #[test]
    fn test_render_bits() {
        let out = render(&pool(), 100, "bits").unwrap();
        assert_eq!(out.len(), 100);
        assert!(out.bytes().all(|c| c == b'0' || c == b'1'));
    }

    #[test]
    fn test_render_hex_matches_bits() {
        let bits = render(&pool(), 64, "bits").unwrap();
        let hex = render(&pool(), 64, "hex").unwrap();
        assert_eq!(hex.len(), 16);
        assert_eq!(hex, super::super::to_hex(&pack_bit_string(&bits)));
    }

    #[test]
    fn test_render_hex_rejects_partial_byte() {
        assert!(render(&pool(), 12, "hex").is_err());
    }

    #[test]
    fn test_render_unknown_format() {
        assert!(render(&pool(), 8, "base64").is_err());
    }

    #[test]
    fn test_write_output_to_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bits.txt");
        let bits = render(&pool(), 32, "bits").unwrap();
        write_output(&bits, Some(&path)).unwrap();
        let back = std::fs::read_to_string(&path).unwrap();
        assert_eq!(back, format!("{bits}\n"));
    }

    #[test]
    fn test_write_output_overwrites() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "stale contents that are longer").unwrap();
        write_output("0101", Some(tmp.path())).unwrap();
        assert_eq!(std::fs::read_to_string(tmp.path()).unwrap(), "0101\n");
    }

    #[test]
    fn test_write_output_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("no-such-dir").join("bits.txt");
        let err = write_output("0101", Some(&path)).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
        assert!(!path.exists());
    }

    #[test]
    fn test_write_output_to_directory_fails() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(write_output("0101", Some(tmp.path())).is_err());
    }
}
