//! Stable 64-bit content hashing
//!
//! XXH64 with seed 0. Not cryptographic; only used to detect changes.

use std::fmt;
use std::path::Path;
use xxhash_rust::xxh64::{Xxh64, xxh64};

const SEED: u64 = 0;

/// A 64-bit digest rendered as 16 lowercase hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash(pub u64);

impl ContentHash {
    pub fn to_hex(self) -> String {
        format!("{:016x}", self.0)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

pub fn hash_bytes(bytes: &[u8]) -> ContentHash {
    ContentHash(xxh64(bytes, SEED))
}

pub fn hash_str(text: &str) -> ContentHash {
    hash_bytes(text.as_bytes())
}

/// Hash a file by streaming its contents.
pub fn hash_file(path: &Path) -> std::io::Result<ContentHash> {
    use std::io::Read;

    let mut file = std::fs::File::open(path)?;
    let mut hasher = Xxh64::new(SEED);
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(ContentHash(hasher.digest()))
}
