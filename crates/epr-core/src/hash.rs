//! SHA-256 helpers.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::errors::{CoreError, Result};

const BLOCK_SIZE: usize = 64 * 1024;

/// Lowercase hex SHA-256 of the UTF-8 bytes of `data`.
pub fn hash_string(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// SHA-256 of a file's contents, read in 64 KiB blocks.
///
/// Returns the digest with an algorithm prefix: `sha256:<hex>`.
pub fn hash_file(path: &Path) -> Result<String> {
    let io_err = |source| CoreError::Io {
        path: path.display().to_string(),
        source,
    };
    let mut file = File::open(path).map_err(io_err)?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; BLOCK_SIZE];
    loop {
        let n = file.read(&mut buf).map_err(io_err)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(format!("sha256:{:x}", hasher.finalize()))
}
