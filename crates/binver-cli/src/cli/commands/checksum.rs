//! Checksum command: print the hex digest of a file.

use anyhow::Result;
use binver_core::checksum::{self, HashAlgorithm};
use std::path::Path;

/// Compute and print the digest of the given file.
pub fn run_checksum(path: &Path, algorithm: HashAlgorithm) -> Result<()> {
    let digest = checksum::compute_digest(path, algorithm)?;
    println!("{}  {}", digest.to_hex(), path.display());
    Ok(())
}
