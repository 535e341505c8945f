//! `binver literal` – digest as a byte-array declaration.

use anyhow::Result;
use binver_core::artifact;
use binver_core::checksum::{self, HashAlgorithm};
use std::path::Path;

pub fn run_literal(path: &Path, algorithm: HashAlgorithm) -> Result<()> {
    let digest = checksum::compute_digest(path, algorithm)?;
    println!("{}", artifact::byte_array_literal(&digest));
    Ok(())
}
