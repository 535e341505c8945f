//! Checksum computer: streams a file through a hash function.
//!
//! Files are read in fixed-size chunks so large binaries never have to fit in
//! memory. The file is opened without any exclusive access so the program
//! being identified can keep running (or be replaced) while it is hashed.

use crate::error::DetectError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use sha2::{Sha224, Sha256, Sha384, Sha512};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

const BUF_SIZE: usize = 64 * 1024;

/// Output of a hash over a file's full content.
///
/// Equality is exact: same length and same bytes in the same positions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest(Box<[u8]>);

impl Digest {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Digest(bytes.into().into_boxed_slice())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex, no separators.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        hex::decode(s.trim()).map(Digest::from_bytes)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Digest {
    fn from(bytes: Vec<u8>) -> Self {
        Digest::from_bytes(bytes)
    }
}

impl From<&[u8]> for Digest {
    fn from(bytes: &[u8]) -> Self {
        Digest::from_bytes(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for Digest {
    fn from(bytes: [u8; N]) -> Self {
        Digest::from_bytes(bytes.to_vec())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Supported hash algorithms. SHA-256 is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Sha224,
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 4] = [
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
    ];

    /// Name written into unknown-version artifacts, e.g. `SHA256`.
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha224 => "SHA224",
            HashAlgorithm::Sha256 => "SHA256",
            HashAlgorithm::Sha384 => "SHA384",
            HashAlgorithm::Sha512 => "SHA512",
        }
    }

    /// Digest length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            HashAlgorithm::Sha224 => 28,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Hash everything `reader` yields.
    pub fn digest_reader<R: Read>(self, reader: R) -> io::Result<Digest> {
        match self {
            HashAlgorithm::Sha224 => digest_reader_with::<Sha224, _>(reader),
            HashAlgorithm::Sha256 => digest_reader_with::<Sha256, _>(reader),
            HashAlgorithm::Sha384 => digest_reader_with::<Sha384, _>(reader),
            HashAlgorithm::Sha512 => digest_reader_with::<Sha512, _>(reader),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported hash algorithm `{0}` (expected sha224, sha256, sha384 or sha512)")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for HashAlgorithm {
    type Err = UnknownAlgorithm;

    /// Accepts `sha256`, `SHA256`, `sha-256`, `SHA_256` and the like.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match norm.as_str() {
            "sha224" => Ok(HashAlgorithm::Sha224),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha384" => Ok(HashAlgorithm::Sha384),
            "sha512" => Ok(HashAlgorithm::Sha512),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Hash a reader with any RustCrypto hash implementation.
pub fn digest_reader_with<D, R>(mut reader: R) -> io::Result<Digest>
where
    D: sha2::Digest,
    R: Read,
{
    let mut hasher = D::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(Digest::from_bytes(hasher.finalize().to_vec()))
}

/// True if the path is empty or only whitespace.
pub(crate) fn is_blank(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().trim().is_empty()
}

/// Open for reading while letting other processes read, write, or delete the file.
#[cfg(windows)]
fn open_shared(path: &Path) -> io::Result<File> {
    use std::os::windows::fs::OpenOptionsExt;

    const FILE_SHARE_READ: u32 = 0x1;
    const FILE_SHARE_WRITE: u32 = 0x2;
    const FILE_SHARE_DELETE: u32 = 0x4;

    OpenOptions::new()
        .read(true)
        .share_mode(FILE_SHARE_READ | FILE_SHARE_WRITE | FILE_SHARE_DELETE)
        .open(path)
}

/// Open for reading. Unix opens take no locks, so sharing is implicit.
#[cfg(not(windows))]
fn open_shared(path: &Path) -> io::Result<File> {
    OpenOptions::new().read(true).open(path)
}

/// Compute the digest of a file with the selected algorithm.
pub fn compute_digest(path: &Path, algorithm: HashAlgorithm) -> Result<Digest, DetectError> {
    if is_blank(path) {
        return Err(DetectError::blank_path());
    }
    let f = open_shared(path).map_err(|e| DetectError::io(path, e))?;
    algorithm
        .digest_reader(f)
        .map_err(|e| DetectError::io(path, e))
}

/// Same as [`compute_digest`] for a hash type chosen at compile time.
pub fn compute_digest_with<D: sha2::Digest>(path: &Path) -> Result<Digest, DetectError> {
    if is_blank(path) {
        return Err(DetectError::blank_path());
    }
    let f = open_shared(path).map_err(|e| DetectError::io(path, e))?;
    digest_reader_with::<D, _>(f).map_err(|e| DetectError::io(path, e))
}

/// Compute SHA-256 of a file and return the digest as lowercase hex.
pub fn sha256_path(path: &Path) -> Result<String> {
    Ok(compute_digest(path, HashAlgorithm::Sha256)?.to_hex())
}
