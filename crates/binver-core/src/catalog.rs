//! Version catalog: known digests mapped to version labels.
//!
//! The library contract is the in-memory [`Catalog`]. [`CatalogFile`] is the
//! TOML form the CLI reads:
//!
//! ```toml
//! algorithm = "sha256"
//!
//! [[versions]]
//! label = "V1_0"
//! digest = "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03"
//! ```
//!
//! A `digest` may also be a pasted byte-array literal from an artifact.

use crate::artifact::{self, LiteralError};
use crate::checksum::{Digest, HashAlgorithm};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Caller-owned digest → label mapping. Keys are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog<V> {
    entries: Vec<(Digest, V)>,
}

impl<V> Default for Catalog<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> Catalog<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; returns the previous label for `digest`, if any.
    pub fn insert(&mut self, digest: Digest, label: V) -> Option<V> {
        match self.entries.iter_mut().find(|(d, _)| *d == digest) {
            Some((_, existing)) => Some(std::mem::replace(existing, label)),
            None => {
                self.entries.push((digest, label));
                None
            }
        }
    }

    /// Linear scan for an exact digest match.
    pub fn lookup(&self, digest: &Digest) -> Option<&V> {
        self.entries
            .iter()
            .find(|(d, _)| d == digest)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Digest, &V)> {
        self.entries.iter().map(|(d, v)| (d, v))
    }
}

impl<V> FromIterator<(Digest, V)> for Catalog<V> {
    fn from_iter<I: IntoIterator<Item = (Digest, V)>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        catalog.extend(iter);
        catalog
    }
}

impl<V> Extend<(Digest, V)> for Catalog<V> {
    fn extend<I: IntoIterator<Item = (Digest, V)>>(&mut self, iter: I) {
        for (digest, label) in iter {
            self.insert(digest, label);
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("read catalog {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parse catalog")]
    Parse(#[from] toml::de::Error),
    #[error("version `{label}`: invalid hex digest")]
    BadHex {
        label: String,
        #[source]
        source: hex::FromHexError,
    },
    #[error("version `{label}`: invalid byte-array digest")]
    BadLiteral {
        label: String,
        #[source]
        source: LiteralError,
    },
    #[error("version `{label}`: digest is {actual} bytes, {algorithm} needs {expected}")]
    WrongLength {
        label: String,
        algorithm: HashAlgorithm,
        expected: usize,
        actual: usize,
    },
    #[error("version `{label}` has the same digest as `{existing}`")]
    Duplicate { label: String, existing: String },
}

/// One `[[versions]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub label: String,
    /// Hex digest or a `new byte[N] { ... };` literal.
    pub digest: String,
}

/// On-disk catalog (TOML).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Algorithm the digests were computed with, if stated.
    #[serde(default)]
    pub algorithm: Option<HashAlgorithm>,
    #[serde(default)]
    pub versions: Vec<CatalogEntry>,
}

impl CatalogFile {
    pub fn from_toml_str(s: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let data = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&data)
    }

    /// Decode every entry and check its length against `algorithm`.
    pub fn into_catalog(self, algorithm: HashAlgorithm) -> Result<Catalog<String>, CatalogError> {
        let mut catalog: Catalog<String> = Catalog::new();
        for entry in self.versions {
            let digest = parse_digest_text(&entry.label, &entry.digest)?;
            if digest.len() != algorithm.output_len() {
                return Err(CatalogError::WrongLength {
                    label: entry.label,
                    algorithm,
                    expected: algorithm.output_len(),
                    actual: digest.len(),
                });
            }
            if let Some(existing) = catalog.lookup(&digest) {
                return Err(CatalogError::Duplicate {
                    label: entry.label,
                    existing: existing.clone(),
                });
            }
            catalog.insert(digest, entry.label);
        }
        Ok(catalog)
    }
}

fn parse_digest_text(label: &str, text: &str) -> Result<Digest, CatalogError> {
    if text.contains("new byte[") {
        artifact::parse_byte_array_literal(text).map_err(|source| CatalogError::BadLiteral {
            label: label.to_string(),
            source,
        })
    } else {
        Digest::from_hex(text).map_err(|source| CatalogError::BadHex {
            label: label.to_string(),
            source,
        })
    }
}
