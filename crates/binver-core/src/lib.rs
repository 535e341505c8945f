//! Identify which known version of a program a file is, by checksum.
//!
//! [`checksum`] hashes the file, [`resolve`] looks the digest up in a
//! [`catalog::Catalog`] and, on a miss, writes an [`artifact`] for later
//! catalog extension.

pub mod artifact;
pub mod catalog;
pub mod checksum;
pub mod config;
pub mod error;
pub mod logging;
pub mod resolve;
pub mod sink;
pub mod timestamp;

pub use catalog::Catalog;
pub use checksum::{compute_digest, Digest, HashAlgorithm};
pub use error::DetectError;
pub use resolve::{detect_version, detect_version_sha256, resolve_version, Detection, DetectOptions};
pub use sink::{DetectionSink, TracingSink};
