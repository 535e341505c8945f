//! Unknown-version artifacts.
//!
//! When a digest is not in the catalog, a one-line text file is written to the
//! artifact directory so someone can paste the digest into a catalog.
//! The digest is rendered as a byte-array declaration:
//!
//! ```text
//! [2024-03-05 07:08:09Z] game's SHA256 checksum hash: new byte[32] { 0x1A, 0x2B, ... };
//! ```

use crate::checksum::{Digest, HashAlgorithm};
use crate::timestamp;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Which artifact file and line layout to produce.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ArtifactStyle {
    /// `<stem>_VersionHash.log` with a timestamped line.
    #[default]
    VersionHash,
    /// `<target>_version.log` holding a ready-to-paste field declaration for a
    /// specific target program (name lowercased).
    Target(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LiteralError {
    #[error("no `new byte[N]` declaration found")]
    MissingDeclaration,
    #[error("invalid declared length `{0}`")]
    BadLength(String),
    #[error("unterminated byte-array body")]
    Unterminated,
    #[error("invalid byte `{0}`")]
    BadByte(String),
    #[error("declared {declared} bytes but found {actual}")]
    CountMismatch { declared: usize, actual: usize },
}

/// `new byte[N] { 0xAB, 0xCD };` with uppercase hex.
pub fn byte_array_literal(digest: &Digest) -> String {
    let bytes = digest.as_bytes();
    if bytes.is_empty() {
        return "new byte[0] { };".to_string();
    }
    let body: Vec<String> = bytes.iter().map(|b| format!("0x{:02X}", b)).collect();
    format!("new byte[{}] {{ {} }};", bytes.len(), body.join(", "))
}

/// Parse the first byte-array declaration in `text` back into a digest.
///
/// Accepts a whole artifact line as well as a bare literal.
pub fn parse_byte_array_literal(text: &str) -> Result<Digest, LiteralError> {
    const DECL: &str = "new byte[";

    let start = text.find(DECL).ok_or(LiteralError::MissingDeclaration)? + DECL.len();
    let rest = &text[start..];
    let close = rest.find(']').ok_or(LiteralError::MissingDeclaration)?;
    let len_str = rest[..close].trim();
    let declared: usize = len_str
        .parse()
        .map_err(|_| LiteralError::BadLength(len_str.to_string()))?;

    let rest = rest[close + 1..].trim_start();
    let rest = rest.strip_prefix('{').ok_or(LiteralError::Unterminated)?;
    let end = rest.find('}').ok_or(LiteralError::Unterminated)?;

    let mut bytes = Vec::with_capacity(declared);
    for item in rest[..end].split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let hex = item
            .strip_prefix("0x")
            .or_else(|| item.strip_prefix("0X"))
            .ok_or_else(|| LiteralError::BadByte(item.to_string()))?;
        let b = u8::from_str_radix(hex, 16).map_err(|_| LiteralError::BadByte(item.to_string()))?;
        bytes.push(b);
    }

    if bytes.len() != declared {
        return Err(LiteralError::CountMismatch {
            declared,
            actual: bytes.len(),
        });
    }
    Ok(Digest::from_bytes(bytes))
}

/// Lowercased target name reduced to a single path component.
///
/// Separators, NUL and control characters become `_`; leading and trailing
/// dots, spaces and underscores are trimmed. Falls back to `target`.
pub fn target_name(target: &str) -> String {
    let mapped: String = target
        .to_lowercase()
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c == ':' || c == '\0' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    let trimmed = mapped.trim_matches(|c| c == '.' || c == ' ' || c == '_');
    if trimmed.is_empty() {
        "target".to_string()
    } else {
        trimmed.to_string()
    }
}

/// File name for the artifact of `stem` under `style`.
pub fn artifact_file_name(stem: &str, style: &ArtifactStyle) -> String {
    match style {
        ArtifactStyle::VersionHash => format!("{stem}_VersionHash.log"),
        ArtifactStyle::Target(target) => format!("{}_version.log", target_name(target)),
    }
}

/// The single line written to the artifact, without trailing newline.
pub fn artifact_line(
    stem: &str,
    algorithm: HashAlgorithm,
    digest: &Digest,
    style: &ArtifactStyle,
    timestamp: &str,
) -> String {
    let literal = byte_array_literal(digest);
    match style {
        ArtifactStyle::VersionHash => format!(
            "[{timestamp}] {stem}'s {} checksum hash: {literal}",
            algorithm.name()
        ),
        ArtifactStyle::Target(target) => format!(
            "private static readonly byte[] {}??_00000000 = {literal}",
            target_name(target)
        ),
    }
}

/// Write (or overwrite) the artifact in `dir` and return its path.
pub fn write_artifact(
    dir: &Path,
    stem: &str,
    algorithm: HashAlgorithm,
    digest: &Digest,
    style: &ArtifactStyle,
) -> io::Result<PathBuf> {
    let path = dir.join(artifact_file_name(stem, style));
    let line = artifact_line(
        stem,
        algorithm,
        digest,
        style,
        &timestamp::current_utc_string(),
    );

    let mut w = BufWriter::new(File::create(&path)?);
    writeln!(w, "{line}")?;
    w.flush()?;
    tracing::debug!(path = %path.display(), "wrote unknown-version artifact");
    Ok(path)
}
