//! Version resolver: digest + catalog → version label, or an unknown-version artifact.

use crate::artifact::{self, ArtifactStyle};
use crate::catalog::Catalog;
use crate::checksum::{self, Digest, HashAlgorithm};
use crate::error::DetectError;
use crate::sink::DetectionSink;
use std::fmt;
use std::path::{Path, PathBuf};

/// Outcome of a detection call. `Unknown` is a normal result, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection<V> {
    Matched(V),
    Unknown,
}

impl<V> Detection<V> {
    pub fn is_matched(&self) -> bool {
        matches!(self, Detection::Matched(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Detection::Unknown)
    }

    pub fn matched(self) -> Option<V> {
        match self {
            Detection::Matched(v) => Some(v),
            Detection::Unknown => None,
        }
    }
}

/// Caller-supplied settings shared by every detection call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectOptions {
    /// Who to contact with an unknown-version artifact.
    pub contact: String,
    /// Directory the artifact is written to.
    pub artifact_dir: PathBuf,
    pub style: ArtifactStyle,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            contact: "the plugin authors".to_string(),
            artifact_dir: PathBuf::from("."),
            style: ArtifactStyle::VersionHash,
        }
    }
}

impl DetectOptions {
    /// Where the unknown-version artifact for `display_name` is written.
    pub fn artifact_path(&self, display_name: &str) -> PathBuf {
        self.artifact_dir
            .join(artifact::artifact_file_name(display_name, &self.style))
    }
}

/// Per-call context: the display name of the file plus the shared options.
#[derive(Debug, Clone, Copy)]
pub struct DetectContext<'a> {
    pub display_name: &'a str,
    pub options: &'a DetectOptions,
}

/// File name without directory or extension; falls back to the whole path.
pub fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Look `digest` up in `catalog`.
///
/// On a match, logs an info event and returns the label. On a miss, logs a
/// warning, writes the unknown-version artifact, and returns `Unknown`. An
/// artifact write failure is logged as an error and does not change the result.
pub fn resolve_version<V>(
    digest: &Digest,
    algorithm: HashAlgorithm,
    catalog: &Catalog<V>,
    ctx: DetectContext<'_>,
    sink: &dyn DetectionSink,
) -> Detection<V>
where
    V: Clone + fmt::Display,
{
    if let Some(label) = catalog.lookup(digest) {
        sink.info(&format!("{} version detected: {}", ctx.display_name, label));
        return Detection::Matched(label.clone());
    }

    let opts = ctx.options;
    let file_name = artifact::artifact_file_name(ctx.display_name, &opts.style);
    sink.warn(&format!(
        "Unknown version! Please submit the {} file to {}.",
        file_name, opts.contact
    ));

    if let Err(e) = artifact::write_artifact(
        &opts.artifact_dir,
        ctx.display_name,
        algorithm,
        digest,
        &opts.style,
    ) {
        sink.error(&format!(
            "failed to write {}: {}",
            opts.artifact_path(ctx.display_name).display(),
            e
        ));
    }

    Detection::Unknown
}

/// Hash the file at `path` and resolve it against `catalog`.
///
/// A missing or blank path is logged as an error and returned as
/// [`DetectError::InvalidInput`] before any I/O. Hashing failures are returned
/// as [`DetectError::Io`] and produce no artifact.
pub fn detect_version<V>(
    path: Option<&Path>,
    algorithm: HashAlgorithm,
    catalog: &Catalog<V>,
    options: &DetectOptions,
    sink: &dyn DetectionSink,
) -> Result<Detection<V>, DetectError>
where
    V: Clone + fmt::Display,
{
    let path = match path {
        Some(p) if !checksum::is_blank(p) => p,
        _ => {
            let err = DetectError::blank_path();
            sink.error(&err.to_string());
            return Err(err);
        }
    };

    let digest = checksum::compute_digest(path, algorithm)?;
    let name = display_name(path);
    let ctx = DetectContext {
        display_name: &name,
        options,
    };
    Ok(resolve_version(&digest, algorithm, catalog, ctx, sink))
}

/// [`detect_version`] with SHA-256.
pub fn detect_version_sha256<V>(
    path: Option<&Path>,
    catalog: &Catalog<V>,
    options: &DetectOptions,
    sink: &dyn DetectionSink,
) -> Result<Detection<V>, DetectError>
where
    V: Clone + fmt::Display,
{
    detect_version(path, HashAlgorithm::Sha256, catalog, options, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingSink;
    use sha2::{Digest as _, Sha256};
    use tracing::Level;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum GameVersion {
        V1_0,
        V1_1,
    }

    impl fmt::Display for GameVersion {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            fmt::Debug::fmt(self, f)
        }
    }

    const CONTENT: &[u8] = b"0123456789";

    fn options_in(dir: &Path) -> DetectOptions {
        DetectOptions {
            contact: "alice@example.com".to_string(),
            artifact_dir: dir.to_path_buf(),
            style: ArtifactStyle::VersionHash,
        }
    }

    fn known_catalog() -> Catalog<GameVersion> {
        let mut catalog = Catalog::new();
        catalog.insert(Digest::from_bytes(Sha256::digest(CONTENT).to_vec()), GameVersion::V1_0);
        catalog.insert(Digest::from([0x42; 32]), GameVersion::V1_1);
        catalog
    }

    #[test]
    fn display_name_strips_dir_and_extension() {
        assert_eq!(display_name(Path::new("/games/re4/re4.exe")), "re4");
        assert_eq!(display_name(Path::new("file")), "file");
        assert_eq!(display_name(Path::new("archive.tar.gz")), "archive.tar");
    }

    #[test]
    fn match_returns_label_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.bin");
        std::fs::write(&path, CONTENT).unwrap();
        let out = tempfile::tempdir().unwrap();
        let sink = RecordingSink::new();

        let got = detect_version_sha256(Some(&path), &known_catalog(), &options_in(out.path()), &sink)
            .unwrap();

        assert_eq!(got, Detection::Matched(GameVersion::V1_0));
        assert_eq!(sink.messages(Level::INFO), vec!["file version detected: V1_0"]);
        assert!(sink.messages(Level::WARN).is_empty());
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn flipped_byte_is_unknown_with_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.bin");
        let mut flipped = CONTENT.to_vec();
        flipped[3] ^= 0x01;
        std::fs::write(&path, &flipped).unwrap();
        let out = tempfile::tempdir().unwrap();
        let sink = RecordingSink::new();

        let got = detect_version_sha256(Some(&path), &known_catalog(), &options_in(out.path()), &sink)
            .unwrap();

        assert_eq!(got, Detection::Unknown);
        let warnings = sink.messages(Level::WARN);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("file_VersionHash.log"));
        assert!(warnings[0].contains("alice@example.com"));
        assert!(sink.messages(Level::INFO).is_empty());

        let text = std::fs::read_to_string(out.path().join("file_VersionHash.log")).unwrap();
        assert!(text.starts_with('['));
        assert!(text.contains("] file's SHA256 checksum hash: new byte[32] { "));
        assert_eq!(text.matches("0x").count(), 32);
        let expected = Digest::from_bytes(Sha256::digest(&flipped).to_vec());
        assert_eq!(artifact::parse_byte_array_literal(&text).unwrap(), expected);
    }

    #[test]
    fn empty_catalog_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.bin");
        std::fs::write(&path, CONTENT).unwrap();
        let catalog: Catalog<GameVersion> = Catalog::new();
        let sink = RecordingSink::new();

        let got = detect_version(
            Some(&path),
            HashAlgorithm::Sha384,
            &catalog,
            &options_in(dir.path()),
            &sink,
        )
        .unwrap();

        assert!(got.is_unknown());
        let text = std::fs::read_to_string(dir.path().join("file_VersionHash.log")).unwrap();
        assert!(text.contains("file's SHA384 checksum hash: new byte[48] {"));
    }

    #[test]
    fn blank_or_missing_path_is_invalid_input_without_io() {
        let out = tempfile::tempdir().unwrap();
        let catalog = known_catalog();
        for path in [None, Some(Path::new("")), Some(Path::new("  \t"))] {
            let sink = RecordingSink::new();
            let err = detect_version_sha256(path, &catalog, &options_in(out.path()), &sink)
                .unwrap_err();
            assert!(err.is_invalid_input(), "{path:?}");
            assert_eq!(sink.messages(Level::ERROR).len(), 1);
        }
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn missing_file_is_io_error_without_artifact() {
        let out = tempfile::tempdir().unwrap();
        let sink = RecordingSink::new();
        let err = detect_version_sha256(
            Some(Path::new("/no/such/file")),
            &known_catalog(),
            &options_in(out.path()),
            &sink,
        )
        .unwrap_err();
        assert!(err.is_io());
        assert!(sink.is_empty());
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn artifact_write_failure_does_not_mask_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options_in(&dir.path().join("does-not-exist"));
        let sink = RecordingSink::new();
        let ctx = DetectContext {
            display_name: "game",
            options: &opts,
        };

        let got = resolve_version(
            &Digest::from([0u8; 32]),
            HashAlgorithm::Sha256,
            &known_catalog(),
            ctx,
            &sink,
        );

        assert_eq!(got, Detection::Unknown);
        assert_eq!(sink.messages(Level::WARN).len(), 1);
        let errors = sink.messages(Level::ERROR);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("game_VersionHash.log"));
    }

    #[test]
    fn target_style_names_artifact_after_target() {
        let dir = tempfile::tempdir().unwrap();
        let opts = DetectOptions {
            style: ArtifactStyle::Target("RE4R".to_string()),
            ..options_in(dir.path())
        };
        let sink = RecordingSink::new();
        let ctx = DetectContext {
            display_name: "re4",
            options: &opts,
        };

        let got = resolve_version(
            &Digest::from([0x01; 32]),
            HashAlgorithm::Sha256,
            &known_catalog(),
            ctx,
            &sink,
        );

        assert!(got.is_unknown());
        assert!(sink.messages(Level::WARN)[0].contains("re4r_version.log"));
        let text = std::fs::read_to_string(dir.path().join("re4r_version.log")).unwrap();
        assert!(text.starts_with("private static readonly byte[] re4r??_00000000 = new byte[32] {"));
    }

    #[test]
    fn artifact_path_follows_style() {
        let opts = DetectOptions {
            artifact_dir: PathBuf::from("/out"),
            ..DetectOptions::default()
        };
        assert_eq!(
            opts.artifact_path("game"),
            PathBuf::from("/out/game_VersionHash.log")
        );
        let opts = DetectOptions {
            style: ArtifactStyle::Target("../RE4R".to_string()),
            ..opts
        };
        assert_eq!(opts.artifact_path("game"), PathBuf::from("/out/re4r_version.log"));
    }

    #[test]
    fn second_catalog_entry_matches() {
        let sink = RecordingSink::new();
        let opts = DetectOptions::default();
        let ctx = DetectContext {
            display_name: "game",
            options: &opts,
        };
        let got = resolve_version(
            &Digest::from([0x42; 32]),
            HashAlgorithm::Sha256,
            &known_catalog(),
            ctx,
            &sink,
        );
        assert_eq!(got.matched(), Some(GameVersion::V1_1));
    }
}
