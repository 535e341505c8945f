//! `binver detect` – identify a file against a catalog.

use anyhow::{Context, Result};
use binver_core::artifact::ArtifactStyle;
use binver_core::catalog::CatalogFile;
use binver_core::checksum::HashAlgorithm;
use binver_core::config::BinverConfig;
use binver_core::resolve::{self, Detection, DetectOptions};
use binver_core::sink::TracingSink;
use std::path::Path;

use crate::cli::DetectArgs;

/// CLI flag wins, then the catalog's declared algorithm, then config.
fn choose_algorithm(
    flag: Option<HashAlgorithm>,
    catalog: &CatalogFile,
    cfg: &BinverConfig,
) -> HashAlgorithm {
    flag.or(catalog.algorithm).unwrap_or(cfg.algorithm)
}

fn detect_options(cfg: &BinverConfig, args: &DetectArgs) -> DetectOptions {
    let mut opts = cfg.detect_options();
    if let Some(contact) = &args.contact {
        opts.contact = contact.clone();
    }
    if let Some(dir) = &args.artifact_dir {
        opts.artifact_dir = dir.clone();
    }
    if let Some(target) = &args.target {
        opts.style = ArtifactStyle::Target(target.clone());
    }
    opts
}

/// Stderr hint naming the artifact a miss on `path` leaves behind.
fn unknown_notice(opts: &DetectOptions, path: &Path) -> String {
    format!(
        "unknown version; please send {} to {}",
        opts.artifact_path(&resolve::display_name(path)).display(),
        opts.contact
    )
}

/// Detect and print the label, or `unknown`.
pub fn run_detect(cfg: &BinverConfig, args: &DetectArgs) -> Result<Detection<String>> {
    let catalog_path = args
        .catalog
        .as_deref()
        .or(cfg.catalog.as_deref())
        .context("no catalog given; pass --catalog or set `catalog` in config.toml")?;

    let file = CatalogFile::load(catalog_path)
        .with_context(|| format!("load catalog {}", catalog_path.display()))?;
    let algorithm = choose_algorithm(args.algorithm, &file, cfg);
    let catalog = file
        .into_catalog(algorithm)
        .with_context(|| format!("catalog {}", catalog_path.display()))?;
    tracing::debug!(
        "catalog {} has {} versions ({})",
        catalog_path.display(),
        catalog.len(),
        algorithm
    );

    let opts = detect_options(cfg, args);
    let path = Path::new(&args.path);
    let detection = resolve::detect_version(
        Some(path),
        algorithm,
        &catalog,
        &opts,
        &TracingSink,
    )?;

    match &detection {
        Detection::Matched(label) => println!("{label}"),
        Detection::Unknown => {
            println!("unknown");
            eprintln!("{}", unknown_notice(&opts, path));
        }
    }
    Ok(detection)
}
