//! UTC timestamps for artifact lines.

use chrono::{DateTime, Utc};
use std::fmt::{self, Write};

/// Sortable UTC format: `2024-03-05 07:08:09Z`.
pub const SORTABLE_UTC: &str = "%Y-%m-%d %H:%M:%SZ";

/// Current time in [`SORTABLE_UTC`] format.
pub fn current_utc_string() -> String {
    Utc::now().format(SORTABLE_UTC).to_string()
}

/// Format `at` with a chrono `strftime` string. Fails on an invalid specifier.
pub fn format_utc(at: DateTime<Utc>, format: &str) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write!(out, "{}", at.format(format))?;
    Ok(out)
}
