//! CLI command handlers, one per file.

mod checksum;
mod detect;
mod literal;

pub use checksum::run_checksum;
pub use detect::run_detect;
pub use literal::run_literal;
