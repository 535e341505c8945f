//! Tests for checksum and literal.

use super::parse;
use crate::cli::CliCommand;
use binver_core::checksum::HashAlgorithm;

#[test]
fn cli_parse_checksum() {
    match parse(&["binver", "checksum", "/path/to/file.bin"]) {
        CliCommand::Checksum { path, algorithm } => {
            assert_eq!(path, "/path/to/file.bin");
            assert!(algorithm.is_none());
        }
        _ => panic!("expected Checksum"),
    }
}

#[test]
fn cli_parse_checksum_algorithm() {
    match parse(&["binver", "checksum", "f", "-a", "sha384"]) {
        CliCommand::Checksum { algorithm, .. } => {
            assert_eq!(algorithm, Some(HashAlgorithm::Sha384))
        }
        _ => panic!("expected Checksum with algorithm"),
    }
}

#[test]
fn cli_parse_literal() {
    match parse(&["binver", "literal", "game.exe"]) {
        CliCommand::Literal { path, algorithm } => {
            assert_eq!(path, "game.exe");
            assert!(algorithm.is_none());
        }
        _ => panic!("expected Literal"),
    }
}
