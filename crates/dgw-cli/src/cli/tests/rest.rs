//! Tests for resolve and types.

use super::parse;
use crate::cli::CliCommand;

#[test]
fn cli_parse_resolve() {
    match parse(&["dgw", "resolve", "simpleDialog"]) {
        CliCommand::Resolve { dialog_type } => assert_eq!(dialog_type, "simpleDialog"),
        _ => panic!("expected Resolve"),
    }
}

#[test]
fn cli_parse_resolve_requires_type() {
    use clap::Parser;
    assert!(crate::cli::Cli::try_parse_from(["dgw", "resolve"]).is_err());
}

#[test]
fn cli_parse_types() {
    match parse(&["dgw", "types"]) {
        CliCommand::Types => {}
        _ => panic!("expected Types"),
    }
}
