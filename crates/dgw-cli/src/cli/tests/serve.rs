//! Tests for `serve`.

use super::parse;
use crate::cli::CliCommand;

#[test]
fn cli_parse_serve_defaults() {
    match parse(&["dgw", "serve"]) {
        CliCommand::Serve { port, bind } => {
            assert!(port.is_none());
            assert!(bind.is_none());
        }
        _ => panic!("expected Serve"),
    }
}

#[test]
fn cli_parse_serve_port_and_bind() {
    match parse(&["dgw", "serve", "--port", "8080", "--bind", "127.0.0.1"]) {
        CliCommand::Serve { port, bind } => {
            assert_eq!(port, Some(8080));
            assert_eq!(bind.as_deref(), Some("127.0.0.1"));
        }
        _ => panic!("expected Serve"),
    }
}

#[test]
fn cli_parse_serve_rejects_bad_port() {
    use clap::Parser;
    assert!(crate::cli::Cli::try_parse_from(["dgw", "serve", "--port", "70000"]).is_err());
}
