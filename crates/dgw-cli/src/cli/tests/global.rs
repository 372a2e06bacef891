//! Tests for global flags.

use super::parse_cli;
use std::path::Path;

#[test]
fn global_flags_default_off() {
    let cli = parse_cli(&["dgw", "types"]);
    assert!(cli.config.is_none());
    assert!(!cli.log_stderr);
}

#[test]
fn global_flags_after_subcommand() {
    let cli = parse_cli(&["dgw", "serve", "--config", "/etc/dgw.toml", "--log-stderr"]);
    assert_eq!(cli.config.as_deref(), Some(Path::new("/etc/dgw.toml")));
    assert!(cli.log_stderr);
}
