//! `dgw resolve <type>` – one-shot resolution with an upstream probe.

use anyhow::{Context, Result};
use dgw_core::config::GatewayConfig;
use dgw_core::resolver::Resolver;

pub async fn run_resolve(cfg: &GatewayConfig, dialog_type: &str) -> Result<()> {
    let resolver = Resolver::from_config(cfg)?;
    let location = resolver
        .resolve(dialog_type)
        .await
        .with_context(|| format!("resolving {}", dialog_type))?;
    println!("{}", location);
    Ok(())
}
