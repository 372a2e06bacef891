//! `dgw types` – list allowed dialog types.

use anyhow::Result;
use dgw_core::config::GatewayConfig;
use dgw_core::resolver::Resolver;

pub fn run_types(cfg: &GatewayConfig) -> Result<()> {
    let resolver = Resolver::from_config(cfg)?;
    let allow = resolver.allow_list();
    let width = allow.iter().map(str::len).max().unwrap_or(0);
    for t in allow.iter() {
        let location = resolver.location(t)?;
        println!("  {:<width$}  {}", t, location, width = width);
    }
    Ok(())
}
