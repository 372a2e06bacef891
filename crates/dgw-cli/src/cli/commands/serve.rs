//! `dgw serve` – run the HTTP gateway.

use anyhow::Result;
use dgw_core::config::GatewayConfig;
use dgw_core::resolver::Resolver;
use dgw_core::server;
use std::sync::Arc;

/// Command-line values that win over file and environment.
#[derive(Debug, Default)]
pub struct ServeOverrides {
    pub port: Option<u16>,
    pub bind: Option<String>,
}

impl ServeOverrides {
    pub fn apply(self, cfg: &mut GatewayConfig) {
        if let Some(port) = self.port {
            cfg.port = port;
        }
        if let Some(bind) = self.bind {
            cfg.bind_addr = bind;
        }
    }
}

pub async fn run_serve(mut cfg: GatewayConfig, overrides: ServeOverrides) -> Result<()> {
    overrides.apply(&mut cfg);
    let resolver = Arc::new(Resolver::from_config(&cfg)?);
    tracing::info!(
        owner = %cfg.owner,
        repo = %cfg.repo,
        branch = %cfg.branch,
        types = resolver.allow_list().len(),
        "starting gateway"
    );
    server::serve(&cfg, resolver).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_config_values() {
        let mut cfg = GatewayConfig::default();
        ServeOverrides {
            port: Some(8081),
            bind: Some("127.0.0.1".to_string()),
        }
        .apply(&mut cfg);
        assert_eq!(cfg.port, 8081);
        assert_eq!(cfg.bind_addr, "127.0.0.1");
    }

    #[test]
    fn empty_overrides_keep_config() {
        let mut cfg = GatewayConfig::default();
        ServeOverrides::default().apply(&mut cfg);
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.bind_addr, "0.0.0.0");
    }
}
