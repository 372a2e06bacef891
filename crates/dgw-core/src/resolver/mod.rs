//! Redirect resolver: dialog type in, verified upstream location out.
//!
//! Validation against the allow-list, URL lookup in the startup-built
//! [`LocationTable`], then a HEAD probe so clients are never redirected to a
//! missing archive.

mod table;

pub use table::LocationTable;

use anyhow::{Context, Result};
use std::sync::Arc;
use thiserror::Error;

use crate::allow_list::AllowList;
use crate::config::GatewayConfig;
use crate::probe::{CurlProbe, ExistenceProbe, ProbeError};
use crate::url_model::{UpstreamLocation, UpstreamTemplate};

/// Why a dialog type could not be resolved to a verified location.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Identifier is not on the allow-list.
    #[error("invalid dialog type {dialog_type:?}")]
    InvalidType { dialog_type: String },
    /// Upstream answered, but not with 200.
    #[error("archive not found upstream: {url} returned HTTP {status}")]
    UpstreamMissing { url: String, status: u32 },
    /// No status could be obtained from the upstream (network error, timeout).
    #[error("upstream unreachable for {url}")]
    UpstreamUnreachable {
        url: String,
        #[source]
        source: ProbeError,
    },
    /// Fault inside the gateway itself; never exposed to clients in detail.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Resolves dialog types. Cheap to share behind an `Arc`; all state is read-only.
pub struct Resolver {
    allow_list: AllowList,
    table: LocationTable,
    probe: Arc<dyn ExistenceProbe>,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("allow_list", &self.allow_list)
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl Resolver {
    pub fn new(allow_list: AllowList, table: LocationTable, probe: Arc<dyn ExistenceProbe>) -> Self {
        Self {
            allow_list,
            table,
            probe,
        }
    }

    /// Builds allow-list, template and table from configuration with the given probe.
    pub fn with_probe(cfg: &GatewayConfig, probe: Arc<dyn ExistenceProbe>) -> Result<Self> {
        let allow_list =
            AllowList::new(cfg.dialog_types.iter().cloned()).context("invalid dialog_types")?;
        let template = UpstreamTemplate::from_config(cfg).context("invalid upstream settings")?;
        let table = LocationTable::build(&template, &allow_list)
            .context("building upstream location table")?;
        tracing::debug!(types = table.len(), "upstream location table built");
        Ok(Self::new(allow_list, table, probe))
    }

    /// Production resolver backed by [`CurlProbe`].
    pub fn from_config(cfg: &GatewayConfig) -> Result<Self> {
        let probe = CurlProbe::new(&cfg.probe_config());
        Self::with_probe(cfg, Arc::new(probe))
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// Validates `dialog_type` and returns its constructed URL without probing.
    pub fn location(&self, dialog_type: &str) -> Result<&UpstreamLocation, ResolveError> {
        if !self.allow_list.contains(dialog_type) {
            return Err(ResolveError::InvalidType {
                dialog_type: dialog_type.to_string(),
            });
        }
        self.table.get(dialog_type).ok_or_else(|| {
            ResolveError::Internal(format!("no upstream location for allowed type {}", dialog_type))
        })
    }

    /// Full resolution: validate, look up, probe.
    pub async fn resolve(&self, dialog_type: &str) -> Result<UpstreamLocation, ResolveError> {
        let location = match self.location(dialog_type) {
            Ok(loc) => loc.clone(),
            Err(e) => {
                tracing::debug!(dialog_type, "rejected: {}", e);
                return Err(e);
            }
        };

        let probe = Arc::clone(&self.probe);
        let url = location.as_str().to_string();
        let outcome = tokio::task::spawn_blocking(move || probe.probe(&url))
            .await
            .map_err(|e| ResolveError::Internal(format!("probe task failed: {}", e)))?;

        match outcome {
            Ok(status) if status.is_found() => {
                tracing::debug!(dialog_type, url = %location, "upstream archive verified");
                Ok(location)
            }
            Ok(status) => {
                tracing::warn!(
                    dialog_type,
                    url = %location,
                    status = status.code,
                    "upstream archive missing"
                );
                Err(ResolveError::UpstreamMissing {
                    url: location.to_string(),
                    status: status.code,
                })
            }
            Err(e) => {
                tracing::error!(
                    dialog_type,
                    url = %location,
                    kind = e.kind.as_str(),
                    "upstream connection error: {}",
                    e.message
                );
                Err(ResolveError::UpstreamUnreachable {
                    url: location.to_string(),
                    source: e,
                })
            }
        }
    }
}
