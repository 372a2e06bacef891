//! HTTP HEAD existence probing.
//!
//! Uses the curl crate (libcurl) to ask the upstream file host whether an
//! archive is retrievable. Only the status code matters; no body is transferred.

mod classify;

pub use classify::{classify_curl_error, FailureKind, ProbeError};

use std::time::Duration;

use crate::config::ProbeConfig;

/// Status code returned by the upstream for a HEAD request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeStatus {
    pub code: u32,
}

impl ProbeStatus {
    /// Only a plain 200 counts as "the archive exists".
    pub fn is_found(self) -> bool {
        self.code == 200
    }
}

/// Existence check against the upstream.
///
/// Blocking; the resolver calls it from `spawn_blocking`.
pub trait ExistenceProbe: Send + Sync {
    fn probe(&self, url: &str) -> Result<ProbeStatus, ProbeError>;
}

/// libcurl-backed HEAD probe with bounded connect and total timeouts.
#[derive(Debug, Clone)]
pub struct CurlProbe {
    connect_timeout: Duration,
    timeout: Duration,
    user_agent: String,
}

impl CurlProbe {
    pub fn new(cfg: &ProbeConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
            user_agent: cfg.user_agent.clone(),
        }
    }

    /// Overrides both timeouts; mainly for tests that need sub-second limits.
    pub fn with_timeouts(mut self, connect: Duration, total: Duration) -> Self {
        self.connect_timeout = connect;
        self.timeout = total;
        self
    }
}

impl ExistenceProbe for CurlProbe {
    fn probe(&self, url: &str) -> Result<ProbeStatus, ProbeError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.nobody(true)?; // HEAD request
        // Runs on a shared thread pool: no SIGALRM-based DNS timeouts.
        easy.signal(false)?;
        easy.follow_location(false)?;
        easy.useragent(&self.user_agent)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;
        easy.perform()?;

        let code = easy.response_code()?;
        if code == 0 {
            return Err(ProbeError::new(
                FailureKind::Other,
                "no HTTP status in upstream response",
            ));
        }
        Ok(ProbeStatus { code })
    }
}
