//! Upstream URL modeling.
//!
//! Builds archive URLs of the form
//! `<base>/<owner>/<repo>/<branch…>/<subfolder…>/<type>.<ext>` with every
//! component pushed as a percent-encoded path segment.

mod segment;

pub use segment::{split_path, validate_segment, SegmentError};

use std::fmt;
use url::Url;

use crate::config::GatewayConfig;

/// A constructed archive URL for one dialog type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamLocation {
    pub dialog_type: String,
    pub url: Url,
}

impl UpstreamLocation {
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for UpstreamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// Error building the URL template from configuration.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("invalid upstream base URL: {0}")]
    Base(#[from] url::ParseError),
    #[error("upstream base URL cannot carry a path: {0}")]
    NotABase(String),
    #[error(transparent)]
    Segment(#[from] SegmentError),
}

/// Fixed part of every archive URL, derived once from configuration.
#[derive(Debug, Clone)]
pub struct UpstreamTemplate {
    base: Url,
    prefix: Vec<String>,
    extension: String,
}

impl UpstreamTemplate {
    pub fn from_config(cfg: &GatewayConfig) -> Result<Self, TemplateError> {
        let base = Url::parse(&cfg.upstream_base)?;
        if base.cannot_be_a_base() {
            return Err(TemplateError::NotABase(cfg.upstream_base.clone()));
        }

        validate_segment(&cfg.owner)?;
        validate_segment(&cfg.repo)?;
        validate_segment(&cfg.archive_extension)?;

        let mut prefix = vec![cfg.owner.clone(), cfg.repo.clone()];
        prefix.extend(split_path(&cfg.branch)?);
        if let Some(sub) = &cfg.subfolder {
            prefix.extend(split_path(sub)?);
        }

        Ok(Self {
            base,
            prefix,
            extension: cfg.archive_extension.clone(),
        })
    }

    /// Builds the archive URL for `dialog_type`.
    ///
    /// Deterministic: the same template and identifier always give the same URL.
    pub fn build(&self, dialog_type: &str) -> Result<UpstreamLocation, SegmentError> {
        validate_segment(dialog_type)?;
        let file_name = format!("{}.{}", dialog_type, self.extension);

        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(self.prefix.iter())
                .push(&file_name);
        }

        Ok(UpstreamLocation {
            dialog_type: dialog_type.to_string(),
            url,
        })
    }
}
