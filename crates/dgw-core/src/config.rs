use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::url_model::{split_path, validate_segment};

/// Existence probe parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Seconds allowed for the TCP/TLS connect phase.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Upper bound in seconds for the whole HEAD request.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// `User-Agent` sent with the probe.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("dgw/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Global configuration loaded from `~/.config/dgw/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Account owning the template repository.
    pub owner: String,
    /// Repository holding the archives.
    pub repo: String,
    /// Branch (or tag) archives are served from. May contain `/`.
    pub branch: String,
    /// Optional folder inside the repository, e.g. `dialogs/v2`.
    #[serde(default)]
    pub subfolder: Option<String>,
    /// Accepted dialog type identifiers; each maps to `<type>.<archive_extension>`.
    pub dialog_types: Vec<String>,
    /// Port the HTTP listener binds to.
    pub port: u16,
    /// Address the HTTP listener binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Static file host base URL.
    #[serde(default = "default_upstream_base")]
    pub upstream_base: String,
    /// Archive file extension, without the dot.
    #[serde(default = "default_archive_extension")]
    pub archive_extension: String,
    /// Optional probe settings; if missing, built-in defaults are used.
    #[serde(default)]
    pub probe: Option<ProbeConfig>,
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_upstream_base() -> String {
    "https://raw.githubusercontent.com".to_string()
}

fn default_archive_extension() -> String {
    "zip".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            owner: "aizalovv".to_string(),
            repo: "dialog-templates".to_string(),
            branch: "main".to_string(),
            subfolder: None,
            dialog_types: vec![
                "simpleDialog".to_string(),
                "iosDialog".to_string(),
                "customDialog".to_string(),
            ],
            port: 5000,
            bind_addr: default_bind_addr(),
            upstream_base: default_upstream_base(),
            archive_extension: default_archive_extension(),
            probe: None,
        }
    }
}

impl GatewayConfig {
    /// Probe settings with defaults filled in.
    pub fn probe_config(&self) -> ProbeConfig {
        self.probe.clone().unwrap_or_default()
    }

    /// Applies `GITHUB_USERNAME`, `GITHUB_REPO`, `GITHUB_BRANCH`,
    /// `GITHUB_SUBFOLDER` and `PORT` from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Same as [`apply_env_overrides`](Self::apply_env_overrides) with an injectable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = non_empty("GITHUB_USERNAME") {
            self.owner = v;
        }
        if let Some(v) = non_empty("GITHUB_REPO") {
            self.repo = v;
        }
        if let Some(v) = non_empty("GITHUB_BRANCH") {
            self.branch = v;
        }
        if let Some(v) = non_empty("GITHUB_SUBFOLDER") {
            self.subfolder = Some(v);
        }
        if let Some(v) = non_empty("PORT") {
            self.port = v
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {}", v))?;
        }
        Ok(())
    }

    /// Checks that every value can be turned into a safe upstream URL.
    pub fn validate(&self) -> Result<()> {
        validate_segment(&self.owner).context("invalid owner")?;
        validate_segment(&self.repo).context("invalid repo")?;
        split_path(&self.branch).context("invalid branch")?;
        if let Some(sub) = &self.subfolder {
            split_path(sub).context("invalid subfolder")?;
        }
        validate_segment(&self.archive_extension).context("invalid archive_extension")?;

        if self.dialog_types.is_empty() {
            bail!("dialog_types must list at least one type");
        }
        let mut seen = HashSet::new();
        for t in &self.dialog_types {
            validate_segment(t).with_context(|| format!("invalid dialog type {:?}", t))?;
            if !seen.insert(t.as_str()) {
                bail!("duplicate dialog type {:?}", t);
            }
        }

        let base = url::Url::parse(&self.upstream_base)
            .with_context(|| format!("invalid upstream_base {:?}", self.upstream_base))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            bail!("upstream_base must be an http(s) URL: {}", self.upstream_base);
        }

        let probe = self.probe_config();
        if probe.connect_timeout_secs == 0 || probe.timeout_secs == 0 {
            bail!("probe timeouts must be greater than zero");
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dgw")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GatewayConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = GatewayConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<GatewayConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: GatewayConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}

/// Full startup sequence: file (explicit or XDG default), env overrides, validation.
pub fn load_effective(path: Option<&Path>) -> Result<GatewayConfig> {
    let mut cfg = match path {
        Some(p) => load_from(p)?,
        None => load_or_init()?,
    };
    cfg.apply_env_overrides()?;
    cfg.validate()?;
    Ok(cfg)
}
