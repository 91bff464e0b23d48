//! Configuration management for ddns-updater.
//!
//! Settings are assembled from layers, lowest precedence first: built-in
//! defaults, the YAML config file, `DDNS_*` environment variables and finally
//! command-line flags.

use crate::error::{DdnsError, Result};
use serde::Deserialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Base name of the config file searched for when `--config` is not given.
pub const CONFIG_BASE_NAME: &str = ".ddns-updater";

/// Prefix of the environment variables that override file settings.
pub const ENV_PREFIX: &str = "DDNS_";

/// Cache file used when nothing else is configured.
pub const DEFAULT_CACHE_FILE: &str = "ip-cache";

const CONFIG_EXTENSIONS: [&str; 3] = ["yaml", "yml", ""];

fn default_ip_resolvers() -> Vec<String> {
    vec![
        "http://icanhazip.com".to_string(),
        "http://checkip.amazonaws.com".to_string(),
    ]
}

/// Fully resolved configuration for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// DDNS host (subdomain, `@` for the apex).
    pub host: String,
    /// DDNS domain.
    pub domain: String,
    /// Dynamic DNS password issued by Namecheap.
    pub token: String,
    /// IP echo endpoints, tried in order.
    pub ip_resolvers: Vec<String>,
    /// Where the last applied IP is kept; `None` disables caching.
    pub cache_file: Option<PathBuf>,
    /// Print configuration and progress.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::from(ConfigLayer::default())
    }
}

impl From<ConfigLayer> for Config {
    fn from(layer: ConfigLayer) -> Self {
        let cache_file = layer
            .cache_file
            .unwrap_or_else(|| DEFAULT_CACHE_FILE.to_string());

        Self {
            host: layer.host.unwrap_or_default(),
            domain: layer.domain.unwrap_or_default(),
            token: layer.token.unwrap_or_default(),
            ip_resolvers: layer.ip_resolvers.unwrap_or_else(default_ip_resolvers),
            cache_file: (!cache_file.is_empty()).then(|| PathBuf::from(cache_file)),
            verbose: layer.verbose.unwrap_or(false),
        }
    }
}

impl Config {
    /// Load configuration from the config file, the process environment and
    /// the given command-line layer.
    pub fn load(explicit_path: Option<&Path>, cli: ConfigLayer) -> Result<Self> {
        let file = match explicit_path {
            Some(path) => Some(path.to_path_buf()),
            None => search_config_file(&config_search_dirs()),
        };

        let mut merged = ConfigLayer::default();
        if let Some(path) = file {
            tracing::debug!("Using config file {}", path.display());
            merged = merged.merge(ConfigLayer::from_file(&path)?);
        }

        Ok(Self::from(merged.merge(ConfigLayer::from_env()).merge(cli)))
    }

    /// Check that the Namecheap credentials are present.
    pub fn validate(&self) -> Result<()> {
        let required = [
            (&self.host, "host", "-n"),
            (&self.domain, "domain", "-d"),
            (&self.token, "token", "-t"),
        ];

        for (value, field, flag) in required {
            if value.is_empty() {
                return Err(DdnsError::MissingField { field, flag });
            }
        }
        Ok(())
    }

    /// Human readable dump of the resolved settings, token masked.
    pub fn summary(&self) -> String {
        let token = if self.token.is_empty() { "" } else { "********" };
        let cache_file = self
            .cache_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        let mut out = String::from("Config info:\n");
        let _ = writeln!(out, "  Namecheap domain: '{}'", self.domain);
        let _ = writeln!(out, "  Namecheap host: '{}'", self.host);
        let _ = writeln!(out, "  Namecheap token: '{}'", token);
        let _ = writeln!(out, "  Ip resolvers: '{}'", self.ip_resolvers.join(","));
        let _ = writeln!(out, "  Cache file: '{}'", cache_file);
        out
    }
}

/// A partial configuration coming from one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    pub host: Option<String>,
    pub domain: Option<String>,
    pub token: Option<String>,
    pub ip_resolvers: Option<Vec<String>>,
    /// An empty string disables caching.
    pub cache_file: Option<String>,
    pub verbose: Option<bool>,
}

impl ConfigLayer {
    /// Overlay `other` on top of `self`; set fields in `other` win.
    pub fn merge(self, other: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            host: other.host.or(self.host),
            domain: other.domain.or(self.domain),
            token: other.token.or(self.token),
            ip_resolvers: other.ip_resolvers.or(self.ip_resolvers),
            cache_file: other.cache_file.or(self.cache_file),
            verbose: other.verbose.or(self.verbose),
        }
    }

    /// Read a YAML config file. The file must exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DdnsError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse_yaml(&content)
            .map_err(|e| DdnsError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse the YAML config file format.
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(Self::parse_yaml(content)?)
    }

    fn parse_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let file: FileConfig = serde_yaml::from_str(content)?;
        Ok(Self {
            host: file.namecheap.host,
            domain: file.namecheap.domain,
            token: file.namecheap.token,
            ip_resolvers: file.ip_resolvers.map(StringList::into_vec),
            cache_file: file.cache_file,
            verbose: None,
        })
    }

    /// Layer built from the process environment.
    pub fn from_env() -> Self {
        Self::from_env_vars(std::env::vars())
    }

    /// Layer built from `DDNS_*` variables. Config keys map to variable
    /// names by upper-casing and replacing `.` with `_`, so `namecheap.host`
    /// is read from `DDNS_NAMECHEAP_HOST`. Empty values are ignored.
    pub fn from_env_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut layer = Self::default();

        for (key, value) in vars {
            let Some(key) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let value: String = value.into();
            if value.is_empty() {
                continue;
            }

            match key {
                "NAMECHEAP_HOST" => layer.host = Some(value),
                "NAMECHEAP_DOMAIN" => layer.domain = Some(value),
                "NAMECHEAP_TOKEN" => layer.token = Some(value),
                "IPRESOLVERS" => layer.ip_resolvers = Some(split_list(&value)),
                "CACHEFILE" => layer.cache_file = Some(value),
                _ => {}
            }
        }

        layer
    }
}

/// On-disk shape of the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileConfig {
    #[serde(default)]
    namecheap: NamecheapSection,
    #[serde(alias = "ipresolvers")]
    ip_resolvers: Option<StringList>,
    #[serde(alias = "cachefile")]
    cache_file: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct NamecheapSection {
    host: Option<String>,
    domain: Option<String>,
    token: Option<String>,
}

/// Either a YAML sequence or a single delimited string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringList {
    Many(Vec<String>),
    One(String),
}

impl StringList {
    fn into_vec(self) -> Vec<String> {
        match self {
            StringList::Many(items) => items,
            StringList::One(s) => split_list(&s),
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Directories searched for the config file, in order.
fn config_search_dirs() -> Vec<PathBuf> {
    dirs::home_dir()
        .into_iter()
        .chain(std::iter::once(PathBuf::from(".")))
        .collect()
}

/// Find `.ddns-updater.yaml`, `.ddns-updater.yml` or `.ddns-updater` in the
/// given directories. The first match wins.
pub fn search_config_file(dirs: &[PathBuf]) -> Option<PathBuf> {
    for dir in dirs {
        for ext in CONFIG_EXTENSIONS {
            let mut candidate = dir.join(CONFIG_BASE_NAME);
            if !ext.is_empty() {
                candidate.set_extension(ext);
            }
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}
