//! Plain-text cache of the last applied IP.

use crate::error::{DdnsError, Result};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

/// File holding the last IP that was successfully pushed to the provider.
#[derive(Debug, Clone)]
pub struct IpCache {
    path: Option<PathBuf>,
}

impl IpCache {
    /// `None` disables caching: reads return an empty string and writes are
    /// dropped.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Last cached IP, or an empty string when unknown.
    pub fn read(&self) -> Result<String> {
        let Some(path) = &self.path else {
            return Ok(String::new());
        };

        match std::fs::read_to_string(path) {
            Ok(content) => {
                let ip = content.trim_matches('\n').to_string();
                tracing::info!("IP cache found, old IP is {}", ip);
                Ok(ip)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("No cache file found at {}", path.display());
                Ok(String::new())
            }
            Err(source) => Err(DdnsError::CacheRead {
                path: path.clone(),
                source,
            }),
        }
    }

    /// Replace the cached IP. Written without a trailing newline.
    pub fn write(&self, ip: &str) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o644);
        }

        options
            .open(path)
            .and_then(|mut file| file.write_all(ip.as_bytes()))
            .map_err(|source| DdnsError::CacheWrite {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("Cached {} in {}", ip, path.display());
        Ok(())
    }
}
