//! One update run: read cache, resolve, update, write cache.

use crate::cache::IpCache;
use crate::config::Config;
use crate::detector::IpDetector;
use crate::error::Result;
use crate::providers::NamecheapProvider;

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The resolved IP matched the cache; nothing was sent.
    Unchanged { ip: String },
    /// The provider accepted the new IP.
    Updated {
        previous: Option<String>,
        current: String,
    },
}

/// Sequences the cache, the detector and the provider.
pub struct Updater {
    detector: IpDetector,
    provider: NamecheapProvider,
    cache: IpCache,
}

impl Updater {
    pub fn new(detector: IpDetector, provider: NamecheapProvider, cache: IpCache) -> Self {
        Self {
            detector,
            provider,
            cache,
        }
    }

    /// Validate the configuration and build the components from it.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let detector = IpDetector::new(config.ip_resolvers.clone())?;
        let provider = NamecheapProvider::new(
            config.domain.clone(),
            config.host.clone(),
            config.token.clone(),
        );
        let cache = IpCache::new(config.cache_file.clone());

        Ok(Self::new(detector, provider, cache))
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        let previous = self.cache.read()?;
        let current = self.detector.resolve().await?;

        if previous == current {
            tracing::debug!("Cached IP {} is current", current);
            return Ok(RunOutcome::Unchanged { ip: current });
        }

        self.provider.update(&current).await?;
        self.cache.write(&current)?;

        Ok(RunOutcome::Updated {
            previous: (!previous.is_empty()).then_some(previous),
            current,
        })
    }
}
