//! # ddns-updater
//!
//! Keeps a Namecheap dynamic DNS record pointed at the current public IP.
//!
//! Each run resolves the public IP through a list of echo services, compares
//! it with the last IP written to a local cache file, and only when it changed
//! asks Namecheap to update the record. Meant to be run from cron.
//!
//! ## Usage
//!
//! ```bash
//! ddns-updater -n vpn -d example.com -t "$NAMECHEAP_DDNS_PASSWORD"
//!
//! # Same thing, configured through the environment
//! DDNS_NAMECHEAP_HOST=vpn DDNS_NAMECHEAP_DOMAIN=example.com \
//!     DDNS_NAMECHEAP_TOKEN=... ddns-updater -v
//! ```

pub mod cache;
pub mod config;
pub mod detector;
pub mod error;
pub mod providers;
pub mod updater;

pub use cache::IpCache;
pub use config::{Config, ConfigLayer};
pub use detector::IpDetector;
pub use error::{DdnsError, Result};
pub use updater::{RunOutcome, Updater};
