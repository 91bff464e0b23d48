//! Namecheap DDNS provider.

use crate::error::{DdnsError, Result};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;

const DEFAULT_BASE_URL: &str = "https://dynamicdns.park-your-domain.com";

/// Namecheap DDNS provider.
pub struct NamecheapProvider {
    client: reqwest::Client,
    base_url: String,
    domain: String,
    host: String,
    password: String,
}

impl NamecheapProvider {
    /// Create a new Namecheap provider.
    pub fn new(domain: String, host: String, password: String) -> Self {
        Self::with_base_url(domain, host, password, DEFAULT_BASE_URL.to_string())
    }

    /// Create a provider talking to a different endpoint (used by tests).
    pub fn with_base_url(domain: String, host: String, password: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            domain,
            host,
            password,
        }
    }

    pub fn full_domain(&self) -> String {
        if self.host == "@" {
            self.domain.clone()
        } else {
            format!("{}.{}", self.host, self.domain)
        }
    }

    /// Point the record at the caller's address.
    ///
    /// Namecheap takes the address from the request itself, so `ip` is only
    /// used for logging.
    pub async fn update(&self, ip: &str) -> Result<()> {
        let url = format!("{}/update", self.base_url.trim_end_matches('/'));
        tracing::info!("Updating {} to {}", self.full_domain(), ip);

        // The endpoint answers in XML whatever Accept says.
        let response = self
            .client
            .get(&url)
            .query(&[
                ("host", self.host.as_str()),
                ("domain", self.domain.as_str()),
                ("password", self.password.as_str()),
            ])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| DdnsError::UpdateTransport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DdnsError::UpdateStatus(status));
        }

        let text = response
            .text()
            .await
            .map_err(|e| DdnsError::UpdateTransport(e.to_string()))?;

        check_response(&text)
    }
}

/// Inspect the `<ErrCount>` of an update response.
pub(crate) fn check_response(body: &str) -> Result<()> {
    let doc = roxmltree::Document::parse(body)
        .map_err(|e| DdnsError::UpdateResponseParse(e.to_string()))?;

    let node_text = |name: &str| {
        doc.descendants()
            .find(|n| n.has_tag_name(name))
            .map(|n| n.text().unwrap_or_default().trim().to_string())
    };

    let err_count: i64 = node_text("ErrCount")
        .ok_or_else(|| DdnsError::UpdateResponseParse("missing ErrCount".to_string()))?
        .parse()
        .map_err(|_| {
            DdnsError::UpdateResponseParse("error count is not an integer".to_string())
        })?;

    if err_count > 0 {
        let message = node_text("Err1").unwrap_or_else(|| "unknown error".to_string());
        return Err(DdnsError::UpdateProvider(message));
    }

    Ok(())
}
