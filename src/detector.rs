//! Public IP detection.

use crate::error::{DdnsError, Result};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves the public IP by asking echo services in order.
pub struct IpDetector {
    client: reqwest::Client,
    services: Vec<String>,
}

impl IpDetector {
    /// Create a detector over the given services, tried in order.
    pub fn new(services: Vec<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { client, services })
    }

    /// Return the body of the first service that answers, trimmed.
    ///
    /// Failing services are logged and skipped; nothing after the first
    /// success is contacted. A successful but blank answer ends the scan
    /// with `ResolutionExhausted`.
    pub async fn resolve(&self) -> Result<String> {
        for service in &self.services {
            match self.try_service(service).await {
                Ok(ip) if ip.is_empty() => {
                    tracing::warn!("Service {} returned an empty body", service);
                    break;
                }
                Ok(ip) => {
                    tracing::info!("Successfully resolved current IP: {}", ip);
                    return Ok(ip);
                }
                Err(e) => {
                    tracing::warn!("Service {} failed: {}", service, e);
                }
            }
        }

        Err(DdnsError::ResolutionExhausted)
    }

    /// Try a single IP echo service.
    async fn try_service(&self, url: &str) -> std::result::Result<String, String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("failed to make request to get IP: {}", e))?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(format!(
                "non 200 status code returned when resolving public IP: {}",
                response.status()
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| format!("failed to read response body: {}", e))?;

        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_custom_services() {
        let detector = IpDetector::new(vec!["https://example.com".to_string()]).unwrap();
        assert_eq!(detector.services.len(), 1);
    }

    #[tokio::test]
    async fn test_skips_failing_services() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/one"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/two"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/three"))
            .respond_with(ResponseTemplate::new(200).set_body_string("9.9.9.9\n"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let detector = IpDetector::new(vec![
            format!("{}/one", mock_server.uri()),
            format!("{}/two", mock_server.uri()),
            format!("{}/three", mock_server.uri()),
        ])
        .unwrap();

        assert_eq!(detector.resolve().await.unwrap(), "9.9.9.9");
    }

    #[tokio::test]
    async fn test_stops_after_first_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/first"))
            .respond_with(ResponseTemplate::new(200).set_body_string("  1.2.3.4  \n"))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/second"))
            .respond_with(ResponseTemplate::new(200).set_body_string("5.6.7.8"))
            .expect(0)
            .mount(&mock_server)
            .await;

        let detector = IpDetector::new(vec![
            format!("{}/first", mock_server.uri()),
            format!("{}/second", mock_server.uri()),
        ])
        .unwrap();

        assert_eq!(detector.resolve().await.unwrap(), "1.2.3.4");
    }

    #[tokio::test]
    async fn test_empty_body_ends_scan() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/blank"))
            .respond_with(ResponseTemplate::new(200).set_body_string("\n"))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_string("9.9.9.9"))
            .expect(0)
            .mount(&mock_server)
            .await;

        let detector = IpDetector::new(vec![
            format!("{}/blank", mock_server.uri()),
            format!("{}/ok", mock_server.uri()),
        ])
        .unwrap();

        assert!(matches!(
            detector.resolve().await,
            Err(DdnsError::ResolutionExhausted)
        ));
    }

    #[tokio::test]
    async fn test_all_services_failing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let detector = IpDetector::new(vec![
            format!("{}/a", mock_server.uri()),
            "http://127.0.0.1:1/unreachable".to_string(),
        ])
        .unwrap();

        assert!(matches!(
            detector.resolve().await,
            Err(DdnsError::ResolutionExhausted)
        ));
    }

    #[tokio::test]
    async fn test_no_services() {
        let detector = IpDetector::new(Vec::new()).unwrap();
        assert!(matches!(
            detector.resolve().await,
            Err(DdnsError::ResolutionExhausted)
        ));
    }
}
