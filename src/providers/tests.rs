//! Provider tests with HTTP mocking.

mod namecheap_tests {
    use crate::error::DdnsError;
    use crate::providers::namecheap::check_response;
    use crate::providers::NamecheapProvider;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(base_url: String, password: &str) -> NamecheapProvider {
        NamecheapProvider::with_base_url(
            "example.com".to_string(),
            "vpn".to_string(),
            password.to_string(),
            base_url,
        )
    }

    #[tokio::test]
    async fn test_namecheap_update_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/update"))
            .and(query_param("host", "vpn"))
            .and(query_param("domain", "example.com"))
            .and(query_param("password", "secret123"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<?xml version="1.0"?>
                <interface-response>
                    <Command>SETDNSHOST</Command>
                    <IP>1.2.3.4</IP>
                    <ErrCount>0</ErrCount>
                    <Done>true</Done>
                </interface-response>"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        provider(mock_server.uri(), "secret123")
            .update("1.2.3.4")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_namecheap_provider_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/update"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<Response><ErrCount>1</ErrCount><Err1>Invalid token</Err1></Response>",
            ))
            .mount(&mock_server)
            .await;

        let err = provider(mock_server.uri(), "wrong")
            .update("1.2.3.4")
            .await
            .unwrap_err();

        assert!(matches!(err, DdnsError::UpdateProvider(ref m) if m == "Invalid token"));
        assert!(err.to_string().contains("Invalid token"));
    }

    #[tokio::test]
    async fn test_namecheap_non_200() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/update"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&mock_server)
            .await;

        let err = provider(mock_server.uri(), "secret")
            .update("1.2.3.4")
            .await
            .unwrap_err();

        match err {
            DdnsError::UpdateStatus(status) => assert_eq!(status.as_u16(), 502),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_namecheap_html_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/update"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>oops"))
            .mount(&mock_server)
            .await;

        let err = provider(mock_server.uri(), "secret")
            .update("1.2.3.4")
            .await
            .unwrap_err();

        assert!(matches!(err, DdnsError::UpdateResponseParse(_)));
    }

    #[tokio::test]
    async fn test_namecheap_unreachable() {
        let err = provider("http://127.0.0.1:1".to_string(), "secret")
            .update("1.2.3.4")
            .await
            .unwrap_err();

        assert!(matches!(err, DdnsError::UpdateTransport(_)));
    }

    #[test]
    fn test_missing_err_count() {
        let result = check_response("<Response><Done>true</Done></Response>");
        assert!(matches!(result, Err(DdnsError::UpdateResponseParse(_))));
    }

    #[test]
    fn test_non_numeric_err_count() {
        let result = check_response("<Response><ErrCount>many</ErrCount></Response>");
        assert!(matches!(result, Err(DdnsError::UpdateResponseParse(_))));
    }

    #[test]
    fn test_error_without_message() {
        let result = check_response("<Response><ErrCount>2</ErrCount></Response>");
        assert!(matches!(result, Err(DdnsError::UpdateProvider(ref m)) if m == "unknown error"));
    }

    #[test]
    fn test_zero_err_count() {
        assert!(check_response("<Response><ErrCount> 0 </ErrCount></Response>").is_ok());
    }

    #[test]
    fn test_namecheap_root_domain() {
        let provider = NamecheapProvider::new(
            "example.com".to_string(),
            "@".to_string(),
            "secret".to_string(),
        );
        assert_eq!(provider.full_domain(), "example.com");
    }

    #[test]
    fn test_namecheap_subdomain() {
        let provider = NamecheapProvider::new(
            "example.com".to_string(),
            "vpn".to_string(),
            "secret".to_string(),
        );
        assert_eq!(provider.full_domain(), "vpn.example.com");
    }
}
