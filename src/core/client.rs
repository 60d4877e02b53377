//! Async Apertium client: transport plus typed response retrieval

use std::sync::Arc;
use std::time::Duration;
use reqwest::header::{ACCEPT_CHARSET, CONTENT_TYPE, REFERER};
use reqwest::StatusCode;
use tracing::{debug, warn};
use url::Url;

use crate::core::config::ClientConfig;
use crate::core::decode;
use crate::core::errors::{Result, TranslatorError};
use crate::core::models::LanguagePair;
use crate::core::params::build_query_url;
use crate::core::text::join_lines;

/// Charset announced and expected on every request
const ENCODING: &str = "UTF-8";

/// Client for the Apertium JSON API.
///
/// Every call opens its own connection, waits for the whole body and never
/// retries.
#[derive(Debug, Clone)]
pub struct ApertiumClient {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl ApertiumClient {
    /// Create a new client. The credential is checked per request, not here.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().pool_max_idle_per_host(0);
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|source| TranslatorError::TransportError { source })?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// GET `url` and return the normalized body.
    ///
    /// The body is read before the status is checked so a non-200 error
    /// carries the service's own message.
    pub async fn fetch(&self, url: Url) -> Result<String> {
        debug!("GET {}{}", url.host_str().unwrap_or_default(), url.path());

        let mut request = self
            .client
            .get(url)
            .header(CONTENT_TYPE, format!("text/plain; charset={}", ENCODING))
            .header(ACCEPT_CHARSET, ENCODING);
        if let Some(referrer) = &self.config.referrer {
            request = request.header(REFERER, referrer);
        }

        let response = request
            .send()
            .await
            .map_err(|source| TranslatorError::TransportError { source })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| TranslatorError::ReadError { source })?;
        let body = join_lines(&String::from_utf8_lossy(&bytes));

        if status != StatusCode::OK {
            warn!("Apertium API returned {}: {}", status, body);
            return Err(TranslatorError::ServiceError {
                status: status.as_u16(),
                message: body,
            });
        }

        debug!("Received {} bytes", body.len());
        Ok(body)
    }

    /// Fetch a response whose top level is a JSON string
    pub async fn retrieve_string(&self, url: Url) -> Result<String> {
        self.config.validate()?;
        let response = self.fetch(url).await?;
        decode::as_string(&response)
    }

    /// Fetch a JSON array of strings, or of objects holding `key`
    pub async fn retrieve_string_array(
        &self,
        url: Url,
        key: Option<&str>,
    ) -> Result<Vec<Option<String>>> {
        self.config.validate()?;
        let response = self.fetch(url).await?;
        decode::as_string_array(&response, key)
    }

    /// Fetch an object whose `key` holds embedded JSON, and read `sub_key` from it
    pub async fn retrieve_sub_obj_string(
        &self,
        url: Url,
        key: &str,
        sub_key: &str,
    ) -> Result<String> {
        self.config.validate()?;
        let response = self.fetch(url).await?;
        decode::as_nested_string(&response, key, sub_key)
    }

    /// Fetch a JSON array of integers
    pub async fn retrieve_int_array(&self, url: Url) -> Result<Vec<i32>> {
        self.config.validate()?;
        let response = self.fetch(url).await?;
        decode::as_int_array(&response)
    }

    /// Translate `text` with the service's translate endpoint
    pub async fn translate(&self, text: &str, pair: &LanguagePair) -> Result<String> {
        self.config.validate()?;
        let api_key = self.config.api_key.as_deref().unwrap_or_default();
        let url = build_query_url(&self.config.api_endpoint, api_key, pair, text)?;

        debug!("Translating {} characters ({})", text.chars().count(), pair);
        self.retrieve_sub_obj_string(url, "responseData", "translatedText")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::routing::get;
    use axum::Router;
    use serde_json::json;
    use std::collections::HashMap;

    const KEY: &str = "abcdefghijklmnopqrstuvwxyz0";

    async fn echo_referer(headers: HeaderMap) -> String {
        let referer = headers
            .get("referer")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("none");
        json!(referer).to_string()
    }

    async fn echo_content_type(headers: HeaderMap) -> String {
        let content_type = headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("none");
        json!(content_type).to_string()
    }

    async fn echo_accept_charset(headers: HeaderMap) -> String {
        let accept_charset = headers
            .get("accept-charset")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("none");
        json!(accept_charset).to_string()
    }

    async fn translate(Query(params): Query<HashMap<String, String>>) -> String {
        let text = format!("{}:{}:{}", params["key"].len(), params["langpair"], params["q"]);
        json!({
            "responseData": { "translatedText": text },
            "responseDetails": null,
            "responseStatus": 200
        })
        .to_string()
    }

    /// Local stand-in for the Apertium API
    async fn spawn_upstream() -> String {
        let router = Router::new()
            .route("/hello", get(|| async { "\u{FEFF}\"Hello\"" }))
            .route(
                "/forbidden",
                get(|| async { (AxumStatus::FORBIDDEN, r#"{"error":"bad key"}"#) }),
            )
            .route("/ints", get(|| async { "[1,\n2,\r\n3]\n" }))
            .route(
                "/pairs",
                get(|| async { r#"[{"t":"x"},{"u":"y"}]"# }),
            )
            .route(
                "/nested",
                get(|| async { r#"{"data":"{\"text\":\"hola\"}"}"# }),
            )
            .route("/referer", get(echo_referer))
            .route("/content-type", get(echo_content_type))
            .route("/accept-charset", get(echo_accept_charset))
            .route("/json/translate", get(translate));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client(config: ClientConfig) -> ApertiumClient {
        ApertiumClient::new(config).unwrap()
    }

    fn url(base: &str, path: &str) -> Url {
        Url::parse(&format!("{}{}", base, path)).unwrap()
    }

    #[tokio::test]
    async fn test_retrieve_string_strips_marker() {
        let base = spawn_upstream().await;
        let client = client(ClientConfig::default().with_api_key(KEY));

        let result = client.retrieve_string(url(&base, "/hello")).await.unwrap();
        assert_eq!(result, "Hello");
    }

    #[tokio::test]
    async fn test_non_200_is_service_error_with_body() {
        let base = spawn_upstream().await;
        let client = client(ClientConfig::default().with_api_key(KEY));

        match client.retrieve_string(url(&base, "/forbidden")).await {
            Err(err @ TranslatorError::ServiceError { .. }) => {
                assert!(err.to_string().contains("bad key"));
                if let TranslatorError::ServiceError { status, message } = err {
                    assert_eq!(status, 403);
                    assert_eq!(message, r#"{"error":"bad key"}"#);
                }
            }
            other => panic!("expected ServiceError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_retrieve_int_array_joins_lines() {
        let base = spawn_upstream().await;
        let client = client(ClientConfig::default().with_api_key(KEY));

        let result = client.retrieve_int_array(url(&base, "/ints")).await.unwrap();
        assert_eq!(result, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_retrieve_string_array_with_key() {
        let base = spawn_upstream().await;
        let client = client(ClientConfig::default().with_api_key(KEY));

        let result = client
            .retrieve_string_array(url(&base, "/pairs"), Some("t"))
            .await
            .unwrap();
        assert_eq!(result, vec![Some("x".to_string()), None]);
    }

    #[tokio::test]
    async fn test_retrieve_sub_obj_string() {
        let base = spawn_upstream().await;
        let client = client(ClientConfig::default().with_api_key(KEY));

        let result = client
            .retrieve_sub_obj_string(url(&base, "/nested"), "data", "text")
            .await
            .unwrap();
        assert_eq!(result, "hola");
    }

    #[tokio::test]
    async fn test_wrong_shape_is_malformed() {
        let base = spawn_upstream().await;
        let client = client(ClientConfig::default().with_api_key(KEY));

        let result = client.retrieve_int_array(url(&base, "/hello")).await;
        assert!(matches!(result, Err(TranslatorError::MalformedResponse { .. })));
    }

    #[tokio::test]
    async fn test_headers_sent() {
        let base = spawn_upstream().await;

        let plain = client(ClientConfig::default().with_api_key(KEY));
        assert_eq!(plain.retrieve_string(url(&base, "/referer")).await.unwrap(), "none");
        assert_eq!(
            plain.retrieve_string(url(&base, "/content-type")).await.unwrap(),
            "text/plain; charset=UTF-8"
        );
        assert_eq!(
            plain.retrieve_string(url(&base, "/accept-charset")).await.unwrap(),
            "UTF-8"
        );

        let with_referrer = client(
            ClientConfig::default()
                .with_api_key(KEY)
                .with_referrer("https://example.org/app"),
        );
        assert_eq!(
            with_referrer
                .retrieve_string(url(&base, "/referer"))
                .await
                .unwrap(),
            "https://example.org/app"
        );
    }

    #[tokio::test]
    async fn test_invalid_key_fails_before_request() {
        // nothing listens on this address; validation must fail first
        let client = client(ClientConfig::default().with_api_key("short"));
        let result = client
            .retrieve_string(Url::parse("http://127.0.0.1:9/unused").unwrap())
            .await;
        assert!(matches!(result, Err(TranslatorError::ConfigError { .. })));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client(ClientConfig::default().with_api_key(KEY));
        let result = client
            .fetch(Url::parse(&format!("http://{}/", addr)).unwrap())
            .await;
        assert!(matches!(result, Err(TranslatorError::TransportError { .. })));
    }

    #[tokio::test]
    async fn test_truncated_body_is_read_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        // promises 100 bytes, sends 4, then hangs up
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n\"Hel")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let client = client(ClientConfig::default().with_api_key(KEY));
        let result = client
            .retrieve_string(Url::parse(&format!("http://{}/", addr)).unwrap())
            .await;
        match result {
            Err(err @ TranslatorError::ReadError { .. }) => {
                assert_eq!(err.to_string(), "[apertium-translator] Error reading translation stream");
                assert!(std::error::Error::source(&err).is_some());
            }
            other => panic!("expected ReadError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_translate_builds_query() {
        let base = spawn_upstream().await;
        let client = client(
            ClientConfig::default()
                .with_api_key(KEY)
                .with_endpoint(format!("{}/json/translate", base)),
        );

        let result = client
            .translate("hello world", &LanguagePair::new("en", "es"))
            .await
            .unwrap();
        assert_eq!(result, format!("{}:en|es:hello world", KEY.len()));
    }
}
