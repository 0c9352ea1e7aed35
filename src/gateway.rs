//! Threat lookup gateway for the Google Safe Browsing v4 API.
//!
//! Builds the `threatMatches:find` request, invokes the provider over
//! HTTPS inside the deadline wrapper, and maps the response to a
//! [`CheckResult`]. v4 is the stable, documented endpoint; there is no
//! retry policy beyond the single deadline.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::deadline::{with_deadline, DeadlineExceeded};
use crate::models::{
    CheckResult, ClientInfo, ThreatEntry, ThreatInfo, ThreatMatchRequest, ThreatMatchResponse,
};
use crate::normalize::NormalizedUrl;

const SAFE_BROWSING_ENDPOINT: &str = "https://safebrowsing.googleapis.com/v4/threatMatches:find";

const CLIENT_ID: &str = "reputation-api";
const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

const THREAT_TYPES: [&str; 4] = [
    "MALWARE",
    "SOCIAL_ENGINEERING",
    "UNWANTED_SOFTWARE",
    "POTENTIALLY_HARMFUL_APPLICATION",
];

/// Gateway error
#[derive(Error, Debug)]
pub enum GatewayError {
    /// No URL to check
    #[error("no URL to check")]
    EmptyUrl,

    /// Credential absent from configuration
    #[error("missing API key")]
    MissingApiKey,

    /// Transport failure talking to the provider
    #[error("network error: {0}")]
    Network(String),

    /// Provider answered with a non-2xx status
    #[error("provider returned HTTP {0}")]
    HttpStatus(u16),

    /// Provider body did not parse
    #[error("parse error: {0}")]
    Parse(String),

    /// Provider call exceeded the deadline
    #[error("provider call timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

/// Gateway to the threat-intelligence provider.
#[derive(Clone)]
pub struct SafeBrowsingGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    lookup_timeout: Duration,
}

impl SafeBrowsingGateway {
    /// Gateway against the production Safe Browsing endpoint.
    pub fn new(api_key: String, lookup_timeout: Duration) -> Self {
        Self::with_endpoint(SAFE_BROWSING_ENDPOINT.to_string(), api_key, lookup_timeout)
    }

    /// Gateway against an explicit endpoint. Used by tests to point at a
    /// mock provider.
    pub fn with_endpoint(endpoint: String, api_key: String, lookup_timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
            lookup_timeout,
        }
    }

    /// Look up a single normalized URL.
    ///
    /// Trusts the caller to have normalized the input; only an empty
    /// value is rejected here.
    pub async fn check_url(&self, url: &NormalizedUrl) -> Result<CheckResult, GatewayError> {
        if url.as_str().is_empty() {
            return Err(GatewayError::EmptyUrl);
        }
        if self.api_key.is_empty() {
            return Err(GatewayError::MissingApiKey);
        }

        let request = ThreatMatchRequest {
            client: ClientInfo {
                client_id: CLIENT_ID,
                client_version: CLIENT_VERSION,
            },
            threat_info: ThreatInfo {
                threat_types: THREAT_TYPES.to_vec(),
                platform_types: vec!["ANY_PLATFORM"],
                threat_entry_types: vec!["URL"],
                threat_entries: vec![ThreatEntry {
                    url: url.as_str().to_string(),
                }],
            },
        };

        info!(url = %url, "looking up URL with Safe Browsing");
        debug!(request = ?request, "provider request body");

        // The key rides in the query string only; error strings below go
        // through without_url() so it cannot leak into logs or responses.
        let call = async {
            let response = self
                .client
                .post(&self.endpoint)
                .query(&[("key", self.api_key.as_str())])
                .json(&request)
                .send()
                .await
                .map_err(|e| GatewayError::Network(e.without_url().to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(GatewayError::HttpStatus(status.as_u16()));
            }

            response
                .json::<ThreatMatchResponse>()
                .await
                .map_err(|e| GatewayError::Parse(e.without_url().to_string()))
        };

        let parsed = match with_deadline(self.lookup_timeout, call).await {
            Ok(result) => result?,
            Err(DeadlineExceeded(limit)) => {
                warn!(url = %url, timeout_ms = limit.as_millis() as u64, "provider call exceeded deadline");
                return Err(GatewayError::Timeout(limit));
            }
        };

        if parsed.matches.is_empty() {
            info!(url = %url, "no threat matches");
            Ok(CheckResult::safe())
        } else {
            info!(url = %url, matches = parsed.matches.len(), "threat matches reported");
            Ok(CheckResult::flagged(parsed.matches))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway(provider: &MockServer, timeout: Duration) -> SafeBrowsingGateway {
        SafeBrowsingGateway::with_endpoint(
            format!("{}/v4/threatMatches:find", provider.uri()),
            "test-key".into(),
            timeout,
        )
    }

    #[tokio::test]
    async fn reported_matches_flip_the_verdict() {
        let provider = MockServer::start().await;
        let matches = json!([{
            "threatType": "SOCIAL_ENGINEERING",
            "platformType": "ANY_PLATFORM",
            "threatEntryType": "URL",
            "threat": { "url": "https://phish.example/" }
        }]);
        Mock::given(method("POST"))
            .and(path("/v4/threatMatches:find"))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(json!({
                "threatInfo": { "threatEntries": [{ "url": "https://phish.example/" }] }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "matches": matches })))
            .mount(&provider)
            .await;

        let url = normalize("https://phish.example/").unwrap();
        let result = gateway(&provider, Duration::from_secs(1)).check_url(&url).await.unwrap();

        assert!(!result.safe);
        assert_eq!(serde_json::to_value(result.threats.unwrap()).unwrap(), matches);
    }

    #[tokio::test]
    async fn empty_provider_body_means_safe() {
        let provider = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&provider)
            .await;

        let url = normalize("example.com").unwrap();
        let result = gateway(&provider, Duration::from_secs(1)).check_url(&url).await.unwrap();

        assert!(result.safe);
        assert!(result.threats.is_none());
    }

    #[tokio::test]
    async fn provider_error_status_is_surfaced() {
        let provider = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&provider)
            .await;

        let url = normalize("example.com").unwrap();
        let err = gateway(&provider, Duration::from_secs(1)).check_url(&url).await.unwrap_err();

        assert!(matches!(err, GatewayError::HttpStatus(503)));
    }

    #[tokio::test]
    async fn unparsable_body_is_a_parse_error() {
        let provider = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&provider)
            .await;

        let url = normalize("example.com").unwrap();
        let err = gateway(&provider, Duration::from_secs(1)).check_url(&url).await.unwrap_err();

        assert!(matches!(err, GatewayError::Parse(_)));
    }

    #[tokio::test]
    async fn slow_provider_hits_the_deadline() {
        let provider = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_secs(10)),
            )
            .mount(&provider)
            .await;

        let url = normalize("example.com").unwrap();
        let started = std::time::Instant::now();
        let err = gateway(&provider, Duration::from_millis(50))
            .check_url(&url)
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Timeout(_)));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_call() {
        let gateway =
            SafeBrowsingGateway::with_endpoint("http://127.0.0.1:1/find".into(), String::new(), Duration::from_secs(1));
        let url = normalize("example.com").unwrap();
        let err = gateway.check_url(&url).await.unwrap_err();
        assert!(matches!(err, GatewayError::MissingApiKey));
    }

    #[tokio::test]
    async fn error_display_never_contains_the_key() {
        // Unreachable endpoint forces a network error.
        let gateway = SafeBrowsingGateway::with_endpoint(
            "http://127.0.0.1:1/v4/threatMatches:find".into(),
            "secret-key".into(),
            Duration::from_secs(1),
        );
        let url = normalize("example.com").unwrap();
        let err = gateway.check_url(&url).await.unwrap_err();
        assert!(!err.to_string().contains("secret-key"));
    }
}
