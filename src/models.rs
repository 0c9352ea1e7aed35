//! Wire types for the check endpoint and the Safe Browsing provider.

use serde::{Deserialize, Serialize};

// ============ Check endpoint ============

/// POST body for `/api/check-url`
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub url: Option<String>,
}

/// Query parameters for `GET /api/check-url`
#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    pub url: Option<String>,
}

/// Lookup verdict returned to the client.
///
/// `threats` present implies `safe == false`; a safe verdict serializes
/// without the field at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub safe: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threats: Option<Vec<ThreatMatch>>,
}

impl CheckResult {
    /// Verdict with no reported threats.
    pub fn safe() -> Self {
        Self {
            safe: true,
            threats: None,
        }
    }

    /// Verdict carrying the provider's match list.
    pub fn flagged(threats: Vec<ThreatMatch>) -> Self {
        Self {
            safe: false,
            threats: Some(threats),
        }
    }
}

/// Provider-reported threat match, relayed to the client unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreatMatch(pub serde_json::Value);

/// Error body for 4xx/5xx responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// ============ Provider (Safe Browsing v4) ============

/// `threatMatches:find` request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatMatchRequest {
    pub client: ClientInfo,
    pub threat_info: ThreatInfo,
}

/// Static, non-secret client identification.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub client_id: &'static str,
    pub client_version: &'static str,
}

/// Threat/platform/entry-type filters plus the URL entries to check.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatInfo {
    pub threat_types: Vec<&'static str>,
    pub platform_types: Vec<&'static str>,
    pub threat_entry_types: Vec<&'static str>,
    pub threat_entries: Vec<ThreatEntry>,
}

/// Single URL entry.
#[derive(Debug, Serialize)]
pub struct ThreatEntry {
    pub url: String,
}

/// `threatMatches:find` response body. The provider omits `matches`
/// entirely when nothing matched.
#[derive(Debug, Default, Deserialize)]
pub struct ThreatMatchResponse {
    #[serde(default)]
    pub matches: Vec<ThreatMatch>,
}
