//! Target detail fetching from the TOM API.
//!
//! A build issues exactly one `GET {base_url}/api/target/{pk}/` per
//! configured target and parses the JSON body into [`TargetDetails`]. The
//! details are ephemeral: they feed page assembly and are discarded once the
//! page descriptors exist.
//!
//! No retries and no caching. Failures are classified into the three cases a
//! build can meaningfully report: the host was unreachable, the TOM answered
//! with a non-2xx status, or the body was not the expected JSON.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;

/// Connect/read timeout for TOM requests. Bounds how long an unresponsive
/// host can stall a build.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("could not connect to TOM at '{url}': {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("TOM returned HTTP {status} for '{url}'")]
    Status { url: String, status: u16 },
    #[error("could not parse TOM response from '{url}': {source}")]
    Json {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Details for one target as returned by the TOM API.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetDetails {
    pub target: TargetInfo,
}

/// The `target` object within a details response. The API returns more
/// fields than these; unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetInfo {
    /// URL-safe identifier, used as the page's output directory name.
    pub identifier: String,
    /// Human-readable target name.
    pub name: String,
    #[serde(default)]
    pub extra_fields: ExtraFields,
}

/// Free-form extras attached to a target in the TOM.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtraFields {
    /// Whether observations of this target are currently being accepted.
    #[serde(default)]
    pub active: bool,
}

/// API path for a target's detail endpoint, relative to the base URL.
///
/// Also embedded in target-page contexts so the browser-side client can hit
/// the same endpoint.
pub fn target_api_path(pk: u32) -> String {
    format!("/api/target/{pk}/")
}

/// Blocking HTTP client for the TOM API.
///
/// Performs a single request per call; there is no retry layer. One client
/// is constructed per build and shared across all target fetches.
#[derive(Debug, Clone)]
pub struct TomClient {
    client: Client,
}

impl TomClient {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }

    /// Fetch details for the target with primary key `pk`.
    ///
    /// `base_url` must already be normalized (no trailing slash), as
    /// [`crate::config::Config`] guarantees.
    pub fn fetch_target(&self, base_url: &str, pk: u32) -> Result<TargetDetails, FetchError> {
        let url = format!("{}{}", base_url, target_api_path(pk));

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| FetchError::Connection { url: url.clone(), source: e })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response
            .json::<TargetDetails>()
            .map_err(|e| FetchError::Json { url, source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAILS_BODY: &str = r#"{
        "target": {
            "identifier": "target_1",
            "name": "Cool target",
            "extra_fields": {"active": true, "html_info": "<p>hi</p>"}
        }
    }"#;

    #[test]
    fn api_path_ends_with_pk() {
        assert_eq!(target_api_path(100), "/api/target/100/");
    }

    #[test]
    fn fetch_target_parses_details() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/api/target/100/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(DETAILS_BODY)
            .create();

        let client = TomClient::new().unwrap();
        let details = client.fetch_target(&server.url(), 100).unwrap();

        assert_eq!(details.target.identifier, "target_1");
        assert_eq!(details.target.name, "Cool target");
        assert!(details.target.extra_fields.active);
        mock.assert();
    }

    #[test]
    fn extra_fields_default_when_absent() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/api/target/5/")
            .with_status(200)
            .with_body(r#"{"target": {"identifier": "t", "name": "n"}}"#)
            .create();

        let client = TomClient::new().unwrap();
        let details = client.fetch_target(&server.url(), 5).unwrap();
        assert!(!details.target.extra_fields.active);
    }

    #[test]
    fn non_2xx_is_a_status_error() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("GET", "/api/target/9/").with_status(404).create();

        let client = TomClient::new().unwrap();
        let err = client.fetch_target(&server.url(), 9).unwrap_err();
        match err {
            FetchError::Status { url, status } => {
                assert_eq!(status, 404);
                assert!(url.ends_with("/api/target/9/"));
            }
            other => panic!("unexpected error variant: {other}"),
        }
    }

    #[test]
    fn malformed_body_is_a_json_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/api/target/3/")
            .with_status(200)
            .with_body("this is not json")
            .create();

        let client = TomClient::new().unwrap();
        let err = client.fetch_target(&server.url(), 3).unwrap_err();
        assert!(matches!(err, FetchError::Json { .. }));
    }

    #[test]
    fn unreachable_host_is_a_connection_error() {
        // Port 1 is never listening; connection is refused immediately.
        let client = TomClient::new().unwrap();
        let err = client.fetch_target("http://127.0.0.1:1", 42).unwrap_err();
        match &err {
            FetchError::Connection { url, .. } => {
                assert_eq!(url, "http://127.0.0.1:1/api/target/42/");
            }
            other => panic!("unexpected error variant: {other}"),
        }
        // The attempted URL must appear in the rendered message.
        assert!(err.to_string().contains("http://127.0.0.1:1/api/target/42/"));
    }
}
