use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::config::{ResolvedConfig, default_timeout, default_user_agent};

/// The one client instance handed to every resource and data source of a cycle.
pub type SharedClient = Arc<MatrixClient>;

/// Authenticated Matrix client-server API client.
#[derive(Clone)]
pub struct MatrixClient {
    http: Client,
    homeserver: Url,
    user_id: String,
    access_token: String,
}

impl MatrixClient {
    /// Builds a client without contacting the homeserver.
    pub fn new(homeserver: &str, user_id: &str, access_token: &str) -> Result<Self> {
        Self::with_timeout(homeserver, user_id, access_token, default_timeout())
    }

    pub fn with_timeout(
        homeserver: &str,
        user_id: &str,
        access_token: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let homeserver = parse_homeserver(homeserver)?;
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(default_user_agent())
            .build()
            .map_err(|err| anyhow!("failed to build HTTP client: {err}"))?;

        Ok(Self {
            http,
            homeserver,
            user_id: user_id.to_string(),
            access_token: access_token.to_string(),
        })
    }

    pub fn homeserver(&self) -> &Url {
        &self.homeserver
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[cfg(test)]
    pub(crate) fn access_token(&self) -> &str {
        &self.access_token
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.homeserver.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("homeserver URL {} cannot be a base", self.homeserver))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self
            .http
            .get(url.clone())
            .bearer_auth(&self.access_token)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            bail!("Matrix API error (status {status}): {body}");
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse response JSON from {url}"))
    }

    /// Identity the access token belongs to.
    pub async fn whoami(&self) -> Result<WhoAmI> {
        let url = self.endpoint(&["_matrix", "client", "v3", "account", "whoami"])?;
        self.get_json(url).await
    }

    pub async fn display_name(&self, user_id: &str) -> Result<Option<String>> {
        let url = self.endpoint(&["_matrix", "client", "v3", "profile", user_id, "displayname"])?;
        let profile: DisplayName = self.get_json(url).await?;
        Ok(profile.displayname)
    }
}

impl fmt::Debug for MatrixClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixClient")
            .field("homeserver", &self.homeserver.as_str())
            .field("user_id", &self.user_id)
            .field("access_token", &"***")
            .finish()
    }
}

fn parse_homeserver(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw).map_err(|err| anyhow!("invalid homeserver URL '{raw}': {err}"))?;

    match url.scheme() {
        "http" | "https" => {}
        other => bail!("unsupported homeserver URL scheme '{other}' in '{raw}'"),
    }
    if url.host_str().is_none_or(str::is_empty) {
        bail!("homeserver URL '{raw}' has no host");
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoAmI {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DisplayName {
    #[serde(default)]
    displayname: Option<String>,
}

/// Builds the client for a configure cycle. Called at most once per cycle.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn create(&self, config: &ResolvedConfig) -> Result<MatrixClient>;
}

#[derive(Debug, Clone)]
pub struct HttpClientFactory {
    timeout: Duration,
}

impl HttpClientFactory {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for HttpClientFactory {
    fn default() -> Self {
        Self::new(default_timeout())
    }
}

#[async_trait]
impl ClientFactory for HttpClientFactory {
    async fn create(&self, config: &ResolvedConfig) -> Result<MatrixClient> {
        MatrixClient::with_timeout(
            &config.client_server_url,
            &config.default_user_id,
            &config.default_access_token,
            self.timeout,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn rejects_unparseable_homeserver() {
        let err = MatrixClient::new("not a url", "@a:x", "abc").unwrap_err();
        assert!(err.to_string().starts_with("invalid homeserver URL 'not a url'"));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = MatrixClient::new("ftp://matrix.org", "@a:x", "abc").unwrap_err();
        assert!(err.to_string().contains("unsupported homeserver URL scheme 'ftp'"));
    }

    #[test]
    fn keeps_base_path_for_endpoints() {
        let client = MatrixClient::new("https://example.org/matrix", "@a:x", "abc").unwrap();
        let url = client.endpoint(&["_matrix", "client", "v3", "account", "whoami"]).unwrap();
        assert_eq!(url.as_str(), "https://example.org/matrix/_matrix/client/v3/account/whoami");
    }

    #[test]
    fn user_ids_are_percent_encoded_in_paths() {
        let client = MatrixClient::new("https://matrix.org", "@a:matrix.org", "abc").unwrap();
        let url = client
            .endpoint(&["_matrix", "client", "v3", "profile", "@a/b:matrix.org", "displayname"])
            .unwrap();
        assert!(url.as_str().contains("profile/@a%2Fb:matrix.org/displayname"));
    }

    #[test]
    fn debug_output_hides_token() {
        let client = MatrixClient::new("https://matrix.org", "@a:matrix.org", "syt_secret").unwrap();
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("syt_secret"));
        assert!(rendered.contains("@a:matrix.org"));
    }

    #[tokio::test]
    async fn factory_uses_resolved_values() {
        let config = ResolvedConfig {
            client_server_url: "https://matrix.org".to_string(),
            default_access_token: "abc".to_string(),
            default_user_id: "@a:matrix.org".to_string(),
        };

        let client = HttpClientFactory::default().create(&config).await.unwrap();
        assert_eq!(client.homeserver().as_str(), "https://matrix.org/");
        assert_eq!(client.user_id(), "@a:matrix.org");
        assert_eq!(client.access_token(), "abc");
    }

    #[tokio::test]
    async fn whoami_sends_bearer_token() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/_matrix/client/v3/account/whoami")
                    .header("authorization", "Bearer abc");
                then.status(200)
                    .json_body(json!({ "user_id": "@a:matrix.org", "device_id": "DEV" }));
            })
            .await;

        let client = MatrixClient::new(&server.base_url(), "@a:matrix.org", "abc").unwrap();
        let whoami = client.whoami().await.unwrap();

        mock.assert_async().await;
        assert_eq!(whoami.user_id, "@a:matrix.org");
        assert_eq!(whoami.device_id.as_deref(), Some("DEV"));
    }

    #[tokio::test]
    async fn api_errors_carry_status_and_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/_matrix/client/v3/account/whoami");
                then.status(401)
                    .json_body(json!({ "errcode": "M_UNKNOWN_TOKEN", "error": "Invalid token" }));
            })
            .await;

        let client = MatrixClient::new(&server.base_url(), "@a:matrix.org", "bad").unwrap();
        let err = client.whoami().await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("401"));
        assert!(message.contains("M_UNKNOWN_TOKEN"));
    }

    #[tokio::test]
    async fn display_name_reads_profile() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/_matrix/client/v3/profile/@a:matrix.org/displayname");
                then.status(200).json_body(json!({ "displayname": "Alice" }));
            })
            .await;

        let client = MatrixClient::new(&server.base_url(), "@a:matrix.org", "abc").unwrap();
        let name = client.display_name("@a:matrix.org").await.unwrap();
        assert_eq!(name.as_deref(), Some("Alice"));
    }
}
