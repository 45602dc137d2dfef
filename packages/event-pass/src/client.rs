//! HTTP client for the identity, event and pass endpoints

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ClientError, FetchResult};
use crate::traits::{BaseEventService, BaseIdentityProvider, BasePassService};
use crate::types::{AuthResponse, EventId, EventRecord, Identity, PassRecord, PassResponse};

/// REST client backing every lookup the resolver needs.
#[derive(Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
    auth_me_path: String,
    auth_token: Option<String>,
}

impl ApiClient {
    /// Create a new client against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_me_path: "/.auth/me".to_string(),
            auth_token: None,
        }
    }

    /// Create a client from configuration, applying its timeout and token.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let http_client = Client::builder().timeout(config.request_timeout).build()?;
        let mut client = Self::new(config.api_base_url.clone()).with_auth_me_path(&config.auth_me_path);
        client.http_client = http_client;
        client.auth_token = config.api_token.clone();
        Ok(client)
    }

    /// Set the path of the "who am I" endpoint.
    pub fn with_auth_me_path(mut self, path: impl Into<String>) -> Self {
        self.auth_me_path = path.into();
        self
    }

    /// Send a bearer token with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth_me_url(&self) -> String {
        format!("{}/{}", self.base_url, self.auth_me_path.trim_start_matches('/'))
    }

    pub fn event_url(&self, id: &EventId) -> String {
        format!(
            "{}/api/events/{}",
            self.base_url,
            urlencoding::encode(id.as_str())
        )
    }

    pub fn pass_url(&self, id: &EventId) -> String {
        format!("{}/pass", self.event_url(id))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        let mut req = self.http_client.get(url);

        if let Some(token) = &self.auth_token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let response = req.send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Request failed");
            ClientError::Network(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!(url = %url, status = %status, "Non-success response");
            return Err(ClientError::Status(status));
        }

        response.json().await.map_err(|e| {
            warn!(url = %url, error = %e, "Failed to decode response");
            ClientError::Decode(e)
        })
    }
}

#[async_trait]
impl BaseIdentityProvider for ApiClient {
    async fn current_identity(&self) -> Option<Identity> {
        match self.get_json::<AuthResponse>(&self.auth_me_url()).await {
            Ok(body) => body.client_principal,
            Err(e) => {
                warn!(error = %e, "Identity lookup failed, continuing as anonymous");
                None
            }
        }
    }
}

#[async_trait]
impl BaseEventService for ApiClient {
    async fn get_event(&self, id: &EventId) -> FetchResult<EventRecord> {
        Ok(self.get_json(&self.event_url(id)).await?)
    }
}

#[async_trait]
impl BasePassService for ApiClient {
    async fn get_pass(&self, id: &EventId) -> FetchResult<Option<PassRecord>> {
        let body: PassResponse = self.get_json(&self.pass_url(id)).await?;
        Ok(body.pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use std::time::Duration;

    fn id(raw: &str) -> EventId {
        EventId::parse(Some(raw)).unwrap()
    }

    #[test]
    fn test_urls() {
        let client = ApiClient::new("https://passes.example.org/");

        assert_eq!(client.base_url(), "https://passes.example.org");
        assert_eq!(client.auth_me_url(), "https://passes.example.org/.auth/me");
        assert_eq!(
            client.event_url(&id("evt-1")),
            "https://passes.example.org/api/events/evt-1"
        );
        assert_eq!(
            client.pass_url(&id("evt-1")),
            "https://passes.example.org/api/events/evt-1/pass"
        );
    }

    #[test]
    fn test_identifier_is_percent_encoded() {
        let client = ApiClient::new("http://localhost:7071");
        assert_eq!(
            client.event_url(&id("a/b c")),
            "http://localhost:7071/api/events/a%2Fb%20c"
        );
    }

    /// Client pointed at a port nothing listens on, bypassing any proxy.
    fn unreachable_client() -> ApiClient {
        let mut client = ApiClient::new("http://127.0.0.1:1");
        client.http_client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        client
    }

    #[tokio::test]
    async fn test_unreachable_identity_endpoint_means_anonymous() {
        let client = unreachable_client();
        assert!(client.current_identity().await.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_event_endpoint_is_other_failure() {
        let client = unreachable_client();

        let err = client.get_event(&id("evt-1")).await.unwrap_err();
        assert!(matches!(err, FetchError::Other(_)));
        assert!(err.to_string().starts_with("Network error"));

        let err = client.get_pass(&id("evt-1")).await.unwrap_err();
        assert!(matches!(err, FetchError::Other(_)));
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            api_base_url: "http://api.local".into(),
            auth_me_path: "whoami".into(),
            api_token: Some("t".into()),
            default_route: "/".into(),
            request_timeout: Duration::from_secs(1),
        };
        let client = ApiClient::from_config(&config).unwrap();

        assert_eq!(client.auth_me_url(), "http://api.local/whoami");
        assert_eq!(client.auth_token.as_deref(), Some("t"));
    }
}
