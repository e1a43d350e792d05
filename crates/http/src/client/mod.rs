//! Volant HTTP client
//!
//! Wraps outbound admin API calls with bearer-token attachment, a one-shot
//! token refresh on 401, and the session-expiry fallback.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod inbox;
pub mod refresh;
pub mod reviews;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, ClientBuilder, Method, Response, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::debug;
use url::Url;
use volant_core::{CredentialStore, MemoryCredentialStore, Navigator, NoopNavigator};

use crate::types::ApiEnvelope;
use error::ClientError;

/// Default request deadline
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Endpoint the refresh token is exchanged at
pub const DEFAULT_REFRESH_PATH: &str = "/auth/refresh";

/// Admin login page used by the session-expiry fallback
pub const DEFAULT_LOGIN_PATH: &str = "/admin/login";

/// Volant admin API client
#[derive(Clone)]
pub struct VolantClient {
    http: Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    refresh_path: String,
    login_path: String,
    refresh_gate: Arc<Mutex<()>>,
}

/// A replayable request description.
///
/// The transport request is rebuilt from this description on every attempt,
/// so a replay after a token refresh derives its `Authorization` header from
/// the rotated pair instead of reusing a stale one.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Create a request for the given method and path
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Append a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Attach a JSON body
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Request method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request path relative to the base URL
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl VolantClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> VolantClientBuilder {
        VolantClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a replayable request for this client
    pub fn request(&self, method: Method, path: &str) -> ApiRequest {
        ApiRequest::new(method, path)
    }

    /// Send a request through the session layer.
    ///
    /// The stored access token, when present, is attached as a bearer header;
    /// its absence is not an error and the request goes out unauthenticated.
    /// Any status other than 401 is returned as-is, 500s included; this layer
    /// does not interpret statuses or business payloads. A 401 triggers one
    /// refresh of the credential pair and one replay of this request, and the
    /// replay's response is final whatever its status. When the refresh cycle
    /// fails, the session is expired (credentials cleared, host navigated to
    /// the login page unless already there) and the caller gets the original
    /// 401 back.
    pub async fn send(&self, request: ApiRequest) -> Result<Response, ClientError> {
        let used_token = self.store.get().await?.map(|pair| pair.access_token);

        let response = self.send_once(&request, used_token.as_deref()).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        match self.refresh_access(used_token.as_deref()).await {
            Ok(token) => {
                debug!(path = %request.path, "replaying request with refreshed token");
                self.send_once(&request, Some(&token)).await
            }
            Err(err) => {
                debug!(path = %request.path, error = %err, "token refresh failed, expiring session");
                self.expire_session().await;
                Ok(response)
            }
        }
    }

    /// One transport attempt, with the given access token attached
    async fn send_once(
        &self,
        request: &ApiRequest,
        access_token: Option<&str>,
    ) -> Result<Response, ClientError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.http.request(request.method.clone(), url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = access_token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        builder.send().await.map_err(ClientError::from_reqwest)
    }

    /// Execute a request and parse the 2xx body, mapping error statuses
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(ClientError::from_reqwest)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::from_status(status, message))
        }
    }

    /// Execute a request and unwrap the standard response envelope
    pub async fn execute_data<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ClientError> {
        let envelope: ApiEnvelope<T> = self.execute(request).await?;
        envelope.into_data()
    }

    /// Execute a request that returns an empty envelope
    pub async fn execute_unit(&self, request: ApiRequest) -> Result<(), ClientError> {
        let envelope: ApiEnvelope<serde_json::Value> = self.execute(request).await?;
        envelope.ensure_success()
    }
}

/// Builder for VolantClient
#[derive(Default)]
pub struct VolantClientBuilder {
    base_url: Option<String>,
    store: Option<Arc<dyn CredentialStore>>,
    navigator: Option<Arc<dyn Navigator>>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    refresh_path: Option<String>,
    login_path: Option<String>,
}

impl VolantClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the credential store holding the session token pair
    pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the navigator used by the session-expiry fallback
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the path the refresh token is exchanged at
    pub fn refresh_path(mut self, path: impl Into<String>) -> Self {
        self.refresh_path = Some(path.into());
        self
    }

    /// Set the login page path used by the expiry fallback
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = Some(path.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<VolantClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|err| ClientError::Configuration(format!("invalid base_url: {err}")))?;

        let mut client_builder = ClientBuilder::new().timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT));

        if let Some(user_agent) = self.user_agent {
            client_builder = client_builder.user_agent(user_agent);
        } else {
            client_builder = client_builder.user_agent("volant-client/0.1.0");
        }

        let http = client_builder.build().map_err(ClientError::from_reqwest)?;

        Ok(VolantClient {
            http,
            base_url,
            store: self
                .store
                .unwrap_or_else(|| Arc::new(MemoryCredentialStore::new())),
            navigator: self.navigator.unwrap_or_else(|| Arc::new(NoopNavigator)),
            refresh_path: self
                .refresh_path
                .unwrap_or_else(|| DEFAULT_REFRESH_PATH.to_string()),
            login_path: self
                .login_path
                .unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_string()),
            refresh_gate: Arc::new(Mutex::new(())),
        })
    }
}
