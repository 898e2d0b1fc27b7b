// ABOUTME: HTTP implementation of the persistence API
// Maps transport failures and non-success statuses onto RemoteError

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::PersistenceApi;
use crate::config::ApiConfig;
use crate::error::{BuilderError, BuilderResult, RemoteError, RemoteErrorKind};
use crate::models::{
    ClientConfiguration, ClientId, CreateClientRequest, CurrentUser, PreviewSnapshot, RenderedSite,
    Section,
};

/// Responses arrive either wrapped as `{"data": ...}` or bare
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(value) => value,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SectionList {
    Listed { sections: Vec<Section> },
    Bare(Vec<Section>),
}

/// Result of the health endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceHealth {
    pub reachable: bool,
    pub status: Option<u16>,
}

#[derive(Debug, Clone)]
pub struct HttpPersistenceClient {
    client: Client,
    config: ApiConfig,
}

impl HttpPersistenceClient {
    pub fn new(config: ApiConfig) -> BuilderResult<Self> {
        url::Url::parse(&config.base_url).map_err(|e| {
            BuilderError::Config(format!("invalid API base URL '{}': {e}", config.base_url))
        })?;

        let client = Client::builder()
            .user_agent(concat!("portal-builder/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()
            .map_err(|e| BuilderError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn client_url(&self, client_id: &ClientId) -> String {
        self.url(&format!("{}/{}", self.config.clients_path, client_id))
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        debug!("Persistence API request: {} {}", method, url);
        let builder = self.client.request(method, url);
        match &self.config.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> BuilderResult<Response> {
        builder.send().await.map_err(transport_error)
    }

    /// Fail on non-success statuses, with 404 mapped to `not_found`
    async fn check(
        response: Response,
        not_found: Option<&ClientId>,
    ) -> BuilderResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if let (StatusCode::NOT_FOUND, Some(client_id)) = (status, not_found) {
            return Err(BuilderError::client_not_found(client_id.as_str()));
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
        let kind = match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RemoteErrorKind::Unauthorized,
            other => RemoteErrorKind::Status(other.as_u16()),
        };
        debug!("Persistence API error {}: {}", status, message);
        Err(RemoteError::new(kind, message).into())
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> BuilderResult<T> {
        let body = response.text().await.map_err(transport_error)?;
        serde_json::from_str::<Envelope<T>>(&body)
            .map(Envelope::into_inner)
            .map_err(|e| RemoteError::new(RemoteErrorKind::Decode, e.to_string()).into())
    }

    /// Identity of the token holder; `None` when the service says unauthenticated
    pub async fn current_user(&self) -> BuilderResult<Option<CurrentUser>> {
        let response = self
            .send(self.request(Method::GET, self.url(&self.config.current_user_path)))
            .await?;
        if matches!(response.status(), StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Ok(None);
        }
        let response = Self::check(response, None).await?;
        Self::decode::<CurrentUser>(response).await.map(Some)
    }

    /// Probe the health endpoint; transport failures count as unreachable
    pub async fn health(&self) -> ServiceHealth {
        let request = self.request(Method::GET, self.url(&self.config.health_path));
        match request.send().await {
            Ok(response) => ServiceHealth {
                reachable: response.status().is_success(),
                status: Some(response.status().as_u16()),
            },
            Err(e) => {
                debug!("Health probe failed: {}", e);
                ServiceHealth {
                    reachable: false,
                    status: None,
                }
            }
        }
    }
}

fn transport_error(err: reqwest::Error) -> BuilderError {
    let kind = if err.is_timeout() {
        RemoteErrorKind::Timeout
    } else {
        RemoteErrorKind::Transport
    };
    RemoteError::new(kind, err.to_string()).into()
}

/// Pull a readable message out of a JSON error body, falling back to the raw text
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
        for key in ["error", "message"] {
            if let Some(Value::String(message)) = map.get(key) {
                return Some(message.clone());
            }
        }
    }
    Some(trimmed.to_string())
}

#[async_trait]
impl PersistenceApi for HttpPersistenceClient {
    async fn create(&self, payload: &CreateClientRequest) -> BuilderResult<ClientConfiguration> {
        let request = self
            .request(Method::POST, self.url(&self.config.clients_path))
            .json(payload);
        let response = Self::check(self.send(request).await?, None).await?;
        Self::decode(response).await
    }

    async fn fetch(&self, client_id: &ClientId) -> BuilderResult<ClientConfiguration> {
        let request = self.request(Method::GET, self.client_url(client_id));
        let response = Self::check(self.send(request).await?, Some(client_id)).await?;
        Self::decode(response).await
    }

    async fn update(
        &self,
        client_id: &ClientId,
        payload: &CreateClientRequest,
    ) -> BuilderResult<ClientConfiguration> {
        let request = self
            .request(Method::PUT, self.client_url(client_id))
            .json(payload);
        let response = Self::check(self.send(request).await?, Some(client_id)).await?;
        Self::decode(response).await
    }

    async fn remove(&self, client_id: &ClientId) -> BuilderResult<()> {
        let request = self.request(Method::DELETE, self.client_url(client_id));
        Self::check(self.send(request).await?, Some(client_id)).await?;
        Ok(())
    }

    async fn preview(&self, client_id: &ClientId) -> BuilderResult<PreviewSnapshot> {
        let url = format!("{}/preview", self.client_url(client_id));
        let request = self.request(Method::GET, url);
        let response = Self::check(self.send(request).await?, Some(client_id)).await?;
        Self::decode(response).await
    }

    async fn render(&self, client_id: &ClientId) -> BuilderResult<RenderedSite> {
        let url = self.url(&format!("{}/{}", self.config.render_path, client_id));
        let request = self.request(Method::GET, url);
        let response = Self::check(self.send(request).await?, Some(client_id)).await?;
        let html = response.text().await.map_err(transport_error)?;
        Ok(RenderedSite {
            client_id: client_id.clone(),
            html,
        })
    }

    async fn available_sections(&self) -> BuilderResult<Vec<Section>> {
        let request = self.request(Method::GET, self.url(&self.config.sections_path));
        let response = Self::check(self.send(request).await?, None).await?;
        let list: SectionList = Self::decode(response).await?;
        Ok(match list {
            SectionList::Listed { sections } | SectionList::Bare(sections) => sections,
        })
    }
}
