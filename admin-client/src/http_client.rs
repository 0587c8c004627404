use crate::error::ServiceError;
use crate::kind::{Action, EntityKind};
use crate::service::EntityService;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;

/// Error body shape accepted from the service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// REST binding of [`EntityService`] for the kind's collection under `/api`.
pub struct HttpService<K> {
    client: Client,
    base_url: String,
    token: Option<String>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: EntityKind> HttpService<K> {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
            token: None,
            _kind: PhantomData,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn get_token(&self) -> Option<&String> {
        self.token.as_ref()
    }

    fn add_auth_header(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn collection_url(&self) -> String {
        self.url(&format!("/api/{}", K::ENTITY_TYPE.collection()))
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{}", self.collection_url(), id)
    }

    fn action_url(&self, id: i64, action: Action) -> String {
        format!("{}/{}", self.item_url(id), action)
    }
}

impl<K> Clone for HttpService<K> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: self.token.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K> fmt::Debug for HttpService<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpService")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

/// Extracts the message of an error body: the `error` or `message` field of
/// a JSON object, otherwise the raw text.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) => parsed
            .error
            .or(parsed.message)
            .filter(|message| !message.trim().is_empty()),
        Err(_) => Some(body.to_string()),
    }
}

async fn error_from_response(response: Response) -> ServiceError {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return ServiceError::NotFound;
    }

    let text = response.text().await.unwrap_or_default();
    ServiceError::Status {
        status: status.as_u16(),
        message: error_message(&text),
    }
}

fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, ServiceError> {
    serde_json::from_str(text).map_err(|e| ServiceError::SerializationError(e.to_string()))
}

/// Parses a JSON body, treating an empty one as "nothing returned".
fn parse_optional<T: DeserializeOwned>(text: &str) -> Result<Option<T>, ServiceError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_json(text).map(Some)
}

async fn handle_entity_response<T: DeserializeOwned>(
    response: Response,
) -> Result<Option<T>, ServiceError> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }
    let text = response.text().await?;
    parse_optional(&text)
}

async fn handle_empty_response(response: Response) -> Result<(), ServiceError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_from_response(response).await)
    }
}

#[async_trait]
impl<K: EntityKind> EntityService<K> for HttpService<K> {
    async fn get_all(&self) -> Result<Vec<K::Entity>, ServiceError> {
        let url = self.collection_url();
        tracing::debug!("GET {}", url);
        let response = self.add_auth_header(self.client.get(&url)).send().await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        let text = response.text().await?;
        parse_json(&text)
    }

    async fn create(&self, draft: &K::Draft) -> Result<Option<K::Entity>, ServiceError> {
        let url = self.collection_url();
        tracing::debug!("POST {}", url);
        let response = self
            .add_auth_header(self.client.post(&url))
            .json(draft)
            .send()
            .await?;

        handle_entity_response(response).await
    }

    async fn update(&self, id: i64, draft: &K::Draft) -> Result<Option<K::Entity>, ServiceError> {
        let url = self.item_url(id);
        tracing::debug!("PUT {}", url);
        let response = self
            .add_auth_header(self.client.put(&url))
            .json(draft)
            .send()
            .await?;

        handle_entity_response(response).await
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let url = self.item_url(id);
        tracing::debug!("DELETE {}", url);
        let response = self
            .add_auth_header(self.client.delete(&url))
            .send()
            .await?;

        handle_empty_response(response).await
    }

    async fn transition(&self, id: i64, action: Action) -> Result<(), ServiceError> {
        if !K::transitions().iter().any(|t| t.action == action) {
            return Err(ServiceError::Unsupported(format!(
                "cannot {} {} #{}",
                action,
                K::MESSAGES.noun,
                id
            )));
        }

        let url = self.action_url(id, action);
        tracing::debug!("POST {}", url);
        let response = self
            .add_auth_header(self.client.post(&url))
            .send()
            .await?;

        handle_empty_response(response).await
    }
}
