use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A repository record as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub techs: Vec<String>,
    pub likes: u64,
}

/// Body for create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRepository {
    pub title: String,
    pub url: String,
    pub techs: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status and an `{"error"}` body.
    #[error("API returned {status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    /// Error message from the API, if this is an API error.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => Some(message),
            ClientError::Http(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct RepositoriesClient {
    client: Client,
    base_url: String,
}

impl RepositoriesClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Repository>, ClientError> {
        let resp = self
            .client
            .get(format!("{}/repositories", self.base_url))
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn create(&self, repo: &NewRepository) -> Result<Repository, ClientError> {
        let resp = self
            .client
            .post(format!("{}/repositories", self.base_url))
            .json(repo)
            .send()
            .await?;
        decode(resp).await
    }

    /// Ids are passed as text so malformed ids can reach the server.
    pub async fn update(&self, id: &str, repo: &NewRepository) -> Result<Repository, ClientError> {
        let resp = self
            .client
            .put(format!("{}/repositories/{}", self.base_url, id))
            .json(repo)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let resp = self
            .client
            .delete(format!("{}/repositories/{}", self.base_url, id))
            .send()
            .await?;
        check(resp).await.map(|_| ())
    }

    pub async fn like(&self, id: &str) -> Result<Repository, ClientError> {
        let resp = self
            .client
            .post(format!("{}/repositories/{}/like", self.base_url, id))
            .send()
            .await?;
        decode(resp).await
    }
}

async fn check(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let text = resp.text().await?;
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    Err(ClientError::Api { status, message })
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    Ok(check(resp).await?.json().await?)
}
