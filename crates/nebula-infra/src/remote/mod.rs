//! HTTP-backed post store: the same contract, spoken over the REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use nebula_core::domain::{NewComment, NewPost, Post, PostFilter, PostUpdate};
use nebula_core::error::RepoError;
use nebula_core::ports::PostStore;
use nebula_shared::ApiResponse;
use nebula_shared::dto::{CommentRequest, DeletedResponse, LoginRequest, LoginResponse};

/// Remote store configuration.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// API root, e.g. `http://localhost:8080/blog/api`.
    pub base_url: String,
    pub timeout: Duration,
    /// Bearer token of an admin session, required for create/update/delete.
    pub admin_token: Option<String>,
}

impl RemoteConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
            admin_token: None,
        }
    }
}

/// Post store that forwards every call to a Nebula API server.
///
/// Network failures surface as [`RepoError::Connection`]: the operation did
/// not happen and no retry is attempted.
pub struct HttpPostStore {
    client: Client,
    base: Url,
    admin_token: Option<String>,
}

impl HttpPostStore {
    pub fn new(config: RemoteConfig) -> Result<Self, RepoError> {
        let mut base = Url::parse(&config.base_url)
            .map_err(|e| RepoError::Connection(format!("Invalid base URL: {}", e)))?;
        if base.cannot_be_a_base() {
            return Err(RepoError::Connection(format!(
                "Invalid base URL: {}",
                config.base_url
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            base,
            admin_token: config.admin_token,
        })
    }

    /// Use an admin session for subsequent mutating calls.
    pub fn with_admin_token(mut self, token: impl Into<String>) -> Self {
        self.admin_token = Some(token.into());
        self
    }

    /// Exchange the shared admin password for a session.
    pub async fn login(&self, password: &str) -> Result<LoginResponse, RepoError> {
        let body = LoginRequest {
            password: Some(password.to_string()),
        };
        let req = self.client.post(self.endpoint(&["auth", "login"])?).json(&body);
        self.send::<LoginResponse>(req)
            .await?
            .ok_or_else(|| RepoError::Query("Login endpoint not found".to_string()))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, RepoError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| RepoError::Connection("Base URL cannot take a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.admin_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Send a request and unwrap the envelope. `Ok(None)` means HTTP 404.
    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<Option<T>, RepoError> {
        let resp = req.send().await.map_err(|e| {
            tracing::warn!(error = %e, "Remote store request failed");
            RepoError::Connection(e.to_string())
        })?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: ApiResponse<T> = resp
            .json()
            .await
            .map_err(|e| RepoError::Serialization(e.to_string()))?;

        match body.into_result() {
            Ok(Some(data)) if status.is_success() => Ok(Some(data)),
            Ok(_) if status.is_success() => Err(RepoError::Serialization(
                "Response envelope carried no data".to_string(),
            )),
            Ok(_) => Err(RepoError::Query(format!("Unexpected status {}", status))),
            Err(message) => Err(match status {
                StatusCode::BAD_REQUEST => RepoError::Validation(message),
                StatusCode::UNAUTHORIZED => RepoError::Unauthorized,
                StatusCode::CONFLICT => RepoError::Conflict(message),
                StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                    RepoError::Connection(message)
                }
                _ => RepoError::Query(message),
            }),
        }
    }

    async fn send_required<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, RepoError> {
        self.send(req)
            .await?
            .ok_or_else(|| RepoError::Query("Endpoint not found".to_string()))
    }
}

#[async_trait]
impl PostStore for HttpPostStore {
    fn backend(&self) -> &'static str {
        "remote"
    }

    async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        let mut url = self.endpoint(&["posts"])?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(category) = &filter.category {
                query.append_pair("category", category.label());
            }
            if let Some(search) = &filter.search {
                query.append_pair("search", search);
            }
        }

        self.send_required(self.client.get(url)).await
    }

    async fn get_post(&self, id: &str) -> Result<Option<Post>, RepoError> {
        let url = self.endpoint(&["posts", id])?;
        self.send(self.client.get(url)).await
    }

    async fn create_post(&self, input: NewPost) -> Result<Post, RepoError> {
        let req = self.client.post(self.endpoint(&["posts"])?).json(&input);
        self.send_required(self.authorized(req)).await
    }

    async fn update_post(&self, id: &str, update: PostUpdate) -> Result<Option<Post>, RepoError> {
        let req = self.client.put(self.endpoint(&["posts", id])?).json(&update);
        self.send(self.authorized(req)).await
    }

    async fn delete_post(&self, id: &str) -> Result<bool, RepoError> {
        let req = self.client.delete(self.endpoint(&["posts", id])?);
        let deleted: Option<DeletedResponse> = self.send(self.authorized(req)).await?;
        Ok(deleted.is_some())
    }

    async fn increment_likes(&self, id: &str) -> Result<Option<Post>, RepoError> {
        let url = self.endpoint(&["posts", id, "like"])?;
        self.send(self.client.post(url)).await
    }

    async fn add_comment(
        &self,
        id: &str,
        comment: NewComment,
    ) -> Result<Option<Post>, RepoError> {
        let body = CommentRequest {
            content: Some(comment.content),
            author: Some(comment.author),
        };
        let url = self.endpoint(&["posts", id, "comments"])?;
        self.send(self.client.post(url).json(&body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_keeps_base_path_and_encodes_ids() {
        let store = HttpPostStore::new(RemoteConfig::new("http://localhost:8080/blog/api")).unwrap();

        let url = store.endpoint(&["posts", "a b/c", "like"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/blog/api/posts/a%20b%2Fc/like"
        );
    }

    #[test]
    fn test_rejects_non_base_url() {
        assert!(HttpPostStore::new(RemoteConfig::new("mailto:someone@example.com")).is_err());
        assert!(HttpPostStore::new(RemoteConfig::new("not a url")).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_connection_error() {
        let mut config = RemoteConfig::new("http://127.0.0.1:9/api");
        config.timeout = Duration::from_secs(2);
        let store = HttpPostStore::new(config).unwrap();

        assert!(matches!(
            store.get_post("p1").await,
            Err(RepoError::Connection(_))
        ));
    }
}
