use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::api::error::ApiError;
use crate::api::types::{Post, PostCreate, User, UserCreate, UserPost};
use crate::config::Config;

/// Typed client for the remote record service.
///
/// Issues exactly one outbound HTTP request per call. No retries, no caching,
/// no request coalescing — retry policy, if any, belongs to the caller.
///
/// Cloning is cheap (the underlying `reqwest::Client` is reference-counted),
/// so one client value built at startup can be handed to every store.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The base URL requests are issued against, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Checks status and decodes the JSON body.
    async fn expect_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
            });
        }
        resp.json().await.map_err(ApiError::network)
    }

    /// Checks status and discards the body.
    fn expect_ok(resp: &Response) -> Result<(), ApiError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    // User endpoints

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let resp = self
            .http
            .get(self.url("/users/"))
            .send()
            .await
            .map_err(ApiError::network)?;
        Self::expect_json(resp).await
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User, ApiError> {
        let resp = self
            .http
            .get(self.url(&format!("/users/{user_id}")))
            .send()
            .await
            .map_err(ApiError::network)?;
        Self::expect_json(resp).await
    }

    pub async fn create_user(&self, input: &UserCreate) -> Result<User, ApiError> {
        let resp = self
            .http
            .post(self.url("/users/"))
            .json(input)
            .send()
            .await
            .map_err(ApiError::network)?;
        Self::expect_json(resp).await
    }

    pub async fn update_user(&self, user_id: &str, input: &UserCreate) -> Result<User, ApiError> {
        let resp = self
            .http
            .put(self.url(&format!("/users/{user_id}")))
            .json(input)
            .send()
            .await
            .map_err(ApiError::network)?;
        Self::expect_json(resp).await
    }

    /// Deletes a user. The server cascades deletion to the user's posts;
    /// callers holding a post cache must refresh it themselves.
    pub async fn delete_user(&self, user_id: &str) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(self.url(&format!("/users/{user_id}")))
            .send()
            .await
            .map_err(ApiError::network)?;
        Self::expect_ok(&resp)
    }

    // Post endpoints

    pub async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        let resp = self
            .http
            .get(self.url("/posts/"))
            .send()
            .await
            .map_err(ApiError::network)?;
        Self::expect_json(resp).await
    }

    pub async fn user_posts(&self, user_id: &str) -> Result<Vec<UserPost>, ApiError> {
        let resp = self
            .http
            .get(self.url(&format!("/users/{user_id}/posts")))
            .send()
            .await
            .map_err(ApiError::network)?;
        Self::expect_json(resp).await
    }

    pub async fn create_post(&self, input: &PostCreate) -> Result<Post, ApiError> {
        let resp = self
            .http
            .post(self.url("/posts/"))
            .json(input)
            .send()
            .await
            .map_err(ApiError::network)?;
        Self::expect_json(resp).await
    }

    /// Updates a post.
    ///
    /// The service takes the new title and content as URL-encoded query
    /// parameters with an empty JSON body. This wire shape is part of the
    /// service contract and must not be changed to a JSON body.
    pub async fn update_post(
        &self,
        post_id: &str,
        title: &str,
        content: &str,
    ) -> Result<Post, ApiError> {
        let resp = self
            .http
            .put(self.url(&format!("/posts/{post_id}")))
            .query(&[("title", title), ("content", content)])
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(ApiError::network)?;
        Self::expect_json(resp).await
    }

    pub async fn delete_post(&self, post_id: &str) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(self.url(&format!("/posts/{post_id}")))
            .send()
            .await
            .map_err(ApiError::network)?;
        Self::expect_ok(&resp)
    }

    /// Liveness probe against the service root.
    ///
    /// Returns `false` for transport failures instead of an error; this is a
    /// yes/no reachability check, not an operation that can meaningfully fail.
    pub async fn ping(&self) -> bool {
        match self.http.get(self.url("/")).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(err) => {
                tracing::debug!(error = %err, "liveness probe failed");
                false
            }
        }
    }
}
