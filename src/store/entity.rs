use async_trait::async_trait;

use crate::api::{ApiClient, ApiError, Post, PostCreate, User, UserCreate};
use crate::store::error::EntityKind;

/// A record kind a [`Store`](crate::store::Store) can manage.
///
/// Binds the entity to its create/patch input types and dispatches each store
/// command to the matching remote endpoint.
#[async_trait]
pub trait Entity: Clone + Send + Sync + 'static {
    /// Input for creating a record; excludes server-assigned fields.
    type Create: Send + Sync;
    /// Input for updating a record.
    type Patch: Send + Sync;

    const KIND: EntityKind;

    fn id(&self) -> &str;

    async fn list_all(client: &ApiClient) -> Result<Vec<Self>, ApiError>;
    async fn create(client: &ApiClient, input: &Self::Create) -> Result<Self, ApiError>;
    async fn update(client: &ApiClient, id: &str, patch: &Self::Patch) -> Result<Self, ApiError>;
    async fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError>;
}

/// Patch for a post update: title and content only, `user_id` is immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct PostPatch {
    pub title: String,
    pub content: String,
}

#[async_trait]
impl Entity for User {
    type Create = UserCreate;
    // The service takes a full field set on PUT, so the create shape doubles
    // as the patch.
    type Patch = UserCreate;

    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> &str {
        &self.id
    }

    async fn list_all(client: &ApiClient) -> Result<Vec<Self>, ApiError> {
        client.list_users().await
    }

    async fn create(client: &ApiClient, input: &Self::Create) -> Result<Self, ApiError> {
        client.create_user(input).await
    }

    async fn update(client: &ApiClient, id: &str, patch: &Self::Patch) -> Result<Self, ApiError> {
        client.update_user(id, patch).await
    }

    async fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
        client.delete_user(id).await
    }
}

#[async_trait]
impl Entity for Post {
    type Create = PostCreate;
    type Patch = PostPatch;

    const KIND: EntityKind = EntityKind::Post;

    fn id(&self) -> &str {
        &self.id
    }

    async fn list_all(client: &ApiClient) -> Result<Vec<Self>, ApiError> {
        client.list_posts().await
    }

    async fn create(client: &ApiClient, input: &Self::Create) -> Result<Self, ApiError> {
        client.create_post(input).await
    }

    async fn update(client: &ApiClient, id: &str, patch: &Self::Patch) -> Result<Self, ApiError> {
        client.update_post(id, &patch.title, &patch.content).await
    }

    async fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
        client.delete_post(id).await
    }
}
