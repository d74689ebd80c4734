use serde::{Deserialize, Serialize};

/// A user record as returned by the remote service.
///
/// `id` and `created_at` are server-assigned and never sent by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: i64,
    pub created_at: String,
}

/// A post record as returned by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
}

/// Request body for creating a user.
///
/// The service reuses this shape as the PUT body for a full-record update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// Request body for creating a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostCreate {
    pub user_id: String,
    pub title: String,
    pub content: String,
}

/// A post as returned by `GET /users/{id}/posts`.
///
/// The per-user listing omits `user_id` (it is implied by the path).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPost {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
}
