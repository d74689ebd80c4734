pub mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{Post, PostCreate, User, UserCreate, UserPost};
