use std::fmt;

use thiserror::Error;

use crate::api::ApiError;

/// The entity kind a store manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Post,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::User => write!(f, "user"),
            EntityKind::Post => write!(f, "post"),
        }
    }
}

/// The store command that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Refresh,
    Create,
    Update,
    Delete,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreOp::Refresh => write!(f, "refresh"),
            StoreOp::Create => write!(f, "create"),
            StoreOp::Update => write!(f, "update"),
            StoreOp::Delete => write!(f, "delete"),
        }
    }
}

/// Why the remote call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// The request never completed (connection, DNS, timeout, decode).
    Network,
    /// The server answered with a non-2xx status.
    Server(u16),
}

/// A failed store command.
///
/// Identifies the entity kind and operation that failed, plus a cloneable
/// summary of the underlying [`ApiError`]. The full source error is logged at
/// the point of conversion; this value is what lives in `StoreStatus::Error`
/// and what callers receive for one-shot handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entity} {op} failed: {message}")]
pub struct StoreError {
    pub entity: EntityKind,
    pub op: StoreOp,
    pub failure: Failure,
    pub message: String,
}

impl StoreError {
    pub(crate) fn new(entity: EntityKind, op: StoreOp, err: &ApiError) -> Self {
        let failure = match err {
            ApiError::Network { .. } => Failure::Network,
            ApiError::Server { status } => Failure::Server(*status),
        };
        Self {
            entity,
            op,
            failure,
            message: err.to_string(),
        }
    }
}
