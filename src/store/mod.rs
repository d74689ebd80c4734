//! Per-entity in-memory caches with a command surface.
//!
//! One [`Store`] instance exists per entity kind (users, posts). The store
//! owns the authoritative client-side cache: presentation code reads
//! snapshots and routes every mutation through the store's commands, never
//! touching records directly. Each successful mutation updates the cache and
//! synchronously notifies registered subscribers; a failed command leaves the
//! cache exactly as it was.

pub mod entity;
pub mod error;

use std::sync::{Arc, RwLock};

pub use entity::{Entity, PostPatch};
pub use error::{EntityKind, Failure, StoreError, StoreOp};

use crate::api::ApiClient;

/// Externally observable store state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreStatus {
    Idle,
    /// A refresh is in flight. Collaborators are expected to gate conflicting
    /// UI affordances on this; the store itself does not serialize commands.
    Loading,
    /// The most recent failed command.
    Error(StoreError),
}

/// Handle for removing a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u64);

type Subscriber<E> = Arc<dyn Fn(&[E]) + Send + Sync>;

struct Inner<E> {
    records: Vec<E>,
    status: StoreStatus,
    subscribers: Vec<(SubscriberId, Subscriber<E>)>,
    next_subscriber: u64,
}

/// In-memory cache of one entity kind plus its command surface.
///
/// Cloning yields a cheap handle over the same shared state; the internal
/// lock is never held across an await point.
#[derive(Clone)]
pub struct Store<E: Entity> {
    client: ApiClient,
    inner: Arc<RwLock<Inner<E>>>,
}

impl<E: Entity> Store<E> {
    /// Creates an empty store backed by the given client.
    ///
    /// The client is constructed once at application start and handed to each
    /// store — no global singleton.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            inner: Arc::new(RwLock::new(Inner {
                records: Vec::new(),
                status: StoreStatus::Idle,
                subscribers: Vec::new(),
                next_subscriber: 0,
            })),
        }
    }

    /// A read-only copy of the current record sequence.
    ///
    /// Order is the server's response order from the last refresh, with
    /// subsequently created records appended.
    pub fn snapshot(&self) -> Vec<E> {
        self.inner
            .read()
            .expect("store lock poisoned")
            .records
            .clone()
    }

    /// The current status.
    pub fn status(&self) -> StoreStatus {
        self.inner
            .read()
            .expect("store lock poisoned")
            .status
            .clone()
    }

    /// Number of cached records.
    pub fn len(&self) -> usize {
        self.inner.read().expect("store lock poisoned").records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Re-fetches the full collection and replaces the cache wholesale.
    ///
    /// On failure the cache is left untouched and `status` records the error.
    ///
    /// Overlapping refreshes are not serialized: the most recently *resolving*
    /// call wins and overwrites `records`, regardless of call order. Callers
    /// needing strict ordering must await each refresh before issuing the
    /// next.
    pub async fn refresh(&self) -> Result<(), StoreError> {
        self.set_status(StoreStatus::Loading);

        match E::list_all(&self.client).await {
            Ok(records) => {
                let count = records.len();
                {
                    let mut inner = self.inner.write().expect("store lock poisoned");
                    inner.records = records;
                    inner.status = StoreStatus::Idle;
                }
                tracing::debug!(entity = %E::KIND, count, "store refreshed");
                self.notify();
                Ok(())
            }
            Err(err) => Err(self.fail(StoreOp::Refresh, &err)),
        }
    }

    /// Creates a record remotely and appends the server's version to the
    /// cache. Returns the new record; no full refresh is needed.
    pub async fn create(&self, input: &E::Create) -> Result<E, StoreError> {
        match E::create(&self.client, input).await {
            Ok(record) => {
                {
                    let mut inner = self.inner.write().expect("store lock poisoned");
                    inner.records.push(record.clone());
                    inner.status = StoreStatus::Idle;
                }
                tracing::info!(entity = %E::KIND, id = record.id(), "record created");
                self.notify();
                Ok(record)
            }
            Err(err) => Err(self.fail(StoreOp::Create, &err)),
        }
    }

    /// Updates a record remotely and replaces the cached copy (matched by
    /// id). If no cached record matches — which should not occur — the
    /// server's version is appended instead of being dropped.
    pub async fn update(&self, id: &str, patch: &E::Patch) -> Result<E, StoreError> {
        match E::update(&self.client, id, patch).await {
            Ok(record) => {
                {
                    let mut inner = self.inner.write().expect("store lock poisoned");
                    match inner.records.iter_mut().find(|r| r.id() == record.id()) {
                        Some(slot) => *slot = record.clone(),
                        None => inner.records.push(record.clone()),
                    }
                    inner.status = StoreStatus::Idle;
                }
                tracing::info!(entity = %E::KIND, id, "record updated");
                self.notify();
                Ok(record)
            }
            Err(err) => Err(self.fail(StoreOp::Update, &err)),
        }
    }

    /// Deletes a record remotely and removes it from the cache.
    ///
    /// Deleting a user cascades to that user's posts server-side; the post
    /// store does not learn about this automatically. The caller must refresh
    /// the post store afterwards.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        match E::delete(&self.client, id).await {
            Ok(()) => {
                {
                    let mut inner = self.inner.write().expect("store lock poisoned");
                    inner.records.retain(|r| r.id() != id);
                    inner.status = StoreStatus::Idle;
                }
                tracing::info!(entity = %E::KIND, id, "record deleted");
                self.notify();
                Ok(())
            }
            Err(err) => Err(self.fail(StoreOp::Delete, &err)),
        }
    }

    /// Registers a listener called synchronously with a fresh snapshot after
    /// every successful cache change.
    pub fn subscribe<F>(&self, f: F) -> SubscriberId
    where
        F: Fn(&[E]) + Send + Sync + 'static,
    {
        let mut inner = self.inner.write().expect("store lock poisoned");
        let id = SubscriberId(inner.next_subscriber);
        inner.next_subscriber += 1;
        inner.subscribers.push((id, Arc::new(f)));
        id
    }

    /// Removes a listener. Returns `false` if the id was already removed.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut inner = self.inner.write().expect("store lock poisoned");
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(sid, _)| *sid != id);
        inner.subscribers.len() != before
    }

    fn set_status(&self, status: StoreStatus) {
        self.inner.write().expect("store lock poisoned").status = status;
    }

    fn fail(&self, op: StoreOp, err: &crate::api::ApiError) -> StoreError {
        tracing::warn!(entity = %E::KIND, %op, error = %err, "store command failed");
        let store_err = StoreError::new(E::KIND, op, err);
        self.set_status(StoreStatus::Error(store_err.clone()));
        store_err
    }

    /// Invokes subscribers outside the lock so a listener may read the store.
    fn notify(&self) {
        let (records, subscribers) = {
            let inner = self.inner.read().expect("store lock poisoned");
            (
                inner.records.clone(),
                inner
                    .subscribers
                    .iter()
                    .map(|(_, f)| Arc::clone(f))
                    .collect::<Vec<_>>(),
            )
        };
        for subscriber in subscribers {
            subscriber(&records);
        }
    }
}
