//! # Generic Actor Store
//!
//! This module defines the `ResourceActor`, an in-memory table that owns its rows and
//! processes requests sequentially. It is the "server" half of the actor; the
//! [`ResourceClient`] is the handle everyone else holds.

use crate::client::ResourceClient;
use crate::error::StoreError;
use crate::message::ResourceRequest;
use crate::record::{CreateContext, Record};
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that owns a table of records.
///
/// # Concurrency Model
/// Each actor processes its own messages *sequentially* in a loop, so the table needs no
/// `Mutex` or `RwLock`. Many requests can hold clients and await concurrently; the mailbox
/// serialises their access to the rows, the way a connection pool serialises access to a
/// database session.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (handle).
/// 2.  **Run**: Spawn `actor.run()` in a background task.
/// 3.  **Share**: Clone the client (or wrap it in an `Arc<dyn RecordStore<T>>`) and hand it to
///     whoever needs the table.
///
/// ```rust
/// use record_actor::{CreateContext, Record, RecordStore, ResourceActor};
///
/// #[derive(Clone, Debug)] struct Note { id: u32, text: String }
/// #[derive(Debug)] struct NoteCreate { text: String }
/// #[derive(Debug)] struct NoteUpdate { text: String }
/// #[derive(Debug, thiserror::Error)] #[error("text is required")] struct NoteError;
///
/// impl Record for Note {
///     type Id = u32;
///     type Create = NoteCreate;
///     type Update = NoteUpdate;
///     type Error = NoteError;
///
///     fn from_create_params(id: u32, p: NoteCreate, _: &mut CreateContext<'_>) -> Result<Self, NoteError> {
///         if p.text.is_empty() { return Err(NoteError); }
///         Ok(Self { id, text: p.text })
///     }
///     fn on_update(&mut self, u: NoteUpdate, _: chrono::DateTime<chrono::Utc>) -> Result<(), NoteError> {
///         self.text = u.text;
///         Ok(())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Note>::new(10);
///     tokio::spawn(actor.run());
///
///     let note = client.create(NoteCreate { text: "hello".into() }).await.unwrap();
///     assert_eq!(note.id, 1);
/// }
/// ```
///
/// # Operations
///
/// * **Create**: takes the next ID from the counter (gaps are left by failed creates, like a
///   database sequence), builds the row through [`Record::from_create_params`], checks the
///   unique key, inserts, and returns the full row.
/// * **Get**: clones the row if present.
/// * **List**: clones every row in ID order.
/// * **Update**: applies [`Record::on_update`] to a copy, checks the unique key, and only then
///   replaces the stored row, so a failed update leaves nothing half-written.
/// * **Delete**: removes the row and releases its unique key.
pub struct ResourceActor<T: Record> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    unique: HashMap<String, T::Id>,
    next_id: u32,
    next_child_id: u32,
}

impl<T: Record> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            unique: HashMap::new(),
            next_id: 1,
            next_child_id: 1,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "User" instead of "cafe_services::model::user::User")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params);
                    match &result {
                        Ok(_) => info!(entity_type, size = self.store.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(&id, update);
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    match self.store.remove(&id) {
                        Some(item) => {
                            if let Some(key) = item.unique_key() {
                                self.unique.remove(&key);
                            }
                            info!(entity_type, %id, size = self.store.len(), "Deleted");
                            let _ = respond_to.send(Ok(()));
                        }
                        None => {
                            warn!(entity_type, %id, "Not found");
                            let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        }
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    fn create(&mut self, params: T::Create) -> Result<T, StoreError> {
        let id = T::Id::from(self.next_id);
        self.next_id += 1;

        let mut ctx = CreateContext::new(Utc::now(), &mut self.next_child_id);
        let item = T::from_create_params(id.clone(), params, &mut ctx)
            .map_err(|e| StoreError::Validation(e.to_string()))?;

        if let Some(key) = item.unique_key() {
            if self.unique.contains_key(&key) {
                return Err(StoreError::Conflict(key));
            }
            self.unique.insert(key, id.clone());
        }
        self.store.insert(id, item.clone());
        Ok(item)
    }

    fn update(&mut self, id: &T::Id, update: T::Update) -> Result<T, StoreError> {
        let current = self
            .store
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let mut next = current.clone();
        next.on_update(update, Utc::now())
            .map_err(|e| StoreError::Validation(e.to_string()))?;

        let old_key = current.unique_key();
        let new_key = next.unique_key();
        if new_key != old_key {
            if let Some(key) = &new_key {
                if self.unique.get(key).is_some_and(|owner| owner != id) {
                    return Err(StoreError::Conflict(key.clone()));
                }
            }
            if let Some(key) = old_key {
                self.unique.remove(&key);
            }
            if let Some(key) = new_key {
                self.unique.insert(key, id.clone());
            }
        }

        self.store.insert(id.clone(), next.clone());
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RecordStore;
    use chrono::{DateTime, Utc};

    #[derive(Clone, Debug)]
    struct Account {
        id: u32,
        handle: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }

    #[derive(Debug)]
    struct Handle(String);

    #[derive(Debug, thiserror::Error)]
    #[error("handle is required")]
    struct AccountError;

    impl Record for Account {
        type Id = u32;
        type Create = Handle;
        type Update = Handle;
        type Error = AccountError;

        fn from_create_params(
            id: u32,
            params: Handle,
            ctx: &mut CreateContext<'_>,
        ) -> Result<Self, AccountError> {
            if params.0.is_empty() {
                return Err(AccountError);
            }
            Ok(Self {
                id,
                handle: params.0,
                created_at: ctx.now(),
                updated_at: ctx.now(),
            })
        }

        fn on_update(&mut self, update: Handle, now: DateTime<Utc>) -> Result<(), AccountError> {
            if update.0.is_empty() {
                return Err(AccountError);
            }
            self.handle = update.0;
            self.updated_at = now;
            Ok(())
        }

        fn unique_key(&self) -> Option<String> {
            Some(self.handle.clone())
        }
    }

    fn spawn_store() -> ResourceClient<Account> {
        let (actor, client) = ResourceActor::new(8);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_failed_create_still_consumes_an_id() {
        let client = spawn_store();

        let err = client.create(Handle(String::new())).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let account = client.create(Handle("ada".into())).await.unwrap();
        assert_eq!(account.id, 2);
        assert_eq!(account.created_at, account.updated_at);
    }

    #[tokio::test]
    async fn test_unique_key_is_enforced_on_create_and_update() {
        let client = spawn_store();
        client.create(Handle("ada".into())).await.unwrap();
        let grace = client.create(Handle("grace".into())).await.unwrap();

        let dup = client.create(Handle("ada".into())).await.unwrap_err();
        assert!(matches!(dup, StoreError::Conflict(key) if key == "ada"));

        let clash = client
            .update(grace.id, Handle("ada".into()))
            .await
            .unwrap_err();
        assert!(matches!(clash, StoreError::Conflict(_)));

        // The failed update left the row untouched.
        let stored = client.get(grace.id).await.unwrap().unwrap();
        assert_eq!(stored.handle, "grace");
    }

    #[tokio::test]
    async fn test_delete_releases_unique_key() {
        let client = spawn_store();
        let ada = client.create(Handle("ada".into())).await.unwrap();

        client.delete(ada.id).await.unwrap();
        assert!(client.get(ada.id).await.unwrap().is_none());

        let again = client.create(Handle("ada".into())).await.unwrap();
        assert_eq!(again.id, 2);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_row_report_not_found() {
        let client = spawn_store();

        let update = client.update(7, Handle("x".into())).await.unwrap_err();
        assert!(matches!(update, StoreError::NotFound(id) if id == "7"));

        let delete = client.delete(7).await.unwrap_err();
        assert!(matches!(delete, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at_only() {
        let client = spawn_store();
        let created = client.create(Handle("ada".into())).await.unwrap();

        let updated = client.update(created.id, Handle("lovelace".into())).await.unwrap();
        assert_eq!(updated.handle, "lovelace");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }
}
