//! # Generic Client
//!
//! This module defines the generic client for communicating with a `ResourceActor`.

use crate::error::StoreError;
use crate::message::ResourceRequest;
use crate::record::Record;
use crate::store::RecordStore;
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

/// ## ResourceClient
///
/// The `ResourceClient<T>` is the handle to an in-memory table. It forwards requests over a
/// Tokio mpsc channel and receives results via oneshot channels. The client holds only a
/// sender, so cloning it is cheap and every clone talks to the same actor.
///
/// It implements [`RecordStore`], which is how services consume it.
pub struct ResourceClient<T: Record> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Record> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Record> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, StoreError>>) -> ResourceRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for ResourceClient<T> {
    async fn create(&self, params: T::Create) -> Result<T, StoreError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    async fn list(&self) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    async fn update(&self, id: T::Id, update: T::Update) -> Result<T, StoreError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }
}
