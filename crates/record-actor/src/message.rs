//! # Generic Messages
//!
//! This module defines the generic message types used for communication between
//! the `ResourceClient` and `ResourceActor`.

use crate::error::StoreError;
use crate::record::Record;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants map one-to-one onto the operations of a relational table:
///
/// - **Create**: insert a row built from [`Record::Create`]; responds with the full row.
/// - **Get**: fetch a row by ID; `None` when absent.
/// - **List**: every live row, ordered by ID.
/// - **Update**: overwrite a row with [`Record::Update`]; `NotFound` when absent.
/// - **Delete**: remove a row; `NotFound` when zero rows matched.
#[derive(Debug)]
pub enum ResourceRequest<T: Record> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}
