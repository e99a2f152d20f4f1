use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::RemoteError;
use crate::model::{ColorCandidate, ColorEntry, ColorId};

/// CRUD access to the remote color collection.
///
/// Every call is a single round trip. Implementations never retry.
#[async_trait]
pub trait RemoteColorService: Send + Sync {
    /// Fetch the whole collection in remote order.
    async fn list(&self) -> Result<Vec<ColorEntry>, RemoteError>;

    async fn get(&self, id: &ColorId) -> Result<ColorEntry, RemoteError>;

    /// Create a color; the remote assigns its id.
    async fn create(
        &self,
        candidate: &ColorCandidate,
    ) -> Result<ColorEntry, RemoteError>;

    async fn update(
        &self,
        id: &ColorId,
        candidate: &ColorCandidate,
    ) -> Result<ColorEntry, RemoteError>;

    async fn delete(&self, id: &ColorId) -> Result<(), RemoteError>;
}

#[async_trait]
impl<T: RemoteColorService + ?Sized> RemoteColorService for Arc<T> {
    async fn list(&self) -> Result<Vec<ColorEntry>, RemoteError> {
        (**self).list().await
    }

    async fn get(&self, id: &ColorId) -> Result<ColorEntry, RemoteError> {
        (**self).get(id).await
    }

    async fn create(
        &self,
        candidate: &ColorCandidate,
    ) -> Result<ColorEntry, RemoteError> {
        (**self).create(candidate).await
    }

    async fn update(
        &self,
        id: &ColorId,
        candidate: &ColorCandidate,
    ) -> Result<ColorEntry, RemoteError> {
        (**self).update(id, candidate).await
    }

    async fn delete(&self, id: &ColorId) -> Result<(), RemoteError> {
        (**self).delete(id).await
    }
}
