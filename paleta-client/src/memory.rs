use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::errors::RemoteError;
use crate::model::{ColorCandidate, ColorEntry, ColorId};
use crate::service::RemoteColorService;

/// In-process [`RemoteColorService`] with sequential numeric ids.
///
/// Scripted failures queued with [`MemoryColorService::fail_next`] are
/// consumed one per call, before the call touches the collection.
#[derive(Debug, Default)]
pub struct MemoryColorService {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: Vec<ColorEntry>,
    next_id: u64,
    failures: VecDeque<RemoteError>,
    calls: usize,
}

impl MemoryColorService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the collection. New ids continue after the largest numeric id.
    pub fn with_entries(entries: Vec<ColorEntry>) -> Self {
        let next_id = entries
            .iter()
            .filter_map(|entry| match entry.id {
                ColorId::Number(id) => Some(id),
                ColorId::Text(_) => None,
            })
            .max()
            .unwrap_or(0);
        Self {
            state: Mutex::new(MemoryState {
                entries,
                next_id,
                ..MemoryState::default()
            }),
        }
    }

    /// Make the next call fail with `err`.
    pub fn fail_next(&self, err: RemoteError) {
        self.lock().failures.push_back(err);
    }

    /// Number of calls received so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.lock().calls
    }

    /// Snapshot of the remote collection.
    pub fn entries(&self) -> Vec<ColorEntry> {
        self.lock().entries.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin_call(&self) -> Result<MutexGuard<'_, MemoryState>, RemoteError> {
        let mut state = self.lock();
        state.calls += 1;
        match state.failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(state),
        }
    }
}

impl MemoryState {
    fn position(&self, id: &ColorId) -> Result<usize, RemoteError> {
        self.entries
            .iter()
            .position(|entry| &entry.id == id)
            .ok_or_else(|| {
                RemoteError::not_found(format!("color {id} not found"))
            })
    }
}

fn validate(candidate: &ColorCandidate) -> Result<(), RemoteError> {
    if candidate.has_name() {
        Ok(())
    } else {
        Err(RemoteError::rejected(400, "nombre is required"))
    }
}

#[async_trait]
impl RemoteColorService for MemoryColorService {
    async fn list(&self) -> Result<Vec<ColorEntry>, RemoteError> {
        let state = self.begin_call()?;
        Ok(state.entries.clone())
    }

    async fn get(&self, id: &ColorId) -> Result<ColorEntry, RemoteError> {
        let state = self.begin_call()?;
        let index = state.position(id)?;
        Ok(state.entries[index].clone())
    }

    async fn create(
        &self,
        candidate: &ColorCandidate,
    ) -> Result<ColorEntry, RemoteError> {
        let mut state = self.begin_call()?;
        validate(candidate)?;
        state.next_id += 1;
        let id = ColorId::Number(state.next_id);
        let entry = candidate.clone().into_entry(id);
        state.entries.push(entry.clone());
        Ok(entry)
    }

    async fn update(
        &self,
        id: &ColorId,
        candidate: &ColorCandidate,
    ) -> Result<ColorEntry, RemoteError> {
        let mut state = self.begin_call()?;
        let index = state.position(id)?;
        validate(candidate)?;
        let entry = candidate.clone().into_entry(id.clone());
        state.entries[index] = entry.clone();
        Ok(entry)
    }

    async fn delete(&self, id: &ColorId) -> Result<(), RemoteError> {
        let mut state = self.begin_call()?;
        let index = state.position(id)?;
        state.entries.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn given_empty_service_when_created_then_ids_start_at_one() {
        let service = MemoryColorService::new();

        let first = service
            .create(&ColorCandidate::new("Azul"))
            .await
            .expect("create should succeed");
        let second = service
            .create(&ColorCandidate::new("Rojo"))
            .await
            .expect("create should succeed");

        assert_eq!(first.id, ColorId::Number(1));
        assert_eq!(second.id, ColorId::Number(2));
        assert_eq!(service.entries().len(), 2);
    }

    #[tokio::test]
    async fn given_seeded_entries_when_created_then_ids_continue() {
        let service = MemoryColorService::with_entries(vec![
            ColorCandidate::new("Verde").into_entry(ColorId::Number(5)),
        ]);

        let entry = service
            .create(&ColorCandidate::new("Azul"))
            .await
            .expect("create should succeed");

        assert_eq!(entry.id, ColorId::Number(6));
    }

    #[tokio::test]
    async fn given_blank_name_when_created_then_rejected_with_bad_request() {
        let service = MemoryColorService::new();

        let err = service
            .create(&ColorCandidate::new("  "))
            .await
            .expect_err("blank name must be rejected");

        assert!(matches!(err, RemoteError::Rejected { status: 400, .. }));
        assert!(service.entries().is_empty());
    }

    #[tokio::test]
    async fn given_unknown_id_when_deleted_then_not_found() {
        let service = MemoryColorService::new();

        let err = service
            .delete(&ColorId::Number(9))
            .await
            .expect_err("missing id must fail");

        assert!(matches!(err, RemoteError::NotFound { .. }));
    }

    #[tokio::test]
    async fn given_scripted_failure_when_called_then_failure_is_consumed_once() {
        let service = MemoryColorService::new();
        service.fail_next(RemoteError::transport("offline"));

        assert_eq!(
            service.list().await,
            Err(RemoteError::transport("offline"))
        );
        assert_eq!(service.list().await, Ok(Vec::new()));
        assert_eq!(service.calls(), 2);
    }
}
