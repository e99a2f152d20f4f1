use std::cell::RefCell;

use paleta_client::{
    ColorCandidate, ColorEntry, ColorId, RemoteColorService, RemoteError,
};

use crate::errors::PaletteError;

/// Progress of the most recent `load`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LoadStatus {
    NotLoaded,
    Loading,
    Loaded,
    LoadFailed(String),
}

/// What became of a `load` call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoadOutcome {
    /// The mirror was replaced with this many entries.
    Loaded { count: usize },
    /// A newer `load` was issued while this one was in flight, so its
    /// response was dropped.
    Superseded,
}

/// In-memory mirror of the remote color collection.
///
/// Every mutation is one round trip and the mirror only changes after the
/// remote confirms it. State is never borrowed across an `.await`, so
/// several store futures may be polled concurrently on one thread.
#[derive(Debug)]
pub(crate) struct PaletteStore<S> {
    service: S,
    state: RefCell<StoreState>,
}

#[derive(Debug)]
struct StoreState {
    entries: Vec<ColorEntry>,
    status: LoadStatus,
    latest_load: u64,
}

impl<S: RemoteColorService> PaletteStore<S> {
    pub(crate) fn new(service: S) -> Self {
        Self {
            service,
            state: RefCell::new(StoreState {
                entries: Vec::new(),
                status: LoadStatus::NotLoaded,
                latest_load: 0,
            }),
        }
    }

    /// Return the mirrored entries in remote order.
    pub(crate) fn list(&self) -> Vec<ColorEntry> {
        self.state.borrow().entries.clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    pub(crate) fn get(&self, id: &ColorId) -> Option<ColorEntry> {
        self.state
            .borrow()
            .entries
            .iter()
            .find(|entry| &entry.id == id)
            .cloned()
    }

    pub(crate) fn status(&self) -> LoadStatus {
        self.state.borrow().status.clone()
    }

    #[cfg(test)]
    pub(crate) fn service(&self) -> &S {
        &self.service
    }

    /// Replace the mirror with the remote collection.
    ///
    /// Only the newest call may touch the mirror; responses to calls
    /// superseded in the meantime are dropped.
    pub(crate) async fn load(&self) -> Result<LoadOutcome, PaletteError> {
        let ticket = self.begin_load();
        let result = self.service.list().await;
        self.finish_load(ticket, result)
    }

    fn begin_load(&self) -> u64 {
        let mut state = self.state.borrow_mut();
        state.latest_load += 1;
        state.status = LoadStatus::Loading;
        state.latest_load
    }

    fn finish_load(
        &self,
        ticket: u64,
        result: Result<Vec<ColorEntry>, RemoteError>,
    ) -> Result<LoadOutcome, PaletteError> {
        let mut state = self.state.borrow_mut();
        if ticket != state.latest_load {
            match &result {
                Ok(entries) => log::warn!(
                    "discarding stale palette load #{ticket} ({} entries)",
                    entries.len()
                ),
                Err(err) => {
                    log::warn!("discarding stale palette load #{ticket}: {err}")
                },
            }
            return Ok(LoadOutcome::Superseded);
        }

        match result {
            Ok(entries) => {
                let count = entries.len();
                state.entries = entries;
                state.status = LoadStatus::Loaded;
                log::info!("palette loaded with {count} colors");
                Ok(LoadOutcome::Loaded { count })
            },
            Err(err) => {
                log::warn!("palette load failed: {err}");
                state.status = LoadStatus::LoadFailed(err.to_string());
                Err(err.into())
            },
        }
    }

    /// Create a color remotely and append the confirmed entry.
    pub(crate) async fn add(
        &self,
        candidate: ColorCandidate,
    ) -> Result<ColorEntry, PaletteError> {
        ensure_named(&candidate)?;

        let entry = self.service.create(&candidate).await.map_err(|err| {
            log::warn!("create color {:?} failed: {err}", candidate.name);
            PaletteError::from(err)
        })?;

        log::info!("color {} created", entry.id);
        self.state.borrow_mut().entries.push(entry.clone());
        Ok(entry)
    }

    /// Update a mirrored color remotely and replace it in place.
    pub(crate) async fn update(
        &self,
        id: &ColorId,
        candidate: ColorCandidate,
    ) -> Result<ColorEntry, PaletteError> {
        ensure_named(&candidate)?;
        if self.position(id).is_none() {
            return Err(PaletteError::NotFound { id: id.clone() });
        }

        let entry =
            self.service.update(id, &candidate).await.map_err(|err| {
                log::warn!("update color {id} failed: {err}");
                PaletteError::from(err)
            })?;

        log::info!("color {id} updated");
        self.replace(id, entry.clone());
        Ok(entry)
    }

    /// Delete a color remotely and drop it from the mirror.
    pub(crate) async fn remove(&self, id: &ColorId) -> Result<(), PaletteError> {
        self.service.delete(id).await.map_err(|err| {
            log::warn!("delete color {id} failed: {err}");
            PaletteError::from(err)
        })?;

        log::info!("color {id} deleted");
        if let Some(index) = self.position(id) {
            self.state.borrow_mut().entries.remove(index);
        }
        Ok(())
    }

    /// Fetch a single color and replace its mirrored copy.
    pub(crate) async fn refresh(
        &self,
        id: &ColorId,
    ) -> Result<ColorEntry, PaletteError> {
        let entry = self.service.get(id).await.map_err(|err| {
            log::warn!("fetch color {id} failed: {err}");
            PaletteError::from(err)
        })?;

        self.replace(id, entry.clone());
        Ok(entry)
    }

    fn position(&self, id: &ColorId) -> Option<usize> {
        self.state
            .borrow()
            .entries
            .iter()
            .position(|entry| &entry.id == id)
    }

    fn replace(&self, id: &ColorId, entry: ColorEntry) {
        let mut state = self.state.borrow_mut();
        match state.entries.iter_mut().find(|current| &current.id == id) {
            Some(current) => *current = entry,
            None => log::debug!("color {id} left the palette meanwhile"),
        }
    }
}

fn ensure_named(candidate: &ColorCandidate) -> Result<(), PaletteError> {
    if candidate.has_name() {
        Ok(())
    } else {
        Err(PaletteError::NameRequired)
    }
}
