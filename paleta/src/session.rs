use paleta_client::{
    ColorCandidate, ColorEntry, ColorId, PLACEHOLDER_SWATCH,
    RemoteColorService,
};
use paleta_color::ColorResolver;

use crate::errors::PaletteError;
use crate::store::PaletteStore;

/// What the edit form is currently working on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SessionMode {
    Idle,
    Creating,
    Editing(ColorId),
}

/// Working copies of the form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Draft {
    pub(crate) name: String,
    pub(crate) hex: String,
    pub(crate) rgb: String,
}

impl Draft {
    fn from_entry(entry: &ColorEntry) -> Self {
        Self {
            name: entry.name.clone(),
            hex: entry.hex.clone().unwrap_or_default(),
            rgb: entry.rgb.clone().unwrap_or_default(),
        }
    }

    /// First non-blank of name, hex and rgb.
    pub(crate) fn final_name(&self) -> Option<&str> {
        first_filled([&self.name, &self.hex, &self.rgb])
    }

    /// Value used to paint the form preview.
    pub(crate) fn preview(&self) -> &str {
        first_filled([&self.hex, &self.rgb, &self.name])
            .unwrap_or(PLACEHOLDER_SWATCH)
    }

    fn candidate(&self) -> Option<ColorCandidate> {
        let name = self.final_name()?;
        Some(ColorCandidate::from_fields(name, &self.hex, &self.rgb))
    }
}

fn first_filled<const N: usize>(fields: [&String; N]) -> Option<&str> {
    fields
        .into_iter()
        .map(|field| field.trim())
        .find(|field| !field.is_empty())
}

/// Remote call an [`EditSession`] wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SubmitRequest {
    generation: u64,
    target: SubmitTarget,
    candidate: ColorCandidate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SubmitTarget {
    Create,
    Update(ColorId),
}

impl SubmitRequest {
    #[cfg(test)]
    pub(crate) fn target(&self) -> &SubmitTarget {
        &self.target
    }

    #[cfg(test)]
    pub(crate) fn candidate(&self) -> &ColorCandidate {
        &self.candidate
    }

    /// Run the request against the store.
    pub(crate) async fn send<S: RemoteColorService>(
        &self,
        store: &PaletteStore<S>,
    ) -> Result<ColorEntry, PaletteError> {
        match &self.target {
            SubmitTarget::Create => store.add(self.candidate.clone()).await,
            SubmitTarget::Update(id) => {
                store.update(id, self.candidate.clone()).await
            },
        }
    }
}

/// Add/edit workflow state for a single form.
///
/// Drafts only change through the `update_draft_*` methods, which keep the
/// naming rules of the form: a resolvable name overwrites hex and rgb, while
/// typing a code only backfills an empty name.
#[derive(Debug)]
pub(crate) struct EditSession {
    mode: SessionMode,
    draft: Draft,
    submitting: bool,
    generation: u64,
    resolver: ColorResolver,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(ColorResolver::standard())
    }
}

impl EditSession {
    pub(crate) fn new(resolver: ColorResolver) -> Self {
        Self {
            mode: SessionMode::Idle,
            draft: Draft::default(),
            submitting: false,
            generation: 0,
            resolver,
        }
    }

    pub(crate) fn mode(&self) -> &SessionMode {
        &self.mode
    }

    pub(crate) fn draft(&self) -> &Draft {
        &self.draft
    }

    #[cfg(test)]
    pub(crate) fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Return whether edit and delete actions must stay disabled.
    pub(crate) fn is_locked(&self) -> bool {
        self.mode != SessionMode::Idle || self.submitting
    }

    pub(crate) fn start_create(&mut self) -> Result<(), PaletteError> {
        self.ensure_idle()?;
        self.open(SessionMode::Creating, Draft::default());
        Ok(())
    }

    pub(crate) fn start_edit(
        &mut self,
        entry: &ColorEntry,
    ) -> Result<(), PaletteError> {
        self.ensure_idle()?;
        self.open(
            SessionMode::Editing(entry.id.clone()),
            Draft::from_entry(entry),
        );
        Ok(())
    }

    pub(crate) fn update_draft_name(
        &mut self,
        text: &str,
    ) -> Result<(), PaletteError> {
        self.ensure_open()?;
        self.draft.name = text.to_string();
        if let Some(resolution) = self.resolver.resolve(text) {
            self.draft.hex = resolution.hex;
            self.draft.rgb = resolution.rgb;
        }
        Ok(())
    }

    pub(crate) fn update_draft_hex(
        &mut self,
        text: &str,
    ) -> Result<(), PaletteError> {
        self.ensure_open()?;
        self.draft.hex = text.to_string();
        self.backfill_name(text);
        Ok(())
    }

    pub(crate) fn update_draft_rgb(
        &mut self,
        text: &str,
    ) -> Result<(), PaletteError> {
        self.ensure_open()?;
        self.draft.rgb = text.to_string();
        self.backfill_name(text);
        Ok(())
    }

    /// Submit the draft through the store and wait for the outcome.
    pub(crate) async fn submit<S: RemoteColorService>(
        &mut self,
        store: &PaletteStore<S>,
    ) -> Result<ColorEntry, PaletteError> {
        let request = self.begin_submit()?;
        let result = request.send(store).await;
        self.finish_submit(&request, result)
    }

    /// Validate the draft and mark the session as submitting.
    ///
    /// Nothing changes when validation fails.
    pub(crate) fn begin_submit(&mut self) -> Result<SubmitRequest, PaletteError> {
        let target = match &self.mode {
            SessionMode::Idle => return Err(PaletteError::NotEditing),
            SessionMode::Creating => SubmitTarget::Create,
            SessionMode::Editing(id) => SubmitTarget::Update(id.clone()),
        };
        if self.submitting {
            return Err(PaletteError::SubmitInFlight);
        }
        let candidate =
            self.draft.candidate().ok_or(PaletteError::NameRequired)?;

        self.submitting = true;
        Ok(SubmitRequest {
            generation: self.generation,
            target,
            candidate,
        })
    }

    /// Apply the outcome of a request issued by `begin_submit`.
    ///
    /// The result is handed back unchanged. If the session was cancelled
    /// or restarted after the request was issued, the session is left
    /// alone.
    pub(crate) fn finish_submit(
        &mut self,
        request: &SubmitRequest,
        result: Result<ColorEntry, PaletteError>,
    ) -> Result<ColorEntry, PaletteError> {
        if request.generation != self.generation {
            log::debug!("ignoring late submit result for a closed session");
            return result;
        }

        self.submitting = false;
        if result.is_ok() {
            self.close();
        }
        result
    }

    /// Drop the drafts and return to idle. A request already sent keeps
    /// running; its result will no longer touch the session.
    pub(crate) fn cancel(&mut self) -> Result<(), PaletteError> {
        if self.mode == SessionMode::Idle {
            return Err(PaletteError::NotEditing);
        }
        self.close();
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), PaletteError> {
        if self.is_locked() {
            Err(PaletteError::SessionBusy)
        } else {
            Ok(())
        }
    }

    fn ensure_open(&self) -> Result<(), PaletteError> {
        match self.mode {
            SessionMode::Idle => Err(PaletteError::NotEditing),
            _ => Ok(()),
        }
    }

    fn backfill_name(&mut self, text: &str) {
        if self.draft.name.trim().is_empty() {
            self.draft.name = text.to_string();
        }
    }

    fn open(&mut self, mode: SessionMode, draft: Draft) {
        self.generation += 1;
        self.mode = mode;
        self.draft = draft;
        self.submitting = false;
    }

    fn close(&mut self) {
        self.open(SessionMode::Idle, Draft::default());
    }
}

#[cfg(test)]
mod tests {
    use paleta_client::{MemoryColorService, RemoteError};

    use super::*;

    fn creating() -> EditSession {
        let mut session = EditSession::default();
        session.start_create().expect("idle session should start");
        session
    }

    async fn store_with_azul() -> PaletteStore<MemoryColorService> {
        let store = PaletteStore::new(MemoryColorService::new());
        store
            .add(ColorCandidate::new("Azul").with_hex("#0000ff"))
            .await
            .expect("seed add should succeed");
        store
    }

    #[test]
    fn given_idle_session_when_create_started_then_drafts_are_empty() {
        let session = creating();

        assert_eq!(session.mode(), &SessionMode::Creating);
        assert_eq!(session.draft(), &Draft::default());
        assert!(session.is_locked());
    }

    #[test]
    fn given_open_session_when_another_start_requested_then_it_is_busy() {
        let mut session = creating();
        let entry = ColorCandidate::new("Rojo").into_entry(ColorId::Number(1));

        assert_eq!(session.start_create(), Err(PaletteError::SessionBusy));
        assert_eq!(session.start_edit(&entry), Err(PaletteError::SessionBusy));
        assert_eq!(session.mode(), &SessionMode::Creating);
    }

    #[test]
    fn given_entry_when_edit_started_then_fields_are_copied() {
        let mut session = EditSession::default();
        let entry = ColorCandidate::new("Azul")
            .with_hex("#0000ff")
            .into_entry(ColorId::Number(4));

        session.start_edit(&entry).expect("idle session should start");

        assert_eq!(session.mode(), &SessionMode::Editing(ColorId::Number(4)));
        assert_eq!(session.draft().name, "Azul");
        assert_eq!(session.draft().hex, "#0000ff");
        assert_eq!(session.draft().rgb, "");
    }

    #[test]
    fn given_typed_codes_when_name_resolves_then_codes_are_overwritten() {
        let mut session = creating();
        session.update_draft_hex("#123456").expect("open session");
        session.update_draft_rgb("rgb(1, 2, 3)").expect("open session");

        session.update_draft_name("red").expect("open session");

        assert_eq!(session.draft().name, "red");
        assert_eq!(session.draft().hex, "#ff0000");
        assert_eq!(session.draft().rgb, "rgb(255, 0, 0)");
    }

    #[test]
    fn given_unresolvable_name_when_typed_then_codes_are_kept() {
        let mut session = creating();
        session.update_draft_hex("#123456").expect("open session");

        session.update_draft_name("Cielo de tarde").expect("open session");

        assert_eq!(session.draft().name, "Cielo de tarde");
        assert_eq!(session.draft().hex, "#123456");
    }

    #[test]
    fn given_empty_name_when_code_typed_then_name_is_backfilled() {
        let mut session = creating();

        session.update_draft_hex("#00ff00").expect("open session");
        assert_eq!(session.draft().name, "#00ff00");

        session.update_draft_rgb("rgb(0, 255, 0)").expect("open session");
        assert_eq!(session.draft().name, "#00ff00");
        assert_eq!(session.draft().rgb, "rgb(0, 255, 0)");
    }

    #[test]
    fn given_idle_session_when_draft_changed_then_not_editing() {
        let mut session = EditSession::default();

        assert_eq!(
            session.update_draft_name("red"),
            Err(PaletteError::NotEditing)
        );
        assert_eq!(session.draft(), &Draft::default());
    }

    #[test]
    fn given_drafts_when_preview_requested_then_first_filled_field_wins() {
        let mut draft = Draft::default();
        assert_eq!(draft.preview(), PLACEHOLDER_SWATCH);

        draft.name = String::from("navy");
        assert_eq!(draft.preview(), "navy");

        draft.rgb = String::from("rgb(0, 0, 128)");
        assert_eq!(draft.preview(), "rgb(0, 0, 128)");

        draft.hex = String::from("#000080");
        assert_eq!(draft.preview(), "#000080");
    }

    #[tokio::test]
    async fn given_blank_drafts_when_submitted_then_validation_fails_locally() {
        let store = PaletteStore::new(MemoryColorService::new());
        let mut session = creating();
        session.update_draft_name("   ").expect("open session");

        let err = session.submit(&store).await.expect_err("must fail");

        assert_eq!(err, PaletteError::NameRequired);
        assert_eq!(store.service().calls(), 0);
        assert_eq!(session.mode(), &SessionMode::Creating);
        assert!(!session.is_submitting());
    }

    #[tokio::test]
    async fn given_code_only_draft_when_submitted_then_code_becomes_name() {
        let store = PaletteStore::new(MemoryColorService::new());
        let mut session = creating();
        session.update_draft_rgb(" rgb(1, 2, 3) ").expect("open session");
        session.draft.name.clear();

        let entry = session.submit(&store).await.expect("submit succeeds");

        assert_eq!(entry.name, "rgb(1, 2, 3)");
        assert_eq!(entry.hex, None);
        assert_eq!(entry.rgb.as_deref(), Some("rgb(1, 2, 3)"));
    }

    #[tokio::test]
    async fn given_creating_session_when_submitted_then_entry_is_added() {
        let store = PaletteStore::new(MemoryColorService::new());
        let mut session = creating();
        session.update_draft_name("teal").expect("open session");

        let entry = session.submit(&store).await.expect("submit succeeds");

        assert_eq!(entry.hex.as_deref(), Some("#008080"));
        assert_eq!(store.list(), vec![entry]);
        assert_eq!(session.mode(), &SessionMode::Idle);
        assert_eq!(session.draft(), &Draft::default());
        assert!(!session.is_locked());
    }

    #[tokio::test]
    async fn given_editing_session_when_submitted_then_entry_is_updated() {
        let store = store_with_azul().await;
        let mut session = EditSession::default();
        let entry = store.get(&ColorId::Number(1)).expect("seeded entry");
        session.start_edit(&entry).expect("idle session should start");
        session.update_draft_name("navy").expect("open session");

        session.submit(&store).await.expect("submit succeeds");

        let updated = store.get(&ColorId::Number(1)).expect("still present");
        assert_eq!(updated.name, "navy");
        assert_eq!(updated.hex.as_deref(), Some("#000080"));
        assert_eq!(updated.rgb.as_deref(), Some("rgb(0, 0, 128)"));
    }

    #[tokio::test]
    async fn given_remote_failure_when_submitted_then_drafts_are_kept() {
        let store = store_with_azul().await;
        let mut session = creating();
        session.update_draft_name("Rojo").expect("open session");
        store
            .service()
            .fail_next(RemoteError::rejected(422, "nombre duplicado"));

        let err = session.submit(&store).await.expect_err("must fail");

        assert_eq!(err.to_string(), "nombre duplicado");
        assert_eq!(session.mode(), &SessionMode::Creating);
        assert_eq!(session.draft().name, "Rojo");
        assert!(!session.is_submitting());
        assert_eq!(store.len(), 1);

        session.submit(&store).await.expect("retry succeeds");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn given_pending_submit_when_submitted_again_then_in_flight_error() {
        let mut session = creating();
        session.update_draft_name("Rojo").expect("open session");

        let request = session.begin_submit().expect("first submit starts");

        assert_eq!(request.target(), &SubmitTarget::Create);
        assert_eq!(request.candidate().name, "Rojo");
        assert!(session.is_submitting());
        assert_eq!(session.begin_submit(), Err(PaletteError::SubmitInFlight));
    }

    #[test]
    fn given_idle_session_when_submitted_or_cancelled_then_not_editing() {
        let mut session = EditSession::default();

        assert_eq!(session.begin_submit(), Err(PaletteError::NotEditing));
        assert_eq!(session.cancel(), Err(PaletteError::NotEditing));
    }

    #[tokio::test]
    async fn given_cancel_during_submit_when_result_arrives_then_it_is_ignored()
    {
        let store = PaletteStore::new(MemoryColorService::new());
        let mut session = creating();
        session.update_draft_name("Rojo").expect("open session");
        let request = session.begin_submit().expect("submit starts");

        session.cancel().expect("open session can be cancelled");
        session.start_create().expect("idle session should start");
        session.update_draft_name("Verde").expect("open session");
        let result = request.send(&store).await;
        let entry = session
            .finish_submit(&request, result)
            .expect("late result is still reported");

        assert_eq!(entry.name, "Rojo");
        assert_eq!(store.len(), 1);
        assert_eq!(session.mode(), &SessionMode::Creating);
        assert_eq!(session.draft().name, "Verde");
    }
}
