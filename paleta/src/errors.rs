use paleta_client::{ColorId, RemoteError};
use thiserror::Error;

/// Errors surfaced by the palette store and the edit session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum PaletteError {
    #[error("Name is required.")]
    NameRequired,
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("Color {id} is not in the palette.")]
    NotFound { id: ColorId },
    #[error("Another color is being edited.")]
    SessionBusy,
    #[error("No color is being edited.")]
    NotEditing,
    #[error("A save is already in progress.")]
    SubmitInFlight,
}

/// Coarse classification shown to the user alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorKind {
    Validation,
    Transport,
    RemoteRejection,
    NotFound,
}

impl PaletteError {
    pub(crate) fn kind(&self) -> ErrorKind {
        match self {
            Self::NameRequired
            | Self::SessionBusy
            | Self::NotEditing
            | Self::SubmitInFlight => ErrorKind::Validation,
            Self::Remote(RemoteError::Transport { .. }) => ErrorKind::Transport,
            Self::Remote(RemoteError::Rejected { .. }) => {
                ErrorKind::RemoteRejection
            },
            Self::Remote(RemoteError::NotFound { .. })
            | Self::NotFound { .. } => ErrorKind::NotFound,
        }
    }
}
