use std::io;

use paleta_client::{ColorEntry, ColorId, RemoteColorService};
use paleta_color::ColorResolver;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::command::{HELP, ShellCommand};
use crate::errors::{ErrorKind, PaletteError};
use crate::session::{EditSession, SessionMode};
use crate::store::{LoadOutcome, LoadStatus, PaletteStore};

/// Result of handling one prompt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    Continue(String),
    Quit,
}

/// Interactive host for the palette store and its edit session.
pub(crate) struct Shell<S> {
    store: PaletteStore<S>,
    session: EditSession,
    resolver: ColorResolver,
    pending_delete: Option<ColorId>,
}

impl<S: RemoteColorService> Shell<S> {
    pub(crate) fn new(service: S) -> Self {
        Self {
            store: PaletteStore::new(service),
            session: EditSession::default(),
            resolver: ColorResolver::standard(),
            pending_delete: None,
        }
    }

    /// Perform the startup load and describe its outcome.
    pub(crate) async fn start(&self) -> String {
        match self.store.load().await {
            Ok(_) => format!(
                "{}\nType `help` for commands.",
                format_palette(&self.store.list())
            ),
            Err(err) => format!(
                "{}\nType `reload` to try again.",
                format_error(&err)
            ),
        }
    }

    pub(crate) fn prompt(&self) -> String {
        if self.pending_delete.is_some() {
            return String::from("confirm [y/N]> ");
        }
        match self.session.mode() {
            SessionMode::Idle => String::from("paleta> "),
            SessionMode::Creating => String::from("paleta (new)> "),
            SessionMode::Editing(id) => format!("paleta (edit {id})> "),
        }
    }

    pub(crate) async fn handle_line(&mut self, line: &str) -> Step {
        if let Some(id) = self.pending_delete.take() {
            return Step::Continue(self.confirm_delete(id, line).await);
        }

        let command = match ShellCommand::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Step::Continue(String::new()),
            Err(err) => return Step::Continue(err.to_string()),
        };

        match self.execute(command).await {
            Ok(step) => step,
            Err(err) => Step::Continue(format_error(&err)),
        }
    }

    async fn execute(
        &mut self,
        command: ShellCommand,
    ) -> Result<Step, PaletteError> {
        let reply = match command {
            ShellCommand::List => self.list_reply(),
            ShellCommand::Palette => palette_json(&self.store.list()),
            ShellCommand::Reload => match self.store.load().await? {
                LoadOutcome::Loaded { count } => {
                    format!("Loaded {count} colors.")
                },
                LoadOutcome::Superseded => {
                    String::from("A newer reload replaced this one.")
                },
            },
            ShellCommand::Show(id) => {
                format_entry(&self.store.refresh(&id).await?)
            },
            ShellCommand::New => {
                self.session.start_create()?;
                String::from("New color. Set name, hex or rgb, then save.")
            },
            ShellCommand::Edit(id) => {
                if self.session.is_locked() {
                    return Err(PaletteError::SessionBusy);
                }
                let entry = self.mirrored(&id)?;
                self.session.start_edit(&entry)?;
                self.draft_reply()
            },
            ShellCommand::Name(text) => {
                self.session.update_draft_name(&text)?;
                self.draft_reply()
            },
            ShellCommand::Hex(text) => {
                self.session.update_draft_hex(&text)?;
                self.draft_reply()
            },
            ShellCommand::Rgb(text) => {
                self.session.update_draft_rgb(&text)?;
                self.draft_reply()
            },
            ShellCommand::Draft => self.draft_reply(),
            ShellCommand::Save => {
                let entry = self.session.submit(&self.store).await?;
                format!("Saved {}", format_entry(&entry))
            },
            ShellCommand::Cancel => {
                self.session.cancel()?;
                String::from("Form discarded.")
            },
            ShellCommand::Delete(id) => {
                if self.session.is_locked() {
                    return Err(PaletteError::SessionBusy);
                }
                let entry = self.mirrored(&id)?;
                self.pending_delete = Some(id);
                format!("Delete \"{}\"? Type y to confirm.", entry.name)
            },
            ShellCommand::Resolve(text) => match self.resolver.resolve(&text)
            {
                Some(resolution) => {
                    format!("{}  {}", resolution.hex, resolution.rgb)
                },
                None => format!("\"{}\" is not a known color.", text.trim()),
            },
            ShellCommand::Help => String::from(HELP),
            ShellCommand::Quit => return Ok(Step::Quit),
        };
        Ok(Step::Continue(reply))
    }

    async fn confirm_delete(&mut self, id: ColorId, answer: &str) -> String {
        if !answer.trim().eq_ignore_ascii_case("y") {
            return String::from("Delete cancelled.");
        }
        match self.store.remove(&id).await {
            Ok(()) => format!("Deleted color {id}."),
            Err(err) => format_error(&err),
        }
    }

    fn mirrored(&self, id: &ColorId) -> Result<ColorEntry, PaletteError> {
        self.store
            .get(id)
            .ok_or_else(|| PaletteError::NotFound { id: id.clone() })
    }

    fn list_reply(&self) -> String {
        match self.store.status() {
            LoadStatus::Loading => String::from("Loading palette..."),
            LoadStatus::LoadFailed(reason) if self.store.len() == 0 => {
                format!("Palette unavailable: {reason}")
            },
            _ => format_palette(&self.store.list()),
        }
    }

    fn draft_reply(&self) -> String {
        if self.session.mode() == &SessionMode::Idle {
            return String::from("No color is being edited.");
        }
        let draft = self.session.draft();
        format!(
            "name: {}\nhex:  {}\nrgb:  {}\npreview: {}",
            draft.name,
            draft.hex,
            draft.rgb,
            draft.preview()
        )
    }
}

/// Read commands from stdin until `quit` or end of input.
pub(crate) async fn run<S: RemoteColorService>(service: S) -> io::Result<()> {
    let mut shell = Shell::new(service);
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let greeting = shell.start().await;
    write_reply(&mut stdout, &greeting).await?;

    loop {
        stdout.write_all(shell.prompt().as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match shell.handle_line(&line).await {
            Step::Continue(reply) => write_reply(&mut stdout, &reply).await?,
            Step::Quit => break,
        }
    }
    Ok(())
}

async fn write_reply(
    stdout: &mut tokio::io::Stdout,
    reply: &str,
) -> io::Result<()> {
    if reply.is_empty() {
        return Ok(());
    }
    stdout.write_all(reply.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}

fn format_error(err: &PaletteError) -> String {
    let label = match err.kind() {
        ErrorKind::Validation => "invalid",
        ErrorKind::Transport => "network",
        ErrorKind::RemoteRejection => "rejected",
        ErrorKind::NotFound => "not found",
    };
    format!("Error ({label}): {err}")
}

fn format_entry(entry: &ColorEntry) -> String {
    format!(
        "{:>4}  {:<20} {:<9} {:<22} [{}]",
        entry.id.to_string(),
        entry.name,
        entry.hex().unwrap_or("-"),
        entry.rgb().unwrap_or("-"),
        entry.swatch()
    )
}

fn format_palette(entries: &[ColorEntry]) -> String {
    if entries.is_empty() {
        return String::from("The palette is empty.");
    }
    entries
        .iter()
        .map(format_entry)
        .collect::<Vec<_>>()
        .join("\n")
}

fn palette_json(entries: &[ColorEntry]) -> String {
    match serde_json::to_string_pretty(entries) {
        Ok(json) => format!("Palette ({} colors)\n{json}", entries.len()),
        Err(err) => format!("Could not render palette: {err}"),
    }
}
