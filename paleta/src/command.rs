use paleta_client::ColorId;
use thiserror::Error;

/// A line typed at the palette prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    List,
    Palette,
    Reload,
    Show(ColorId),
    New,
    Edit(ColorId),
    Name(String),
    Hex(String),
    Rgb(String),
    Draft,
    Save,
    Cancel,
    Delete(ColorId),
    Resolve(String),
    Help,
    Quit,
}

#[derive(Debug, Error)]
pub(crate) enum CommandError {
    #[error("Could not parse input: {0}")]
    Parse(#[from] shell_words::ParseError),
    #[error("Unknown command `{0}`. Type `help` for the list.")]
    Unknown(String),
    #[error("`{command}` expects {expected}.")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
}

pub(crate) const HELP: &str = "\
list             show the palette
palette          print the palette as JSON
reload           fetch the palette again
show <id>        fetch one color from the server
new              start adding a color
edit <id>        start editing a color
name <text>      set the name (known color names fill hex and rgb)
hex <text>       set the hex code
rgb <text>       set the rgb code
draft            show the form being edited
save             submit the form
cancel           discard the form
delete <id>      delete a color (asks for confirmation)
resolve <text>   show what a color name resolves to
help             show this help
quit             leave";

impl ShellCommand {
    /// Parse a prompt line. Blank lines yield `None`.
    ///
    /// Text-valued commands take the rest of the line as typed, since
    /// color codes such as `#0af` would otherwise read as a shell
    /// comment. A quoted rest is unquoted.
    pub(crate) fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };
        if head.is_empty() {
            return Ok(None);
        }

        let command = match head.to_ascii_lowercase().as_str() {
            "list" | "ls" => Self::List,
            "palette" => Self::Palette,
            "reload" => Self::Reload,
            "show" => Self::Show(id_argument("show", rest)?),
            "new" | "add" => Self::New,
            "edit" => Self::Edit(id_argument("edit", rest)?),
            "name" => Self::Name(text_argument(rest)?),
            "hex" => Self::Hex(text_argument(rest)?),
            "rgb" => Self::Rgb(text_argument(rest)?),
            "draft" => Self::Draft,
            "save" => Self::Save,
            "cancel" => Self::Cancel,
            "delete" | "rm" => Self::Delete(id_argument("delete", rest)?),
            "resolve" => {
                let text = text_argument(rest)?;
                if text.trim().is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "resolve",
                        expected: "a color name",
                    });
                }
                Self::Resolve(text)
            },
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => return Err(CommandError::Unknown(head.to_string())),
        };
        Ok(Some(command))
    }
}

fn id_argument(
    command: &'static str,
    rest: &str,
) -> Result<ColorId, CommandError> {
    let words = shell_words::split(rest)?;
    words
        .first()
        .and_then(|word| ColorId::parse(word))
        .ok_or(CommandError::MissingArgument {
            command,
            expected: "a color id",
        })
}

fn text_argument(rest: &str) -> Result<String, CommandError> {
    if !rest.starts_with(['\'', '"']) {
        return Ok(rest.to_string());
    }
    Ok(shell_words::split(rest)?.join(" "))
}
