//! Line commands driving the widget.

use std::str::FromStr;

use autocomplete_lib::Key;

use crate::sources::Demo;

/// Errors parsing a command line.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The first word is not a known command.
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),
    /// A required argument is missing.
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    /// An argument could not be parsed.
    #[error("{0}")]
    InvalidArgument(String),
}

/// One user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch to another demo widget.
    Use(Demo),
    /// Replace the input text (an empty text clears it).
    Type(String),
    /// Press a key.
    Press(Key),
    /// Click a row (zero-based).
    Click(usize),
    /// Move focus away from the input.
    Blur,
    /// Print the widget state.
    Show,
    /// Print the command list.
    Help,
    /// Exit.
    Quit,
}

/// Help text listing all commands.
pub const HELP: &str = "\
commands:
  use <states|github|breweries|nasa>  switch demo widget
  type [text]                         set the input text
  down | up | enter | esc             press a key
  key <name>                          press a key by DOM name (ArrowDown, ...)
  click <row>                         click a row (0-based)
  blur                                move focus away from the input
  show                                print the widget state
  help                                this text
  quit                                exit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, rest) = match line.split_once(' ') {
            Some((word, rest)) => (word, rest),
            None => (line.trim_end(), ""),
        };

        match word {
            "use" => {
                let name = rest.trim();
                if name.is_empty() {
                    return Err(CommandError::MissingArgument("use"));
                }
                name.parse().map(Command::Use).map_err(CommandError::InvalidArgument)
            }
            // Keep inner and trailing spaces: they are part of the query.
            "type" => Ok(Command::Type(rest.to_string())),
            "down" => Ok(Command::Press(Key::Down)),
            "up" => Ok(Command::Press(Key::Up)),
            "enter" => Ok(Command::Press(Key::Enter)),
            "esc" => Ok(Command::Press(Key::Escape)),
            "key" => match rest.trim() {
                "" => Err(CommandError::MissingArgument("key")),
                name => Ok(Command::Press(Key::from_name(name))),
            },
            "click" => {
                let row = rest.trim();
                if row.is_empty() {
                    return Err(CommandError::MissingArgument("click"));
                }
                row.parse()
                    .map(Command::Click)
                    .map_err(|_| CommandError::InvalidArgument(format!("invalid row {row:?}")))
            }
            "blur" => Ok(Command::Blur),
            "show" | "" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
