//! The in-page system terminal: a closed command grammar and the static source table shown by
//! the source viewer.
//!
//! Nothing here executes anything. [`parse`] turns a submitted line into a [`Command`] and the
//! application decides what each command does to its own state.

use crate::router::Route;
use crate::settings::ThemeMode;
use std::fmt;

/// A recognized terminal command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the command summaries
    Help,
    /// Empty the developer log
    Clear,
    /// Navigate to a named page
    Goto(Route),
    /// Switch the theme
    Theme(ThemeMode),
    /// Open the source viewer
    Source,
    /// Turn developer mode on or off
    Dev(bool),
}

/// Why a submitted line was not dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The first token is not a known command
    Unknown(String),
    /// A required argument is absent
    MissingArgument { command: &'static str, usage: &'static str },
    /// The argument is not one of the accepted values
    InvalidArgument { command: &'static str, value: String },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(name) => write!(f, "Command not found: {name}. Type 'help'."),
            Self::MissingArgument { usage, .. } => write!(f, "Usage: {usage}"),
            Self::InvalidArgument { command, value } => {
                write!(f, "Invalid argument for '{command}': {value}")
            }
        }
    }
}

impl std::error::Error for CommandError {}

/// Usage line and one-line summary of a command.
pub struct CommandHelp {
    pub usage: &'static str,
    pub summary: &'static str,
}

/// Summaries printed by `help`, in display order.
pub const fn all_commands() -> &'static [CommandHelp] {
    const COMMANDS: &[CommandHelp] = &[
        CommandHelp {
            usage: "help",
            summary: "List available commands",
        },
        CommandHelp {
            usage: "clear",
            summary: "Clear the terminal log",
        },
        CommandHelp {
            usage: "goto <dashboard|directory|settings|about>",
            summary: "Navigate to a page",
        },
        CommandHelp {
            usage: "theme <light|dark|auto|cyber>",
            summary: "Switch the colour theme",
        },
        CommandHelp {
            usage: "source",
            summary: "Open the source viewer",
        },
        CommandHelp {
            usage: "dev <on|off>",
            summary: "Toggle developer mode",
        },
    ];
    COMMANDS
}

/// Parses one submitted line.
///
/// The first whitespace-delimited token selects the command and is matched case-insensitively;
/// arguments beyond the first are ignored.
///
/// # Returns
///
/// `Ok(None)` for a blank line, `Ok(Some(command))` for a recognized command, otherwise the
/// reason it was rejected.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let mut tokens = line.split_whitespace();
    let Some(name) = tokens.next() else {
        return Ok(None);
    };
    let arg = tokens.next();

    let command = match name.to_ascii_lowercase().as_str() {
        "help" => Command::Help,
        "clear" => Command::Clear,
        "source" => Command::Source,
        "goto" => {
            let page = require(arg, "goto", "goto <dashboard|directory|settings|about>")?;
            let route = Route::from_page_name(page).ok_or_else(|| invalid("goto", page))?;
            Command::Goto(route)
        }
        "theme" => {
            let mode = require(arg, "theme", "theme <light|dark|auto|cyber>")?;
            let mode = match mode {
                "light" => ThemeMode::Light,
                "dark" => ThemeMode::Dark,
                "auto" => ThemeMode::Auto,
                "cyber" => ThemeMode::CyberGold,
                other => return Err(invalid("theme", other)),
            };
            Command::Theme(mode)
        }
        "dev" => match require(arg, "dev", "dev <on|off>")? {
            "on" => Command::Dev(true),
            "off" => Command::Dev(false),
            other => return Err(invalid("dev", other)),
        },
        _ => return Err(CommandError::Unknown(name.to_string())),
    };
    Ok(Some(command))
}

fn require<'a>(
    arg: Option<&'a str>,
    command: &'static str,
    usage: &'static str,
) -> Result<&'a str, CommandError> {
    arg.ok_or(CommandError::MissingArgument { command, usage })
}

fn invalid(command: &'static str, value: &str) -> CommandError {
    CommandError::InvalidArgument {
        command,
        value: value.to_string(),
    }
}

/// A file listed in the source viewer.
pub struct SourceFile {
    /// Path shown in the file list
    pub path: &'static str,
    /// File contents, fixed at build time
    pub contents: &'static str,
}

/// Files offered by the source viewer, in display order.
pub const fn all_source_files() -> &'static [SourceFile] {
    const FILES: &[SourceFile] = &[
        SourceFile {
            path: "src/settings.rs",
            contents: include_str!("settings.rs"),
        },
        SourceFile {
            path: "src/projector.rs",
            contents: include_str!("projector.rs"),
        },
        SourceFile {
            path: "src/router.rs",
            contents: include_str!("router.rs"),
        },
        SourceFile {
            path: "src/catalog.rs",
            contents: include_str!("catalog.rs"),
        },
        SourceFile {
            path: "src/console.rs",
            contents: include_str!("console.rs"),
        },
        SourceFile {
            path: "assets/catalog.json",
            contents: include_str!("../assets/catalog.json"),
        },
    ];
    FILES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_ignored() {
        assert_eq!(parse(""), Ok(None));
        assert_eq!(parse("   \t"), Ok(None));
    }

    #[test]
    fn parses_simple_commands() {
        assert_eq!(parse("help"), Ok(Some(Command::Help)));
        assert_eq!(parse("  clear  "), Ok(Some(Command::Clear)));
        assert_eq!(parse("SOURCE"), Ok(Some(Command::Source)));
    }

    #[test]
    fn goto_accepts_only_named_pages() {
        for page in crate::router::NAMED_PAGES {
            assert!(parse(&format!("goto {page}")).is_ok(), "{page}");
        }
        assert_eq!(parse("goto about"), Ok(Some(Command::Goto(Route::About))));
        assert_eq!(
            parse("goto directory"),
            Ok(Some(Command::Goto(Route::Directory)))
        );
        assert!(matches!(
            parse("goto nowhere"),
            Err(CommandError::InvalidArgument { command: "goto", .. })
        ));
        assert!(matches!(
            parse("goto component/cpu"),
            Err(CommandError::InvalidArgument { .. })
        ));
        assert!(matches!(
            parse("goto"),
            Err(CommandError::MissingArgument { command: "goto", .. })
        ));
    }

    #[test]
    fn theme_maps_cyber_to_cyber_gold() {
        assert_eq!(
            parse("theme cyber"),
            Ok(Some(Command::Theme(ThemeMode::CyberGold)))
        );
        assert_eq!(parse("theme light"), Ok(Some(Command::Theme(ThemeMode::Light))));
        assert!(parse("theme cyber-gold").is_err());
    }

    #[test]
    fn dev_toggles() {
        assert_eq!(parse("dev on"), Ok(Some(Command::Dev(true))));
        assert_eq!(parse("dev off"), Ok(Some(Command::Dev(false))));
        assert!(parse("dev maybe").is_err());
    }

    #[test]
    fn unknown_command_reports_its_name() {
        let err = parse("rm -rf /").unwrap_err();
        assert_eq!(err, CommandError::Unknown("rm".into()));
        assert!(err.to_string().contains("rm"));
    }

    #[test]
    fn help_lists_every_command() {
        let usages: Vec<_> = all_commands().iter().map(|c| c.usage).collect();
        for name in ["help", "clear", "goto", "theme", "source", "dev"] {
            assert!(usages.iter().any(|u| u.starts_with(name)), "{name} missing");
        }
    }

    #[test]
    fn source_table_is_populated() {
        assert!(all_source_files().iter().all(|f| !f.contents.is_empty()));
    }
}
