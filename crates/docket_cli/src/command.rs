//! Line command parsing for the terminal shell.

use docket_core::EntryId;
use once_cell::sync::Lazy;
use regex::Regex;

static COMMAND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<verb>[A-Za-z]+)(?:\s+(?P<rest>.*?))?\s*$").expect("valid command regex")
});
static ID_TEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<id>\d+)\s+(?P<text>.+)$").expect("valid id/text regex"));
static ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?P<id>\d+)$").expect("valid id regex"));

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Edit { id: EntryId, text: String },
    Toggle(EntryId),
    Delete(EntryId),
    List,
    Help,
    Quit,
}

pub const HELP: &str = "commands:
  add <text>          append an entry
  edit <id> <text>    replace the text of an entry
  toggle <id>         flip completion
  delete <id> | rm    remove an entry
  list                redraw the list
  help                show this help
  quit                exit";

/// Parses one line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, String> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    let captures = COMMAND_RE
        .captures(line)
        .ok_or_else(|| format!("unrecognized input `{}`", line.trim()))?;
    let verb = captures["verb"].to_ascii_lowercase();
    let rest = captures.name("rest").map_or("", |m| m.as_str());

    let command = match verb.as_str() {
        "add" | "a" => {
            if rest.is_empty() {
                return Err("usage: add <text>".to_string());
            }
            Command::Add(rest.to_string())
        }
        "edit" | "e" => {
            let parts = ID_TEXT_RE
                .captures(rest)
                .ok_or_else(|| "usage: edit <id> <text>".to_string())?;
            Command::Edit {
                id: parse_id(&parts["id"])?,
                text: parts["text"].to_string(),
            }
        }
        "toggle" | "t" | "done" => Command::Toggle(single_id(rest, "toggle")?),
        "delete" | "rm" | "d" => Command::Delete(single_id(rest, "delete")?),
        "list" | "ls" => Command::List,
        "help" | "h" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("unknown command `{other}`; try `help`")),
    };
    Ok(Some(command))
}

fn single_id(rest: &str, verb: &str) -> Result<EntryId, String> {
    let parts = ID_RE
        .captures(rest)
        .ok_or_else(|| format!("usage: {verb} <id>"))?;
    parse_id(&parts["id"])
}

fn parse_id(raw: &str) -> Result<EntryId, String> {
    raw.parse::<EntryId>()
        .map_err(|err| format!("invalid id `{raw}`: {err}"))
}
