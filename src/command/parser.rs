//! Command-line tokenizer and parser.
//!
//! Keywords are case-insensitive. Field assignments take the form
//! `Key=Value`, where a value extends over following words until the next
//! recognised `Key=` token:
//! ```text
//! INSERT ID=2502841 Name=Alicia Tan Programme=Computer Science Mark=72.5
//! UPDATE ID=2502841 Mark=80
//! SHOW ALL SORT BY MARK DESC
//! ```

use std::path::PathBuf;

use crate::common::{Error, Result, StudentId};
use crate::index::{Order, SortKey};
use crate::record::{validation, Field, Record};

/// A parsed user command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Insert(Record),
    Query(StudentId),
    Update {
        id: StudentId,
        changes: Vec<(Field, String)>,
    },
    Delete(StudentId),
    ShowAll(Order),
    ShowSorted { key: SortKey, order: Order },
    ShowSummary,
    /// Load a snapshot; `None` means the configured default file.
    Open(Option<PathBuf>),
    /// Save a snapshot; `None` means the configured default file.
    Save(Option<PathBuf>),
    Help,
    Exit,
}

/// Parse one input line.
///
/// Returns `Ok(None)` for a blank line.
///
/// # Errors
/// `Error::Parse` for unknown or malformed commands, and
/// `Error::ValidationFailed` for bad field values in `INSERT`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    let command = match keyword.to_ascii_uppercase().as_str() {
        "INSERT" => parse_insert(rest)?,
        "QUERY" => Command::Query(parse_id_only("QUERY", rest)?),
        "UPDATE" => parse_update(rest)?,
        "DELETE" => Command::Delete(parse_id_only("DELETE", rest)?),
        "SHOW" => parse_show(rest)?,
        "OPEN" => Command::Open(optional_path(rest)),
        "SAVE" => Command::Save(optional_path(rest)),
        "HELP" => Command::Help,
        "EXIT" | "QUIT" => Command::Exit,
        other => {
            return Err(Error::Parse(format!(
                "Unknown command '{other}'. Type HELP for a list of commands."
            )))
        }
    };
    Ok(Some(command))
}

/// Split `Key=Value` assignments.
///
/// Words that do not start a new assignment continue the current value,
/// joined by single spaces.
pub fn parse_assignments(input: &str) -> Result<Vec<(Field, String)>> {
    let mut assignments: Vec<(Field, String)> = Vec::new();

    for word in input.split_whitespace() {
        let started = word
            .split_once('=')
            .and_then(|(key, value)| Field::from_name(key).map(|field| (field, value)));

        if let Some((field, value)) = started {
            if assignments.iter().any(|(seen, _)| *seen == field) {
                return Err(Error::Parse(format!("{field} given more than once")));
            }
            assignments.push((field, value.to_string()));
            continue;
        }

        match assignments.last_mut() {
            Some((_, value)) => {
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(word);
            }
            None => {
                return Err(Error::Parse(format!(
                    "Expected Field=Value, found '{word}'"
                )))
            }
        }
    }

    Ok(assignments)
}

fn parse_insert(rest: &str) -> Result<Command> {
    let assignments = parse_assignments(rest)?;

    let id = validation::parse_id(required(&assignments, Field::Id)?)?;
    let name = required(&assignments, Field::Name)?;
    let programme = required(&assignments, Field::Programme)?;
    let mark = validation::parse_mark(required(&assignments, Field::Mark)?)?;
    Ok(Command::Insert(Record::new(id, name, programme, mark)?))
}

fn required(assignments: &[(Field, String)], field: Field) -> Result<&str> {
    assignments
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, v)| v.as_str())
        .ok_or_else(|| Error::Parse(format!("INSERT requires {field}=...")))
}

fn parse_update(rest: &str) -> Result<Command> {
    let mut assignments = parse_assignments(rest)?;
    let position = assignments
        .iter()
        .position(|(f, _)| *f == Field::Id)
        .ok_or_else(|| Error::Parse("UPDATE requires ID=...".to_string()))?;
    let (_, raw_id) = assignments.remove(position);
    let id = validation::parse_id(&raw_id)?;

    if assignments.is_empty() {
        return Err(Error::Parse(
            "UPDATE requires at least one of Name=, Programme=, Mark=".to_string(),
        ));
    }
    Ok(Command::Update {
        id,
        changes: assignments,
    })
}

fn parse_id_only(command: &str, rest: &str) -> Result<StudentId> {
    match parse_assignments(rest)?.as_slice() {
        [(Field::Id, raw)] => validation::parse_id(raw),
        _ => Err(Error::Parse(format!("Usage: {command} ID=<7-digit id>"))),
    }
}

fn parse_show(rest: &str) -> Result<Command> {
    let words: Vec<String> = rest
        .split_whitespace()
        .map(|w| w.to_ascii_uppercase())
        .collect();
    let words: Vec<&str> = words.iter().map(String::as_str).collect();

    let command = match words.as_slice() {
        ["SUMMARY"] => Command::ShowSummary,
        ["ALL"] => Command::ShowAll(Order::Ascending),
        ["ALL", dir] => Command::ShowAll(parse_order(dir)?),
        ["ALL", "SORT", "BY", key] => Command::ShowSorted {
            key: parse_sort_key(key)?,
            order: Order::Ascending,
        },
        ["ALL", "SORT", "BY", key, dir] => Command::ShowSorted {
            key: parse_sort_key(key)?,
            order: parse_order(dir)?,
        },
        _ => {
            return Err(Error::Parse(
                "Usage: SHOW ALL [ASC|DESC] | SHOW ALL SORT BY ID|MARK [ASC|DESC] | SHOW SUMMARY"
                    .to_string(),
            ))
        }
    };
    Ok(command)
}

fn parse_order(word: &str) -> Result<Order> {
    match word {
        "ASC" | "ASCENDING" => Ok(Order::Ascending),
        "DESC" | "DESCENDING" => Ok(Order::Descending),
        other => Err(Error::Parse(format!("Unknown sort direction '{other}'"))),
    }
}

fn parse_sort_key(word: &str) -> Result<SortKey> {
    match word {
        "ID" => Ok(SortKey::Id),
        "MARK" | "SCORE" => Ok(SortKey::Mark),
        other => Err(Error::Parse(format!("Cannot sort by '{other}'"))),
    }
}

fn optional_path(rest: &str) -> Option<PathBuf> {
    if rest.is_empty() {
        None
    } else {
        Some(PathBuf::from(rest))
    }
}
