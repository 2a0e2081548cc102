//! Executes parsed commands against an [`Engine`].

use std::path::PathBuf;

use tracing::debug;

use crate::command::display;
use crate::command::parser::{self, Command};
use crate::common::{Config, Error, Result};
use crate::engine::Engine;

const HELP: &str = "\
Commands (keywords are case-insensitive):
  INSERT ID=<id> Name=<name> Programme=<programme> Mark=<mark>
  QUERY ID=<id>
  UPDATE ID=<id> [Name=<name>] [Programme=<programme>] [Mark=<mark>]
  DELETE ID=<id>
  SHOW ALL [ASC|DESC]
  SHOW ALL SORT BY ID|MARK [ASC|DESC]
  SHOW SUMMARY
  OPEN [path]
  SAVE [path]
  HELP
  EXIT";

/// What the read loop should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the message and read the next line.
    Continue(String),
    Exit,
}

/// Line-at-a-time command interpreter.
///
/// Errors never escape [`Interpreter::execute_line`]; they are turned
/// into a one-line diagnostic and the session carries on.
#[derive(Debug)]
pub struct Interpreter {
    engine: Engine,
    config: Config,
}

impl Interpreter {
    pub fn new(config: Config) -> Self {
        Self {
            engine: Engine::new(),
            config,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse and run one line of input.
    pub fn execute_line(&mut self, line: &str) -> Outcome {
        let command = match parser::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Outcome::Continue(String::new()),
            Err(e) => return Outcome::Continue(format!("Error: {e}")),
        };
        if command == Command::Exit {
            return Outcome::Exit;
        }

        debug!(?command, "executing");
        match self.execute(command) {
            Ok(message) => Outcome::Continue(message),
            Err(e) => Outcome::Continue(format!("Error: {e}")),
        }
    }

    /// Run one raw input line, as read from a byte stream.
    ///
    /// Input that is not valid UTF-8 is reported like any other bad
    /// command.
    pub fn execute_bytes(&mut self, line: &[u8]) -> Outcome {
        match std::str::from_utf8(line) {
            Ok(line) => self.execute_line(line),
            Err(e) => Outcome::Continue(format!(
                "Error: {}",
                Error::Parse(format!("input is not valid UTF-8 ({e})"))
            )),
        }
    }

    /// Run a command, returning the text to show.
    ///
    /// # Errors
    /// Whatever the engine reports for the command.
    pub fn execute(&mut self, command: Command) -> Result<String> {
        let message = match command {
            Command::Insert(record) => {
                let id = record.id;
                self.engine.insert(record)?;
                format!("A new record with ID={id} is successfully inserted.")
            }
            Command::Query(id) => {
                let record = self.engine.query(id)?;
                format!(
                    "The record with ID={id} is found in the data table.\n{}\n{}",
                    display::header(),
                    display::row(record)
                )
            }
            Command::Update { id, changes } => {
                self.engine.update_fields(id, &changes)?;
                format!("The record with ID={id} is successfully updated.")
            }
            Command::Delete(id) => {
                self.engine.delete(id)?;
                format!("The record with ID={id} is successfully deleted.")
            }
            Command::ShowAll(order) => display::table(self.engine.records(order)),
            Command::ShowSorted { key, order } => display::table(self.engine.sorted(key, order)),
            Command::ShowSummary => self.engine.summary().to_string(),
            Command::Open(path) => {
                let path = self.resolve(path);
                let report = self.engine.open(&path)?;
                let mut message = format!(
                    "Loaded {} record(s) from \"{}\".",
                    report.loaded,
                    path.display()
                );
                if !report.skipped.is_empty() {
                    let lines: Vec<String> =
                        report.skipped.iter().map(|n| n.to_string()).collect();
                    message.push_str(&format!(" Skipped line(s): {}.", lines.join(", ")));
                }
                message
            }
            Command::Save(path) => {
                let path = self.resolve(path);
                let written = self.engine.save(&path)?;
                format!("Saved {written} record(s) to \"{}\".", path.display())
            }
            Command::Help => HELP.to_string(),
            Command::Exit => String::new(),
        };
        Ok(message)
    }

    fn resolve(&self, path: Option<PathBuf>) -> PathBuf {
        path.unwrap_or_else(|| self.config.data_file.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICIA: &str = "INSERT ID=2502841 Name=Alicia Tan Programme=Computer Science Mark=72.5";

    fn message(outcome: Outcome) -> String {
        match outcome {
            Outcome::Continue(message) => message,
            Outcome::Exit => panic!("unexpected exit"),
        }
    }

    fn interpreter_in(dir: &tempfile::TempDir) -> Interpreter {
        Interpreter::new(Config {
            data_file: dir.path().join("students.txt"),
            open_on_start: false,
        })
    }

    #[test]
    fn test_insert_and_query() {
        let dir = tempfile::tempdir().unwrap();
        let mut interp = interpreter_in(&dir);

        assert_eq!(
            message(interp.execute_line(ALICIA)),
            "A new record with ID=2502841 is successfully inserted."
        );
        let found = message(interp.execute_line("QUERY ID=2502841"));
        assert!(found.starts_with("The record with ID=2502841 is found"));
        assert!(found.contains("Alicia Tan"));
    }

    #[test]
    fn test_errors_become_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        let mut interp = interpreter_in(&dir);
        interp.execute_line(ALICIA);

        assert_eq!(
            message(interp.execute_line(ALICIA)),
            "Error: The record with ID=2502841 already exists."
        );
        assert_eq!(
            message(interp.execute_line("DELETE ID=2500000")),
            "Error: The record with ID=2500000 does not exist."
        );
        let bad = message(interp.execute_line("UPDATE ID=2502841 Mark=101"));
        assert!(bad.starts_with("Error: Invalid Mark"));
        assert_eq!(bad.lines().count(), 1);
        assert_eq!(interp.engine().len(), 1);
    }

    #[test]
    fn test_non_utf8_line_does_not_end_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut interp = interpreter_in(&dir);

        let bad = message(interp.execute_bytes(
            b"INSERT ID=2502841 Name=Al\xffx Tan Programme=Computer Science Mark=72.5\n",
        ));
        assert!(bad.starts_with("Error: "));
        assert_eq!(bad.lines().count(), 1);

        let good = message(interp.execute_bytes(ALICIA.as_bytes()));
        assert_eq!(good, "A new record with ID=2502841 is successfully inserted.");
        assert_eq!(interp.engine().len(), 1);
    }

    #[test]
    fn test_update_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let mut interp = interpreter_in(&dir);
        interp.execute_line(ALICIA);

        assert_eq!(
            message(interp.execute_line("UPDATE ID=2502841 Mark=80")),
            "The record with ID=2502841 is successfully updated."
        );
        assert_eq!(interp.engine().summary().count, 1);
        assert_eq!(
            message(interp.execute_line("delete id=2502841")),
            "The record with ID=2502841 is successfully deleted."
        );
        assert!(interp.engine().is_empty());
    }

    #[test]
    fn test_save_then_open_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut interp = interpreter_in(&dir);
        interp.execute_line(ALICIA);

        let saved = message(interp.execute_line("SAVE"));
        assert!(saved.starts_with("Saved 1 record(s)"));

        let mut fresh = interpreter_in(&dir);
        let loaded = message(fresh.execute_line("OPEN"));
        assert!(loaded.starts_with("Loaded 1 record(s)"));
        assert_eq!(fresh.engine().len(), 1);
    }

    #[test]
    fn test_open_reports_skipped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.txt");
        std::fs::write(
            &path,
            "2502841,Alicia Tan,Computer Science,72.5\nbroken line\n",
        )
        .unwrap();
        let mut interp = interpreter_in(&dir);

        let loaded = message(interp.execute_line(&format!("OPEN {}", path.display())));
        assert!(loaded.contains("Loaded 1 record(s)"));
        assert!(loaded.ends_with("Skipped line(s): 2."));
    }

    #[test]
    fn test_show_empty_blank_help_and_exit() {
        let dir = tempfile::tempdir().unwrap();
        let mut interp = interpreter_in(&dir);

        assert_eq!(
            message(interp.execute_line("SHOW ALL")),
            "There are no records in the table."
        );
        assert_eq!(message(interp.execute_line("")), "");
        assert!(message(interp.execute_line("help")).contains("SHOW SUMMARY"));
        assert_eq!(interp.execute_line("EXIT"), Outcome::Exit);
    }
}
