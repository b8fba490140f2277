//! Interactive menu shell.
//!
//! The shell reads one line per prompt, dispatches to the catalog, query and
//! stats operations, and renders their results. It is generic over its input
//! and output streams so whole sessions can be scripted in tests.

mod session;

pub use session::{OutputFormat, Session};

use std::io::{self, BufRead, Write};

use log::debug;
use serde::Serialize;

use crate::error::DiagcatError;
use crate::query::{self, DimensionInput, DimensionQuery};
use crate::stats;

const MENU: &str = "
1. List Current Files
2. List Diagrams
3. Load File
4. Display Diagram Info
5. Search
   5.1.  Find by type
   5.2.  Find by dimension
6. Statistics
7. Exit";

/// Whether the loop should keep going after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// A menu loop bound to a session and a pair of streams.
pub struct Shell<R, W> {
    session: Session,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(session: Session, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
        }
    }

    /// The session, including everything loaded so far.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Ends the shell and hands back its session.
    pub fn into_session(self) -> Session {
        self.session
    }

    /// Runs until the user confirms quitting or input ends.
    pub fn run(&mut self) -> Result<(), DiagcatError> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Enter choice: ")? else {
                break;
            };

            debug!("menu choice '{}'", choice);
            if self.dispatch(&choice)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, choice: &str) -> Result<Flow, DiagcatError> {
        match choice {
            "1" => self.list_files()?,
            "2" => self.list_diagrams()?,
            "3" => return self.load_file(),
            "4" => return self.display_diagram(),
            "5" => {
                let Some(sub_choice) = self.prompt("Select 5.1 or 5.2: ")? else {
                    return Ok(Flow::Quit);
                };
                match sub_choice.as_str() {
                    "5.1" => return self.find_by_type(),
                    "5.2" => return self.find_by_dimension(),
                    _ => {}
                }
            }
            "5.1" => return self.find_by_type(),
            "5.2" => return self.find_by_dimension(),
            "6" => self.statistics()?,
            "7" => return self.confirm_quit(),
            _ => writeln!(self.output, "Invalid number for choice")?,
        }
        Ok(Flow::Continue)
    }

    fn list_files(&mut self) -> Result<(), DiagcatError> {
        match self.session.xml_files() {
            Ok(files) if files.is_empty() => writeln!(self.output, "XML Files: none")?,
            Ok(files) => {
                let quoted: Vec<String> = files.iter().map(|name| format!("'{name}'")).collect();
                writeln!(self.output, "XML Files: {}", quoted.join(", "))?;
            }
            Err(err) => writeln!(self.output, "Error listing files: {err}")?,
        }
        Ok(())
    }

    fn list_diagrams(&mut self) -> Result<(), DiagcatError> {
        let catalog = self.session.catalog();
        if catalog.is_empty() {
            writeln!(self.output, "0 diagrams loaded.")?;
            return Ok(());
        }

        writeln!(self.output, "{} diagrams loaded: ", catalog.count())?;
        for key in catalog.list() {
            writeln!(self.output, "'{key}'")?;
        }
        writeln!(self.output, ".")?;
        Ok(())
    }

    fn load_file(&mut self) -> Result<Flow, DiagcatError> {
        let Some(file_name) = self.prompt("Enter filename: ")? else {
            return Ok(Flow::Quit);
        };

        match self.session.load(&file_name) {
            Ok(key) => writeln!(self.output, "Diagram '{key}' was successfully loaded.")?,
            Err(DiagcatError::DuplicateDiagram { key }) => {
                writeln!(self.output, "Error: Diagram '{key}' is already loaded.")?
            }
            Err(_) => writeln!(
                self.output,
                "Error loading file '{file_name}'. Invalid filename or file not found."
            )?,
        }
        Ok(Flow::Continue)
    }

    fn display_diagram(&mut self) -> Result<Flow, DiagcatError> {
        let Some(name) = self.prompt("Enter diagram name: ")? else {
            return Ok(Flow::Quit);
        };

        match query::lookup(self.session.catalog(), &name) {
            Ok(diagram) => match self.session.output_format() {
                OutputFormat::Text => write!(self.output, "{diagram}")?,
                OutputFormat::Json => write_json(&mut self.output, diagram)?,
            },
            Err(_) => writeln!(self.output, "Diagram not found.")?,
        }
        Ok(Flow::Continue)
    }

    fn find_by_type(&mut self) -> Result<Flow, DiagcatError> {
        let Some(object_type) = self.prompt("Enter the diagram type: ")? else {
            return Ok(Flow::Quit);
        };

        let found = query::find_by_type(self.session.catalog(), &object_type);
        write_found(&mut self.output, &found)?;
        Ok(Flow::Continue)
    }

    fn find_by_dimension(&mut self) -> Result<Flow, DiagcatError> {
        let prompts = [
            "Min width (enter blank for zero): ",
            "Max width (enter blank for max): ",
            "Min height (enter blank for zero): ",
            "Max height (enter blank for max): ",
            "Difficult (yes/no/All): ",
            "Truncated (yes/no/All): ",
        ];

        let mut answers = Vec::with_capacity(prompts.len());
        for prompt in prompts {
            let Some(answer) = self.prompt(prompt)? else {
                return Ok(Flow::Quit);
            };
            answers.push(answer);
        }

        let input = DimensionInput {
            min_width: &answers[0],
            max_width: &answers[1],
            min_height: &answers[2],
            max_height: &answers[3],
            difficult: &answers[4],
            truncated: &answers[5],
        };

        match DimensionQuery::parse(&input) {
            Ok(dimension_query) => {
                let found = query::find_by_dimension(self.session.catalog(), &dimension_query);
                write_found(&mut self.output, &found)?;
            }
            Err(err) => {
                debug!("rejected dimension query: {}", err);
                writeln!(self.output, "Invalid input.")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn statistics(&mut self) -> Result<(), DiagcatError> {
        let report = stats::stats_catalog(self.session.catalog());
        match self.session.output_format() {
            OutputFormat::Text => write!(self.output, "{report}")?,
            OutputFormat::Json => write_json(&mut self.output, &report)?,
        }
        Ok(())
    }

    fn confirm_quit(&mut self) -> Result<Flow, DiagcatError> {
        let Some(answer) =
            self.prompt("Are you sure you want to quit the program (yes/No)? ")?
        else {
            return Ok(Flow::Quit);
        };

        if matches!(answer.to_lowercase().as_str(), "y" | "yes") {
            writeln!(self.output, "Good bye...")?;
            return Ok(Flow::Quit);
        }
        Ok(Flow::Continue)
    }

    /// Prints `text` and reads one trimmed line. `None` at end of input.
    ///
    /// Invalid UTF-8 is replaced rather than rejected, so a garbled line is
    /// handled like any other bad answer.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }
}

fn write_found(output: &mut impl Write, found: &[&str]) -> io::Result<()> {
    if found.is_empty() {
        return writeln!(output, "No diagrams found.");
    }

    writeln!(output, "Found {} diagram(s):", found.len())?;
    for key in found {
        writeln!(output, "{key}")?;
    }
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(output: &mut impl Write, value: &T) -> Result<(), DiagcatError> {
    serde_json::to_writer_pretty(&mut *output, value).map_err(io::Error::from)?;
    writeln!(output)?;
    Ok(())
}
