use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::catalog::Catalog;
use crate::error::DiagcatError;
use crate::model::io_xml;

/// How diagram info and statistics are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = DiagcatError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(DiagcatError::UnsupportedFormat(format!(
                "'{}' (supported: text, json)",
                other
            ))),
        }
    }
}

/// State for one interactive run: the working directory and the catalog.
///
/// The catalog starts empty and lives as long as the session.
#[derive(Debug)]
pub struct Session {
    directory: PathBuf,
    output_format: OutputFormat,
    catalog: Catalog,
}

impl Session {
    pub fn new(directory: impl Into<PathBuf>, output_format: OutputFormat) -> Self {
        Self {
            directory: directory.into(),
            output_format,
            catalog: Catalog::new(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// `.xml` files in the session directory.
    pub fn xml_files(&self) -> Result<Vec<String>, DiagcatError> {
        io_xml::list_xml_files(&self.directory)
    }

    /// Loads `file_name` relative to the session directory, returning its key.
    pub fn load(&mut self, file_name: &str) -> Result<String, DiagcatError> {
        let path = self.directory.join(file_name);
        self.catalog
            .load_file(&path)
            .map(|diagram| diagram.key().to_string())
    }
}
