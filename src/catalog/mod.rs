//! The in-memory diagram catalog.
//!
//! Diagrams are stored under their key (file stem) in insertion order.
//! Keys are unique and compared as exact strings. There is no update or
//! delete: a diagram lives until the catalog is dropped.

use std::collections::HashMap;
use std::path::Path;

use log::{info, warn};

use crate::error::DiagcatError;
use crate::model::io_xml::{self, file_name_of};
use crate::model::{diagram_key, Diagram};

/// Name-keyed, insertion-ordered store of loaded diagrams.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    diagrams: Vec<Diagram>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a diagram under its own key.
    ///
    /// Fails with [`DiagcatError::DuplicateDiagram`] if the key is taken; the
    /// catalog is left untouched in that case.
    pub fn insert(&mut self, diagram: Diagram) -> Result<&Diagram, DiagcatError> {
        if self.contains(diagram.key()) {
            return Err(DiagcatError::DuplicateDiagram {
                key: diagram.key().to_string(),
            });
        }

        let position = self.diagrams.len();
        self.index.insert(diagram.key().to_string(), position);
        self.diagrams.push(diagram);
        Ok(&self.diagrams[position])
    }

    /// Exact-key lookup.
    pub fn get(&self, key: &str) -> Result<&Diagram, DiagcatError> {
        self.index
            .get(key)
            .map(|&position| &self.diagrams[position])
            .ok_or_else(|| DiagcatError::NotFound {
                key: key.to_string(),
            })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn list(&self) -> Vec<&str> {
        self.diagrams.iter().map(Diagram::key).collect()
    }

    pub fn count(&self) -> usize {
        self.diagrams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagrams.is_empty()
    }

    /// Diagrams in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagram> {
        self.diagrams.iter()
    }

    /// Loads an annotation file and inserts it.
    ///
    /// Checks run in order: file name, duplicate key, file read, XML parse,
    /// required fields. Any failure leaves the catalog unchanged.
    pub fn load_file(&mut self, path: &Path) -> Result<&Diagram, DiagcatError> {
        let result = self.try_load_file(path);
        match &result {
            Ok(diagram) => info!(
                "Loaded diagram '{}' with {} object(s)",
                diagram.key(),
                diagram.objects().len()
            ),
            Err(err) => warn!("Failed to load {}: {}", path.display(), err),
        }
        result
    }

    fn try_load_file(&mut self, path: &Path) -> Result<&Diagram, DiagcatError> {
        let file_name = file_name_of(path);
        let key = diagram_key(&file_name).ok_or_else(|| DiagcatError::InvalidFilename {
            file_name: file_name.clone(),
        })?;

        if self.contains(key) {
            return Err(DiagcatError::DuplicateDiagram {
                key: key.to_string(),
            });
        }

        let diagram = io_xml::read_diagram_file(path)?;
        self.insert(diagram)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Diagram;
    type IntoIter = std::slice::Iter<'a, Diagram>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
