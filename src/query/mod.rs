//! Read-only queries over a [`Catalog`].
//!
//! Every search returns diagram keys in catalog insertion order. Each
//! diagram appears at most once in a result.

mod filter;

pub use filter::{AttrFilter, DimensionInput, DimensionQuery, Range};

use log::debug;

use crate::catalog::Catalog;
use crate::error::DiagcatError;
use crate::model::{strip_xml_suffix, Diagram};

/// Looks up a diagram by name.
///
/// A trailing `.xml` (any case) is stripped from `name`; the rest must match
/// a key exactly.
pub fn lookup<'a>(catalog: &'a Catalog, name: &str) -> Result<&'a Diagram, DiagcatError> {
    catalog.get(strip_xml_suffix(name.trim()))
}

/// Keys of diagrams holding at least one object of `object_type`,
/// compared case-insensitively.
pub fn find_by_type<'a>(catalog: &'a Catalog, object_type: &str) -> Vec<&'a str> {
    let found: Vec<&str> = catalog
        .iter()
        .filter(|diagram| diagram.contains_type(object_type))
        .map(Diagram::key)
        .collect();

    debug!(
        "find_by_type '{}' matched {} diagram(s)",
        object_type,
        found.len()
    );
    found
}

/// Keys of diagrams whose canvas size and object flags satisfy `query`.
pub fn find_by_dimension<'a>(catalog: &'a Catalog, query: &DimensionQuery) -> Vec<&'a str> {
    let found: Vec<&str> = catalog
        .iter()
        .filter(|diagram| query.matches(diagram))
        .map(Diagram::key)
        .collect();

    debug!("find_by_dimension {:?} matched {} diagram(s)", query, found.len());
    found
}
