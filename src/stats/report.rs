//! Stats report types and terminal formatting.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Aggregate statistics over a catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    /// Number of loaded diagrams.
    pub diagrams: usize,
    /// Objects summed across all diagrams.
    pub objects: usize,
    /// Distinct object types, compared case-sensitively.
    pub object_types: BTreeSet<String>,
    /// Canvas width range. `None` for an empty catalog.
    pub width: Option<MinMax>,
    /// Canvas height range. `None` for an empty catalog.
    pub height: Option<MinMax>,
    /// Object area range. `None` when no diagram has objects.
    pub object_area: Option<MinMax>,
}

/// An observed minimum and maximum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MinMax {
    pub min: i64,
    pub max: i64,
}

impl MinMax {
    /// Folds `value` into an optional running range.
    pub(crate) fn extend(range: Option<MinMax>, value: i64) -> Option<MinMax> {
        Some(match range {
            None => MinMax {
                min: value,
                max: value,
            },
            Some(range) => MinMax {
                min: range.min.min(value),
                max: range.max.max(value),
            },
        })
    }
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of loaded diagrams: {}", self.diagrams)?;
        writeln!(f, "Total number of objects: {}", self.objects)?;

        let types: Vec<&str> = self.object_types.iter().map(String::as_str).collect();
        writeln!(f, "Diagram Object Types: {}", types.join(", "))?;

        if let Some(height) = self.height {
            writeln!(f, "Minimum height of diagrams: {}", height.min)?;
            writeln!(f, "Maximum height of diagrams: {}", height.max)?;
        }
        if let Some(width) = self.width {
            writeln!(f, "Minimum width of diagrams: {}", width.min)?;
            writeln!(f, "Maximum width of diagrams: {}", width.max)?;
        }
        if let Some(area) = self.object_area {
            writeln!(f, "Minimum object area: {}", area.min)?;
            writeln!(f, "Maximum object area: {}", area.max)?;
        }

        Ok(())
    }
}
