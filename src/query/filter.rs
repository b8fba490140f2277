//! Filter types for dimension searches.

use std::str::FromStr;

use crate::error::DiagcatError;
use crate::model::Diagram;

/// An inclusive integer range with optional ends.
///
/// An absent `min` behaves as 0 and an absent `max` as unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Range {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl Range {
    pub fn new(min: Option<i64>, max: Option<i64>) -> Self {
        Self { min, max }
    }

    /// Returns true if `value` lies within the range, ends included.
    pub fn contains(&self, value: i64) -> bool {
        let lower = self.min.unwrap_or(0);
        value >= lower && self.max.map_or(true, |upper| value <= upper)
    }
}

/// Tri-state filter on a per-object boolean attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AttrFilter {
    /// No constraint.
    #[default]
    Any,
    /// At least one object has the attribute set.
    Required,
    /// No object has the attribute set. Holds for diagrams without objects.
    Excluded,
}

impl AttrFilter {
    /// Checks the filter against the attribute values of a diagram's objects.
    pub fn matches(self, mut values: impl Iterator<Item = bool>) -> bool {
        match self {
            AttrFilter::Any => true,
            AttrFilter::Required => values.any(|value| value),
            AttrFilter::Excluded => values.all(|value| !value),
        }
    }
}

impl FromStr for AttrFilter {
    type Err = std::convert::Infallible;

    /// `y`/`yes` and `n`/`no` (any case); everything else, blank and `all`
    /// included, means no constraint.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(match raw.trim().to_lowercase().as_str() {
            "y" | "yes" => AttrFilter::Required,
            "n" | "no" => AttrFilter::Excluded,
            _ => AttrFilter::Any,
        })
    }
}

/// Search parameters for [`find_by_dimension`](super::find_by_dimension).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DimensionQuery {
    pub width: Range,
    pub height: Range,
    pub difficult: AttrFilter,
    pub truncated: AttrFilter,
}

impl DimensionQuery {
    /// Builds a query from raw text as typed at the shell prompts.
    ///
    /// Blank bounds are unset. A bound that is not an integer fails the
    /// whole query with [`DiagcatError::InvalidInput`].
    pub fn parse(input: &DimensionInput<'_>) -> Result<Self, DiagcatError> {
        Ok(Self {
            width: Range::new(
                parse_bound("min width", input.min_width)?,
                parse_bound("max width", input.max_width)?,
            ),
            height: Range::new(
                parse_bound("min height", input.min_height)?,
                parse_bound("max height", input.max_height)?,
            ),
            difficult: input.difficult.parse().unwrap_or_default(),
            truncated: input.truncated.parse().unwrap_or_default(),
        })
    }

    /// Returns true if the diagram satisfies every part of the query.
    pub fn matches(&self, diagram: &Diagram) -> bool {
        self.width.contains(diagram.dwidth())
            && self.height.contains(diagram.dheight())
            && self
                .difficult
                .matches(diagram.objects().iter().map(|object| object.difficult))
            && self
                .truncated
                .matches(diagram.objects().iter().map(|object| object.truncated))
    }
}

/// Unparsed dimension-search fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct DimensionInput<'a> {
    pub min_width: &'a str,
    pub max_width: &'a str,
    pub min_height: &'a str,
    pub max_height: &'a str,
    pub difficult: &'a str,
    pub truncated: &'a str,
}

fn parse_bound(field: &str, raw: &str) -> Result<Option<i64>, DiagcatError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i64>()
        .map(Some)
        .map_err(|_| DiagcatError::InvalidInput {
            field: field.to_string(),
            value: raw.to_string(),
        })
}
