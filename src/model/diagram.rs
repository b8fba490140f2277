//! Diagram and object records.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::Serialize;

use super::bbox::BBox;
use crate::error::DiagcatError;

const XML_SUFFIX: &str = ".xml";

/// One labeled bounding box within a diagram.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagramObject {
    /// The labeled class (e.g. "car").
    pub object_type: String,

    /// Bounding box in pixel coordinates.
    pub bounds: BBox,

    pub difficult: bool,
    pub truncated: bool,
}

impl DiagramObject {
    /// Creates a new object record.
    pub fn new(
        object_type: impl Into<String>,
        bounds: BBox,
        difficult: bool,
        truncated: bool,
    ) -> Self {
        Self {
            object_type: object_type.into(),
            bounds,
            difficult,
            truncated,
        }
    }

    #[inline]
    pub fn width(&self) -> i64 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i64 {
        self.bounds.height()
    }

    #[inline]
    pub fn area(&self) -> i64 {
        self.bounds.area()
    }

    /// Case-insensitive match of the object type against `query`.
    pub fn has_type(&self, query: &str) -> bool {
        self.object_type.to_lowercase() == query.to_lowercase()
    }
}

impl fmt::Display for DiagramObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.bounds;
        write!(
            f,
            "Type: {}   xmin, ymin, xmax, ymax: ({}, {}, {}, {})   Width: {}   Height: {}   Area: {}   Difficult: {}   Truncated: {}",
            self.object_type,
            b.xmin,
            b.ymin,
            b.xmax,
            b.ymax,
            self.width(),
            self.height(),
            self.area(),
            yes_no(self.difficult),
            yes_no(self.truncated),
        )
    }
}

// Derived dimensions are serialized alongside the stored fields so JSON
// output carries everything the text rendering shows.
impl Serialize for DiagramObject {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DiagramObject", 7)?;
        state.serialize_field("object_type", &self.object_type)?;
        state.serialize_field("bounds", &self.bounds)?;
        state.serialize_field("width", &self.width())?;
        state.serialize_field("height", &self.height())?;
        state.serialize_field("area", &self.area())?;
        state.serialize_field("difficult", &self.difficult)?;
        state.serialize_field("truncated", &self.truncated)?;
        state.end()
    }
}

/// Canvas size of a diagram. `depth` is carried but not used by queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CanvasSize {
    pub width: i64,
    pub height: i64,
    pub depth: i64,
}

impl CanvasSize {
    pub fn new(width: i64, height: i64, depth: i64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }
}

/// One loaded annotation document: canvas size plus its objects.
///
/// A diagram is immutable once built. Its catalog key is derived from the
/// file name at construction time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagram {
    key: String,
    filename: String,
    size: CanvasSize,
    objects: Vec<DiagramObject>,
}

impl Diagram {
    /// Creates a diagram, deriving its key from `filename`.
    ///
    /// Fails with [`DiagcatError::InvalidFilename`] unless the name ends in
    /// `.xml` (any case) and has a non-empty stem.
    pub fn new(
        filename: impl Into<String>,
        size: CanvasSize,
        objects: Vec<DiagramObject>,
    ) -> Result<Self, DiagcatError> {
        let filename = filename.into();
        let key = diagram_key(&filename)
            .ok_or_else(|| DiagcatError::InvalidFilename {
                file_name: filename.clone(),
            })?
            .to_string();

        Ok(Self {
            key,
            filename,
            size,
            objects,
        })
    }

    /// The catalog key: file name without its `.xml` suffix.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The original file name, extension included.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn objects(&self) -> &[DiagramObject] {
        &self.objects
    }

    #[inline]
    pub fn dwidth(&self) -> i64 {
        self.size.width
    }

    #[inline]
    pub fn dheight(&self) -> i64 {
        self.size.height
    }

    /// Canvas area (`width * height`).
    #[inline]
    pub fn dimension(&self) -> i64 {
        self.size.width.saturating_mul(self.size.height)
    }

    /// True if at least one object matches `object_type` case-insensitively.
    pub fn contains_type(&self, object_type: &str) -> bool {
        self.objects.iter().any(|object| object.has_type(object_type))
    }
}

impl Serialize for Diagram {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Diagram", 5)?;
        state.serialize_field("key", &self.key)?;
        state.serialize_field("filename", &self.filename)?;
        state.serialize_field("size", &self.size)?;
        state.serialize_field("dimension", &self.dimension())?;
        state.serialize_field("objects", &self.objects)?;
        state.end()
    }
}

impl fmt::Display for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Diagram: {}   Size: ({}, {}, {})   Area: {}",
            self.key,
            self.size.width,
            self.size.height,
            self.size.depth,
            self.dimension()
        )?;
        writeln!(f, "Objects:")?;
        for object in &self.objects {
            writeln!(f, "{}", object)?;
        }
        Ok(())
    }
}

/// Derives the catalog key from a bare file name.
///
/// Returns `None` unless the name ends in `.xml` (case-insensitive) with a
/// non-empty stem. Only the final suffix is removed: `a.b.XML` becomes `a.b`.
pub fn diagram_key(file_name: &str) -> Option<&str> {
    let split = file_name.len().checked_sub(XML_SUFFIX.len())?;
    let (stem, suffix) = (file_name.get(..split)?, file_name.get(split..)?);
    if stem.is_empty() || !suffix.eq_ignore_ascii_case(XML_SUFFIX) {
        return None;
    }
    Some(stem)
}

/// Strips a trailing `.xml` (any case) from a lookup query, if present.
pub fn strip_xml_suffix(name: &str) -> &str {
    diagram_key(name).unwrap_or(name)
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
