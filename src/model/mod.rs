//! Diagram object model.
//!
//! A [`Diagram`] is one loaded annotation document: its canvas size and an
//! ordered list of [`DiagramObject`]s. Records are immutable once built and
//! permissive about geometry: reversed or zero-size boxes are kept so that
//! their derived dimensions can be inspected rather than rejected.
//!
//! # Example
//!
//! ```
//! use diagcat::model::{BBox, CanvasSize, Diagram, DiagramObject};
//!
//! let diagram = Diagram::new(
//!     "street.xml",
//!     CanvasSize::new(640, 480, 3),
//!     vec![DiagramObject::new("car", BBox::from_xyxy(0, 0, 20, 10), false, false)],
//! )
//! .unwrap();
//!
//! assert_eq!(diagram.key(), "street");
//! assert_eq!(diagram.objects()[0].area(), 200);
//! ```

mod bbox;
mod diagram;
pub mod io_xml;

pub use bbox::BBox;
pub use diagram::{diagram_key, strip_xml_suffix, CanvasSize, Diagram, DiagramObject};
