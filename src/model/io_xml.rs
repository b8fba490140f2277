//! Annotation XML reader.
//!
//! Reads the Pascal VOC style layout: a root element holding `size/width`,
//! `size/height`, `size/depth` and zero or more `object` elements, each with
//! `name`, `bndbox/xmin|ymin|xmax|ymax`, `difficult` and `truncated`.
//! All numeric fields are integers; `difficult`/`truncated` are integer flags
//! where any nonzero value means true.

use std::fs;
use std::path::Path;

use log::{debug, warn};
use roxmltree::Node;
use walkdir::WalkDir;

use super::bbox::BBox;
use super::diagram::{diagram_key, CanvasSize, Diagram, DiagramObject};
use crate::error::DiagcatError;

const XML_SUFFIX: &str = ".xml";

/// Read one annotation file into a [`Diagram`].
///
/// The file name is checked before the file is opened, so a bad name is
/// reported as [`DiagcatError::InvalidFilename`] even if the file is missing.
pub fn read_diagram_file(path: &Path) -> Result<Diagram, DiagcatError> {
    let file_name = file_name_of(path);
    if diagram_key(&file_name).is_none() {
        return Err(DiagcatError::InvalidFilename { file_name });
    }

    let xml = fs::read_to_string(path).map_err(|source| DiagcatError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let (size, objects) = parse_document(&xml, path)?;
    Diagram::new(file_name, size, objects)
}

/// Parse an annotation document held in memory.
///
/// `file_name` supplies the diagram key exactly as a file on disk would.
pub fn parse_diagram_str(xml: &str, file_name: &str) -> Result<Diagram, DiagcatError> {
    if diagram_key(file_name).is_none() {
        return Err(DiagcatError::InvalidFilename {
            file_name: file_name.to_string(),
        });
    }
    let (size, objects) = parse_document(xml, Path::new(file_name))?;
    Diagram::new(file_name, size, objects)
}

/// Fuzz-only entrypoint: parse annotation XML from bytes, discarding the result.
///
/// The input must be valid UTF-8.
#[cfg(feature = "fuzzing")]
pub fn from_diagram_xml_slice(bytes: &[u8]) -> Result<(), DiagcatError> {
    let xml = std::str::from_utf8(bytes).map_err(|source| DiagcatError::XmlParse {
        path: std::path::PathBuf::from("<memory>"),
        message: format!("input is not valid UTF-8: {source}"),
    })?;
    parse_document(xml, Path::new("<memory>"))?;
    Ok(())
}

/// List the `.xml` entries (any case) directly inside `dir`, sorted by name.
///
/// Fails only if `dir` itself cannot be read. Entries that cannot be
/// inspected, such as dangling symlinks, are skipped with a warning.
pub fn list_xml_files(dir: &Path) -> Result<Vec<String>, DiagcatError> {
    fs::read_dir(dir).map_err(DiagcatError::Io)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), err);
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy();
        if entry.file_type().is_file() && has_xml_suffix(&name) {
            files.push(name.into_owned());
        }
    }

    files.sort();
    Ok(files)
}

fn parse_document(
    xml: &str,
    path: &Path,
) -> Result<(CanvasSize, Vec<DiagramObject>), DiagcatError> {
    let document =
        roxmltree::Document::parse(xml).map_err(|source| DiagcatError::XmlParse {
            path: path.to_path_buf(),
            message: source.to_string(),
        })?;

    let root = document.root_element();
    let root_context = format!("<{}>", root.tag_name().name());

    let size = required_child_element(root, "size", path, &root_context)?;
    let width = parse_required_i64(size, "width", path, "<size>")?;
    let height = parse_required_i64(size, "height", path, "<size>")?;
    let depth = parse_required_i64(size, "depth", path, "<size>")?;

    let mut objects = Vec::new();
    for object in root
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "object")
    {
        let name = required_child_text(object, "name", path, "<object>")?;
        let bndbox = required_child_element(object, "bndbox", path, "<object>")?;

        let xmin = parse_required_i64(bndbox, "xmin", path, "<bndbox>")?;
        let ymin = parse_required_i64(bndbox, "ymin", path, "<bndbox>")?;
        let xmax = parse_required_i64(bndbox, "xmax", path, "<bndbox>")?;
        let ymax = parse_required_i64(bndbox, "ymax", path, "<bndbox>")?;

        let difficult = parse_required_i64(object, "difficult", path, "<object>")? != 0;
        let truncated = parse_required_i64(object, "truncated", path, "<object>")? != 0;

        let bounds = BBox::from_xyxy(xmin, ymin, xmax, ymax);
        if !bounds.is_ordered() {
            debug!(
                "Degenerate box for '{}' in {}: ({}, {}, {}, {})",
                name,
                path.display(),
                xmin,
                ymin,
                xmax,
                ymax
            );
        }

        objects.push(DiagramObject::new(name, bounds, difficult, truncated));
    }

    Ok((CanvasSize::new(width, height, depth), objects))
}

fn required_child_element<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<Node<'a, 'input>, DiagcatError> {
    child_element(node, tag).ok_or_else(|| missing_field(tag, path, context))
}

fn required_child_text(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<String, DiagcatError> {
    optional_child_text(node, tag).ok_or_else(|| missing_field(tag, path, context))
}

fn parse_required_i64(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<i64, DiagcatError> {
    let raw = required_child_text(node, tag, path, context)?;
    raw.parse::<i64>().map_err(|_| DiagcatError::TypeError {
        path: path.to_path_buf(),
        field: tag.to_string(),
        context: context.to_string(),
        value: raw,
    })
}

fn missing_field(tag: &str, path: &Path, context: &str) -> DiagcatError {
    DiagcatError::MissingField {
        path: path.to_path_buf(),
        field: tag.to_string(),
        context: context.to_string(),
    }
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == tag)
}

fn optional_child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    child_element(node, tag)
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

fn has_xml_suffix(file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(XML_SUFFIX)
}

pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<annotation>
  <filename>sample.jpg</filename>
  <size>
    <width>640</width>
    <height>480</height>
    <depth>3</depth>
  </size>
  <object>
    <name>dog</name>
    <pose>Unspecified</pose>
    <truncated>1</truncated>
    <difficult>0</difficult>
    <bndbox>
      <xmin>10</xmin>
      <ymin>10</ymin>
      <xmax>110</xmax>
      <ymax>60</ymax>
    </bndbox>
  </object>
</annotation>"#;

    #[test]
    fn parse_diagram_str_extracts_size_and_objects() {
        let diagram = parse_diagram_str(SAMPLE_XML, "sample.xml").expect("parse xml");
        assert_eq!(diagram.key(), "sample");
        assert_eq!(diagram.size(), CanvasSize::new(640, 480, 3));
        assert_eq!(diagram.objects().len(), 1);

        let dog = &diagram.objects()[0];
        assert_eq!(dog.object_type, "dog");
        assert_eq!(dog.bounds, BBox::from_xyxy(10, 10, 110, 60));
        assert!(!dog.difficult);
        assert!(dog.truncated);
    }

    #[test]
    fn nonzero_flags_are_true() {
        let xml = SAMPLE_XML
            .replace("<truncated>1</truncated>", "<truncated>0</truncated>")
            .replace("<difficult>0</difficult>", "<difficult>7</difficult>");
        let diagram = parse_diagram_str(&xml, "sample.xml").expect("parse xml");
        assert!(diagram.objects()[0].difficult);
        assert!(!diagram.objects()[0].truncated);
    }

    #[test]
    fn root_tag_name_is_not_checked() {
        let xml = r#"<doc><size><width>4</width><height>5</height><depth>1</depth></size></doc>"#;
        let diagram = parse_diagram_str(xml, "doc.xml").expect("parse xml");
        assert_eq!(diagram.dwidth(), 4);
        assert!(diagram.objects().is_empty());
    }

    #[test]
    fn malformed_xml_is_parse_error() {
        let err = parse_diagram_str("<annotation><size>", "broken.xml").unwrap_err();
        assert!(matches!(err, DiagcatError::XmlParse { .. }));
    }

    #[test]
    fn missing_depth_is_missing_field() {
        let xml = SAMPLE_XML.replace("<depth>3</depth>", "");
        let err = parse_diagram_str(&xml, "sample.xml").unwrap_err();
        match err {
            DiagcatError::MissingField { field, .. } => assert_eq!(field, "depth"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_difficult_is_missing_field() {
        let xml = SAMPLE_XML.replace("<difficult>0</difficult>", "");
        let err = parse_diagram_str(&xml, "sample.xml").unwrap_err();
        assert!(err.is_malformed_document());
        assert!(matches!(err, DiagcatError::MissingField { ref field, .. } if field == "difficult"));
    }

    #[test]
    fn empty_name_is_missing_field() {
        let xml = SAMPLE_XML.replace("<name>dog</name>", "<name>  </name>");
        let err = parse_diagram_str(&xml, "sample.xml").unwrap_err();
        assert!(matches!(err, DiagcatError::MissingField { ref field, .. } if field == "name"));
    }

    #[test]
    fn fractional_coordinate_is_type_error() {
        let xml = SAMPLE_XML.replace("<xmin>10</xmin>", "<xmin>10.5</xmin>");
        let err = parse_diagram_str(&xml, "sample.xml").unwrap_err();
        match err {
            DiagcatError::TypeError { field, value, .. } => {
                assert_eq!(field, "xmin");
                assert_eq!(value, "10.5");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn bad_filename_is_rejected_before_parsing() {
        let err = parse_diagram_str("not xml at all", "sample.txt").unwrap_err();
        assert!(matches!(err, DiagcatError::InvalidFilename { .. }));
    }

    #[test]
    fn read_missing_file_is_file_read_error() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let err = read_diagram_file(&temp.path().join("absent.xml")).unwrap_err();
        assert!(matches!(err, DiagcatError::FileRead { .. }));
    }

    #[cfg(feature = "fuzzing")]
    #[test]
    fn from_slice_rejects_invalid_utf8() {
        let err = from_diagram_xml_slice(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, DiagcatError::XmlParse { .. }));
    }

    #[test]
    fn list_xml_files_filters_and_sorts() {
        let temp = tempfile::tempdir().expect("create temp dir");
        fs::write(temp.path().join("b.xml"), "").expect("write b.xml");
        fs::write(temp.path().join("A.XML"), "").expect("write A.XML");
        fs::write(temp.path().join("notes.txt"), "").expect("write notes.txt");
        fs::create_dir_all(temp.path().join("nested")).expect("create nested dir");
        fs::write(temp.path().join("nested/c.xml"), "").expect("write nested xml");

        let files = list_xml_files(temp.path()).expect("list files");
        assert_eq!(files, vec!["A.XML".to_string(), "b.xml".to_string()]);
    }

    #[test]
    fn list_xml_files_includes_bare_suffix_name() {
        let temp = tempfile::tempdir().expect("create temp dir");
        fs::write(temp.path().join(".xml"), "").expect("write .xml");
        fs::write(temp.path().join("a.xml"), "").expect("write a.xml");

        let files = list_xml_files(temp.path()).expect("list files");
        assert_eq!(files, vec![".xml".to_string(), "a.xml".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn list_xml_files_skips_dangling_symlink() {
        let temp = tempfile::tempdir().expect("create temp dir");
        fs::write(temp.path().join("a.xml"), "").expect("write a.xml");
        std::os::unix::fs::symlink(temp.path().join("missing.xml"), temp.path().join("broken.xml"))
            .expect("create symlink");

        let files = list_xml_files(temp.path()).expect("list files");
        assert_eq!(files, vec!["a.xml".to_string()]);
    }

    #[test]
    fn list_xml_files_missing_dir_is_error() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let err = list_xml_files(&temp.path().join("absent")).unwrap_err();
        assert!(matches!(err, DiagcatError::Io(_)));
    }
}
