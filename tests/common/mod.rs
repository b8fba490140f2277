#![allow(dead_code)]

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// One `<object>` entry for a generated annotation document.
#[derive(Clone, Debug)]
pub struct ObjectSpec {
    pub name: String,
    pub bounds: (i64, i64, i64, i64),
    pub difficult: i64,
    pub truncated: i64,
}

impl ObjectSpec {
    pub fn new(name: &str, bounds: (i64, i64, i64, i64), difficult: i64, truncated: i64) -> Self {
        Self {
            name: name.to_string(),
            bounds,
            difficult,
            truncated,
        }
    }
}

pub fn annotation_xml(size: (i64, i64, i64), objects: &[ObjectSpec]) -> String {
    let mut xml = String::new();
    writeln!(xml, "<?xml version=\"1.0\" encoding=\"utf-8\"?>").expect("write to string");
    writeln!(xml, "<annotation>").expect("write to string");
    writeln!(xml, "  <folder>JPEGImages</folder>").expect("write to string");
    writeln!(xml, "  <size>").expect("write to string");
    writeln!(xml, "    <width>{}</width>", size.0).expect("write to string");
    writeln!(xml, "    <height>{}</height>", size.1).expect("write to string");
    writeln!(xml, "    <depth>{}</depth>", size.2).expect("write to string");
    writeln!(xml, "  </size>").expect("write to string");

    for object in objects {
        let (xmin, ymin, xmax, ymax) = object.bounds;
        writeln!(xml, "  <object>").expect("write to string");
        writeln!(xml, "    <name>{}</name>", object.name).expect("write to string");
        writeln!(xml, "    <pose>Unspecified</pose>").expect("write to string");
        writeln!(xml, "    <truncated>{}</truncated>", object.truncated).expect("write to string");
        writeln!(xml, "    <difficult>{}</difficult>", object.difficult).expect("write to string");
        writeln!(xml, "    <bndbox>").expect("write to string");
        writeln!(xml, "      <xmin>{xmin}</xmin>").expect("write to string");
        writeln!(xml, "      <ymin>{ymin}</ymin>").expect("write to string");
        writeln!(xml, "      <xmax>{xmax}</xmax>").expect("write to string");
        writeln!(xml, "      <ymax>{ymax}</ymax>").expect("write to string");
        writeln!(xml, "    </bndbox>").expect("write to string");
        writeln!(xml, "  </object>").expect("write to string");
    }

    writeln!(xml, "</annotation>").expect("write to string");
    xml
}

pub fn write_annotation(
    dir: &Path,
    file_name: &str,
    size: (i64, i64, i64),
    objects: &[ObjectSpec],
) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, annotation_xml(size, objects)).expect("write annotation file");
    path
}

/// The worked example: a single truncated dog on a 640x480 canvas.
pub fn write_sample(dir: &Path) -> PathBuf {
    write_annotation(
        dir,
        "sample.xml",
        (640, 480, 3),
        &[ObjectSpec::new("dog", (10, 10, 110, 60), 0, 1)],
    )
}
