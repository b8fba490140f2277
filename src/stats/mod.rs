//! Catalog statistics.
//!
//! This module aggregates counts, distinct object types and min/max ranges
//! over every loaded diagram in a single pass.

mod report;

pub use report::{MinMax, StatsReport};

use crate::catalog::Catalog;

/// Compute the statistics report for a catalog.
pub fn stats_catalog(catalog: &Catalog) -> StatsReport {
    let mut report = StatsReport {
        diagrams: catalog.count(),
        ..Default::default()
    };

    for diagram in catalog {
        report.objects += diagram.objects().len();
        report.width = MinMax::extend(report.width, diagram.dwidth());
        report.height = MinMax::extend(report.height, diagram.dheight());

        for object in diagram.objects() {
            report.object_types.insert(object.object_type.clone());
            report.object_area = MinMax::extend(report.object_area, object.area());
        }
    }

    report
}
