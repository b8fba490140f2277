#![allow(dead_code)]

use diagcat::model::{BBox, CanvasSize, Diagram, DiagramObject};
use diagcat::Catalog;
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn arb_object_type() -> BoxedStrategy<String> {
    prop_oneof![
        Just("car".to_string()),
        Just("Car".to_string()),
        Just("dog".to_string()),
        Just("person".to_string()),
        proptest::string::string_regex("[A-Za-z]{1,8}").expect("valid type regex"),
    ]
    .boxed()
}

pub fn arb_object() -> BoxedStrategy<DiagramObject> {
    (
        arb_object_type(),
        0i64..2_000,
        0i64..2_000,
        0i64..500,
        0i64..500,
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(object_type, x, y, w, h, difficult, truncated)| {
            DiagramObject::new(
                object_type,
                BBox::from_xyxy(x, y, x + w, y + h),
                difficult,
                truncated,
            )
        })
        .boxed()
}

pub fn arb_size() -> BoxedStrategy<CanvasSize> {
    (1i64..4_000, 1i64..4_000, prop_oneof![Just(1i64), Just(3i64)])
        .prop_map(|(w, h, d)| CanvasSize::new(w, h, d))
        .boxed()
}

/// A catalog of up to `max_diagrams` diagrams with unique keys `d0`, `d1`, ...
pub fn arb_catalog(max_diagrams: usize, max_objects: usize) -> BoxedStrategy<Catalog> {
    proptest::collection::vec(
        (
            arb_size(),
            proptest::collection::vec(arb_object(), 0..=max_objects),
        ),
        0..=max_diagrams,
    )
    .prop_map(|entries| {
        let mut catalog = Catalog::new();
        for (idx, (size, objects)) in entries.into_iter().enumerate() {
            let diagram =
                Diagram::new(format!("d{idx}.xml"), size, objects).expect("valid diagram");
            catalog.insert(diagram).expect("unique key");
        }
        catalog
    })
    .boxed()
}
