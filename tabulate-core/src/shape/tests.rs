use std::collections::BTreeMap;

use super::*;
use crate::rows::{TagRow, WayNodeRow};
use crate::test_support::{ElementBuilder, SAMPLE_TIMESTAMP};
use rstest::{fixture, rstest};

#[fixture]
fn config() -> ShapeConfig {
    ShapeConfig::default()
}

fn shaped_tags(element: &Element, config: &ShapeConfig) -> Vec<TagRow> {
    shape_element(element, config)
        .expect("element should shape")
        .tags()
        .to_vec()
}

#[rstest]
fn shapes_node_attributes_in_column_order(config: ShapeConfig) {
    let element = ElementBuilder::node(42).build();
    let shaped = shape_element(&element, &config).expect("node should shape");

    let ShapedRecord::Node { node, tags } = shaped else {
        panic!("expected node rows, got {shaped:?}");
    };
    assert_eq!(node.id, 42);
    assert!((node.lat - 40.748_440_5).abs() < 1e-9);
    assert!((node.lon + 73.985_664_4).abs() < 1e-9);
    assert_eq!(node.user, "mapper");
    assert_eq!(node.uid, 1001);
    assert_eq!(node.version, "2");
    assert_eq!(node.changeset, 40_012_345);
    assert_eq!(node.timestamp, SAMPLE_TIMESTAMP);
    assert!(tags.is_empty());
}

#[rstest]
fn shapes_way_attributes(config: ShapeConfig) {
    let element = ElementBuilder::way(9).tag("highway", "residential").build();
    let shaped = shape_element(&element, &config).expect("way should shape");

    let ShapedRecord::Way { way, nodes, tags } = shaped else {
        panic!("expected way rows, got {shaped:?}");
    };
    assert_eq!(way.id, 9);
    assert_eq!(way.changeset, 40_012_345);
    assert!(nodes.is_empty());
    assert_eq!(tags.len(), 1);
}

#[rstest]
fn accepts_empty_user_names(config: ShapeConfig) {
    let element = ElementBuilder::node(1)
        .without("user")
        .attribute("user", "")
        .build();
    let shaped = shape_element(&element, &config).expect("empty user is valid");
    let ShapedRecord::Node { node, .. } = shaped else {
        panic!("expected node rows");
    };
    assert_eq!(node.user, "");
}

#[rstest]
#[case(ElementKind::Node, "lat")]
#[case(ElementKind::Node, "timestamp")]
#[case(ElementKind::Way, "uid")]
#[case(ElementKind::Way, "changeset")]
fn reports_missing_attributes_with_record_id(
    config: ShapeConfig,
    #[case] kind: ElementKind,
    #[case] missing: &'static str,
) {
    let builder = match kind {
        ElementKind::Node => ElementBuilder::node(314),
        ElementKind::Way => ElementBuilder::way(314),
    };
    let element = builder.without(missing).build();

    let err = shape_element(&element, &config).expect_err("missing attribute should fail");
    assert_eq!(
        err,
        ShapeError::MissingAttribute {
            kind,
            id: Some(314),
            attribute: missing,
        }
    );
    assert!(err.to_string().contains("314"), "message: {err}");
}

#[rstest]
fn reports_missing_id_without_identifier(config: ShapeConfig) {
    let element = ElementBuilder::node(1).without("id").build();
    let err = shape_element(&element, &config).expect_err("missing id should fail");
    assert_eq!(
        err,
        ShapeError::MissingAttribute {
            kind: ElementKind::Node,
            id: None,
            attribute: "id",
        }
    );
    assert_eq!(
        err.to_string(),
        "node (without id) is missing required attribute `id`"
    );
}

#[rstest]
#[case("lat", "north")]
#[case("uid", "1.5")]
#[case("changeset", "")]
fn reports_unparseable_attributes(
    config: ShapeConfig,
    #[case] attribute: &'static str,
    #[case] value: &str,
) {
    let element = ElementBuilder::node(5)
        .without(attribute)
        .attribute(attribute, value)
        .build();
    let err = shape_element(&element, &config).expect_err("invalid value should fail");
    match err {
        ShapeError::InvalidAttribute {
            kind,
            id,
            attribute: reported,
            value: raw,
            ..
        } => {
            assert_eq!(kind, ElementKind::Node);
            assert_eq!(id, Some(5));
            assert_eq!(reported, attribute);
            assert_eq!(raw, value);
        }
        other => panic!("expected InvalidAttribute, got {other:?}"),
    }
}

#[rstest]
fn splits_namespaced_keys_on_first_separator(config: ShapeConfig) {
    let element = ElementBuilder::node(1)
        .tag("addr:street:name", "Lincoln")
        .tag("amenity", "cafe")
        .build();

    let tags = shaped_tags(&element, &config);
    assert_eq!(
        tags,
        vec![
            TagRow {
                id: 1,
                key: "street:name".into(),
                value: "Lincoln".into(),
                tag_type: "addr".into(),
            },
            TagRow {
                id: 1,
                key: "amenity".into(),
                value: "cafe".into(),
                tag_type: "regular".into(),
            },
        ]
    );
}

#[rstest]
fn drops_problem_keys_and_keeps_the_rest(config: ShapeConfig) {
    let element = ElementBuilder::node(3)
        .tag("name, alt", "Cafe")
        .tag("name", "Cafe")
        .tag("fixme please", "check")
        .tag("opening_hours", "Mo-Fr 08:00-18:00")
        .build();

    let keys: Vec<String> = shaped_tags(&element, &config)
        .into_iter()
        .map(|row| row.key)
        .collect();
    assert_eq!(keys, ["name", "opening_hours"]);
}

#[rstest]
fn normalises_values_by_raw_key(config: ShapeConfig) {
    let element = ElementBuilder::way(11)
        .tag("addr:postcode", "10001-2062")
        .tag("addr:street", "West 34th St.")
        .tag("phone", "(212) 333-3100")
        .tag("contact:phone", "2122391222")
        .tag("name", "Canal St")
        .tag("postal_code", "10001-2062")
        .build();

    let values: Vec<String> = shaped_tags(&element, &config)
        .into_iter()
        .map(|row| row.value)
        .collect();
    assert_eq!(
        values,
        [
            "10001",
            "West 34th Street",
            "+1-212-333-3100",
            "+1-212-239-1222",
            "Canal St",
            "10001-2062",
        ]
    );
}

#[rstest]
fn keeps_way_node_order(config: ShapeConfig) {
    let element = ElementBuilder::way(77)
        .node_ref(5)
        .node_ref(9)
        .node_ref(2)
        .build();
    let ShapedRecord::Way { nodes, .. } = shape_element(&element, &config).expect("way") else {
        panic!("expected way rows");
    };
    assert_eq!(
        nodes,
        vec![
            WayNodeRow {
                id: 77,
                node_id: 5,
                position: 0,
            },
            WayNodeRow {
                id: 77,
                node_id: 9,
                position: 1,
            },
            WayNodeRow {
                id: 77,
                node_id: 2,
                position: 2,
            },
        ]
    );
}

#[rstest]
fn ignores_node_refs_on_nodes(config: ShapeConfig) {
    let element = ElementBuilder::node(8).node_ref(1).build();
    assert!(matches!(
        shape_element(&element, &config),
        Ok(ShapedRecord::Node { .. })
    ));
}

#[rstest]
fn rejects_way_with_reference_missing_ref(config: ShapeConfig) {
    let element = ElementBuilder::way(12)
        .node_ref(1)
        .raw_node_ref(Attributes::from_iter([("role", "outer")]))
        .build();
    let err = shape_element(&element, &config).expect_err("nd without ref should fail");
    assert_eq!(
        err,
        ShapeError::MissingAttribute {
            kind: ElementKind::Way,
            id: Some(12),
            attribute: "ref",
        }
    );
}

#[rstest]
#[case(Attributes::from_iter([("v", "cafe")]), "k")]
#[case(Attributes::from_iter([("k", "amenity")]), "v")]
fn rejects_tags_missing_key_or_value(
    config: ShapeConfig,
    #[case] tag: Attributes,
    #[case] missing: &'static str,
) {
    let element = ElementBuilder::node(21).raw_tag(tag).build();
    let err = shape_element(&element, &config).expect_err("incomplete tag should fail");
    assert_eq!(
        err,
        ShapeError::MissingAttribute {
            kind: ElementKind::Node,
            id: Some(21),
            attribute: missing,
        }
    );
}

#[rstest]
fn drops_problem_keys_before_requiring_a_value(config: ShapeConfig) {
    let element = ElementBuilder::node(5)
        .raw_tag(Attributes::from_iter([("k", "fixme please")]))
        .tag("amenity", "cafe")
        .build();
    let tags = shaped_tags(&element, &config);
    let keys: Vec<&str> = tags.iter().map(|tag| tag.key.as_str()).collect();
    assert_eq!(keys, ["amenity"]);
}

#[rstest]
fn honours_custom_default_tag_type() {
    let config = ShapeConfig::default().with_default_tag_type("plain");
    let element = ElementBuilder::node(1).tag("shop", "deli").build();
    assert_eq!(shaped_tags(&element, &config)[0].tag_type, "plain");
}

#[rstest]
fn tag_rows_rebuild_accepted_pairs(config: ShapeConfig) {
    let pairs = [
        ("amenity", "restaurant"),
        ("addr:housenumber", "350"),
        ("addr:street:name", "Fifth"),
        ("cuisine", "pizza;italian"),
        ("bad key", "dropped"),
        ("name:en", "Joe's"),
    ];
    let element = pairs
        .iter()
        .fold(ElementBuilder::node(99), |builder, (key, value)| {
            builder.tag(key, value)
        })
        .build();

    let rebuilt: BTreeMap<String, String> = shaped_tags(&element, &config)
        .into_iter()
        .map(|row| (row.original_key(config.default_tag_type()), row.value))
        .collect();
    let expected: BTreeMap<String, String> = pairs
        .iter()
        .filter(|(key, _)| !has_problem_chars(key))
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect();
    assert_eq!(rebuilt, expected);
}
