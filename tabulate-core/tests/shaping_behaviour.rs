//! Behavioural tests for element shaping.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tabulate_core::{
    Attributes, Element, ElementKind, ShapeConfig, ShapeError, ShapedRecord, WayNodeRow,
    shape_element,
};

#[fixture]
fn element() -> RefCell<Option<Element>> {
    RefCell::new(None)
}

#[fixture]
fn outcome() -> RefCell<Option<Result<ShapedRecord, ShapeError>>> {
    RefCell::new(None)
}

fn edit_metadata(id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("id", id.to_owned()),
        ("user", "mapper".to_owned()),
        ("uid", "1001".to_owned()),
        ("version", "1".to_owned()),
        ("changeset", "42".to_owned()),
        ("timestamp", "2016-06-26T18:42:10Z".to_owned()),
    ]
}

fn node(tags: &[(&str, &str)]) -> Element {
    let mut attributes = edit_metadata("7");
    attributes.push(("lat", "40.7484".to_owned()));
    attributes.push(("lon", "-73.9857".to_owned()));
    let mut element = Element::new(ElementKind::Node, attributes.into_iter().collect());
    element.tags = tags
        .iter()
        .map(|(key, value)| Attributes::from_iter([("k", *key), ("v", *value)]))
        .collect();
    element
}

fn shaped(outcome: &RefCell<Option<Result<ShapedRecord, ShapeError>>>) -> ShapedRecord {
    match outcome.borrow().as_ref() {
        Some(Ok(record)) => record.clone(),
        other => panic!("expected a shaped record, got {other:?}"),
    }
}

#[given("a node tagged addr:postcode \"NY 10118\" and addr:street \"Fifth Ave\"")]
fn given_address_node(#[from(element)] element: &RefCell<Option<Element>>) {
    *element.borrow_mut() = Some(node(&[
        ("addr:postcode", "NY 10118"),
        ("addr:street", "Fifth Ave"),
    ]));
}

#[given("a node tagged \"name, alt\" and \"amenity\"")]
fn given_problem_node(#[from(element)] element: &RefCell<Option<Element>>) {
    *element.borrow_mut() = Some(node(&[("name, alt", "Cafe"), ("amenity", "cafe")]));
}

#[given("a way referencing nodes 5, 9 and 2")]
fn given_way(#[from(element)] element: &RefCell<Option<Element>>) {
    let mut way = Element::new(ElementKind::Way, edit_metadata("77").into_iter().collect());
    way.node_refs = ["5", "9", "2"]
        .into_iter()
        .map(|node_id| Attributes::from_iter([("ref", node_id)]))
        .collect();
    *element.borrow_mut() = Some(way);
}

#[given("a node without a latitude")]
fn given_node_without_lat(#[from(element)] element: &RefCell<Option<Element>>) {
    let complete = node(&[]);
    let attributes = complete
        .attributes
        .iter()
        .filter(|(name, _)| *name != "lat")
        .collect();
    *element.borrow_mut() = Some(Element::new(ElementKind::Node, attributes));
}

#[when("I shape the element")]
fn when_shape(
    #[from(element)] element: &RefCell<Option<Element>>,
    #[from(outcome)] outcome: &RefCell<Option<Result<ShapedRecord, ShapeError>>>,
) {
    let element = element.borrow();
    let element = element.as_ref().expect("an element was prepared");
    *outcome.borrow_mut() = Some(shape_element(element, &ShapeConfig::default()));
}

#[then("the element shapes successfully")]
fn then_success(#[from(outcome)] outcome: &RefCell<Option<Result<ShapedRecord, ShapeError>>>) {
    let _ = shaped(outcome);
}

#[then("the tag rows are \"addr/postcode=10118\" and \"addr/street=Fifth Avenue\"")]
fn then_address_rows(
    #[from(outcome)] outcome: &RefCell<Option<Result<ShapedRecord, ShapeError>>>,
) {
    let rows: Vec<String> = shaped(outcome)
        .tags()
        .iter()
        .map(|row| format!("{}/{}={}", row.tag_type, row.key, row.value))
        .collect();
    assert_eq!(rows, ["addr/postcode=10118", "addr/street=Fifth Avenue"]);
}

#[then("only the \"amenity\" tag remains")]
fn then_only_amenity(
    #[from(outcome)] outcome: &RefCell<Option<Result<ShapedRecord, ShapeError>>>,
) {
    let record = shaped(outcome);
    let keys: Vec<&str> = record.tags().iter().map(|row| row.key.as_str()).collect();
    assert_eq!(keys, ["amenity"]);
}

#[then("the way node positions are 0, 1 and 2 in reference order")]
fn then_positions(#[from(outcome)] outcome: &RefCell<Option<Result<ShapedRecord, ShapeError>>>) {
    let ShapedRecord::Way { nodes, .. } = shaped(outcome) else {
        panic!("expected way rows");
    };
    let pairs: Vec<(i64, u32)> = nodes
        .iter()
        .map(|WayNodeRow { node_id, position, .. }| (*node_id, *position))
        .collect();
    assert_eq!(pairs, [(5, 0), (9, 1), (2, 2)]);
}

#[then("shaping fails for the missing \"lat\" attribute")]
fn then_missing_lat(
    #[from(outcome)] outcome: &RefCell<Option<Result<ShapedRecord, ShapeError>>>,
) {
    let outcome = outcome.borrow();
    match outcome.as_ref() {
        Some(Err(ShapeError::MissingAttribute {
            kind, id, attribute, ..
        })) => {
            assert_eq!(*kind, ElementKind::Node);
            assert_eq!(*id, Some(7));
            assert_eq!(*attribute, "lat");
        }
        other => panic!("expected a missing attribute error, got {other:?}"),
    }
}

#[scenario(path = "tests/features/shaping.feature", index = 0)]
fn namespaced_tags(
    element: RefCell<Option<Element>>,
    outcome: RefCell<Option<Result<ShapedRecord, ShapeError>>>,
) {
    let _ = (element, outcome);
}

#[scenario(path = "tests/features/shaping.feature", index = 1)]
fn problem_tags(
    element: RefCell<Option<Element>>,
    outcome: RefCell<Option<Result<ShapedRecord, ShapeError>>>,
) {
    let _ = (element, outcome);
}

#[scenario(path = "tests/features/shaping.feature", index = 2)]
fn way_node_order(
    element: RefCell<Option<Element>>,
    outcome: RefCell<Option<Result<ShapedRecord, ShapeError>>>,
) {
    let _ = (element, outcome);
}

#[scenario(path = "tests/features/shaping.feature", index = 3)]
fn missing_latitude(
    element: RefCell<Option<Element>>,
    outcome: RefCell<Option<Result<ShapedRecord, ShapeError>>>,
) {
    let _ = (element, outcome);
}
