use recordtree_core::{
    assign_addresses, assign_addresses_from, collect_addresses, count_records, find,
    strip_addresses, Address, Record, Tree,
};
use serde_json::json;
use std::collections::HashSet;

fn scenario_tree() -> Tree {
    serde_json::from_value(json!([
        {"data": {"ID": "a"}},
        {"data": {"ID": "b"}, "children": {"x": {"records": [{"data": {"ID": "c"}}]}}}
    ]))
    .unwrap()
}

fn wide_tree() -> Tree {
    vec![
        Record::with_id("root-0")
            .section(
                "notes",
                vec![
                    Record::with_id("n0"),
                    Record::with_id("n1").section("replies", vec![Record::with_id("r0")]),
                ],
            )
            .section("tasks", vec![Record::with_id("t0"), Record::with_id("t1")]),
        Record::with_id("root-1"),
        Record::with_id("root-2").section("notes", vec![Record::with_id("n0")]),
    ]
}

fn canonical_set(records: &[Record]) -> Vec<String> {
    collect_addresses(records)
        .into_iter()
        .map(|address| address.canonical())
        .collect()
}

#[test]
fn scenario_records_get_positional_addresses() {
    let tree = assign_addresses(scenario_tree());

    assert_eq!(tree[0].address.as_ref().unwrap().to_wire(), vec!["0"]);
    assert_eq!(tree[1].address.as_ref().unwrap().to_wire(), vec!["1"]);
    let nested = &tree[1].sections.as_ref().unwrap()["x"].records[0];
    assert_eq!(nested.id(), Some("c"));
    assert_eq!(nested.address.as_ref().unwrap().to_wire(), vec!["1", "x", "0"]);
}

#[test]
fn addressed_output_serializes_path_key() {
    let tree = assign_addresses(scenario_tree());
    let value = serde_json::to_value(&tree).unwrap();
    assert_eq!(
        value,
        json!([
            {"data": {"ID": "a"}, "__path": ["0"]},
            {
                "data": {"ID": "b"},
                "children": {"x": {"records": [{"data": {"ID": "c"}, "__path": ["1", "x", "0"]}]}},
                "__path": ["1"]
            }
        ])
    );
}

#[test]
fn every_section_of_every_record_is_addressed() {
    let tree = assign_addresses(wide_tree());

    let addresses = canonical_set(&tree);
    assert_eq!(
        addresses,
        vec![
            "0",
            "0.notes.0",
            "0.notes.1",
            "0.notes.1.replies.0",
            "0.tasks.0",
            "0.tasks.1",
            "1",
            "2",
            "2.notes.0",
        ]
    );
    assert_eq!(addresses.len(), count_records(&tree));
}

#[test]
fn addresses_are_pairwise_distinct_even_with_duplicate_ids() {
    let tree = assign_addresses(wide_tree());
    let addresses = collect_addresses(&tree);
    let unique = addresses.iter().cloned().collect::<HashSet<Address>>();
    assert_eq!(unique.len(), addresses.len());

    let first = find(&tree, &Address::parse("0.notes.0").unwrap()).unwrap();
    let second = find(&tree, &Address::parse("2.notes.0").unwrap()).unwrap();
    assert_eq!(first.id(), second.id());
    assert_ne!(first.address, second.address);
}

#[test]
fn reassigning_unmodified_tree_is_idempotent() {
    let once = assign_addresses(wide_tree());
    let twice = assign_addresses(once.clone());
    assert_eq!(once, twice);
    assert_eq!(canonical_set(&once), canonical_set(&twice));
}

#[test]
fn strip_then_assign_reproduces_address_set() {
    let addressed = assign_addresses(wide_tree());
    let stripped = strip_addresses(addressed.clone());
    assert!(collect_addresses(&stripped).is_empty());

    let readdressed = assign_addresses(stripped);
    assert_eq!(canonical_set(&readdressed), canonical_set(&addressed));
}

#[test]
fn stale_addresses_are_overwritten() {
    let mut tree = wide_tree();
    tree[1].address = Some(Address::parse("9.bogus.4").unwrap());

    let tree = assign_addresses(tree);
    assert_eq!(tree[1].canonical_address(), "1");
}

#[test]
fn leaves_and_empty_sections_are_kept_as_is() {
    let tree: Tree = serde_json::from_value(json!([
        {"data": {"ID": "leaf"}},
        {"data": {"ID": "hollow"}, "children": {"empty": {"records": []}, "missing": {}}}
    ]))
    .unwrap();

    let tree = assign_addresses(tree);
    assert!(tree[0].sections.is_none());
    let sections = tree[1].sections.as_ref().unwrap();
    assert!(sections["empty"].records.is_empty());
    assert!(sections["missing"].records.is_empty());
    assert_eq!(count_records(&tree), 2);
}

#[test]
fn assign_from_base_prefixes_every_address() {
    let base = Address::parse("3.items").unwrap();
    let records = assign_addresses_from(
        vec![Record::with_id("x"), Record::with_id("y")],
        &base,
    );
    assert_eq!(records[0].canonical_address(), "3.items.0");
    assert_eq!(records[1].canonical_address(), "3.items.1");
}

#[test]
fn deep_nesting_is_addressed_to_the_bottom() {
    let mut record = Record::with_id("depth-20");
    for depth in (0..20).rev() {
        record = Record::with_id(format!("depth-{depth}")).section("next", vec![record]);
    }

    let tree = assign_addresses(vec![record]);
    let deepest = collect_addresses(&tree).pop().unwrap();
    assert_eq!(deepest.segments().len(), 41);
    assert!(deepest.canonical().ends_with("next.0"));
}
