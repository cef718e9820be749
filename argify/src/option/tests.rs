//! Unit tests for destination paths.

use rstest::rstest;
use serde_json::{Value, json};

use super::{Arity, Dest};

#[rstest]
fn display_joins_segments() {
    let dest = Dest::root().child("db").child("port");
    assert_eq!(dest.to_string(), "db.port");
    assert!(Dest::root().is_root());
}

#[rstest]
fn assign_builds_nested_objects() {
    let mut root = json!({ "name": "x" });
    ["db", "port"].into_iter().collect::<Dest>().assign(&mut root, json!(5432));
    ["db", "host"].into_iter().collect::<Dest>().assign(&mut root, json!("h"));
    assert_eq!(root, json!({ "name": "x", "db": { "port": 5432, "host": "h" } }));
}

#[rstest]
fn assign_replaces_null_parents() {
    let mut root = json!({ "db": null });
    ["db", "port"].into_iter().collect::<Dest>().assign(&mut root, json!(1));
    assert_eq!(root, json!({ "db": { "port": 1 } }));
}

#[rstest]
fn lookup_follows_the_path() {
    let root = json!({ "a": { "b": [1, 2] } });
    let dest: Dest = ["a", "b"].into_iter().collect();
    assert_eq!(dest.lookup(&root), Some(&json!([1, 2])));
    assert_eq!(Dest::root().child("missing").lookup(&root), None::<&Value>);
}

#[rstest]
#[case(Arity::None, false)]
#[case(Arity::One, false)]
#[case(Arity::OneOrMore, true)]
#[case(Arity::Exactly(2), true)]
fn multiplicity(#[case] arity: Arity, #[case] expected: bool) {
    assert_eq!(arity.is_multiple(), expected);
}
