//! Unit tests for the tree walker.
#![expect(
    clippy::expect_used,
    clippy::indexing_slicing,
    reason = "tests panic to surface builder mistakes"
)]

use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::{BuildOptions, build_parser};
use crate::ArgifyError;
use crate::option::OptionDescriptor;
use crate::parser::ArgParser;
use crate::schema::{DeclaredType, FieldDescriptor, SchemaType};

fn build(schema: &SchemaType, options: &BuildOptions) -> ArgParser {
    build_parser(ArgParser::new("demo"), Some(schema), options).expect("build parser")
}

fn flag_sets(parser: &ArgParser) -> Vec<Vec<String>> {
    parser.options().map(|o| o.flags.clone()).collect()
}

fn find<'p>(parser: &'p ArgParser, dest: &str) -> &'p OptionDescriptor {
    parser
        .options()
        .find(|o| o.dest.to_string() == dest)
        .expect("option registered")
}

#[fixture]
fn inherited() -> SchemaType {
    let config = SchemaType::new("Config")
        .with_field(FieldDescriptor::of::<String>("a"))
        .with_field(FieldDescriptor::of::<u32>("b").with_default(1));
    SchemaType::new("Config2")
        .with_base(config)
        .with_field(FieldDescriptor::of::<String>("c").with_default("x"))
        .with_field(FieldDescriptor::of::<f64>("d").with_default(0.5))
}

#[fixture]
fn nested() -> SchemaType {
    let child = SchemaType::new("Child")
        .with_field(FieldDescriptor::of::<String>("name"))
        .with_field(FieldDescriptor::of::<i64>("age").with_default(10));
    SchemaType::new("Config")
        .with_field(FieldDescriptor::of::<String>("name"))
        .with_field(FieldDescriptor::new("child", DeclaredType::record(child)))
}

#[rstest]
fn missing_schema_leaves_parser_untouched() {
    let parser = build_parser(ArgParser::new("demo"), None, &BuildOptions::default())
        .expect("no-op build");
    assert_eq!(parser.options().count(), 0);
}

#[rstest]
fn building_twice_yields_identical_flags(inherited: SchemaType) {
    let options = BuildOptions::default();
    assert_eq!(
        flag_sets(&build(&inherited, &options)),
        flag_sets(&build(&inherited, &options))
    );
}

#[rstest]
fn options_are_grouped_by_declaring_type(inherited: SchemaType) {
    let parser = build(&inherited, &BuildOptions::default());
    let groups: Vec<_> = parser
        .options()
        .map(|o| (o.dest.to_string(), o.group.clone().unwrap_or_default()))
        .collect();
    assert_eq!(
        groups,
        [
            ("a".to_owned(), "Config".to_owned()),
            ("b".to_owned(), "Config".to_owned()),
            ("c".to_owned(), "Config2".to_owned()),
            ("d".to_owned(), "Config2".to_owned()),
        ]
    );
    assert_eq!(parser.group_labels(), ["Config", "Config2"]);
}

#[rstest]
fn grouping_can_be_turned_off(inherited: SchemaType) {
    let parser = build(&inherited, &BuildOptions::default().with_groupby_inherit(false));
    assert!(parser.options().all(|o| o.group.is_none()));
    assert!(parser.group_labels().is_empty());
}

#[rstest]
fn first_field_wins_the_short_flag() {
    let schema = SchemaType::new("Config")
        .with_field(FieldDescriptor::of::<String>("alpha"))
        .with_field(FieldDescriptor::of::<String>("aardvark"));
    let parser = build(&schema, &BuildOptions::default());
    assert_eq!(
        flag_sets(&parser),
        [vec!["--alpha", "-a"], vec!["--aardvark"]]
    );
}

#[rstest]
fn reserved_and_disabled_short_flags(inherited: SchemaType) {
    let reserved = build(&inherited, &BuildOptions::default().reserve_short("-a"));
    assert_eq!(find(&reserved, "a").flags, ["--a"]);

    let disabled = build(&inherited, &BuildOptions::default().with_auto_truncate(false));
    assert!(disabled.options().all(|o| o.flags.len() == 1));
}

#[rstest]
fn explicit_long_flag_claims_short_token() {
    let schema = SchemaType::new("Config")
        .with_field(FieldDescriptor::of::<String>("xray").with_extra("cli", json!(["-y"])))
        .with_field(FieldDescriptor::of::<String>("yankee"));
    let parser = build(&schema, &BuildOptions::default());
    assert_eq!(find(&parser, "yankee").flags, ["--yankee"]);
}

#[rstest]
#[case("b")]
#[case("child")]
fn excluded_fields_are_skipped(#[case] excluded: &str) {
    let child = SchemaType::new("Child").with_field(FieldDescriptor::of::<u8>("x"));
    let schema = SchemaType::new("Config")
        .with_field(FieldDescriptor::of::<u8>("b"))
        .with_field(FieldDescriptor::new("child", DeclaredType::record(child)));
    let parser = build(&schema, &BuildOptions::default().exclude(excluded));
    assert!(parser.options().all(|o| o.dest.segments()[0] != excluded));
    assert_eq!(parser.options().count(), 1);
}

#[rstest]
fn dotted_destinations_can_be_excluded(nested: SchemaType) {
    let parser = build(&nested, &BuildOptions::default().exclude("child.age"));
    let dests: Vec<_> = parser.options().map(|o| o.dest.to_string()).collect();
    assert_eq!(dests, ["name", "child.name"]);
}

#[rstest]
fn nested_records_get_dotted_flags(nested: SchemaType) {
    let parser = build(&nested, &BuildOptions::default());
    let age = find(&parser, "child.age");
    assert_eq!(age.flags, ["--child.age", "-a"]);
    assert_eq!(age.default, Some(json!(10)));
    assert!(!age.required);
    assert_eq!(age.group.as_deref(), Some("Child"));
    assert_eq!(find(&parser, "child.name").flags, ["--child.name"]);
}

#[rstest]
fn nested_tokens_assemble_the_record(nested: SchemaType) {
    let parser = build(&nested, &BuildOptions::default());
    let ns = parser
        .try_parse_from(["demo", "--name", "x", "--child.name", "y", "--child.age", "5"])
        .expect("parse");
    assert_eq!(
        ns.into_value(),
        json!({ "name": "x", "child": { "name": "y", "age": 5 } })
    );

    let defaulted = parser
        .try_parse_from(["demo", "--name", "x", "--child.name", "y"])
        .expect("parse");
    assert_eq!(defaulted.get("child.age"), Some(&json!(10)));
}

#[rstest]
fn nested_groups_ignore_outer_setting(nested: SchemaType) {
    let parser = build(&nested, &BuildOptions::default().with_groupby_inherit(false));
    assert_eq!(find(&parser, "name").group, None);
    assert_eq!(find(&parser, "child.age").group.as_deref(), Some("Child"));
}

#[rstest]
fn optional_records_relax_and_null_out() {
    let db = SchemaType::new("Db")
        .with_field(FieldDescriptor::of::<String>("host"))
        .with_field(FieldDescriptor::of::<bool>("tls"));
    let schema = SchemaType::new("Config").with_field(
        FieldDescriptor::new("db", DeclaredType::optional(DeclaredType::record(db)))
            .with_default(Value::Null),
    );
    let parser = build(&schema, &BuildOptions::default());
    assert!(parser.options().all(|o| !o.required));

    let absent = parser.try_parse_from(["demo"]).expect("parse");
    assert_eq!(absent.get("db"), Some(&Value::Null));
    let present = parser
        .try_parse_from(["demo", "--db.host", "h", "--enable-db.tls"])
        .expect("parse");
    assert_eq!(present.get("db"), Some(&json!({ "host": "h", "tls": true })));
}

#[rstest]
fn unexpanded_records_take_json(nested: SchemaType) {
    let parser = build(&nested, &BuildOptions::default().with_parse_nested_model(false));
    assert_eq!(find(&parser, "child").flags, ["--child", "-c"]);
    let ns = parser
        .try_parse_from(["demo", "--name", "x", "--child", r#"{"name":"y","age":3}"#])
        .expect("parse");
    assert_eq!(ns.get("child.age"), Some(&json!(3)));
}

#[rstest]
fn separator_applies_to_every_derived_flag() {
    let schema = SchemaType::new("Config")
        .with_field(FieldDescriptor::of::<u32>("max_retries"))
        .with_field(FieldDescriptor::of::<bool>("dry_run"));
    let parser = build(&schema, &BuildOptions::default().with_naming_separator("_"));
    assert_eq!(
        flag_sets(&parser),
        [
            vec!["--max_retries", "-m"],
            vec!["--enable_dry_run"],
            vec!["--disable_dry_run"],
        ]
    );
}

#[rstest]
fn clashing_alias_is_a_collision() {
    let schema = SchemaType::new("Config")
        .with_field(FieldDescriptor::of::<String>("source"))
        .with_field(FieldDescriptor::of::<String>("origin").with_alias("source"));
    let err = build_parser(ArgParser::new("demo"), Some(&schema), &BuildOptions::default())
        .expect_err("collision");
    assert!(matches!(err, ArgifyError::FlagCollision { ref flag, .. } if flag == "--source"));
}

#[rstest]
fn build_options_deserialize_with_defaults() {
    let options: BuildOptions =
        serde_json::from_value(json!({ "naming_separator": "_", "excludes": ["x"] }))
            .expect("valid options");
    assert_eq!(options.naming_separator, "_");
    assert!(options.auto_truncate);
    assert!(options.exclude_truncated_tokens.contains("-h"));
    assert!(options.excludes.contains("x"));
}
