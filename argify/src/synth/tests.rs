//! Unit tests for option synthesis.

use std::collections::BTreeSet;

use rstest::rstest;
use serde_json::{Value, json};

use super::{SynthContext, Synthesized, derive_flag, synthesize};
use crate::option::{Arity, Dest, OptionAction, OptionDescriptor};
use crate::schema::{
    DeclaredType, EXT_CLI, EXT_DISABLE_PREFIX, EXT_ENABLE_PREFIX, EnumType, FieldDescriptor,
    ScalarType, SchemaConfig,
};
use crate::shape::classify;
use crate::{ArgifyError, ArgifyResult};

struct Env {
    parent: Dest,
    config: SchemaConfig,
    claimed: BTreeSet<String>,
    separator: &'static str,
    prefix: &'static str,
    optional_subtree: bool,
}

impl Env {
    fn new() -> Self {
        Self {
            parent: Dest::root(),
            config: SchemaConfig::default(),
            claimed: BTreeSet::from(["-h".to_owned()]),
            separator: "-",
            prefix: "",
            optional_subtree: false,
        }
    }

    fn run(&self, field: &FieldDescriptor) -> ArgifyResult<Synthesized> {
        let ctx = SynthContext {
            parent: &self.parent,
            flag_prefix: self.prefix,
            separator: self.separator,
            config: &self.config,
            group: Some("Config"),
            optional_subtree: self.optional_subtree,
            auto_truncate: true,
            claimed: &self.claimed,
        };
        synthesize(field, &classify(field.declared_type()), &ctx)
    }

    fn single(&self, field: &FieldDescriptor) -> OptionDescriptor {
        match self.run(field) {
            Ok(Synthesized::Options(mut options)) if options.len() == 1 => options.remove(0),
            other => panic!("expected a single option, got {other:?}"),
        }
    }
}

fn flags(option: &OptionDescriptor) -> Vec<&str> {
    option.flags.iter().map(String::as_str).collect()
}

#[rstest]
#[case("name", "-", "--name")]
#[case("max_retries", "-", "--max-retries")]
#[case("max_retries", "_", "--max_retries")]
#[case("a_b_c", ".", "--a.b.c")]
fn derived_flags_are_pure(#[case] name: &str, #[case] sep: &str, #[case] expected: &str) {
    assert_eq!(derive_flag(name, sep), expected);
    assert_eq!(derive_flag(name, sep), derive_flag(name, sep));
}

#[rstest]
fn required_scalar_gets_long_and_short_flags() {
    let option = Env::new().single(&FieldDescriptor::of::<String>("name"));
    assert_eq!(flags(&option), ["--name", "-n"]);
    assert!(option.required);
    assert_eq!(option.value, Some(ScalarType::Str));
    assert_eq!(option.arity, Arity::One);
    assert_eq!(option.group.as_deref(), Some("Config"));
    assert_eq!(option.dest.to_string(), "name");
}

#[rstest]
fn claimed_short_flag_is_skipped() {
    let option = Env::new().single(&FieldDescriptor::of::<u32>("height"));
    assert_eq!(flags(&option), ["--height"]);
}

#[rstest]
fn alias_flag_comes_first_and_names_the_dest() {
    let field = FieldDescriptor::of::<u32>("log_level").with_alias("verbosity");
    let option = Env::new().single(&field);
    assert_eq!(flags(&option), ["--verbosity", "--log-level", "-l"]);
    assert_eq!(option.dest.to_string(), "verbosity");
}

#[rstest]
fn explicit_cli_names_are_verbatim() {
    let field = FieldDescriptor::of::<String>("output").with_extra(EXT_CLI, json!(["--out", "-O"]));
    let option = Env::new().single(&field);
    assert_eq!(flags(&option), ["--out", "-O", "-o"]);
}

#[rstest]
fn malformed_cli_extension_is_rejected() {
    let field = FieldDescriptor::of::<String>("output").with_extra(EXT_CLI, json!(1));
    assert!(matches!(
        Env::new().run(&field),
        Err(ArgifyError::InvalidExtension { .. })
    ));
}

#[rstest]
#[case(true, Arity::OneOrMore)]
#[case(false, Arity::ZeroOrMore)]
fn sequence_arity_follows_requiredness(#[case] required: bool, #[case] expected: Arity) {
    let mut field = FieldDescriptor::of::<Vec<i64>>("values");
    if !required {
        field = field.with_default(json!([]));
    }
    let option = Env::new().single(&field);
    assert_eq!(option.arity, expected);
    assert_eq!(option.value, Some(ScalarType::Int));
}

#[rstest]
fn mapping_uses_key_value_action() {
    let field = FieldDescriptor::new("env", DeclaredType::mapping(DeclaredType::string()));
    let option = Env::new().single(&field);
    assert_eq!(option.action, OptionAction::StoreKeyValue);
    assert_eq!(option.arity, Arity::OneOrMore);
}

#[rstest]
fn tuple_takes_exact_arity() {
    let option = Env::new().single(&FieldDescriptor::of::<(f64, f64, f64)>("origin"));
    assert_eq!(option.arity, Arity::Exactly(3));
    assert_eq!(option.value, Some(ScalarType::Float));
}

#[rstest]
fn enum_and_literal_use_choices() {
    let colour = FieldDescriptor::new(
        "colour",
        DeclaredType::Enum(EnumType::new("Colour", ["red", "blue"])),
    );
    let option = Env::new().single(&colour);
    assert_eq!(option.choices, Some(vec![json!("red"), json!("blue")]));
    assert_eq!(option.value, None);

    let mode = FieldDescriptor::new("mode", DeclaredType::Literal(vec![json!(1), json!(2)]));
    let option = Env::new().single(&mode);
    assert_eq!(option.choices, Some(vec![json!(1), json!(2)]));
}

#[rstest]
#[case(Some("described"), Some("titled"), Some("described"))]
#[case(None, Some("titled"), Some("titled"))]
#[case(None, None, None)]
fn help_prefers_description(
    #[case] description: Option<&str>,
    #[case] title: Option<&str>,
    #[case] expected: Option<&str>,
) {
    let mut field = FieldDescriptor::of::<String>("x");
    if let Some(text) = description {
        field = field.with_description(text);
    }
    if let Some(text) = title {
        field = field.with_title(text);
    }
    assert_eq!(Env::new().single(&field).help.as_deref(), expected);
}

#[rstest]
fn required_boolean_yields_exclusive_pair() {
    let result = Env::new().run(&FieldDescriptor::of::<bool>("flag"));
    let Ok(Synthesized::Exclusive { required, options }) = &result else {
        panic!("expected an exclusive pair, got {result:?}");
    };
    assert!(*required);
    let rendered: Vec<_> = options.iter().map(flags).collect();
    assert_eq!(rendered, [vec!["--enable-flag"], vec!["--disable-flag"]]);
    let actions: Vec<_> = options.iter().map(|o| o.action).collect();
    assert_eq!(actions, [OptionAction::StoreTrue, OptionAction::StoreFalse]);
    assert!(options.iter().all(|o| !o.required && o.dest.to_string() == "flag"));
}

#[rstest]
#[case(json!(true), "--disable-flag", OptionAction::StoreFalse)]
#[case(json!(false), "--enable-flag", OptionAction::StoreTrue)]
#[case(Value::Null, "--enable-flag", OptionAction::StoreTrue)]
fn defaulted_boolean_yields_one_switch(
    #[case] default: Value,
    #[case] flag: &str,
    #[case] action: OptionAction,
) {
    let field = FieldDescriptor::of::<bool>("flag").with_default(default.clone());
    let option = Env::new().single(&field);
    assert_eq!(flags(&option), [flag]);
    assert_eq!(option.action, action);
    assert_eq!(option.default, Some(default));
    assert!(!option.required);
}

#[rstest]
fn optional_boolean_takes_an_explicit_value() {
    let field = FieldDescriptor::of::<Option<bool>>("colour").with_default(Value::Null);
    let option = Env::new().single(&field);
    assert_eq!(flags(&option), ["--colour", "-c"]);
    assert_eq!(option.value, Some(ScalarType::Bool));
    assert_eq!(option.arity, Arity::One);
    assert_eq!(option.action, OptionAction::Store);
    assert_eq!(option.default, Some(Value::Null));
}

#[rstest]
fn prefix_precedence_field_over_schema_over_default() {
    let mut env = Env::new();
    env.config.cli_enable_prefix = Some("--on-".into());
    env.config.cli_disable_prefix = Some("--off-".into());
    let field = FieldDescriptor::of::<bool>("flag").with_extra(EXT_ENABLE_PREFIX, "--true-");

    let Ok(Synthesized::Exclusive { options, .. }) = env.run(&field) else {
        panic!("expected an exclusive pair");
    };
    let rendered: Vec<_> = options.iter().map(flags).collect();
    assert_eq!(rendered, [vec!["--true-flag"], vec!["--off-flag"]]);
}

#[rstest]
fn boolean_prefix_default_follows_separator() {
    let mut env = Env::new();
    env.separator = "_";
    let field = FieldDescriptor::of::<bool>("dry_run").with_default(true);
    assert_eq!(flags(&env.single(&field)), ["--disable_dry_run"]);
}

#[rstest]
fn boolean_cli_names_are_stems() {
    let field = FieldDescriptor::of::<bool>("verbose")
        .with_default(false)
        .with_extra(EXT_CLI, json!(["--chatty", "loud"]))
        .with_extra(EXT_DISABLE_PREFIX, "--no-");
    assert_eq!(
        flags(&Env::new().single(&field)),
        ["--enable-chatty", "--enable-loud"]
    );
}

#[rstest]
fn nested_leaves_carry_prefix_and_dotted_dest() {
    let mut env = Env::new();
    env.parent = Dest::root().child("child");
    env.prefix = "child.";
    env.optional_subtree = true;
    let option = env.single(&FieldDescriptor::of::<u32>("age"));
    assert_eq!(flags(&option), ["--child.age", "-a"]);
    assert_eq!(option.dest.to_string(), "child.age");
    assert!(!option.required);
}

#[rstest]
fn optional_subtree_relaxes_boolean_group() {
    let mut env = Env::new();
    env.optional_subtree = true;
    let result = env.run(&FieldDescriptor::of::<bool>("flag"));
    assert!(matches!(result, Ok(Synthesized::Exclusive { required: false, .. })));
}
