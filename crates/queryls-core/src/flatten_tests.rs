use indexmap::IndexSet;

use crate::flatten::{FlatTypes, MAX_FLATTEN_ITERATIONS, SupertypeMap, flatten, flatten_supertype};
use crate::names::{Literal, TypeName};
use crate::schema::{Flags, GrammarDescriptor, Kind, Stub, Supertype};

fn supertype(name: &str, subtypes: Vec<Stub>) -> Kind {
    Kind::Supertype(Supertype {
        name: TypeName::new(name),
        subtypes,
        flags: Flags::default(),
    })
}

fn leaf(name: &str) -> Kind {
    Kind::Leaf {
        name: TypeName::new(name),
        flags: Flags::default(),
    }
}

fn names(flat: &FlatTypes) -> Vec<&str> {
    let mut names: Vec<_> = flat.type_names.iter().map(TypeName::as_str).collect();
    names.sort_unstable();
    names
}

fn literals(flat: &FlatTypes) -> Vec<&str> {
    let mut literals: Vec<_> = flat.literals.iter().map(Literal::as_str).collect();
    literals.sort_unstable();
    literals
}

fn assert_no_supertype_leaks(flat: &FlatTypes, kinds: &[Kind]) {
    let map = SupertypeMap::new(kinds);
    for name in &flat.type_names {
        assert!(!map.is_supertype(name.as_str()), "supertype `{name}` leaked");
    }
}

#[test]
fn literals_and_concrete_names_pass_through() {
    let kinds = vec![leaf("identifier")];
    let flat = flatten(&[Stub::named("identifier"), Stub::literal("+")], &kinds);

    assert_eq!(names(&flat), ["identifier"]);
    assert_eq!(literals(&flat), ["+"]);
}

#[test]
fn unknown_names_pass_through() {
    let flat = flatten(&[Stub::named("not_in_grammar")], &[]);
    assert_eq!(names(&flat), ["not_in_grammar"]);
}

#[test]
fn nested_supertypes_are_expanded() {
    let kinds = vec![
        supertype(
            "expression",
            vec![Stub::named("primary"), Stub::named("binary"), Stub::literal("null")],
        ),
        supertype("primary", vec![Stub::named("identifier"), Stub::named("number")]),
        leaf("identifier"),
        leaf("number"),
        leaf("binary"),
    ];

    let flat = flatten(&[Stub::named("expression")], &kinds);

    assert_eq!(names(&flat), ["binary", "identifier", "number"]);
    assert_eq!(literals(&flat), ["null"]);
    assert_no_supertype_leaks(&flat, &kinds);
}

#[test]
fn shared_nested_supertype_is_expanded_once() {
    let kinds = vec![
        supertype("a", vec![Stub::named("shared"), Stub::named("b")]),
        supertype("b", vec![Stub::named("shared"), Stub::named("y")]),
        supertype("shared", vec![Stub::named("x")]),
    ];

    let flat = flatten(&[Stub::named("a")], &kinds);
    assert_eq!(names(&flat), ["x", "y"]);
}

#[test]
fn both_entry_points_agree_for_every_supertype() {
    let kinds = vec![
        supertype(
            "statement",
            vec![Stub::named("expression_statement"), Stub::named("declaration")],
        ),
        supertype(
            "declaration",
            vec![Stub::named("function_declaration"), Stub::literal(";")],
        ),
        supertype("expression", vec![Stub::named("identifier"), Stub::named("statement")]),
        leaf("expression_statement"),
        leaf("function_declaration"),
        leaf("identifier"),
    ];

    for kind in &kinds {
        let Kind::Supertype(s) = kind else { continue };
        let via_stubs = flatten(&[kind.stub()], &kinds);
        let via_supertype = flatten_supertype(s, &kinds);
        assert_eq!(via_stubs, via_supertype, "entry points disagree for `{}`", s.name);
        assert_no_supertype_leaks(&via_stubs, &kinds);
    }
}

#[test]
fn cycles_terminate_without_leaking() {
    let kinds = vec![
        supertype("a", vec![Stub::named("b"), Stub::named("x")]),
        supertype("b", vec![Stub::named("a"), Stub::named("y")]),
    ];

    let flat = flatten(&[Stub::named("a")], &kinds);
    assert_eq!(names(&flat), ["x", "y"]);

    let Kind::Supertype(b) = &kinds[1] else {
        unreachable!()
    };
    let flat = flatten_supertype(b, &kinds);
    assert_eq!(names(&flat), ["x", "y"]);
}

#[test]
fn self_referencing_supertype_terminates() {
    let kinds = vec![supertype("a", vec![Stub::named("a"), Stub::named("x")])];
    let flat = flatten(&[Stub::named("a")], &kinds);
    assert_eq!(names(&flat), ["x"]);
}

#[test]
fn iteration_cap_returns_partial_result() {
    // s0 -> s1 -> ... each level adding one concrete kind
    let depth = MAX_FLATTEN_ITERATIONS;
    let kinds: Vec<Kind> = (0..depth)
        .map(|i| {
            supertype(
                &format!("s{i}"),
                vec![Stub::named(format!("s{}", i + 1)), Stub::named(format!("leaf{i}"))],
            )
        })
        .collect();

    let flat = flatten(&[Stub::named("s0")], &kinds);

    assert!(!flat.type_names.is_empty());
    assert!(flat.type_names.len() < depth);
    assert_no_supertype_leaks(&flat, &kinds);
}

#[test]
fn scenario_expression_supertype() {
    // 40 concrete kinds listed directly, 5 more through a nested supertype,
    // plus literal members
    let mut entries = Vec::new();
    let mut subtypes = vec![
        r#"{"type": "binary_expression", "named": true}"#.to_string(),
        r#"{"type": "block", "named": true}"#.to_string(),
        r#"{"type": "boolean_literal", "named": true}"#.to_string(),
        r#"{"type": "_literal", "named": true}"#.to_string(),
        r#"{"type": "true", "named": false}"#.to_string(),
        r#"{"type": "false", "named": false}"#.to_string(),
    ];
    for i in 0..37 {
        subtypes.push(format!(r#"{{"type": "expr_{i}", "named": true}}"#));
    }
    entries.push(format!(
        r#"{{"type": "_expression", "named": true, "subtypes": [{}]}}"#,
        subtypes.join(",")
    ));

    let literal_members: Vec<_> = (0..5)
        .map(|i| format!(r#"{{"type": "literal_{i}", "named": true}}"#))
        .collect();
    entries.push(format!(
        r#"{{"type": "_literal", "named": true, "subtypes": [{}]}}"#,
        literal_members.join(",")
    ));
    entries.push(r#"{"type": "boolean_literal", "named": true}"#.to_string());

    let json = format!("[{}]", entries.join(","));
    let descriptor = GrammarDescriptor::from_json(&json).unwrap();
    let kinds = descriptor.kinds();

    let flat = flatten(&[Stub::named("_expression")], kinds);

    assert_eq!(flat.type_names.len(), 45);
    assert!(flat.contains_type("binary_expression"));
    assert!(flat.contains_type("block"));
    assert!(flat.contains_type("literal_4"));
    assert!(!flat.contains_type("_literal"));
    assert!(!flat.contains_type("_expression"));
    assert_eq!(literals(&flat), ["false", "true"]);

    let Kind::Supertype(expression) = &kinds[0] else {
        unreachable!()
    };
    assert_eq!(flat, flatten_supertype(expression, kinds));
}

#[test]
fn flat_types_equality_ignores_order() {
    let a = FlatTypes {
        type_names: IndexSet::from([TypeName::new("x"), TypeName::new("y")]),
        literals: IndexSet::new(),
    };
    let b = FlatTypes {
        type_names: IndexSet::from([TypeName::new("y"), TypeName::new("x")]),
        literals: IndexSet::new(),
    };
    assert_eq!(a, b);
}
