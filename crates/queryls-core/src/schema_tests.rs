use crate::schema::{GrammarDescriptor, GrammarError, Kind, Stub, parse_node_types};

const SAMPLE_JSON: &str = r#"[
    {
        "type": "expression",
        "named": true,
        "subtypes": [
            {"type": "identifier", "named": true},
            {"type": "number", "named": true}
        ]
    },
    {
        "type": "function_declaration",
        "named": true,
        "fields": {
            "name": {
                "multiple": false,
                "required": true,
                "types": [{"type": "identifier", "named": true}]
            },
            "body": {
                "multiple": false,
                "required": true,
                "types": [{"type": "block", "named": true}]
            }
        }
    },
    {
        "type": "program",
        "named": true,
        "root": true,
        "fields": {},
        "children": {
            "multiple": true,
            "required": false,
            "types": [{"type": "statement", "named": true}]
        }
    },
    {
        "type": "comment",
        "named": true,
        "extra": true
    },
    {
        "type": "identifier",
        "named": true
    },
    {
        "type": "+",
        "named": false
    }
]"#;

#[test]
fn parse_raw_nodes() {
    let nodes = parse_node_types(SAMPLE_JSON).unwrap();
    assert_eq!(nodes.len(), 6);

    let expr = nodes.iter().find(|n| n.type_name == "expression").unwrap();
    assert!(expr.named);
    assert_eq!(expr.subtypes.as_ref().unwrap().len(), 2);

    let func = nodes
        .iter()
        .find(|n| n.type_name == "function_declaration")
        .unwrap();
    assert!(func.fields.contains_key("name"));
    assert!(func.fields.contains_key("body"));

    let plus = nodes.iter().find(|n| n.type_name == "+").unwrap();
    assert!(!plus.named);
}

#[test]
fn classify_kinds() {
    let descriptor = GrammarDescriptor::from_json(SAMPLE_JSON).unwrap();
    let kinds = descriptor.kinds();

    assert!(kinds[0].is_supertype());
    assert!(kinds[1].is_branch());
    assert!(kinds[2].is_branch());
    assert!(kinds[3].is_leaf());
    assert!(kinds[4].is_leaf());
    assert!(kinds[5].is_literal());

    assert!(kinds[2].flags().root);
    assert!(kinds[3].flags().extra);
    assert_eq!(kinds[5].stub(), Stub::literal("+"));
    assert_eq!(kinds[0].stub(), Stub::named("expression"));
}

#[test]
fn branch_keeps_field_order_and_stubs() {
    let descriptor = GrammarDescriptor::from_json(SAMPLE_JSON).unwrap();
    let Kind::Branch(func) = &descriptor.kinds()[1] else {
        panic!("expected branch");
    };

    let names: Vec<_> = func.fields.keys().map(|f| f.as_str()).collect();
    assert_eq!(names, ["name", "body"]);
    assert!(func.fields["name"].required);
    assert_eq!(func.fields["body"].types, [Stub::named("block")]);
    assert!(func.children.is_none());
}

#[test]
fn empty_fields_object_is_a_leaf() {
    let descriptor =
        GrammarDescriptor::from_json(r#"[{"type": "empty", "named": true, "fields": {}}]"#)
            .unwrap();
    assert!(descriptor.kinds()[0].is_leaf());
}

#[test]
fn literal_with_structure_is_rejected() {
    let json = r#"[{
        "type": "+",
        "named": false,
        "children": {"multiple": false, "required": false, "types": []}
    }]"#;
    let err = GrammarDescriptor::from_json(json).unwrap_err();

    assert!(matches!(err, GrammarError::Malformed { .. }));
    insta::assert_snapshot!(err, @"malformed kind `+`: literal kind declares structure");
}

#[test]
fn supertype_with_fields_is_rejected() {
    let json = r#"[{
        "type": "expression",
        "named": true,
        "subtypes": [],
        "fields": {"x": {"multiple": false, "required": false, "types": []}}
    }]"#;
    let err = GrammarDescriptor::from_json(json).unwrap_err();
    insta::assert_snapshot!(err, @"malformed kind `expression`: supertype declares fields or children");
}

#[test]
fn empty_kind_name_is_rejected() {
    let err = GrammarDescriptor::from_json(r#"[{"type": "", "named": true}]"#).unwrap_err();
    assert!(matches!(err, GrammarError::Malformed { .. }));
}

#[test]
fn invalid_json_is_rejected() {
    let err = GrammarDescriptor::from_json(r#"{"type": "x"}"#).unwrap_err();
    assert!(matches!(err, GrammarError::Json(_)));

    let err = GrammarDescriptor::from_json(r#"[{"named": true}]"#).unwrap_err();
    assert!(matches!(err, GrammarError::Json(_)));
}
