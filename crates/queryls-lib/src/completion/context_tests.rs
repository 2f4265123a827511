use indoc::indoc;
use rowan::TextSize;

use crate::completion::context::{CompletionContext, classify};
use crate::parser::parse;

/// Classify at the `|` marker, which is removed from the source.
fn classify_at(marked: &str) -> CompletionContext {
    let offset = marked.find('|').expect("cursor marker");
    let source = marked.replacen('|', "", 1);
    let (parse, _) = parse(&source);
    classify(&parse.syntax(), TextSize::from(offset as u32))
}

fn node(transform: bool, enclosing: Option<&str>) -> CompletionContext {
    CompletionContext::Node {
        transform,
        enclosing_node_type: enclosing.map(str::to_string),
    }
}

fn child(transform: bool, enclosing: Option<&str>) -> CompletionContext {
    CompletionContext::Child {
        transform,
        enclosing_node_type: enclosing.map(str::to_string),
    }
}

#[test]
fn empty_document() {
    assert_eq!(classify_at("|"), node(true, None));
}

#[test]
fn start_of_non_empty_document() {
    assert_eq!(classify_at("|(identifier)"), node(true, None));
}

#[test]
fn past_end_of_document() {
    let (parse, _) = parse("(a)");
    assert_eq!(
        classify(&parse.syntax(), TextSize::from(10)),
        CompletionContext::None
    );
}

#[test]
fn top_level_after_closed_node() {
    assert_eq!(classify_at("(identifier)|"), node(true, None));
    assert_eq!(classify_at("(identifier) |"), node(true, None));
    assert_eq!(classify_at("\"if\"|"), node(true, None));
    assert_eq!(classify_at("(identifier)+|"), node(true, None));
}

#[test]
fn top_level_list() {
    assert_eq!(classify_at("[(identifier) |]"), node(true, None));
}

#[test]
fn top_level_empty_grouping() {
    assert_eq!(classify_at("(|)"), node(false, None));
}

#[test]
fn kind_name_at_top_level() {
    assert_eq!(classify_at("(ide|)"), node(false, None));
}

#[test]
fn child_position_inside_node() {
    assert_eq!(
        classify_at("(call_expression |)"),
        child(true, Some("call_expression"))
    );
    assert_eq!(
        classify_at("(call_expression function: (identifier) |)"),
        child(true, Some("call_expression"))
    );
}

#[test]
fn child_position_inside_wildcard() {
    assert_eq!(classify_at("(_ |)"), child(true, None));
}

#[test]
fn empty_grouping_inside_node() {
    assert_eq!(
        classify_at("(call_expression (|))"),
        node(false, Some("call_expression"))
    );
}

#[test]
fn kind_name_of_nested_node() {
    assert_eq!(
        classify_at("(call_expression (ide|))"),
        node(false, Some("call_expression"))
    );
    assert_eq!(
        classify_at("(statement_block [(ret|) (expression_statement)])"),
        node(false, Some("statement_block"))
    );
}

#[test]
fn subtype_name() {
    assert_eq!(
        classify_at("(expression/bin|)"),
        node(false, Some("expression"))
    );
}

#[test]
fn missing_argument() {
    assert_eq!(classify_at("(MISSING ide|)"), node(false, None));
}

#[test]
fn field_value_after_colon() {
    assert_eq!(
        classify_at("(binary_expression left: |)"),
        CompletionContext::FieldValue {
            transform: true,
            field_name: "left".to_string(),
            parent_type: Some("binary_expression".to_string()),
        }
    );
}

#[test]
fn field_value_in_empty_grouping() {
    assert_eq!(
        classify_at("(binary_expression left: (|))"),
        CompletionContext::FieldValue {
            transform: false,
            field_name: "left".to_string(),
            parent_type: Some("binary_expression".to_string()),
        }
    );
}

#[test]
fn field_value_kind_name() {
    assert_eq!(
        classify_at("(binary_expression left: (ide|))"),
        CompletionContext::FieldValue {
            transform: false,
            field_name: "left".to_string(),
            parent_type: Some("binary_expression".to_string()),
        }
    );
}

#[test]
fn bare_identifier_is_a_field_name() {
    assert_eq!(
        classify_at("(binary_expression lef|)"),
        CompletionContext::FieldName {
            transform: true,
            parent_type: Some("binary_expression".to_string()),
        }
    );
}

#[test]
fn existing_field_name() {
    assert_eq!(
        classify_at("(binary_expression lef|: (identifier))"),
        CompletionContext::FieldName {
            transform: false,
            parent_type: Some("binary_expression".to_string()),
        }
    );
}

#[test]
fn negated_field() {
    let expected = CompletionContext::NegatedField {
        parent_type: Some("function_declaration".to_string()),
    };
    assert_eq!(classify_at("(function_declaration !|)"), expected);
    assert_eq!(classify_at("(function_declaration !bo|)"), expected);
}

#[test]
fn hanging_capture() {
    assert_eq!(
        classify_at("(identifier) @|"),
        CompletionContext::Capture { identifier: None }
    );
}

#[test]
fn capture_name() {
    assert_eq!(
        classify_at("(identifier) @fo|"),
        CompletionContext::Capture {
            identifier: Some("fo".to_string())
        }
    );
}

#[test]
fn capture_inside_predicate() {
    assert_eq!(
        classify_at("((identifier) @name (#eq? @na|))"),
        CompletionContext::Capture {
            identifier: Some("na".to_string())
        }
    );
}

#[test]
fn predicate_arguments_offer_nothing() {
    assert_eq!(
        classify_at(r#"((identifier) @name (#eq? @name "x|"))"#),
        CompletionContext::None
    );
    assert_eq!(classify_at("((identifier) (#eq|?))"), CompletionContext::None);
}

#[test]
fn comment_offers_nothing() {
    assert_eq!(classify_at("; a comm|ent"), CompletionContext::None);
    assert_eq!(
        classify_at(indoc! {"
            (identifier)
            ; trailing|
        "}),
        CompletionContext::None
    );
}

#[test]
fn empty_string_in_field() {
    assert_eq!(
        classify_at(r#"(binary_expression operator: "|")"#),
        CompletionContext::EmptyString {
            parent_type: Some("binary_expression".to_string()),
            field_name: Some("operator".to_string()),
        }
    );
}

#[test]
fn string_as_child() {
    assert_eq!(
        classify_at(r#"(return_statement "ret|")"#),
        CompletionContext::EmptyString {
            parent_type: Some("return_statement".to_string()),
            field_name: None,
        }
    );
}

#[test]
fn string_at_top_level() {
    assert_eq!(
        classify_at(r#""fun|""#),
        CompletionContext::EmptyString {
            parent_type: None,
            field_name: None,
        }
    );
}

#[test]
fn serializes_tagged() {
    let context = classify_at("(binary_expression left: |)");
    let json = serde_json::to_string(&context).unwrap();
    assert_eq!(
        json,
        r#"{"type":"field_value","transform":true,"fieldName":"left","parentType":"binary_expression"}"#
    );

    let json = serde_json::to_string(&CompletionContext::Unhandled).unwrap();
    assert_eq!(json, r#"{"type":"unhandled"}"#);
}

#[test]
fn every_offset_of_malformed_documents() {
    let documents = [
        "(",
        "[",
        "\"",
        "@",
        "!",
        ":",
        "(#",
        "(#eq? @",
        "(#match? @a \"[\")",
        "((((((((((((((((",
        "[[[[(((([[",
        "(a (b [c \"d",
        "(a/",
        "(a/ ",
        "(a !",
        "(a ! )",
        "(a b: c:",
        "(ñame)",
        "(ñame fïeld: (𝕏)) @ñ",
        "; comment\n(a",
        ")))]]]",
        "(a) @ @ @",
        "(_ \"\\",
        "(MISSING",
        "(ERROR (",
        ". . (a .)",
        "(a)* (b)+ (c)?",
    ];

    for source in documents {
        let (parse, _) = parse(source);
        let root = parse.syntax();
        let offsets = (0..=source.len())
            .filter(|&offset| source.is_char_boundary(offset))
            .chain([source.len() + 1]);

        for offset in offsets {
            let context = classify(&root, TextSize::from(offset as u32));
            if offset > source.len() {
                assert_eq!(context, CompletionContext::None, "{source:?} at {offset}");
            }
        }
    }
}
