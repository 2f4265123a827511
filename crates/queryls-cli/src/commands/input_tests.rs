use std::path::Path;

use super::CliError;
use super::input::{load_analyzer, load_query};
use super::test_utils::{grammar_file, write_temp};

#[test]
fn inline_query_wins() {
    let query = load_query(Some(Path::new("ignored.scm")), Some("(identifier)")).unwrap();
    assert_eq!(query.name, "<query>");
    assert_eq!(query.text, "(identifier)");
}

#[test]
fn query_from_file() {
    let file = write_temp("(identifier) @name\n");
    let query = load_query(Some(file.path()), None).unwrap();

    assert_eq!(query.name, file.path().display().to_string());
    assert_eq!(query.text, "(identifier) @name\n");
}

#[test]
fn missing_query() {
    let err = load_query(None, None).unwrap_err();
    assert!(matches!(err, CliError::MissingQuery));
}

#[test]
fn unreadable_query_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.scm");

    let err = load_query(Some(&path), None).unwrap_err();
    assert!(matches!(err, CliError::Read { .. }));
    assert!(err.to_string().starts_with("failed to read '"));
}

#[test]
fn analyzer_without_grammar_is_empty() {
    let analyzer = load_analyzer(None).unwrap();
    assert!(analyzer.environment().is_empty());
}

#[test]
fn analyzer_with_grammar() {
    let grammar = grammar_file();
    let analyzer = load_analyzer(Some(grammar.path())).unwrap();

    let env = analyzer.environment();
    assert!(env.get_named("call_expression").is_some());
    assert!(env.has_supertype("expression"));
}

#[test]
fn rejected_grammar_is_an_error() {
    let grammar = write_temp("{ not json");
    let err = load_analyzer(Some(grammar.path())).unwrap_err();

    assert!(matches!(err, CliError::Grammar { .. }));
    assert!(err.to_string().starts_with("invalid grammar '"));
}
