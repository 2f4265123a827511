use rowan::TextRange;

use super::*;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownNodeType, range(0, 5))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(diag.message(), "unrecognized kind");
    assert_eq!(diag.kind().source(), "node");
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownField, range(0, 5))
        .message("bodyy")
        .emit();

    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(diag.message(), "unrecognized field `bodyy`");
}

#[test]
fn warnings_are_counted_apart() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownPredicate, range(0, 3))
        .emit();
    diagnostics
        .report(DiagnosticKind::EmptyList, range(4, 6))
        .emit();

    assert!(diagnostics.has_warnings());
    assert_eq!(diagnostics.warning_count(), 1);
    assert_eq!(diagnostics.error_count(), 1);
}

#[test]
fn default_hint_is_attached() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::EmptyGrouping, range(0, 2))
        .hint("or remove it")
        .emit();

    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(
        diag.hints(),
        ["use `(_)` to match any named node", "or remove it"]
    );
}

#[test]
fn sort_orders_by_position_then_kind() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownField, range(8, 9))
        .emit();
    diagnostics
        .report(DiagnosticKind::UnknownPredicate, range(0, 3))
        .emit();
    diagnostics
        .report(DiagnosticKind::UnclosedNode, range(0, 3))
        .emit();
    diagnostics.sort();

    let kinds: Vec<_> = diagnostics.iter().map(Diagnostic::kind).collect();
    assert_eq!(
        kinds,
        [
            DiagnosticKind::UnclosedNode,
            DiagnosticKind::UnknownPredicate,
            DiagnosticKind::UnknownField,
        ]
    );
}

#[test]
fn plain_format_without_source() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownNodeType, range(1, 4))
        .message("fo")
        .hint("did you mean `foo`?")
        .emit();
    diagnostics
        .report(DiagnosticKind::RedundantNegation, range(6, 11))
        .message("`call` never has field `body`")
        .emit();

    insta::assert_snapshot!(diagnostics.printer().render(), @r"
    error at 1..4: unrecognized kind `fo` (hint: did you mean `foo`?)
    warning at 6..11: `call` never has field `body`
    ");
}

fn lines(rendered: &str) -> Vec<&str> {
    rendered.lines().map(str::trim).collect()
}

#[test]
fn related_ranges_are_labelled() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownField, range(0, 5))
        .message("hello")
        .related_to("on `world`", range(6, 11))
        .emit();

    let rendered = diagnostics.render("hello world!");
    let lines = lines(&rendered);

    assert_eq!(lines[0], "error[node]: unrecognized field `hello`");
    assert!(lines.contains(&"1 | hello world!"), "{rendered}");
    assert!(lines.contains(&"| ^^^^^ ----- on `world`"), "{rendered}");
}

#[test]
fn primary_span_is_unlabelled() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownNodeType, range(1, 6))
        .message("hello")
        .emit();

    let rendered = diagnostics.render("(hello)");

    assert!(lines(&rendered).contains(&"|  ^^^^^"), "{rendered}");
    assert_eq!(rendered.matches("unrecognized kind").count(), 1);
}

#[test]
fn hints_become_help_lines() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedSubtype, range(12, 12))
        .hint("see the grammar's supertypes")
        .emit();

    let rendered = diagnostics.render("(expression/)");
    let lines = lines(&rendered);

    assert_eq!(lines[0], "error[syntax]: expected subtype name");
    assert!(lines.contains(&"= help: e.g., `expression/binary_expression`"), "{rendered}");
    assert!(lines.contains(&"= help: see the grammar's supertypes"), "{rendered}");
}

#[test]
fn empty_range_at_end_of_input() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedNode, range(11, 11))
        .emit();

    let rendered = diagnostics.render("(identifier");
    assert!(rendered.starts_with("error[syntax]: missing closing `)`"));
}

#[test]
fn reports_are_separated_by_a_blank_line() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::EmptyGrouping, range(0, 2))
        .emit();
    diagnostics
        .report(DiagnosticKind::EmptyList, range(3, 5))
        .emit();

    let rendered = diagnostics.render("() []");

    assert!(rendered.starts_with("error[empty_container]: empty grouping"));
    assert!(rendered.contains("\n\nerror[empty_container]: empty list"));
}

#[test]
fn printer_colored() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::EmptyGrouping, range(0, 2))
        .emit();

    let result = diagnostics.render_colored("()", true);
    assert!(result.contains("empty grouping"));
    assert!(result.contains('\x1b'));
}

#[test]
fn printer_empty_diagnostics() {
    let diagnostics = Diagnostics::new();
    assert!(diagnostics.render("source").is_empty());
}

#[test]
fn printer_with_path() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownNodeType, range(0, 5))
        .message("hello")
        .emit();

    let rendered = diagnostics
        .printer()
        .source("hello world")
        .path("highlights.scm")
        .render();
    let lines = lines(&rendered);

    assert_eq!(lines[0], "error[node]: unrecognized kind `hello`");
    assert_eq!(lines[1], "--> highlights.scm:1:1");
    assert!(lines.contains(&"| ^^^^^"), "{rendered}");
}
