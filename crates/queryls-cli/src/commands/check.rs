use std::path::PathBuf;
use std::process::ExitCode;

use queryls_lib::Diagnostics;

use super::CliError;
use super::input::{QueryInput, load_analyzer, load_query};

pub struct CheckArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub grammar: Option<PathBuf>,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) -> Result<ExitCode, CliError> {
    let (query, diagnostics) = check(&args)?;

    if !diagnostics.is_empty() {
        let rendered = diagnostics
            .printer()
            .source(&query.text)
            .path(&query.name)
            .colored(args.color)
            .render();
        eprintln!("{rendered}");
    }

    // Silent on success (like cargo check)
    if passes(&diagnostics, args.strict) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Parse and lint the query, parser diagnostics first in document order.
pub fn check(args: &CheckArgs) -> Result<(QueryInput, Diagnostics), CliError> {
    let query = load_query(args.query_path.as_deref(), args.query_text.as_deref())?;
    let analyzer = load_analyzer(args.grammar.as_deref())?;

    let document = analyzer.document(query.text.as_str());
    let diagnostics = analyzer.diagnostics(&document);
    tracing::debug!(
        errors = diagnostics.error_count(),
        warnings = diagnostics.warning_count(),
        "checked {}",
        query.name
    );
    Ok((query, diagnostics))
}

pub fn passes(diagnostics: &Diagnostics, strict: bool) -> bool {
    !diagnostics.has_errors() && !(strict && diagnostics.has_warnings())
}
