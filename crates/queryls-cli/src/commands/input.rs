//! Loading queries and grammars from disk, stdin or the command line.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use queryls_lib::{Analyzer, AnalyzerConfig};

use super::CliError;

/// Query text plus the name diagnostics are reported under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryInput {
    pub name: String,
    pub text: String,
}

pub fn load_query(path: Option<&Path>, text: Option<&str>) -> Result<QueryInput, CliError> {
    if let Some(text) = text {
        return Ok(QueryInput {
            name: "<query>".to_string(),
            text: text.to_string(),
        });
    }

    let Some(path) = path else {
        return Err(CliError::MissingQuery);
    };

    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(CliError::Stdin)?;
        return Ok(QueryInput {
            name: "<stdin>".to_string(),
            text,
        });
    }

    Ok(QueryInput {
        name: path.display().to_string(),
        text: read(path)?,
    })
}

/// An analyzer for `grammar`, or one with the empty environment.
///
/// Unlike [`Analyzer::load_grammar`], a rejected descriptor is an error.
pub fn load_analyzer(grammar: Option<&Path>) -> Result<Analyzer, CliError> {
    let mut analyzer = Analyzer::new(AnalyzerConfig::default());
    let Some(path) = grammar else {
        tracing::debug!("no grammar given, grammar-dependent lints are off");
        return Ok(analyzer);
    };

    let json = read(path)?;
    analyzer
        .try_load_grammar(&json)
        .map_err(|source| CliError::Grammar {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(
        path = %path.display(),
        kinds = analyzer.environment().named_kinds().count(),
        "loaded grammar"
    );
    Ok(analyzer)
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}
