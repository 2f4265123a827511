pub mod check;
pub mod complete;
pub mod input;
pub mod types;

#[cfg(test)]
mod input_tests;
#[cfg(test)]
mod test_utils;

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),
    #[error("query is required: use a positional path or -q/--query")]
    MissingQuery,
    #[error("invalid grammar '{}': {source}", .path.display())]
    Grammar {
        path: PathBuf,
        #[source]
        source: queryls_lib::Error,
    },
    #[error("line {line}, column {column} is outside the query")]
    Position { line: u32, column: u32 },
    #[error("unknown kind `{kind}`{}", did_you_mean(.suggestion))]
    UnknownKind {
        kind: String,
        suggestion: Option<String>,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean `{name}`?)"),
        None => String::new(),
    }
}

/// Pretty JSON unless `compact`.
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T, compact: bool) -> Result<String, CliError> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}
