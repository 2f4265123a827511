use std::path::PathBuf;
use std::process::ExitCode;

use queryls_lib::{Completions, Position, TextSize};

use super::input::{load_analyzer, load_query};
use super::{CliError, to_json};

/// Cursor as given on the command line. Lines and columns are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Offset(u32),
    LineColumn { line: u32, column: u32 },
}

pub struct CompleteArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub grammar: PathBuf,
    pub cursor: Cursor,
    pub compact: bool,
}

pub fn run(args: CompleteArgs) -> Result<ExitCode, CliError> {
    let completions = complete(&args)?;
    println!("{}", to_json(&completions, args.compact)?);
    Ok(ExitCode::SUCCESS)
}

pub fn complete(args: &CompleteArgs) -> Result<Completions, CliError> {
    let query = load_query(args.query_path.as_deref(), args.query_text.as_deref())?;
    let analyzer = load_analyzer(Some(&args.grammar))?;
    let document = analyzer.document(query.text);

    let completions = match args.cursor {
        Cursor::Offset(offset) => analyzer.completions(&document, TextSize::from(offset)),
        Cursor::LineColumn { line, column } => {
            let position = Position::new(line.saturating_sub(1), column.saturating_sub(1));
            if document.offset(position).is_none() {
                return Err(CliError::Position { line, column });
            }
            analyzer.completions_at(&document, position)
        }
    };
    Ok(completions)
}
