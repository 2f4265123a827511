//! Extract params from `ArgMatches` and convert them to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::complete::{CompleteArgs, Cursor};
use crate::commands::types::TypesArgs;

pub struct CheckParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub grammar: Option<PathBuf>,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            grammar: m.get_one::<PathBuf>("grammar").cloned(),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            grammar: p.grammar,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CompleteParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub grammar: PathBuf,
    pub cursor: Cursor,
    pub compact: bool,
}

impl CompleteParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            grammar: m
                .get_one::<PathBuf>("grammar")
                .cloned()
                .unwrap_or_default(),
            cursor: parse_cursor(m),
            compact: m.get_flag("compact"),
        }
    }
}

impl From<CompleteParams> for CompleteArgs {
    fn from(p: CompleteParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            grammar: p.grammar,
            cursor: p.cursor,
            compact: p.compact,
        }
    }
}

pub struct TypesParams {
    pub grammar: PathBuf,
    pub kind: Option<String>,
    pub compact: bool,
}

impl TypesParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar: m
                .get_one::<PathBuf>("grammar")
                .cloned()
                .unwrap_or_default(),
            kind: m.get_one::<String>("kind").cloned(),
            compact: m.get_flag("compact"),
        }
    }
}

impl From<TypesParams> for TypesArgs {
    fn from(p: TypesParams) -> Self {
        Self {
            grammar: p.grammar,
            kind: p.kind,
            compact: p.compact,
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

/// clap guarantees either `--offset` or both `--line` and `--column`.
fn parse_cursor(m: &ArgMatches) -> Cursor {
    if let Some(&offset) = m.get_one::<u32>("offset") {
        return Cursor::Offset(offset);
    }
    Cursor::LineColumn {
        line: m.get_one::<u32>("line").copied().unwrap_or(1),
        column: m.get_one::<u32>("column").copied().unwrap_or(1),
    }
}
