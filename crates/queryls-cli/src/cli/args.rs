//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so commands compose the same
//! definitions.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Query file (positional, `-` for stdin).
pub fn query_path_arg() -> Arg {
    Arg::new("query_path")
        .value_name("QUERY")
        .value_parser(value_parser!(PathBuf))
        .help("Query file (use \"-\" for stdin)")
}

/// Inline query text (-q/--query).
pub fn query_text_arg() -> Arg {
    Arg::new("query_text")
        .short('q')
        .long("query")
        .value_name("TEXT")
        .conflicts_with("query_path")
        .help("Inline query text")
}

/// Grammar descriptor (-g/--grammar).
pub fn grammar_arg() -> Arg {
    Arg::new("grammar")
        .short('g')
        .long("grammar")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Grammar descriptor (node-types.json)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Cursor as a byte offset (--offset).
pub fn offset_arg() -> Arg {
    Arg::new("offset")
        .long("offset")
        .value_name("N")
        .value_parser(value_parser!(u32))
        .conflicts_with_all(["line", "column"])
        .help("Cursor as a byte offset")
}

/// Cursor line, 1-based (--line).
pub fn line_arg() -> Arg {
    Arg::new("line")
        .long("line")
        .value_name("L")
        .value_parser(value_parser!(u32).range(1..))
        .requires("column")
        .help("Cursor line (1-based)")
}

/// Cursor column in UTF-16 units, 1-based (--column).
pub fn column_arg() -> Arg {
    Arg::new("column")
        .long("column")
        .value_name("C")
        .value_parser(value_parser!(u32).range(1..))
        .requires("line")
        .help("Cursor column (1-based, UTF-16 code units)")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON")
}

/// Kind to describe (positional).
pub fn kind_arg() -> Arg {
    Arg::new("kind")
        .value_name("KIND")
        .help("Node kind or supertype to describe")
}

/// Log filter (--log-level), falls back to `RUST_LOG`.
pub fn log_level_arg() -> Arg {
    Arg::new("log_level")
        .long("log-level")
        .value_name("FILTER")
        .global(true)
        .help("Log filter, e.g. `debug` or `queryls_lib=trace` (default: RUST_LOG, then warn)")
}
