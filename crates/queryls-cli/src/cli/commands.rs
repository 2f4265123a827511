//! Command builders for the CLI.

use clap::{ArgGroup, Command};

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("queryls")
        .about("Check and complete tree-sitter queries against a grammar")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(log_level_arg())
        .subcommand(check_command())
        .subcommand(complete_command())
        .subcommand(types_command())
}

/// Validate a query.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate a query")
        .override_usage(
            "\
  queryls check <QUERY> [-g <FILE>]
  queryls check -q <TEXT> [-g <FILE>]",
        )
        .after_help(
            r#"EXAMPLES:
  queryls check highlights.scm                       # syntax and predicates only
  queryls check highlights.scm -g node-types.json    # also check against grammar
  queryls check -q '(identifier) @x' -g node-types.json --strict"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(grammar_arg())
        .arg(strict_arg())
        .arg(color_arg())
}

/// Complete at a cursor position.
pub fn complete_command() -> Command {
    Command::new("complete")
        .about("List completions at a cursor position")
        .override_usage(
            "\
  queryls complete <QUERY> -g <FILE> --offset <N>
  queryls complete <QUERY> -g <FILE> --line <L> --column <C>
  queryls complete -q <TEXT> -g <FILE> --offset <N>",
        )
        .after_help(
            r#"EXAMPLES:
  queryls complete highlights.scm -g node-types.json --line 3 --column 12
  queryls complete -q '(call_expression ' -g node-types.json --offset 17 --compact"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(grammar_arg().required(true))
        .arg(offset_arg())
        .arg(line_arg())
        .arg(column_arg())
        .group(
            ArgGroup::new("cursor")
                .args(["offset", "line", "column"])
                .required(true)
                .multiple(true),
        )
        .arg(compact_arg())
}

/// Describe the grammar's flattened types.
pub fn types_command() -> Command {
    Command::new("types")
        .about("Show the flattened view of a grammar")
        .after_help(
            r#"EXAMPLES:
  queryls types -g node-types.json                   # summary
  queryls types -g node-types.json call_expression   # one kind"#,
        )
        .arg(grammar_arg().required(true))
        .arg(kind_arg())
        .arg(compact_arg())
}
