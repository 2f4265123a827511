mod cli;
mod commands;
mod logging;

use std::process::ExitCode;

use cli::{CheckParams, CompleteParams, TypesParams, build_cli};

fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    logging::init(matches.get_one::<String>("log_level").map(String::as_str));

    let result = match matches.subcommand() {
        Some(("check", m)) => commands::check::run(CheckParams::from_matches(m).into()),
        Some(("complete", m)) => commands::complete::run(CompleteParams::from_matches(m).into()),
        Some(("types", m)) => commands::types::run(TypesParams::from_matches(m).into()),
        _ => unreachable!("clap should have caught this"),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
