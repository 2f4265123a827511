use std::path::PathBuf;
use std::process::ExitCode;

use queryls_core::TypeEnvironment;
use queryls_lib::utils::find_similar;
use serde_json::{Value, json};

use super::input::load_analyzer;
use super::{CliError, to_json};

pub struct TypesArgs {
    pub grammar: PathBuf,
    pub kind: Option<String>,
    pub compact: bool,
}

pub fn run(args: TypesArgs) -> Result<ExitCode, CliError> {
    let analyzer = load_analyzer(Some(&args.grammar))?;
    let value = describe(analyzer.environment(), args.kind.as_deref())?;
    println!("{}", to_json(&value, args.compact)?);
    Ok(ExitCode::SUCCESS)
}

/// One kind's flattened view, or a summary of the whole environment.
pub fn describe(env: &TypeEnvironment, kind: Option<&str>) -> Result<Value, CliError> {
    let Some(kind) = kind else {
        return Ok(summary(env));
    };

    if let Some(named) = env.get_named(kind) {
        return Ok(serde_json::to_value(named)?);
    }
    if let Some(supertype) = env.get_supertype(kind) {
        return Ok(serde_json::to_value(supertype)?);
    }

    Err(CliError::UnknownKind {
        kind: kind.to_string(),
        suggestion: find_similar(kind, env.kind_names(), 2).map(str::to_string),
    })
}

fn summary(env: &TypeEnvironment) -> Value {
    let kinds: Vec<_> = env.named_kinds().map(|k| k.name.as_str()).collect();
    let supertypes: Vec<_> = env.supertypes().map(|s| s.name.as_str()).collect();
    let fields: Vec<_> = env.fields().map(|(name, _)| name.as_str()).collect();
    let literals: Vec<_> = env.literals().map(|l| l.as_str()).collect();

    json!({
        "kinds": kinds,
        "supertypes": supertypes,
        "fields": fields,
        "literals": literals,
    })
}
