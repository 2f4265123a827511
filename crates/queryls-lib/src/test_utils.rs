//! Shared fixtures for unit tests.

use indoc::indoc;
use queryls_core::TypeEnvironment;

use crate::completion::CompletionPools;

/// A small JavaScript-like grammar.
pub const GRAMMAR: &str = indoc! {r#"
    [
      {
        "type": "expression",
        "named": true,
        "subtypes": [
          {"type": "binary_expression", "named": true},
          {"type": "call_expression", "named": true},
          {"type": "identifier", "named": true},
          {"type": "number", "named": true},
          {"type": "string", "named": true}
        ]
      },
      {
        "type": "statement",
        "named": true,
        "subtypes": [
          {"type": "expression_statement", "named": true},
          {"type": "function_declaration", "named": true},
          {"type": "return_statement", "named": true}
        ]
      },
      {
        "type": "program",
        "named": true,
        "root": true,
        "fields": {},
        "children": {
          "multiple": true,
          "required": false,
          "types": [{"type": "statement", "named": true}]
        }
      },
      {
        "type": "function_declaration",
        "named": true,
        "fields": {
          "name": {
            "multiple": false,
            "required": true,
            "types": [{"type": "identifier", "named": true}]
          },
          "parameters": {
            "multiple": false,
            "required": true,
            "types": [{"type": "formal_parameters", "named": true}]
          },
          "body": {
            "multiple": false,
            "required": false,
            "types": [{"type": "statement_block", "named": true}]
          }
        }
      },
      {
        "type": "formal_parameters",
        "named": true,
        "fields": {},
        "children": {
          "multiple": true,
          "required": false,
          "types": [{"type": "identifier", "named": true}]
        }
      },
      {
        "type": "statement_block",
        "named": true,
        "fields": {},
        "children": {
          "multiple": true,
          "required": false,
          "types": [{"type": "statement", "named": true}]
        }
      },
      {
        "type": "expression_statement",
        "named": true,
        "fields": {},
        "children": {
          "multiple": false,
          "required": true,
          "types": [{"type": "expression", "named": true}]
        }
      },
      {
        "type": "return_statement",
        "named": true,
        "fields": {},
        "children": {
          "multiple": false,
          "required": false,
          "types": [
            {"type": "expression", "named": true},
            {"type": "return", "named": false}
          ]
        }
      },
      {
        "type": "call_expression",
        "named": true,
        "fields": {
          "function": {
            "multiple": false,
            "required": true,
            "types": [{"type": "expression", "named": true}]
          },
          "arguments": {
            "multiple": false,
            "required": true,
            "types": [{"type": "arguments", "named": true}]
          }
        }
      },
      {
        "type": "arguments",
        "named": true,
        "fields": {},
        "children": {
          "multiple": true,
          "required": false,
          "types": [{"type": "expression", "named": true}]
        }
      },
      {
        "type": "binary_expression",
        "named": true,
        "fields": {
          "left": {
            "multiple": false,
            "required": true,
            "types": [{"type": "expression", "named": true}]
          },
          "operator": {
            "multiple": false,
            "required": true,
            "types": [
              {"type": "+", "named": false},
              {"type": "-", "named": false}
            ]
          },
          "right": {
            "multiple": false,
            "required": true,
            "types": [{"type": "expression", "named": true}]
          }
        }
      },
      {
        "type": "variable_declarator",
        "named": true,
        "fields": {
          "name": {
            "multiple": false,
            "required": true,
            "types": [{"type": "identifier", "named": true}]
          },
          "value": {
            "multiple": false,
            "required": false,
            "types": [{"type": "expression", "named": true}]
          }
        }
      },
      {"type": "comment", "named": true, "extra": true},
      {"type": "identifier", "named": true},
      {"type": "number", "named": true},
      {"type": "string", "named": true},
      {"type": "+", "named": false},
      {"type": "-", "named": false},
      {"type": "function", "named": false},
      {"type": "return", "named": false}
    ]
"#};

pub fn environment() -> TypeEnvironment {
    TypeEnvironment::from_json(GRAMMAR)
}

pub fn pools(env: &TypeEnvironment) -> CompletionPools {
    CompletionPools::new(env)
}
