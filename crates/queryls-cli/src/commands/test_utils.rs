use std::io::Write;

use indoc::indoc;
use tempfile::NamedTempFile;

pub const GRAMMAR: &str = indoc! {r#"
    [
      {
        "type": "expression",
        "named": true,
        "subtypes": [
          { "type": "call_expression", "named": true },
          { "type": "identifier", "named": true }
        ]
      },
      {
        "type": "call_expression",
        "named": true,
        "fields": {
          "function": {
            "multiple": false,
            "required": true,
            "types": [{ "type": "expression", "named": true }]
          },
          "arguments": {
            "multiple": false,
            "required": true,
            "types": [{ "type": "arguments", "named": true }]
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
          "types": [{ "type": "expression", "named": true }]
        }
      },
      { "type": "identifier", "named": true },
      { "type": "(", "named": false },
      { "type": ")", "named": false }
    ]
"#};

pub fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

pub fn grammar_file() -> NamedTempFile {
    write_temp(GRAMMAR)
}
