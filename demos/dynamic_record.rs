//! Dynamic record example.
//!
//! Loads a record description from YAML at run time, then feeds the same
//! record from a JSON document and from command-line tokens.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p argschema-demos --example dynamic_record
//! ```

use argschema_core::{DynamicRecord, RecordDescription};
use argschema_parse::ArgumentParser;

const DESCRIPTION: &str = r#"
fields:
  - name: TARGET
    help: deployment target
  - name: replicas
    kind: integer
    default: "1"
  - name: strategy
    choices: "rolling|recreate"
    default: rolling
  - name: labels
    kind: string_list
  - name: registry
    record:
      fields:
        - name: url
        - name: insecure
          kind: optional_bool
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let description: RecordDescription = serde_yaml::from_str(DESCRIPTION)?;
    let mut record = DynamicRecord::from_description(&description)?;
    let parser = ArgumentParser::from_record(&mut record, "deploy")?;

    println!("{}", parser.help_text());

    let doc = serde_json::json!({
        "replicas": 3,
        "labels": ["tier=web", "team=core"],
        "registry": {"url": "registry.local", "insecure": true},
        "unknown": "ignored",
    });
    parser.parse_document(&mut record, &doc)?;
    println!("from document:\n{}", serde_json::to_string_pretty(&record.to_json())?);

    let mut record = DynamicRecord::from_description(&description)?;
    parser.parse_args(
        &mut record,
        &["--strategy", "recreate", "--registry-url", "ghcr.io", "production"],
    )?;
    println!("from tokens:\n{}", serde_json::to_string_pretty(&record.to_json())?);

    match parser.parse_args(&mut record, &["--strategy", "rolling-update", "production"]) {
        Ok(()) => println!("unexpectedly accepted"),
        Err(e) => println!("rejected: {e}"),
    }

    Ok(())
}
