use quaddb::{Document, DocumentMap, QuadError, Result};
use serde_json::{Map, Value};

/// Pretty prints a command result on stdout.
pub fn print_json(value: &Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    #[allow(clippy::print_stdout, reason = "CLI output")]
    {
        println!("{}", rendered);
    }
    Ok(())
}

/// Renders a document map as a JSON object of id → parsed payload.
///
/// # Errors
/// `QuadError::InvalidDocument` if a payload is not JSON.
pub fn documents_to_json(documents: DocumentMap) -> Result<Value> {
    let mut rendered = Map::new();
    for (id, payload) in documents {
        let document = Document::new(id, payload);
        let data = document.data()?;
        rendered.insert(document.id, data);
    }
    Ok(Value::Object(rendered))
}

/// Parses a JSON argument given on the command line.
pub fn parse_json_arg(flag: &str, raw: &str) -> Result<Value> {
    serde_json::from_str(raw).map_err(|e| {
        QuadError::ConfigurationError {
            message: format!("--{} is not valid JSON: {}", flag, e),
        }
    })
}
