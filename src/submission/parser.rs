use serde_json::{Map, Value};

/// Parse a request body into a field map based on the Content-Type header.
///
/// JSON bodies must be objects. Form posts arrive as
/// `application/x-www-form-urlencoded` when the page has no script.
pub fn parse_body(content_type: Option<&str>, body: &[u8]) -> Result<Map<String, Value>, String> {
    let ct = content_type.unwrap_or("application/json");

    if ct.contains("application/x-www-form-urlencoded") {
        parse_form_urlencoded(body)
    } else if ct.contains("multipart/form-data") {
        Err("Unsupported content type: multipart/form-data".to_string())
    } else {
        parse_json_object(body)
    }
}

fn parse_json_object(body: &[u8]) -> Result<Map<String, Value>, String> {
    match serde_json::from_slice(body).map_err(|e| format!("Invalid JSON: {e}"))? {
        Value::Object(map) => Ok(map),
        other => Err(format!("Expected a JSON object, got {}", json_type(&other))),
    }
}

fn parse_form_urlencoded(body: &[u8]) -> Result<Map<String, Value>, String> {
    let body_str = std::str::from_utf8(body).map_err(|e| format!("Invalid UTF-8: {e}"))?;

    // Last value wins for repeated keys.
    let map = form_urlencoded::parse(body_str.as_bytes())
        .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
        .collect();
    Ok(map)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
