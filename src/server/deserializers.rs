use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `?page=` as the listing endpoints read it: absent, empty or non-numeric
/// values all fall back to page 1 instead of rejecting the request.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page", deserialize_with = "page_or_first")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

// query-string values always arrive as strings
fn page_or_first<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or_else(default_page))
}

/// Integer coercion for loosely-typed JSON bodies: integers pass through,
/// floats truncate, strings are trimmed and parsed. Anything else is `None`.
pub fn lenient_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
