//! JSON output formatting.

use std::path::Path;

use glance_core::storage::StoredSecretInfo;
use glance_core::StructuredResponse;

/// JSON for a response checked against a mode's schema.
pub fn structured_json(response: &StructuredResponse) -> anyhow::Result<serde_json::Value> {
    let mut value = serde_json::to_value(response)?;
    if let Some(map) = value.as_object_mut() {
        map.insert(
            "ok".to_string(),
            serde_json::Value::Bool(response.is_structured()),
        );
    }
    Ok(value)
}

/// JSON for `key info`.
pub fn key_info_json(store_path: &Path, info: Option<&StoredSecretInfo>) -> serde_json::Value {
    serde_json::json!({
        "store": store_path.display().to_string(),
        "stored": info.is_some(),
        "saved_at": info.and_then(|i| i.saved_at),
        "rotated_at": info.and_then(|i| i.rotated_at),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glance_core::response::{AnalysisMode, Verdict};

    #[test]
    fn test_structured_json_fact_check() {
        let parsed = glance_core::parse(
            r#"{"summary":"s","verdict":"Misleading","details":"d"}"#,
        );
        let structured = StructuredResponse::interpret(AnalysisMode::FactCheck, parsed);
        let value = structured_json(&structured).unwrap();

        assert_eq!(value["kind"], "fact_check");
        assert_eq!(value["ok"], true);
        assert_eq!(value["verdict"], Verdict::Misleading.as_str());
    }

    #[test]
    fn test_structured_json_fallback() {
        let parsed = glance_core::parse("just prose");
        let structured = StructuredResponse::interpret(AnalysisMode::Explain, parsed);
        let value = structured_json(&structured).unwrap();

        assert_eq!(value["kind"], "unstructured");
        assert_eq!(value["ok"], false);
        assert_eq!(value["summary"], "just prose");
    }

    #[test]
    fn test_key_info_json_when_empty() {
        let value = key_info_json(Path::new("/tmp/secrets.json"), None);
        assert_eq!(value["stored"], false);
        assert!(value["saved_at"].is_null());
    }
}
