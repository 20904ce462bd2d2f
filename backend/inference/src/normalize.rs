//! Response normalizer.
//!
//! The model is instructed to emit strict JSON but doesn't always comply: it
//! may wrap the payload in markdown fences or omit optional arrays. Fences
//! and whitespace are tolerated here; a missing or unknown `status` is not.

use serde_json::Value;

use plantguard_core::{DiagnosisError, DiagnosisRecord};

/// Parse the model's reply text into a `DiagnosisRecord`.
pub fn normalize(raw_text: &str) -> Result<DiagnosisRecord, DiagnosisError> {
    let clean = strip_code_fences(raw_text);

    let value: Value = serde_json::from_str(&clean)
        .map_err(|e| DiagnosisError::MalformedJson(e.to_string()))?;

    if value.get("status").is_none() {
        return Err(DiagnosisError::InvalidSchema(
            "missing required field \"status\"".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| DiagnosisError::InvalidSchema(e.to_string()))
}

/// Remove markdown code-fence markers and trim surrounding whitespace.
fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}
