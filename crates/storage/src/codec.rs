use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Stored as a JSON number, e.g. `3` or `7.5`.
pub(crate) fn encode_high_score(score: f64) -> Result<String, StorageError> {
    if !score.is_finite() {
        return Err(StorageError::Serialization(format!(
            "high score must be finite, got {score}"
        )));
    }
    serde_json::to_string(&score).map_err(ser)
}

pub(crate) fn decode_high_score(raw: &str) -> Result<f64, StorageError> {
    let value: serde_json::Value = serde_json::from_str(raw.trim()).map_err(ser)?;
    match value {
        serde_json::Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| StorageError::Serialization(format!("invalid high score: {raw}"))),
        // Older writers stored the score as a quoted string.
        serde_json::Value::String(s) => s.trim().parse::<f64>().map_err(ser),
        _ => Err(StorageError::Serialization(format!(
            "invalid high score: {raw}"
        ))),
    }
}

/// Stored as a JSON boolean: `true` means dark.
pub(crate) fn encode_dark_mode(dark: bool) -> Result<String, StorageError> {
    serde_json::to_string(&dark).map_err(ser)
}

pub(crate) fn decode_dark_mode(raw: &str) -> Result<bool, StorageError> {
    serde_json::from_str(raw.trim()).map_err(ser)
}
