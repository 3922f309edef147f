//! Forgiving field readers for profile bodies.
//!
//! Browser forms send whatever the input held: numbers for age, an empty
//! string for an unpicked select. These readers turn such values into
//! something validation can judge instead of failing the whole body.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::model::{HealthTarget, Sex};

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Text field: numbers become their decimal text, null becomes empty.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Optional text field: numbers become their decimal text.
pub(crate) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

/// Empty or null is unset; any label that is not a known option is `Other`.
pub(crate) fn sex<'de, D>(deserializer: D) -> Result<Option<Sex>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?)
        .filter(|label| !label.trim().is_empty())
        .map(|label| Sex::from_label(&label)))
}

/// Unknown or empty target ids fall back to the default pathway.
pub(crate) fn target<'de, D>(deserializer: D) -> Result<HealthTarget, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?)
        .and_then(|id| HealthTarget::from_id(&id))
        .unwrap_or_default())
}
