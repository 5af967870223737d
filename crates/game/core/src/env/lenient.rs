//! Forgiving deserializers for hand-authored data.
//!
//! Authoring tools write numbers as strings and strings as numbers more or
//! less interchangeably; these helpers accept either.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Int(value) => value.to_string(),
            Scalar::Float(value) => value.to_string(),
            Scalar::Bool(value) => value.to_string(),
            Scalar::Text(value) => value,
        }
    }
}

/// Integer from a number or a numeric string; anything else becomes 0.
pub fn lenient_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Int(value)) => i32::try_from(value).unwrap_or(0),
        Some(Scalar::Float(value)) => value as i32,
        Some(Scalar::Text(text)) => text.trim().parse().unwrap_or(0),
        Some(Scalar::Bool(_)) | None => 0,
    };
    Ok(value)
}

/// String map whose values may be authored as any scalar.
pub fn lenient_string_map<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Scalar>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .map(|(key, value)| (key, value.into_string()))
        .collect())
}
