//! Field-level tolerant decoding for wire records.
//!
//! A null or mistyped field decodes to its default instead of failing the
//! whole record, so one bad field never costs the caller the rest of the
//! response.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decodes a field, falling back to `T::default()` when its value has the
/// wrong shape.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Decodes a list field, keeping every element that decodes and dropping the
/// rest. Anything other than an array yields an empty list.
pub(crate) fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    #[serde(default)]
    struct Record {
        #[serde(deserialize_with = "lenient")]
        name: String,
        #[serde(deserialize_with = "lenient")]
        count: u64,
        #[serde(deserialize_with = "lenient_seq")]
        tags: Vec<String>,
    }

    #[test]
    fn null_and_mistyped_fields_default() {
        let record: Record =
            serde_json::from_value(json!({"name": null, "count": "seven", "tags": ["a"]})).unwrap();
        assert_eq!(
            record,
            Record {
                name: String::new(),
                count: 0,
                tags: vec!["a".to_string()],
            }
        );
    }

    #[test]
    fn bad_list_elements_are_dropped() {
        let record: Record =
            serde_json::from_value(json!({"name": "n", "tags": ["a", null, 3, "b"]})).unwrap();
        assert_eq!(record.name, "n");
        assert_eq!(record.tags, vec!["a", "b"]);
    }

    #[test]
    fn non_array_list_is_empty() {
        let record: Record = serde_json::from_value(json!({"tags": "a"})).unwrap();
        assert!(record.tags.is_empty());
    }

    #[test]
    fn missing_fields_still_default() {
        let record: Record = serde_json::from_value(json!({})).unwrap();
        assert_eq!(record, Record::default());
    }
}
