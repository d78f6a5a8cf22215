/// Serde support for exclude-unset partial updates
///
/// Plain `Option<T>` cannot tell a missing JSON key from an explicit `null`.
/// Fields declared as `Option<Option<T>>` with
///
/// ```ignore
/// #[serde(default, deserialize_with = "taskboard_shared::models::patch::double_option")]
/// ```
///
/// deserialize as:
///
/// | JSON            | Rust            |
/// |-----------------|-----------------|
/// | key absent      | `None`          |
/// | `"key": null`   | `Some(None)`    |
/// | `"key": value`  | `Some(Some(v))` |

use serde::{Deserialize, Deserializer};

/// Deserializes a present key into `Some(..)`, keeping `null` as `Some(None)`
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default, deserialize_with = "double_option")]
        note: Option<Option<String>>,
    }

    #[test]
    fn test_absent_null_and_value_are_distinct() {
        let absent: Payload = serde_json::from_str("{}").unwrap();
        let null: Payload = serde_json::from_str(r#"{"note": null}"#).unwrap();
        let value: Payload = serde_json::from_str(r#"{"note": "hi"}"#).unwrap();

        assert_eq!(absent.note, None);
        assert_eq!(null.note, Some(None));
        assert_eq!(value.note, Some(Some("hi".to_string())));
    }
}
