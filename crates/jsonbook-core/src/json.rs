//! JSON parsing without a nesting limit.
//!
//! Cell sources and persisted notebooks may nest arbitrarily deep. Parsing
//! grows the stack on demand instead of stopping at serde_json's default
//! depth of 128, so anything the kernel accepts can be saved and loaded
//! again.

use serde::de::DeserializeOwned;

/// Parse `text` as a single JSON document of type `T`.
pub fn from_str_unbounded<T: DeserializeOwned>(text: &str) -> serde_json::Result<T> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn nested_arrays(depth: usize) -> String {
        format!("{}{}", "[".repeat(depth), "]".repeat(depth))
    }

    #[test]
    fn test_parses_past_default_depth() {
        let text = nested_arrays(1000);
        assert!(serde_json::from_str::<Value>(&text).is_err());

        let value: Value = from_str_unbounded(&text).unwrap();
        assert_eq!(value.to_string(), text);
    }

    #[test]
    fn test_rejects_trailing_content() {
        assert!(from_str_unbounded::<Value>("[1] [2]").is_err());
        assert!(from_str_unbounded::<Value>("  {\"a\": 1}\n").is_ok());
    }

    #[test]
    fn test_keeps_key_order() {
        let value: Value = from_str_unbounded(r#"{"b": 1, "a": 2, "c": 3}"#).unwrap();
        assert_eq!(value.to_string(), r#"{"b":1,"a":2,"c":3}"#);
    }
}
