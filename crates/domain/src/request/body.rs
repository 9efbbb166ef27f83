//! Request body payloads.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

type Encoder = dyn Fn() -> serde_json::Result<Vec<u8>> + Send + Sync;

/// A structured value that is serialized to JSON when the test runs.
///
/// Serialization is deferred so that a value which cannot be encoded is
/// reported as a failed test instead of failing while the request is built.
#[derive(Clone)]
pub struct JsonBody {
    encode: Arc<Encoder>,
}

impl JsonBody {
    /// Wraps any serializable value.
    pub fn new<T>(value: T) -> Self
    where
        T: Serialize + Send + Sync + 'static,
    {
        Self {
            encode: Arc::new(move || serde_json::to_vec(&value)),
        }
    }

    /// Serializes the wrapped value to JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if the value cannot be represented as JSON
    /// (for example a map keyed by tuples).
    pub fn encode(&self) -> serde_json::Result<Vec<u8>> {
        (self.encode)()
    }
}

impl fmt::Debug for JsonBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JsonBody(..)")
    }
}

impl From<serde_json::Value> for JsonBody {
    fn from(value: serde_json::Value) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_encode_value() {
        let body = JsonBody::from(serde_json::json!({"a": 1}));
        let bytes = body.encode().expect("json value should encode");
        assert_eq!(bytes, br#"{"a":1}"#);
    }

    #[test]
    fn test_encode_failure_is_deferred() {
        let mut map = BTreeMap::new();
        map.insert((1u8, 2u8), "tuple keys are not valid JSON object keys");

        let body = JsonBody::new(map);
        let err = body.encode().expect_err("tuple keys should not encode");
        assert!(err.to_string().contains("key must be a string"));
    }

    #[test]
    fn test_clone_shares_value() {
        let body = JsonBody::new(vec![1, 2, 3]);
        let copy = body.clone();
        assert_eq!(
            body.encode().expect("should encode"),
            copy.encode().expect("should encode")
        );
    }
}
