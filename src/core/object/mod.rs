use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value as Json};

/// An untyped (JSON) Object.
///
/// Holds the parts of identification payloads whose shape is not fixed by the
/// API, and any fields a response carries beyond the typed ones.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UntypedObject(pub(crate) Map<String, Json>);

impl UntypedObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field and deserialize it as `T`.
    ///
    /// Note that this method clones the underlying data.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<serde_json::Result<T>> {
        Some(serde_json::from_value(self.0.get(key)?.clone()))
    }

    /// Borrow a field if it is a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.as_str()
    }

    /// Insert a field, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Json>) -> Option<Json> {
        self.0.insert(key.into(), value.into())
    }
}

impl From<Map<String, Json>> for UntypedObject {
    fn from(map: Map<String, Json>) -> Self {
        Self(map)
    }
}

impl From<UntypedObject> for Json {
    fn from(value: UntypedObject) -> Self {
        value.0.into()
    }
}
