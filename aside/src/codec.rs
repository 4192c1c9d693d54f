//! Serializer glue: payloads travel through backends as JSON text.

use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn encode<T: Serialize>(payload: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(payload)
}

pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(raw)
}
