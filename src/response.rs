use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::Error;

/// A successful response body, shaped by its declared content type.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Json(Value),
    Bytes(Vec<u8>),
    Text(String),
}

impl Payload {
    /// Picks a representation from the `Content-Type` header value.
    ///
    /// JSON that fails to decode comes back as text rather than an error.
    pub fn classify(content_type: &str, body: &[u8]) -> Self {
        let content_type = content_type.to_ascii_lowercase();
        if content_type.starts_with("application/json") {
            return match serde_json::from_slice(body) {
                Ok(value) => Payload::Json(value),
                Err(_) => Payload::Text(String::from_utf8_lossy(body).into_owned()),
            };
        }
        if content_type.starts_with("image/")
            || content_type.starts_with("application/octet-stream")
        {
            return Payload::Bytes(body.to_vec());
        }
        Payload::Text(String::from_utf8_lossy(body).into_owned())
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            Payload::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Payload::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Rows of a collection page. Absent or null `data` is empty.
    pub fn data(&self) -> Vec<Value> {
        self.as_json()
            .and_then(|v| v.get("data"))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    pub fn has_more(&self) -> bool {
        self.as_json()
            .and_then(|v| v.get("hasMore"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Payload::Json(Value::Object(_)))
    }

    /// Decodes a JSON payload into a typed model.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, Error> {
        match self {
            Payload::Json(value) => Ok(serde_json::from_value(value.clone())?),
            Payload::Text(text) => Ok(serde_json::from_str(text)?),
            Payload::Bytes(bytes) => Ok(serde_json::from_slice(bytes)?),
        }
    }
}
