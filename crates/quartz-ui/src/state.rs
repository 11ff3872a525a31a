use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Failure to produce or interpret a [`SavedState`].
#[derive(Debug)]
pub enum StateError {
    Encode(serde_json::Error),
    Decode(serde_json::Error),
    /// The bundle belongs to a different kind of widget.
    TagMismatch { expected: String, found: String },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::Encode(e) => write!(f, "failed to encode saved state: {e}"),
            StateError::Decode(e) => write!(f, "failed to decode saved state: {e}"),
            StateError::TagMismatch { expected, found } => {
                write!(f, "saved state is tagged '{found}', expected '{expected}'")
            }
        }
    }
}

impl std::error::Error for StateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StateError::Encode(e) | StateError::Decode(e) => Some(e),
            StateError::TagMismatch { .. } => None,
        }
    }
}

/// Transient view state handed to the host on suspend and back on resume.
///
/// `tag` names the widget kind that produced the bundle; `payload` is that
/// widget's record. The host treats both as opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedState {
    tag: String,
    payload: serde_json::Value,
}

impl SavedState {
    /// Wraps `record` under `tag`.
    pub fn from_record<T: Serialize>(tag: &str, record: &T) -> Result<Self, StateError> {
        let payload = serde_json::to_value(record).map_err(StateError::Encode)?;
        Ok(Self { tag: tag.to_string(), payload })
    }

    /// Extracts the record, checking that the bundle was saved under `tag`.
    pub fn to_record<T: DeserializeOwned>(&self, tag: &str) -> Result<T, StateError> {
        if self.tag != tag {
            return Err(StateError::TagMismatch {
                expected: tag.to_string(),
                found: self.tag.clone(),
            });
        }
        T::deserialize(&self.payload).map_err(StateError::Decode)
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn to_json(&self) -> Result<String, StateError> {
        serde_json::to_string(self).map_err(StateError::Encode)
    }

    pub fn from_json(s: &str) -> Result<Self, StateError> {
        serde_json::from_str(s).map_err(StateError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Counter {
        value: u32,
    }

    #[test]
    fn record_survives_json() {
        let saved = SavedState::from_record("counter", &Counter { value: 7 }).unwrap();
        let json = saved.to_json().unwrap();
        let back = SavedState::from_json(&json).unwrap();

        assert_eq!(back, saved);
        assert_eq!(back.to_record::<Counter>("counter").unwrap(), Counter { value: 7 });
    }

    #[test]
    fn foreign_tag_is_rejected() {
        let saved = SavedState::from_record("counter", &Counter { value: 1 }).unwrap();
        let err = saved.to_record::<Counter>("clock").unwrap_err();
        assert!(matches!(err, StateError::TagMismatch { .. }));
        assert!(err.to_string().contains("counter"));
    }

    #[test]
    fn malformed_payload_is_a_decode_error() {
        let saved = SavedState::from_json(r#"{"tag":"counter","payload":{"value":"x"}}"#).unwrap();
        assert!(matches!(saved.to_record::<Counter>("counter"), Err(StateError::Decode(_))));
    }

    #[test]
    fn garbage_json_is_rejected() {
        assert!(matches!(SavedState::from_json("not json"), Err(StateError::Decode(_))));
    }
}
