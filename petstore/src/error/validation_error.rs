//! Request encoding and response parsing errors.

use thiserror::Error;

/// Errors while encoding request bodies or decoding response bodies.
///
/// Each variant corresponds to a specific wire format.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// JSON response parsing failed.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// XML response parsing failed.
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::DeError),

    /// A request body could not be serialized to JSON.
    #[error("JSON encode error: {0}")]
    JsonEncode(#[source] serde_json::Error),
}

impl ValidationError {
    /// Returns `true` if this error came from decoding a response body.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::JsonParse(_) | Self::XmlParse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_parse_is_parse_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = ValidationError::JsonParse(json_err);
        assert!(err.is_parse_error());
        assert!(err.to_string().contains("JSON parse error"));
    }

    #[test]
    fn test_json_encode_is_not_parse_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ValidationError::JsonEncode(json_err);
        assert!(!err.is_parse_error());
        assert!(err.to_string().contains("JSON encode error"));
    }
}
