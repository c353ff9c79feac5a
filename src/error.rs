use snafu::Snafu;

/// Errors produced while turning request parameters into strings.
///
/// Both variants are fatal to the call that produced them. Serializing a parameter mapping either
/// yields the complete string or one of these errors; there is never partial output.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SerializeError {
    /// A value did not match any of the kinds the API understands.
    #[snafu(display("unsupported parameter value of type {}", type_name))]
    UnsupportedType { type_name: String },

    /// A mapping entry point was handed something other than an object.
    #[snafu(display("invalid argument: {}", reason))]
    InvalidArgument { reason: String },
}

impl SerializeError {
    /// The runtime type name carried by an [SerializeError::UnsupportedType] error.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::UnsupportedType { type_name } => Some(type_name),
            Self::InvalidArgument { .. } => None,
        }
    }
}

// Name of a JSON value's type, for diagnostics.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value::*;
    match value {
        Null => "null",
        Bool(_) => "boolean",
        Number(_) => "number",
        String(_) => "string",
        Array(_) => "array",
        Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_names_the_offending_type() {
        let err = SerializeError::UnsupportedType {
            type_name: "object".into(),
        };
        assert_eq!(err.to_string(), "unsupported parameter value of type object");
        assert_eq!(err.type_name(), Some("object"));

        let err = SerializeError::InvalidArgument {
            reason: "parameter not an object".into(),
        };
        assert_eq!(err.to_string(), "invalid argument: parameter not an object");
        assert_eq!(err.type_name(), None);
    }

    #[test]
    fn json_type_names() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!(42)), "number");
        assert_eq!(json_type_name(&json!([1])), "array");
        assert_eq!(json_type_name(&json!({})), "object");
    }
}
