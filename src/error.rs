use serde_json::Value;
use thiserror::Error;

/// What kind of rejection a [`ValueError`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueErrorKind {
    /// The value is not a member of the expected type.
    Mismatch,
    /// The text handed to the casting layer is not well-formed JSON.
    Parse,
    /// The value is a member but does not deserialize into the requested Rust type.
    Decode,
}

/// A rejected cast, carrying the offending value.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ValueError {
    kind: ValueErrorKind,
    message: String,
    expected: Option<String>,
    value: Value,
}

impl ValueError {
    pub(crate) fn mismatch(expected: String, value: Value) -> Self {
        Self {
            kind: ValueErrorKind::Mismatch,
            message: format!("value does not match {expected}"),
            expected: Some(expected),
            value,
        }
    }
    pub(crate) fn parse(text: &str) -> Self {
        Self {
            kind: ValueErrorKind::Parse,
            message: "invalid serialized input".to_string(),
            expected: None,
            value: Value::String(text.to_string()),
        }
    }
    pub(crate) fn too_deep(text: &str) -> Self {
        Self {
            message: "invalid serialized input: nested too deeply".to_string(),
            ..Self::parse(text)
        }
    }
    pub(crate) fn decode(target: &str, reason: String, value: Value) -> Self {
        Self {
            kind: ValueErrorKind::Decode,
            message: format!("value does not fit {target}: {reason}"),
            expected: Some(target.to_string()),
            value,
        }
    }
    pub fn kind(&self) -> ValueErrorKind {
        self.kind
    }
    pub fn message(&self) -> &str {
        &self.message
    }
    /// Name of the expected type, absent for parse failures.
    pub fn expected(&self) -> Option<&str> {
        self.expected.as_deref()
    }
    pub fn value(&self) -> &Value {
        &self.value
    }
    pub fn into_value(self) -> Value {
        self.value
    }
}

#[derive(Error, Debug)]
pub enum TypeshapeError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Notation error: {message}")]
    Notation { message: String, line: Option<usize>, col: Option<usize> },
    #[error("Unknown type: {0}")]
    UnknownType(String),
    #[error("Duplicate type: {0}")]
    Duplicate(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error(transparent)]
    Value(#[from] ValueError),
}

pub type Result<T> = std::result::Result<T, TypeshapeError>;

// Helper conversions
impl From<config::ConfigError> for TypeshapeError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl From<std::io::Error> for TypeshapeError {
    fn from(e: std::io::Error) -> Self { Self::Io(e.to_string()) }
}
