//! Error types for conversion and typesetting operations

/// Errors that can occur while converting or typesetting a document
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// A table header row was opened but is not well formed
    MalformedTable(String),
    /// Error reading a source document or writing a generated one
    Io(String),
    /// One or more documents of a project failed to convert
    PublishFailed(String),
    /// No usable typesetting engine binary could be located
    EngineNotFound(String),
    /// A typesetting pass was launched but did not complete cleanly
    TypesetFailed(String),
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::MalformedTable(msg) => write!(f, "Malformed table: {msg}"),
            ConvertError::Io(msg) => write!(f, "I/O error: {msg}"),
            ConvertError::PublishFailed(msg) => write!(f, "Publish failed: {msg}"),
            ConvertError::EngineNotFound(msg) => write!(f, "Typesetting engine not found: {msg}"),
            ConvertError::TypesetFailed(msg) => write!(f, "Typesetting failed: {msg}"),
        }
    }
}

impl std::error::Error for ConvertError {}
