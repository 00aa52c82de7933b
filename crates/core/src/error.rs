use thiserror::Error;

/// A filter key outside the fixed vocabulary. Extraction drops these
/// silently; the error exists for callers that parse keys directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter key: {0}")]
pub struct UnknownFilterKey(pub String);
