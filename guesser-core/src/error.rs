/// Errors produced by the `guesser-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A required request field was absent, `null`, or empty.
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    /// The request body was not valid JSON for the expected shape.
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),
}
