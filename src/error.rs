use thiserror::Error;

/// Failure to emit a document from [Logger::flush](super::Logger::flush)
///
/// Accumulated metrics are left intact, so the flush can be retried.
#[derive(Debug, Error)]
pub enum FlushError {
    #[error("could not encode metrics to JSON: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("could not write metrics document: {0}")]
    Write(#[source] std::io::Error),
}
