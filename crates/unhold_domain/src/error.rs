use thiserror::Error;

// NOTE: Deriving From for error is a really bad idea. Callers are meant
// to classify failures explicitly; a blanket From would let unclassified
// io errors slip through as the wrong kind.
#[derive(Debug, Error)]
pub enum Error {
    /// The open-handle enumeration mechanism cannot be queried at all.
    /// This is not the same as "no blockers": the lock state is unknown.
    #[error("Unable to enumerate processes holding the file open: {0}")]
    LockQueryUnavailable(String),
}

/// Classified failure of a delete or rename attempt.
///
/// The kind is what outcome selection branches on; callers never match
/// on platform error types directly.
#[derive(Debug, Error)]
pub enum RemoveError {
    #[error("File is busy or held open by another process")]
    Busy,

    #[error("Operation blocked by a security policy")]
    SecurityViolation,

    #[error("Operation blocked by an access-control denial")]
    AuthorizationViolation,

    #[error("File not found")]
    NotFound,

    #[error(transparent)]
    Other(std::io::Error),
}
