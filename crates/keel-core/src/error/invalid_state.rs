use super::Error;

/// Error when an operation is not allowed in the current phase.
///
/// This occurs when:
/// - The model is mutated after it has been finalized
/// - A resolved-only value (such as a type mapping) is requested before it
///   was resolved
///
/// These are programming errors; retrying the same call will fail again.
#[derive(Debug)]
pub(super) struct InvalidState {
    message: Box<str>,
}

impl std::error::Error for InvalidState {}

impl core::fmt::Display for InvalidState {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid state: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid state error.
    pub fn invalid_state(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidState(InvalidState {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid state error.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidState(_))
    }
}
