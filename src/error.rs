//! Error types for the connguard crate.

use thiserror::Error;

/// Result type alias for connection operations.
///
/// `E` is the backend's own error type, see [`Backend::Error`](crate::Backend::Error).
pub type Result<T, E> = std::result::Result<T, Error<E>>;

/// Error type for connection operations.
#[derive(Error, Debug)]
pub enum Error<E> {
    /// The backend returned the sentinel handle from `allocate`.
    #[error("resource allocation failed")]
    Allocation,

    /// The connection was used after it had been released.
    #[error("connection used after release")]
    UseAfterRelease,

    /// Login failed inside the backend. Passed through unmodified.
    #[error(transparent)]
    Login(E),

    /// Destroying the resource failed during an explicit release.
    #[error("release failed: {0}")]
    Release(#[source] E),

    /// A blocking task panicked or was cancelled.
    #[cfg(feature = "tokio")]
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl<E> Error<E> {
    /// Check if this is an allocation error.
    pub fn is_allocation(&self) -> bool {
        matches!(self, Error::Allocation)
    }

    /// Check if this is a use-after-release error.
    pub fn is_use_after_release(&self) -> bool {
        matches!(self, Error::UseAfterRelease)
    }

    /// Check if this is a login error from the backend.
    pub fn is_login(&self) -> bool {
        matches!(self, Error::Login(_))
    }

    /// Check if this is a release error from the backend.
    pub fn is_release(&self) -> bool {
        matches!(self, Error::Release(_))
    }

    /// Get the backend error, if this error carries one.
    pub fn backend_error(&self) -> Option<&E> {
        match self {
            Error::Login(e) | Error::Release(e) => Some(e),
            _ => None,
        }
    }
}
