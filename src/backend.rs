//! The external collaborator that owns the actual resource.

use std::sync::Arc;

use crate::handles::{RawHandle, ResourceId};

/// Native side of a connection.
///
/// A `Backend` allocates resources, logs them in and destroys them. What
/// those calls do (network I/O, sessions, retries) is entirely up to the
/// implementation; [`Connection`](crate::Connection) only guarantees the
/// order and count in which they are made:
///
/// * `login` and `destroy` are only ever called with an id that `allocate`
///   returned and that has not been destroyed yet.
/// * `destroy` is called at most once per id.
///
/// All three calls may block.
pub trait Backend {
    /// Error reported by `login` and `destroy`.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Allocate a new resource.
    ///
    /// Returns [`RawHandle::invalid()`] if allocation failed.
    fn allocate(&self) -> RawHandle;

    /// Log in on a live resource.
    fn login(&self, id: ResourceId, username: &str, password: &str) -> Result<(), Self::Error>;

    /// Destroy a live resource.
    fn destroy(&self, id: ResourceId) -> Result<(), Self::Error>;
}

macro_rules! forward_backend {
    ($($ty:ty),*) => {
        $(
            impl<B: Backend + ?Sized> Backend for $ty {
                type Error = B::Error;

                #[inline]
                fn allocate(&self) -> RawHandle {
                    (**self).allocate()
                }

                #[inline]
                fn login(&self, id: ResourceId, username: &str, password: &str) -> Result<(), Self::Error> {
                    (**self).login(id, username, password)
                }

                #[inline]
                fn destroy(&self, id: ResourceId) -> Result<(), Self::Error> {
                    (**self).destroy(id)
                }
            }
        )*
    };
}

forward_backend!(&B, Box<B>, Arc<B>);
