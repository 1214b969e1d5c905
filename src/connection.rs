//! Connection handle lifecycle management.

use std::fmt;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::handles::{HandleState, ResourceId};
use crate::types::ConnectionOptions;

/// An owned handle to a resource allocated by a [`Backend`].
///
/// The resource is destroyed exactly once: either by an explicit
/// [`release()`](Connection::release), which may be called any number of
/// times and from any number of threads, or by `Drop` if the owner never
/// released it.
///
/// # Example
///
/// ```no_run
/// # use connguard::{Backend, Connection};
/// # fn example<B: Backend>(backend: B) -> connguard::Result<(), B::Error> {
/// let conn = Connection::new(backend)?;
/// conn.login("alice", "hunter2")?;
///
/// // Release deterministically; Drop is only a fallback
/// conn.release()?;
/// assert!(conn.login("alice", "hunter2").unwrap_err().is_use_after_release());
/// # Ok(())
/// # }
/// ```
pub struct Connection<B: Backend> {
    backend: B,
    state: RwLock<HandleState>,
    options: ConnectionOptions,
}

impl<B: Backend> Connection<B> {
    /// Allocate a new resource with default options.
    pub fn new(backend: B) -> Result<Self, B::Error> {
        Self::with_options(backend, ConnectionOptions::default())
    }

    /// Allocate a new resource.
    ///
    /// Fails with [`Error::Allocation`] if the backend returns the sentinel
    /// handle. No connection exists in that case, so nothing is ever
    /// destroyed for it.
    pub fn with_options(backend: B, options: ConnectionOptions) -> Result<Self, B::Error> {
        let Some(id) = backend.allocate().into_id() else {
            warn!(label = options.label(), "backend failed to allocate resource");
            return Err(Error::Allocation);
        };
        debug!(label = options.label(), %id, "allocated resource");

        Ok(Self {
            backend,
            state: RwLock::new(HandleState::Live(id)),
            options,
        })
    }

    /// Get the resource id, or `None` once released.
    pub fn id(&self) -> Option<ResourceId> {
        self.state.read().id()
    }

    /// Check if the resource has not been released yet.
    pub fn is_live(&self) -> bool {
        self.id().is_some()
    }

    /// Get the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Get the options this connection was created with.
    pub fn options(&self) -> &ConnectionOptions {
        &self.options
    }

    /// Log in on the resource.
    ///
    /// Fails with [`Error::UseAfterRelease`] without calling the backend if
    /// the connection was released. Backend errors come back unmodified as
    /// [`Error::Login`]. May block for as long as the backend does.
    pub fn login(&self, username: &str, password: &str) -> Result<(), B::Error> {
        // Held across the backend call: logins share it, release waits for them.
        let state = self.state.read();
        let Some(id) = state.id() else {
            return Err(Error::UseAfterRelease);
        };

        debug!(label = self.options.label(), %id, username, "forwarding login");
        self.backend
            .login(id, username, password)
            .map_err(Error::Login)
    }

    /// Release the resource.
    ///
    /// Idempotent: only the first call reaches [`Backend::destroy`], every
    /// later or concurrent call returns `Ok(())`. Concurrent callers return
    /// only after the destroy call has finished.
    ///
    /// If destroy fails the error is returned, but the connection still
    /// counts as released and destroy is not retried.
    pub fn release(&self) -> Result<(), B::Error> {
        let mut state = self.state.write();
        let Some(id) = state.take() else {
            return Ok(());
        };

        debug!(label = self.options.label(), %id, "releasing resource");
        self.backend.destroy(id).map_err(Error::Release)
    }
}

impl<B: Backend> Drop for Connection<B> {
    fn drop(&mut self) {
        let Some(id) = self.state.get_mut().take() else {
            return;
        };

        let label = self.options.label();
        if self.options.warn_on_implicit_release {
            warn!(label, %id, "connection dropped without explicit release");
        }
        // Nobody to report to from here
        if let Err(e) = self.backend.destroy(id) {
            warn!(label, %id, error = %e, "failed to destroy resource on drop");
        }
    }
}

impl<B: Backend> fmt::Debug for Connection<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("label", &self.options.label())
            .field("id", &self.id())
            .finish_non_exhaustive()
    }
}

/// Run `f` with a fresh connection and release it on every exit path.
///
/// If `f` fails, its error is returned and a release error is only logged.
/// If `f` succeeds, a release error is returned instead of the value. A
/// panic in `f` releases through `Drop`.
///
/// # Example
///
/// ```no_run
/// # use connguard::{with_connection, Backend};
/// # fn example<B: Backend>(backend: B) -> connguard::Result<(), B::Error> {
/// with_connection(backend, |conn| conn.login("alice", "hunter2"))?;
/// # Ok(())
/// # }
/// ```
pub fn with_connection<B, T, F>(backend: B, f: F) -> Result<T, B::Error>
where
    B: Backend,
    F: FnOnce(&Connection<B>) -> Result<T, B::Error>,
{
    let conn = Connection::new(backend)?;
    let id = conn.id().map(ResourceId::get);
    let result = f(&conn);
    let released = conn.release();

    match (result, released) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) | (Err(e), Ok(())) => Err(e),
        (Err(e), Err(release_err)) => {
            warn!(
                label = conn.options.label(),
                id,
                error = %release_err,
                "failed to release resource after error"
            );
            Err(e)
        }
    }
}
