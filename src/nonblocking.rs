//! Async adapters that keep blocking backend calls off the executor.
//!
//! Every method here runs the corresponding blocking operation on tokio's
//! blocking pool via [`tokio::task::spawn_blocking`]. The lifecycle rules are
//! the same as for the blocking API.

use std::sync::Arc;

use tokio::task;

use crate::backend::Backend;
use crate::connection::Connection;
use crate::error::Result;
use crate::types::ConnectionOptions;

impl<B> Connection<B>
where
    B: Backend + Send + Sync + 'static,
{
    /// Allocate a new resource on the blocking pool.
    pub async fn create_async(backend: B) -> Result<Arc<Self>, B::Error> {
        Self::create_async_with_options(backend, ConnectionOptions::default()).await
    }

    /// Allocate a new resource with options on the blocking pool.
    pub async fn create_async_with_options(
        backend: B,
        options: ConnectionOptions,
    ) -> Result<Arc<Self>, B::Error> {
        let conn = task::spawn_blocking(move || Self::with_options(backend, options)).await??;
        Ok(Arc::new(conn))
    }

    /// Log in on the blocking pool. See [`Connection::login`].
    pub async fn login_async(
        self: &Arc<Self>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<(), B::Error> {
        let conn = Arc::clone(self);
        let username = username.into();
        let password = password.into();
        task::spawn_blocking(move || conn.login(&username, &password)).await?
    }

    /// Release on the blocking pool. See [`Connection::release`].
    pub async fn release_async(self: &Arc<Self>) -> Result<(), B::Error> {
        let conn = Arc::clone(self);
        task::spawn_blocking(move || conn.release()).await?
    }
}
