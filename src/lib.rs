//! Exactly-once lifecycle management for handles to externally owned
//! connections.
//!
//! A [`Backend`] owns the real resource (a native client object, a remote
//! session) and refers to it by an opaque integer handle. [`Connection`]
//! wraps one such handle and guarantees:
//!
//! * allocation failure is reported as [`Error::Allocation`], never carried
//!   around as an invalid handle;
//! * nothing is forwarded to the backend after release
//!   ([`Error::UseAfterRelease`]);
//! * [`Backend::destroy`] is called at most once, no matter how many threads
//!   call [`Connection::release`];
//! * a connection that was never released is destroyed on drop.
//!
//! # Example
//!
//! ```
//! use std::convert::Infallible;
//! use std::sync::atomic::{AtomicU64, Ordering};
//!
//! use connguard::{Backend, Connection, RawHandle, ResourceId};
//!
//! #[derive(Default)]
//! struct Local {
//!     next: AtomicU64,
//! }
//!
//! impl Backend for Local {
//!     type Error = Infallible;
//!
//!     fn allocate(&self) -> RawHandle {
//!         RawHandle::from_raw(self.next.fetch_add(1, Ordering::SeqCst) + 1)
//!     }
//!
//!     fn login(&self, _id: ResourceId, _user: &str, _pass: &str) -> Result<(), Infallible> {
//!         Ok(())
//!     }
//!
//!     fn destroy(&self, _id: ResourceId) -> Result<(), Infallible> {
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> connguard::Result<(), Infallible> {
//!     let conn = Connection::new(Local::default())?;
//!     conn.login("alice", "hunter2")?;
//!     conn.release()?;
//!
//!     assert!(conn.login("alice", "hunter2").unwrap_err().is_use_after_release());
//!     Ok(())
//! }
//! ```
//!
//! # Blocking
//!
//! Backend calls may block. With the `tokio` feature, [`Connection`] also
//! offers `create_async`, `login_async` and `release_async`, which run on
//! tokio's blocking pool.

pub mod backend;
pub mod connection;
pub mod error;
mod handles;
#[cfg(feature = "tokio")]
mod nonblocking;
pub mod types;

// Re-export main types at the crate root
pub use backend::Backend;
pub use connection::{with_connection, Connection};
pub use error::{Error, Result};
pub use handles::{RawHandle, ResourceId};
pub use types::ConnectionOptions;
