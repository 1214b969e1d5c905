//! Shared counting backend for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};

use connguard::{Backend, RawHandle, ResourceId};
use parking_lot::Mutex;
use thiserror::Error;

/// Error returned by the counting backend when told to fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("stub failure: {0}")]
pub struct StubError(pub String);

/// A call as seen by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Allocate(RawHandle),
    Login {
        id: ResourceId,
        username: String,
        password: String,
    },
    Destroy(ResourceId),
}

/// Backend that hands out increasing ids and records every call.
#[derive(Default)]
pub struct CountingBackend {
    next: AtomicU64,
    calls: Mutex<Vec<Call>>,
    fail_allocate: bool,
    fail_login: bool,
    fail_destroy: bool,
    panic_login: bool,
}

impl CountingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose `allocate` always returns the sentinel.
    pub fn failing_allocate() -> Self {
        Self {
            fail_allocate: true,
            ..Self::default()
        }
    }

    /// Backend whose `login` always fails.
    pub fn failing_login() -> Self {
        Self {
            fail_login: true,
            ..Self::default()
        }
    }

    /// Backend whose `destroy` always fails.
    pub fn failing_destroy() -> Self {
        Self {
            fail_destroy: true,
            ..Self::default()
        }
    }

    /// Backend whose `login` panics.
    pub fn panicking_login() -> Self {
        Self {
            panic_login: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn allocations(&self) -> usize {
        self.count(|c| matches!(c, Call::Allocate(h) if h.is_valid()))
    }

    pub fn logins(&self) -> usize {
        self.count(|c| matches!(c, Call::Login { .. }))
    }

    pub fn destroys(&self) -> usize {
        self.count(|c| matches!(c, Call::Destroy(_)))
    }

    pub fn destroys_of(&self, id: ResourceId) -> usize {
        self.count(|c| *c == Call::Destroy(id))
    }

    fn count(&self, f: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().iter().filter(|c| f(c)).count()
    }
}

impl Backend for CountingBackend {
    type Error = StubError;

    fn allocate(&self) -> RawHandle {
        let handle = if self.fail_allocate {
            RawHandle::invalid()
        } else {
            RawHandle::from_raw(self.next.fetch_add(1, Ordering::SeqCst) + 1)
        };
        self.calls.lock().push(Call::Allocate(handle));
        handle
    }

    fn login(&self, id: ResourceId, username: &str, password: &str) -> Result<(), StubError> {
        self.calls.lock().push(Call::Login {
            id,
            username: username.to_string(),
            password: password.to_string(),
        });
        if self.panic_login {
            panic!("backend blew up during login");
        }
        if self.fail_login {
            return Err(StubError(format!("login rejected for {}", username)));
        }
        Ok(())
    }

    fn destroy(&self, id: ResourceId) -> Result<(), StubError> {
        self.calls.lock().push(Call::Destroy(id));
        if self.fail_destroy {
            return Err(StubError(format!("destroy failed for {}", id)));
        }
        Ok(())
    }
}
