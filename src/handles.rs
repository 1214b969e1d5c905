//! Handle types for references to externally owned resources.
//!
//! [`RawHandle`] is what a backend hands out: a plain `u64` where zero is
//! the "no resource" sentinel. [`ResourceId`] is a handle that is known to
//! be live, so a connection can never hold the sentinel.

use std::fmt;
use std::mem;
use std::num::NonZeroU64;

/// Opaque handle as returned by [`Backend::allocate`](crate::Backend::allocate).
///
/// A zero value is the sentinel and signals that allocation failed.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RawHandle(u64);

impl RawHandle {
    /// Create an invalid (sentinel) handle.
    #[inline]
    pub const fn invalid() -> Self {
        Self(0)
    }

    /// Wrap a raw value produced by the backend.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value.
    #[inline]
    pub const fn into_raw(self) -> u64 {
        self.0
    }

    /// Check if this handle is valid (non-zero).
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.0 != 0
    }

    /// Convert into a live identifier, or `None` for the sentinel.
    #[inline]
    pub fn into_id(self) -> Option<ResourceId> {
        NonZeroU64::new(self.0).map(ResourceId)
    }
}

impl From<ResourceId> for RawHandle {
    fn from(id: ResourceId) -> Self {
        Self(id.get())
    }
}

/// Identifier of a live external resource. Never the sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(NonZeroU64);

impl ResourceId {
    /// Create an identifier from a raw value, or `None` if it is zero.
    #[inline]
    pub const fn new(raw: u64) -> Option<Self> {
        match NonZeroU64::new(raw) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    /// Get the raw value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Ownership state of a connection's handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HandleState {
    Live(ResourceId),
    Released,
}

impl HandleState {
    /// Current identifier, if still live.
    pub(crate) fn id(&self) -> Option<ResourceId> {
        match *self {
            HandleState::Live(id) => Some(id),
            HandleState::Released => None,
        }
    }

    /// Move to `Released`, returning the identifier if this call made the
    /// transition.
    pub(crate) fn take(&mut self) -> Option<ResourceId> {
        match mem::replace(self, HandleState::Released) {
            HandleState::Live(id) => Some(id),
            HandleState::Released => None,
        }
    }
}
