//! Basic example demonstrating the connection lifecycle.
//!
//! Run with: RUST_LOG=debug cargo run --example basic

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use connguard::{with_connection, Backend, Connection, ConnectionOptions, RawHandle, ResourceId};
use parking_lot::Mutex;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
enum DemoError {
    #[error("unknown resource {0}")]
    UnknownResource(ResourceId),
    #[error("invalid credentials for {0}")]
    InvalidCredentials(String),
}

/// In-process stand-in for a native client library.
#[derive(Default)]
struct DemoBackend {
    next: AtomicU64,
    live: Mutex<HashSet<ResourceId>>,
}

impl Backend for DemoBackend {
    type Error = DemoError;

    fn allocate(&self) -> RawHandle {
        let raw = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(id) = ResourceId::new(raw) {
            self.live.lock().insert(id);
        }
        RawHandle::from_raw(raw)
    }

    fn login(&self, id: ResourceId, username: &str, password: &str) -> Result<(), DemoError> {
        if !self.live.lock().contains(&id) {
            return Err(DemoError::UnknownResource(id));
        }
        if password.is_empty() {
            return Err(DemoError::InvalidCredentials(username.to_string()));
        }
        println!("  [backend] {} logged in on resource {}", username, id);
        Ok(())
    }

    fn destroy(&self, id: ResourceId) -> Result<(), DemoError> {
        if !self.live.lock().remove(&id) {
            return Err(DemoError::UnknownResource(id));
        }
        println!("  [backend] destroyed resource {}", id);
        Ok(())
    }
}

fn main() -> connguard::Result<(), DemoError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let backend = DemoBackend::default();

    println!("--- Explicit release ---");
    let opts = ConnectionOptions {
        label: Some("demo".to_string()),
        ..Default::default()
    };
    let conn = Connection::with_options(&backend, opts)?;
    println!("Connection: {:?}", conn);
    conn.login("alice", "pw1")?;
    conn.release()?;
    conn.release()?;

    match conn.login("alice", "pw1") {
        Err(e) if e.is_use_after_release() => println!("Login after release rejected: {}", e),
        other => println!("Unexpected result: {:?}", other),
    }

    println!("\n--- Backend errors pass through ---");
    let conn = Connection::new(&backend)?;
    if let Err(e) = conn.login("bob", "") {
        println!("Login failed: {}", e);
    }
    conn.release()?;

    println!("\n--- Scoped connection ---");
    let id = with_connection(&backend, |conn| {
        conn.login("carol", "pw3")?;
        Ok(conn.id())
    })?;
    println!("Scoped connection {:?} released", id);

    println!("\n--- Drop fallback ---");
    {
        let conn = Connection::new(&backend)?;
        conn.login("dave", "pw4")?;
        // Released on drop with a warning
    }

    println!("\nLive resources left: {}", backend.live.lock().len());
    Ok(())
}
