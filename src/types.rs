//! Configuration types.

/// Label used in log events when [`ConnectionOptions::label`] is unset.
pub const DEFAULT_LABEL: &str = "connection";

/// Connection configuration options.
///
/// # Example
///
/// ```
/// use connguard::ConnectionOptions;
///
/// let opts = ConnectionOptions {
///     label: Some("game-api".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(opts.label(), "game-api");
/// assert!(opts.warn_on_implicit_release);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionOptions {
    /// Name attached to every log event for this connection.
    pub label: Option<String>,
    /// Emit a warning when a live connection is released by `Drop`
    /// instead of an explicit `release()` (default: true).
    pub warn_on_implicit_release: bool,
}

impl ConnectionOptions {
    /// Label for log events.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(DEFAULT_LABEL)
    }
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            label: None,
            warn_on_implicit_release: true,
        }
    }
}
