//! Error type shared by the shell and its hosts.

use thiserror::Error;

/// Faults raised by the shell. None are recovered locally: they propagate to
/// whoever invoked the triggering callback (frame scheduler or input source).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    /// An application hook was dispatched but never overridden.
    #[error("hook `{hook}` is not implemented")]
    UnimplementedHook { hook: &'static str },

    /// Pointer translation needs a surface to map client coordinates.
    #[error("no surface bound")]
    MissingSurface,

    /// The host environment rejected a call (JS exception, missing global).
    #[error("host error: {0}")]
    Host(String),

    #[error("invalid config: {0}")]
    Config(String),
}

impl ShellError {
    pub fn unimplemented(hook: &'static str) -> Self {
        Self::UnimplementedHook { hook }
    }

    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, ShellError>;
