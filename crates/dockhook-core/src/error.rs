//! Error types for the dispatch pipeline.
//!
//! Startup errors (command parsing, executable resolution, daemon
//! connection) and steady-state stream errors are fatal; per-event
//! inspection and handler failures are logged at the dispatch layer and
//! never abort the control loop.

use thiserror::Error;

/// Top-level error type for the dispatcher.
#[derive(Debug, Error)]
pub enum HookError {
    /// The handler command string could not be split into arguments.
    #[error("unable to parse handler command: {source}")]
    CommandParse {
        /// Underlying shell-word parse error.
        #[from]
        source: shell_words::ParseError,
    },

    /// The handler command string contained no words.
    #[error("handler command is empty")]
    EmptyCommand,

    /// The handler executable could not be resolved to an absolute path.
    #[error("handler executable not found: {program}")]
    ExecutableNotFound {
        /// First word of the handler command.
        program: String,
        /// Underlying resolution error.
        source: which::Error,
    },

    /// A Docker API call failed.
    #[error("runtime API error: {source}")]
    Runtime {
        /// Underlying client error.
        #[from]
        source: bollard::errors::Error,
    },

    /// A container descriptor could not be serialized.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// The handler process could not be spawned.
    #[error("unable to launch handler {program}: {source}")]
    HandlerLaunch {
        /// Executable the spawn was attempted for.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The handler's exit status could not be collected.
    #[error("unable to collect handler status: {source}")]
    HandlerWait {
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The handler process terminated without an exit code.
    #[error("handler terminated abnormally: {status}")]
    HandlerTerminated {
        /// Wait status reported by the operating system.
        status: String,
    },

    /// The live event stream ended without a shutdown request.
    #[error("event stream closed")]
    StreamClosed,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HookError>;
