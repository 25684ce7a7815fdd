//! Handler command parsing and executable resolution.

use crate::error::{HookError, Result};

/// Parsed handler command: the absolute executable path followed by the
/// fixed leading arguments from the configuration string.
///
/// Immutable after startup. Every invocation appends its own
/// `[event, container_id]` suffix to a copy, never to the base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerCommand {
    argv: Vec<String>,
}

impl HandlerCommand {
    /// Parses a raw command string with shell-word splitting rules
    /// (quoting and escaping honored) and resolves the first word to an
    /// absolute executable path.
    ///
    /// # Errors
    ///
    /// Returns an error if the string has unbalanced quoting, contains
    /// no words, or names an executable that cannot be resolved.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut argv = shell_words::split(raw)?;
        let Some(program) = argv.first() else {
            return Err(HookError::EmptyCommand);
        };
        let resolved =
            which::which(program).map_err(|source| HookError::ExecutableNotFound {
                program: program.clone(),
                source,
            })?;
        argv[0] = resolved.to_string_lossy().into_owned();
        Ok(Self { argv })
    }

    /// Returns the absolute path of the handler executable.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// Returns the full base argument vector.
    #[must_use]
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    /// Builds the argument vector for one invocation: the base command
    /// followed by the event name and the full container ID.
    #[must_use]
    pub fn argv_for(&self, event: &str, container_id: &str) -> Vec<String> {
        let mut argv = self.argv.clone();
        argv.push(event.to_owned());
        argv.push(container_id.to_owned());
        argv
    }
}
