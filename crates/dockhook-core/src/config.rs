//! Run configuration for the dispatcher.

/// Immutable configuration assembled once at startup and shared by the
/// dispatcher and the trigger executor.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Forward handler stdout to the dispatcher's own stdout. When
    /// disabled, handler stdout is discarded.
    pub debug: bool,
    /// Shell interpreter to wrap handler invocations in. `None` executes
    /// the handler directly.
    pub shell: Option<String>,
    /// Whether handler processes inherit the dispatcher's environment.
    /// Disabling this runs handlers with an empty environment.
    pub inherit_env: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            debug: false,
            shell: None,
            inherit_env: true,
        }
    }
}
