use crate::surface::DEFAULT_CONTEXT_KIND;

/// Tunables of a [`RuntimeBootstrap`](crate::RuntimeBootstrap).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    context_kind: String,
    debug_dumps: bool,
    rebootstrap_on_resize: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            context_kind: DEFAULT_CONTEXT_KIND.to_owned(),
            debug_dumps: true,
            rebootstrap_on_resize: false,
        }
    }
}

impl BootstrapConfig {
    /// Kind of drawing context requested from surfaces. Defaults to `webgl`.
    #[must_use]
    pub fn with_context_kind(mut self, context_kind: impl Into<String>) -> Self {
        self.context_kind = context_kind.into();
        self
    }

    /// Whether builder and runtime state dumps are requested during attempts. Defaults to `true`.
    #[must_use]
    pub fn with_debug_dumps(mut self, debug_dumps: bool) -> Self {
        self.debug_dumps = debug_dumps;
        self
    }

    /// Whether a change of dimensions alone starts a new attempt. Defaults to `false`.
    #[must_use]
    pub fn with_rebootstrap_on_resize(mut self, rebootstrap_on_resize: bool) -> Self {
        self.rebootstrap_on_resize = rebootstrap_on_resize;
        self
    }

    pub fn context_kind(&self) -> &str {
        &self.context_kind
    }

    pub fn debug_dumps(&self) -> bool {
        self.debug_dumps
    }

    pub fn rebootstrap_on_resize(&self) -> bool {
        self.rebootstrap_on_resize
    }
}
