use core::fmt;

use prism_bootstrap::{BootstrapError, BootstrapErrorKind, StageError};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrismErrorKind {
    /// Catch-all error kind
    General,
    /// The canvas could not provide a WebGL context
    ContextUnavailable,
    /// The builder rejected the context or one of the shaders
    Link,
    /// The runtime could not be created
    Construction,
    /// The runtime faulted while rendering
    RuntimePanic,
}

#[wasm_bindgen]
pub struct PrismError {
    kind: PrismErrorKind,
    source: anyhow::Error,
}

impl PrismError {
    pub(crate) fn with_kind(mut self, kind: PrismErrorKind) -> Self {
        self.kind = kind;
        self
    }
}

#[wasm_bindgen]
impl PrismError {
    pub fn backtrace(&self) -> String {
        format!("{:?}", self.source)
    }

    pub fn message(&self) -> String {
        format!("{:#}", self.source)
    }

    pub fn kind(&self) -> PrismErrorKind {
        self.kind
    }
}

impl From<BootstrapError> for PrismError {
    fn from(e: BootstrapError) -> Self {
        let kind = match e.kind() {
            BootstrapErrorKind::ContextUnavailable { .. } => PrismErrorKind::ContextUnavailable,
            BootstrapErrorKind::Link(_) => PrismErrorKind::Link,
            BootstrapErrorKind::Construction => PrismErrorKind::Construction,
            BootstrapErrorKind::RuntimePanic => PrismErrorKind::RuntimePanic,
            _ => PrismErrorKind::General,
        };

        // Bootstrap errors may hold JS handles and are not `Send`, keep the rendered chain only.
        Self {
            kind,
            source: anyhow::Error::msg(e.report().to_string()),
        }
    }
}

impl RenderError {
    pub(crate) fn kind(&self) -> PrismErrorKind {
        match self {
            RenderError::NotAWebGlContext(_)
            | RenderError::CannotCreateShader
            | RenderError::FailedToCompileShader(_) => PrismErrorKind::Link,
            RenderError::Stage(_)
            | RenderError::BuilderConsumed
            | RenderError::ExpectedContext
            | RenderError::CannotCreateProgram
            | RenderError::FailedToLinkProgram(_)
            | RenderError::FailedToCreateBuffer => PrismErrorKind::Construction,
            RenderError::ContextLost => PrismErrorKind::RuntimePanic,
        }
    }
}

impl From<RenderError> for PrismError {
    fn from(e: RenderError) -> Self {
        Self {
            kind: e.kind(),
            source: anyhow::Error::new(e),
        }
    }
}

/// Failures of the WebGL runtime and its builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RenderError {
    Stage(StageError),
    BuilderConsumed,
    NotAWebGlContext(String),
    ExpectedContext,
    CannotCreateShader,
    FailedToCompileShader(Option<String>),
    CannotCreateProgram,
    FailedToLinkProgram(Option<String>),
    FailedToCreateBuffer,
    ContextLost,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Stage(_) => write!(f, "builder protocol violation"),
            RenderError::BuilderConsumed => write!(f, "runtime builder was already used to create a runtime"),
            RenderError::NotAWebGlContext(value) => write!(f, "expected web gl context, instead got {value}"),
            RenderError::ExpectedContext => write!(f, "expected webgl context to be defined"),
            RenderError::CannotCreateShader => write!(f, "could not create a shader from the context"),
            RenderError::FailedToCompileShader(None) => write!(f, "failed to compile shader, for an unknown reason"),
            RenderError::FailedToCompileShader(Some(reason)) => write!(f, "failed to compile shader: {reason}"),
            RenderError::CannotCreateProgram => write!(f, "could not create a program from the context"),
            RenderError::FailedToLinkProgram(None) => write!(f, "failed to link program"),
            RenderError::FailedToLinkProgram(Some(reason)) => write!(f, "failed to link program: {reason}"),
            RenderError::FailedToCreateBuffer => write!(f, "failed to create buffer"),
            RenderError::ContextLost => write!(f, "webgl context is lost"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Stage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StageError> for RenderError {
    fn from(e: StageError) -> Self {
        RenderError::Stage(e)
    }
}

#[cfg(test)]
mod tests {
    use prism_bootstrap::{LinkStage, StageError};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::not_a_context(RenderError::NotAWebGlContext("null".to_owned()), PrismErrorKind::Link)]
    #[case::no_shader(RenderError::CannotCreateShader, PrismErrorKind::Link)]
    #[case::shader_compilation(RenderError::FailedToCompileShader(None), PrismErrorKind::Link)]
    #[case::protocol(RenderError::Stage(StageError::AlreadyLinked(LinkStage::Context)), PrismErrorKind::Construction)]
    #[case::consumed(RenderError::BuilderConsumed, PrismErrorKind::Construction)]
    #[case::no_context(RenderError::ExpectedContext, PrismErrorKind::Construction)]
    #[case::no_program(RenderError::CannotCreateProgram, PrismErrorKind::Construction)]
    #[case::program_link(RenderError::FailedToLinkProgram(Some("bad varying".to_owned())), PrismErrorKind::Construction)]
    #[case::no_buffer(RenderError::FailedToCreateBuffer, PrismErrorKind::Construction)]
    #[case::context_lost(RenderError::ContextLost, PrismErrorKind::RuntimePanic)]
    fn render_error_kind(#[case] error: RenderError, #[case] expected: PrismErrorKind) {
        assert_eq!(PrismError::from(error).kind(), expected);
    }

    #[test]
    fn message_includes_source_chain() {
        let error = PrismError::from(RenderError::Stage(StageError::Incomplete {
            missing: LinkStage::FragmentShader,
        }));

        assert_eq!(
            error.message(),
            "builder protocol violation: expected fragment shader to be linked"
        );
    }
}
