use core::fmt;

pub type BootstrapResult<T> = Result<T, BootstrapError>;

/// A required link of the runtime builder, in the order it must happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkStage {
    Context,
    VertexShader,
    FragmentShader,
}

impl LinkStage {
    /// All stages, in link order.
    pub const ORDER: [LinkStage; 3] = [LinkStage::Context, LinkStage::VertexShader, LinkStage::FragmentShader];

    pub fn name(self) -> &'static str {
        match self {
            LinkStage::Context => "webgl context",
            LinkStage::VertexShader => "vertex shader",
            LinkStage::FragmentShader => "fragment shader",
        }
    }

    pub(crate) fn position(self) -> usize {
        match self {
            LinkStage::Context => 0,
            LinkStage::VertexShader => 1,
            LinkStage::FragmentShader => 2,
        }
    }
}

impl fmt::Display for LinkStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapErrorKind {
    /// The surface could not produce a drawing context of the requested kind.
    ContextUnavailable { context_kind: String },
    /// The builder rejected a linked resource.
    Link(LinkStage),
    /// The builder could not be created, or could not produce a runtime.
    Construction,
    /// The runtime faulted while running.
    RuntimePanic,
}

impl fmt::Display for BootstrapErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            BootstrapErrorKind::ContextUnavailable { context_kind } => write!(f, "{context_kind} is needed to run this"),
            BootstrapErrorKind::Link(stage) => write!(f, "failed to link {stage}"),
            BootstrapErrorKind::Construction => write!(f, "runtime construction failed"),
            BootstrapErrorKind::RuntimePanic => write!(f, "runtime panicked"),
        }
    }
}

impl std::error::Error for BootstrapErrorKind {}

/// Error delivered to the error sink when a bootstrap attempt fails.
///
/// Holds a static context string describing the step that failed, the kind of failure, and
/// optionally the collaborator error that caused it.
#[derive(Debug)]
pub struct BootstrapError {
    context: &'static str,
    kind: BootstrapErrorKind,
    source: Option<Box<dyn std::error::Error>>,
}

impl BootstrapError {
    #[cold]
    #[must_use]
    pub fn new(context: &'static str, kind: BootstrapErrorKind) -> Self {
        Self {
            context,
            kind,
            source: None,
        }
    }

    #[cold]
    #[must_use]
    pub fn context_unavailable(context_kind: impl Into<String>) -> Self {
        Self::new(
            "acquire drawing context",
            BootstrapErrorKind::ContextUnavailable {
                context_kind: context_kind.into(),
            },
        )
    }

    #[cold]
    #[must_use]
    pub fn link(stage: LinkStage) -> Self {
        let context = match stage {
            LinkStage::Context => "link webgl context",
            LinkStage::VertexShader => "link vertex shader",
            LinkStage::FragmentShader => "link fragment shader",
        };

        Self::new(context, BootstrapErrorKind::Link(stage))
    }

    #[cold]
    #[must_use]
    pub fn construction(context: &'static str) -> Self {
        Self::new(context, BootstrapErrorKind::Construction)
    }

    #[cold]
    #[must_use]
    pub fn runtime_panic(context: &'static str) -> Self {
        Self::new(context, BootstrapErrorKind::RuntimePanic)
    }

    /// Attaches a source to this error.
    #[cold]
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn context(&self) -> &'static str {
        self.context
    }

    pub fn kind(&self) -> &BootstrapErrorKind {
        &self.kind
    }

    /// Returns a struct for formatting the error along with its whole source chain.
    pub fn report(&self) -> ErrorReport<'_> {
        ErrorReport(self)
    }
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.context, self.kind)
    }
}

impl std::error::Error for BootstrapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_deref()
    }
}

pub struct ErrorReport<'a>(&'a BootstrapError);

impl fmt::Display for ErrorReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::error::Error as _;

        write!(f, "{}", self.0)?;

        let mut next_source = self.0.source();

        while let Some(e) = next_source {
            write!(f, ", caused by: {e}")?;
            next_source = e.source();
        }

        Ok(())
    }
}

/// Message extracted from a panic payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanicMessage(pub String);

impl fmt::Display for PanicMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for PanicMessage {}

/// Builder protocol violation detected at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageError {
    AlreadyLinked(LinkStage),
    OutOfOrder { expected: LinkStage, found: LinkStage },
    Incomplete { missing: LinkStage },
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageError::AlreadyLinked(stage) => write!(f, "{stage} is already linked"),
            StageError::OutOfOrder { expected, found } => {
                write!(f, "expected {expected} to be linked next, instead got {found}")
            }
            StageError::Incomplete { missing } => write!(f, "expected {missing} to be linked"),
        }
    }
}

impl std::error::Error for StageError {}
