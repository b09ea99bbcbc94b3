//! Link order enforcement for runtime builders.
//!
//! Builders must receive the drawing context, then the vertex shader, then the fragment
//! shader, each exactly once, before a runtime can be created.
//!
//! - [`StagedBuilder`] enforces the order at compile time: each link consumes the builder and
//!   returns it in the next stage, and only the last stage exposes `create_runtime`.
//! - [`LinkProgress`] enforces the same order at run time, for builders driven from code the
//!   compiler cannot see (e.g.: JavaScript).

use core::marker::PhantomData;

use crate::error::{BootstrapResult, LinkStage, StageError};
use crate::module::RuntimeBuilder;

mod sealed {
    pub trait Sealed {}
}

/// Marker trait for the stages of a [`StagedBuilder`].
pub trait BuildStage: sealed::Sealed {
    /// Links already performed when reaching this stage.
    const LINKED: &'static [LinkStage];
}

/// Nothing linked yet.
#[derive(Debug)]
pub struct Unlinked;

/// Drawing context linked.
#[derive(Debug)]
pub struct ContextLinked;

/// Drawing context and vertex shader linked.
#[derive(Debug)]
pub struct VertexLinked;

/// Every link performed, the runtime can be created.
#[derive(Debug)]
pub struct Buildable;

impl sealed::Sealed for Unlinked {}
impl sealed::Sealed for ContextLinked {}
impl sealed::Sealed for VertexLinked {}
impl sealed::Sealed for Buildable {}

impl BuildStage for Unlinked {
    const LINKED: &'static [LinkStage] = &[];
}

impl BuildStage for ContextLinked {
    const LINKED: &'static [LinkStage] = &[LinkStage::Context];
}

impl BuildStage for VertexLinked {
    const LINKED: &'static [LinkStage] = &[LinkStage::Context, LinkStage::VertexShader];
}

impl BuildStage for Buildable {
    const LINKED: &'static [LinkStage] = &LinkStage::ORDER;
}

/// Runtime builder wrapped in its current link stage.
#[derive(Debug)]
pub struct StagedBuilder<B, S: BuildStage> {
    builder: B,
    _stage: PhantomData<S>,
}

impl<B, S> StagedBuilder<B, S>
where
    B: RuntimeBuilder,
    S: BuildStage,
{
    fn advance<N: BuildStage>(self) -> StagedBuilder<B, N> {
        StagedBuilder {
            builder: self.builder,
            _stage: PhantomData,
        }
    }

    pub fn linked(&self) -> &'static [LinkStage] {
        S::LINKED
    }

    /// Dumps the builder state. Never affects what gets built.
    pub fn debug_state(&self) {
        trace!(linked = ?S::LINKED, "Builder state dump requested");
        self.builder.debug_state();
    }
}

impl<B: RuntimeBuilder> StagedBuilder<B, Unlinked> {
    pub fn new(builder: B) -> Self {
        Self {
            builder,
            _stage: PhantomData,
        }
    }

    pub fn link_context(mut self, context: B::Context) -> BootstrapResult<StagedBuilder<B, ContextLinked>> {
        self.builder
            .link_webgl_context(context)
            .map_err(|e| link_err!(LinkStage::Context, e))?;

        Ok(self.advance())
    }
}

impl<B: RuntimeBuilder> StagedBuilder<B, ContextLinked> {
    pub fn link_vertex_shader(mut self, source: &str) -> BootstrapResult<StagedBuilder<B, VertexLinked>> {
        self.builder
            .link_vert_shader(source)
            .map_err(|e| link_err!(LinkStage::VertexShader, e))?;

        Ok(self.advance())
    }
}

impl<B: RuntimeBuilder> StagedBuilder<B, VertexLinked> {
    pub fn link_fragment_shader(mut self, source: &str) -> BootstrapResult<StagedBuilder<B, Buildable>> {
        self.builder
            .link_frag_shader(source)
            .map_err(|e| link_err!(LinkStage::FragmentShader, e))?;

        Ok(self.advance())
    }
}

impl<B: RuntimeBuilder> StagedBuilder<B, Buildable> {
    /// Consumes the builder and produces the runtime.
    pub fn create_runtime(self) -> BootstrapResult<B::Runtime> {
        self.builder
            .create_runtime()
            .map_err(|e| construction_err!("create runtime", e))
    }
}

/// Run-time tracking of the link protocol.
///
/// Callers check a link with [`LinkProgress::expect`] before performing it, and record it
/// with [`LinkProgress::record`] once it succeeded. A failed link is not recorded and may be
/// retried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkProgress {
    linked: usize,
}

impl LinkProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stage expected to be linked next, `None` when every link is done.
    pub fn next_stage(&self) -> Option<LinkStage> {
        LinkStage::ORDER.get(self.linked).copied()
    }

    pub fn is_linked(&self, stage: LinkStage) -> bool {
        stage.position() < self.linked
    }

    pub fn is_complete(&self) -> bool {
        self.next_stage().is_none()
    }

    /// Checks that `stage` is the one to link now.
    pub fn expect(&self, stage: LinkStage) -> Result<(), StageError> {
        if self.is_linked(stage) {
            return Err(StageError::AlreadyLinked(stage));
        }

        match self.next_stage() {
            Some(expected) if expected == stage => Ok(()),
            Some(expected) => Err(StageError::OutOfOrder { expected, found: stage }),
            None => Err(StageError::AlreadyLinked(stage)),
        }
    }

    /// Records a successful link of `stage`.
    pub fn record(&mut self, stage: LinkStage) -> Result<(), StageError> {
        self.expect(stage)?;
        self.linked += 1;
        Ok(())
    }

    /// Checks that every link has been performed.
    pub fn ensure_complete(&self) -> Result<(), StageError> {
        match self.next_stage() {
            Some(missing) => Err(StageError::Incomplete { missing }),
            None => Ok(()),
        }
    }
}
