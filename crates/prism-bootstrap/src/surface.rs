use std::rc::Rc;

use crate::error::{BootstrapError, BootstrapResult};
use crate::identity::Identity;
use crate::memo::ResourceMemoizer;

/// Context kind requested from surfaces unless configured otherwise.
pub const DEFAULT_CONTEXT_KIND: &str = "webgl";

/// A drawable area able to hand out drawing contexts.
pub trait Surface {
    type Context: Clone;

    /// Requests a context of the given kind, `None` when the surface cannot produce one.
    fn get_context(&self, kind: &str) -> Option<Self::Context>;
}

impl<T: Surface + ?Sized> Surface for Rc<T> {
    type Context = T::Context;

    fn get_context(&self, kind: &str) -> Option<Self::Context> {
        T::get_context(self, kind)
    }
}

/// Obtains drawing contexts from surfaces, at most once per surface instance.
#[derive(Debug)]
pub struct ContextAcquirer<S: Surface> {
    context_kind: String,
    contexts: ResourceMemoizer<S, S::Context>,
}

impl<S> ContextAcquirer<S>
where
    S: Surface + Identity + Clone,
{
    pub fn new(context_kind: impl Into<String>) -> Self {
        Self {
            context_kind: context_kind.into(),
            contexts: ResourceMemoizer::new(),
        }
    }

    pub fn context_kind(&self) -> &str {
        &self.context_kind
    }

    /// Returns the drawing context of `surface`, or nothing when there is no surface.
    pub fn acquire(&mut self, surface: Option<&S>) -> BootstrapResult<Option<S::Context>> {
        match surface {
            Some(surface) => self.acquire_for(surface).map(Some),
            None => Ok(None),
        }
    }

    /// Returns the drawing context of `surface`, requesting it on first use.
    ///
    /// Fails with `ContextUnavailable` when the surface cannot produce a context of the
    /// configured kind. The failure is not cached: the next call asks the surface again.
    pub fn acquire_for(&mut self, surface: &S) -> BootstrapResult<S::Context> {
        let context_kind = self.context_kind.as_str();

        self.contexts.get_or_derive(surface, |surface| {
            debug!(context_kind, "Requesting drawing context from surface");
            surface
                .get_context(context_kind)
                .ok_or_else(|| BootstrapError::context_unavailable(context_kind))
        })
    }

    pub fn is_acquired_for(&self, surface: &S) -> bool {
        self.contexts.is_cached_for(surface)
    }
}

impl<S> Default for ContextAcquirer<S>
where
    S: Surface + Identity + Clone,
{
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_KIND)
    }
}
