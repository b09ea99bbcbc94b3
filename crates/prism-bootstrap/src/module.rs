use std::rc::Rc;

/// Handle to a compiled rendering runtime module.
///
/// The module is owned by the host: the bootstrap never creates or destroys it, it only asks
/// it for builders.
pub trait RuntimeModule {
    type Context;
    type Runtime: Runtime;
    type Builder: RuntimeBuilder<Context = Self::Context, Runtime = Self::Runtime>;
    type Error: std::error::Error + 'static;

    /// Installs the module panic hook. Must be safe to call more than once.
    fn setup_panic_hook(&self);

    fn runtime_builder(&self) -> Result<Self::Builder, Self::Error>;

    /// Alternate construction route, bypassing the builder.
    fn runtime(&self) -> Result<Self::Runtime, Self::Error>;
}

impl<T: RuntimeModule + ?Sized> RuntimeModule for Rc<T> {
    type Context = T::Context;
    type Runtime = T::Runtime;
    type Builder = T::Builder;
    type Error = T::Error;

    fn setup_panic_hook(&self) {
        T::setup_panic_hook(self)
    }

    fn runtime_builder(&self) -> Result<Self::Builder, Self::Error> {
        T::runtime_builder(self)
    }

    fn runtime(&self) -> Result<Self::Runtime, Self::Error> {
        T::runtime(self)
    }
}

/// Single-use object accumulating the dependencies of a runtime.
///
/// Each link must happen at most once, before `create_runtime`.
pub trait RuntimeBuilder {
    type Context;
    type Runtime: Runtime;
    type Error: std::error::Error + 'static;

    fn link_webgl_context(&mut self, context: Self::Context) -> Result<(), Self::Error>;

    fn link_vert_shader(&mut self, source: &str) -> Result<(), Self::Error>;

    fn link_frag_shader(&mut self, source: &str) -> Result<(), Self::Error>;

    /// Dumps the builder state for diagnostic purposes.
    fn debug_state(&self);

    fn create_runtime(self) -> Result<Self::Runtime, Self::Error>;
}

/// Live render loop.
pub trait Runtime {
    type Error: std::error::Error + 'static;

    /// Dumps the runtime state for diagnostic purposes.
    fn debug_state(&self);

    /// Runs one iteration of the render loop.
    fn tick(&self) -> Result<(), Self::Error>;
}
