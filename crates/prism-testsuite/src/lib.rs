//! Recording mock collaborators for the bootstrap sequence.
//!
//! Every call made on a mock module, builder, runtime or surface is appended to a shared
//! [`CallLog`], so tests can assert on the exact order of operations.

// No need to be as strict as in production libraries
#![allow(clippy::panic)]

use core::cell::{Cell, RefCell};
use core::fmt;
use std::rc::Rc;

use prism_bootstrap::{BootstrapError, BootstrapInputs, Dimensions, RuntimeBootstrap};

pub const VALID_SHADER: &str = "void main(){}";
pub const GARBAGE_SHADER: &str = "garbage";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SetupPanicHook,
    NewBuilder,
    GetContext { surface: u32, kind: String },
    LinkContext { surface: u32, serial: u32 },
    LinkVertShader(String),
    LinkFragShader(String),
    BuilderDebugState,
    CreateRuntime,
    RuntimeDebugState { runtime: u32 },
    Tick { runtime: u32 },
    DirectRuntime,
}

#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.0.borrow().iter().filter(|call| predicate(call)).count()
    }

    pub fn ticks(&self) -> usize {
        self.count(|call| matches!(call, Call::Tick { .. }))
    }

    pub fn builders(&self) -> usize {
        self.count(|call| matches!(call, Call::NewBuilder))
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockError(pub String);

impl fmt::Display for MockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for MockError {}

/// Context handed out by [`MockSurface`]. `serial` counts the contexts created by a surface.
#[derive(Debug, PartialEq, Eq)]
pub struct MockContext {
    pub surface: u32,
    pub serial: u32,
}

#[derive(Debug)]
pub struct MockSurface {
    id: u32,
    log: CallLog,
    supports_webgl: Cell<bool>,
    contexts_created: Cell<u32>,
}

impl MockSurface {
    pub fn new(id: u32, log: &CallLog) -> Rc<Self> {
        Rc::new(Self {
            id,
            log: log.clone(),
            supports_webgl: Cell::new(true),
            contexts_created: Cell::new(0),
        })
    }

    /// A surface refusing to provide any context.
    pub fn without_webgl(id: u32, log: &CallLog) -> Rc<Self> {
        let surface = Self::new(id, log);
        surface.supports_webgl.set(false);
        surface
    }

    pub fn set_supports_webgl(&self, supports_webgl: bool) {
        self.supports_webgl.set(supports_webgl);
    }

    pub fn contexts_created(&self) -> u32 {
        self.contexts_created.get()
    }
}

impl prism_bootstrap::Surface for MockSurface {
    type Context = Rc<MockContext>;

    fn get_context(&self, kind: &str) -> Option<Self::Context> {
        self.log.push(Call::GetContext {
            surface: self.id,
            kind: kind.to_owned(),
        });

        if kind != "webgl" || !self.supports_webgl.get() {
            return None;
        }

        let serial = self.contexts_created.get() + 1;
        self.contexts_created.set(serial);

        Some(Rc::new(MockContext {
            surface: self.id,
            serial,
        }))
    }
}

/// Failures to inject in the collaborators created by a [`MockModule`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Faults {
    pub builder: bool,
    pub construction: bool,
    pub tick_error: bool,
    pub tick_panic: bool,
}

#[derive(Debug)]
pub struct MockModule {
    log: CallLog,
    faults: Faults,
    runtimes: Rc<Cell<u32>>,
}

impl MockModule {
    pub fn new(log: &CallLog) -> Rc<Self> {
        Self::with_faults(log, Faults::default())
    }

    pub fn with_faults(log: &CallLog, faults: Faults) -> Rc<Self> {
        Rc::new(Self {
            log: log.clone(),
            faults,
            runtimes: Rc::new(Cell::new(0)),
        })
    }

    fn next_runtime(&self) -> MockRuntime {
        let id = self.runtimes.get() + 1;
        self.runtimes.set(id);

        MockRuntime {
            id,
            log: self.log.clone(),
            faults: self.faults,
        }
    }
}

impl prism_bootstrap::RuntimeModule for MockModule {
    type Context = Rc<MockContext>;
    type Runtime = MockRuntime;
    type Builder = MockBuilder;
    type Error = MockError;

    fn setup_panic_hook(&self) {
        self.log.push(Call::SetupPanicHook);
    }

    fn runtime_builder(&self) -> Result<Self::Builder, Self::Error> {
        self.log.push(Call::NewBuilder);

        if self.faults.builder {
            return Err(MockError("module is not instantiated".to_owned()));
        }

        Ok(MockBuilder {
            log: self.log.clone(),
            faults: self.faults,
            runtimes: Rc::clone(&self.runtimes),
            context: None,
            vert_shader: None,
            frag_shader: None,
        })
    }

    fn runtime(&self) -> Result<Self::Runtime, Self::Error> {
        self.log.push(Call::DirectRuntime);

        if self.faults.construction {
            return Err(MockError("cannot create runtime".to_owned()));
        }

        Ok(self.next_runtime())
    }
}

#[derive(Debug)]
pub struct MockBuilder {
    log: CallLog,
    faults: Faults,
    runtimes: Rc<Cell<u32>>,
    context: Option<Rc<MockContext>>,
    vert_shader: Option<String>,
    frag_shader: Option<String>,
}

/// Shaders "compile" when they declare a `main` function.
fn compile(source: &str) -> Result<String, MockError> {
    if source.contains("main") {
        Ok(source.to_owned())
    } else {
        Err(MockError(format!("failed to compile shader: `{source}`")))
    }
}

impl prism_bootstrap::RuntimeBuilder for MockBuilder {
    type Context = Rc<MockContext>;
    type Runtime = MockRuntime;
    type Error = MockError;

    fn link_webgl_context(&mut self, context: Self::Context) -> Result<(), Self::Error> {
        self.log.push(Call::LinkContext {
            surface: context.surface,
            serial: context.serial,
        });

        if self.context.is_some() {
            return Err(MockError("context already linked".to_owned()));
        }

        self.context = Some(context);
        Ok(())
    }

    fn link_vert_shader(&mut self, source: &str) -> Result<(), Self::Error> {
        self.log.push(Call::LinkVertShader(source.to_owned()));
        self.vert_shader = Some(compile(source)?);
        Ok(())
    }

    fn link_frag_shader(&mut self, source: &str) -> Result<(), Self::Error> {
        self.log.push(Call::LinkFragShader(source.to_owned()));
        self.frag_shader = Some(compile(source)?);
        Ok(())
    }

    fn debug_state(&self) {
        self.log.push(Call::BuilderDebugState);
    }

    fn create_runtime(self) -> Result<Self::Runtime, Self::Error> {
        self.log.push(Call::CreateRuntime);

        if self.faults.construction {
            return Err(MockError("failed to link program".to_owned()));
        }

        if self.context.is_none() || self.vert_shader.is_none() || self.frag_shader.is_none() {
            return Err(MockError("missing link".to_owned()));
        }

        let id = self.runtimes.get() + 1;
        self.runtimes.set(id);

        Ok(MockRuntime {
            id,
            log: self.log,
            faults: self.faults,
        })
    }
}

#[derive(Debug)]
pub struct MockRuntime {
    id: u32,
    log: CallLog,
    faults: Faults,
}

impl MockRuntime {
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl prism_bootstrap::Runtime for MockRuntime {
    type Error = MockError;

    fn debug_state(&self) {
        self.log.push(Call::RuntimeDebugState { runtime: self.id });
    }

    fn tick(&self) -> Result<(), Self::Error> {
        self.log.push(Call::Tick { runtime: self.id });

        if self.faults.tick_panic {
            panic!("gpu fault in runtime {}", self.id);
        }

        if self.faults.tick_error {
            return Err(MockError("context lost".to_owned()));
        }

        Ok(())
    }
}

pub type ErrorCallback = Rc<dyn Fn(BootstrapError)>;

pub type MockBootstrap = RuntimeBootstrap<Rc<MockModule>, Rc<MockSurface>, ErrorCallback>;

/// Error callback storing every error it receives.
pub fn error_recorder() -> (ErrorCallback, Rc<RefCell<Vec<BootstrapError>>>) {
    let errors = Rc::new(RefCell::new(Vec::<BootstrapError>::new()));

    let callback: ErrorCallback = {
        let errors = Rc::clone(&errors);
        Rc::new(move |error: BootstrapError| errors.borrow_mut().push(error))
    };

    (callback, errors)
}

pub fn inputs(
    module: Option<&Rc<MockModule>>,
    surface: Option<&Rc<MockSurface>>,
    on_error: &ErrorCallback,
    vert_shader: &str,
    frag_shader: &str,
) -> BootstrapInputs<Rc<MockModule>, Rc<MockSurface>, ErrorCallback> {
    BootstrapInputs {
        surface: surface.map(Rc::clone),
        module: module.map(Rc::clone),
        dimensions: Dimensions::new(800, 600),
        on_error: Rc::clone(on_error),
        vert_shader: vert_shader.to_owned(),
        frag_shader: frag_shader.to_owned(),
    }
}
