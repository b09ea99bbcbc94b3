use core::fmt;
use std::rc::Rc;

use crate::builder::StagedBuilder;
use crate::config::BootstrapConfig;
use crate::error::{BootstrapError, BootstrapResult};
use crate::identity::Identity;
use crate::module::{Runtime as _, RuntimeModule};
use crate::panic::catch_panic;
use crate::surface::{ContextAcquirer, Surface};

/// Display size, as provided by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Receives the error of a failed bootstrap attempt.
pub trait ErrorSink: Identity + Clone {
    fn report(&self, error: BootstrapError);
}

impl<F> ErrorSink for Rc<F>
where
    F: Fn(BootstrapError) + ?Sized,
{
    fn report(&self, error: BootstrapError) {
        (**self)(error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    /// Module or surface absent, nothing to do.
    Idle,
    /// An attempt is in progress.
    Attempting,
    /// The last attempt built a runtime and ran its first tick.
    Running,
    /// The last attempt failed and the error was reported.
    Failed,
}

impl fmt::Display for BootstrapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BootstrapState::Idle => "idle",
            BootstrapState::Attempting => "attempting",
            BootstrapState::Running => "running",
            BootstrapState::Failed => "failed",
        };

        f.write_str(name)
    }
}

/// Everything a bootstrap attempt is derived from.
#[derive(Debug, Clone)]
pub struct BootstrapInputs<M, S, E> {
    pub surface: Option<S>,
    pub module: Option<M>,
    pub dimensions: Dimensions,
    pub on_error: E,
    pub vert_shader: String,
    pub frag_shader: String,
}

/// The triggering inputs of the last attempt.
///
/// Dimensions are only part of the snapshot when a resize is configured to re-run the
/// bootstrap.
#[derive(Debug)]
struct DependencySnapshot<M, S, E> {
    module: Option<M>,
    surface: Option<S>,
    on_error: E,
    vert_shader: String,
    frag_shader: String,
    dimensions: Option<Dimensions>,
}

impl<M, S, E> DependencySnapshot<M, S, E> {
    fn capture(inputs: BootstrapInputs<M, S, E>, track_dimensions: bool) -> Self {
        Self {
            module: inputs.module,
            surface: inputs.surface,
            on_error: inputs.on_error,
            vert_shader: inputs.vert_shader,
            frag_shader: inputs.frag_shader,
            dimensions: track_dimensions.then_some(inputs.dimensions),
        }
    }
}

impl<M, S, E> Identity for DependencySnapshot<M, S, E>
where
    M: Identity,
    S: Identity,
    E: Identity,
{
    fn is_same(&self, other: &Self) -> bool {
        self.on_error.is_same(&other.on_error)
            && self.frag_shader.is_same(&other.frag_shader)
            && self.vert_shader.is_same(&other.vert_shader)
            && self.surface.is_same(&other.surface)
            && self.module.is_same(&other.module)
            && self.dimensions == other.dimensions
    }
}

/// Bootstraps a runtime against a surface, for one mounted instance.
///
/// Call [`RuntimeBootstrap::update`] every time the host schedules an update. A new attempt
/// starts only when one of the triggering inputs changed identity since the previous call.
/// The runtime built by a superseded attempt is dropped, no teardown is performed.
pub struct RuntimeBootstrap<M, S, E>
where
    M: RuntimeModule,
    S: Surface,
{
    config: BootstrapConfig,
    acquirer: ContextAcquirer<S>,
    snapshot: Option<DependencySnapshot<M, S, E>>,
    state: BootstrapState,
    runtime: Option<M::Runtime>,
    dimensions: Dimensions,
    attempts: u64,
}

impl<M, S, E> RuntimeBootstrap<M, S, E>
where
    M: RuntimeModule + Identity + Clone,
    S: Surface<Context = M::Context> + Identity + Clone,
    E: ErrorSink,
{
    pub fn new(config: BootstrapConfig) -> Self {
        let acquirer = ContextAcquirer::new(config.context_kind());

        Self {
            config,
            acquirer,
            snapshot: None,
            state: BootstrapState::Idle,
            runtime: None,
            dimensions: Dimensions::default(),
            attempts: 0,
        }
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    pub fn state(&self) -> BootstrapState {
        self.state
    }

    /// Runtime built by the last successful attempt.
    pub fn runtime(&self) -> Option<&M::Runtime> {
        self.runtime.as_ref()
    }

    /// Latest dimensions received from the host.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Number of attempts started so far.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn acquirer(&self) -> &ContextAcquirer<S> {
        &self.acquirer
    }

    /// Feeds the current inputs, starting a new attempt when they changed.
    pub fn update(&mut self, inputs: BootstrapInputs<M, S, E>) {
        self.dimensions = inputs.dimensions;

        let snapshot = DependencySnapshot::capture(inputs, self.config.rebootstrap_on_resize());

        if self
            .snapshot
            .as_ref()
            .is_some_and(|previous| previous.is_same(&snapshot))
        {
            trace!("Bootstrap dependencies unchanged");
            return;
        }

        self.run(&snapshot);
        self.snapshot = Some(snapshot);
    }

    /// Runs one more iteration of the running runtime.
    ///
    /// Does nothing unless the last attempt succeeded. A failure is reported to the error
    /// sink of the last attempt, and the runtime is dropped.
    pub fn tick(&mut self) {
        let Some(runtime) = self.runtime.as_ref() else {
            return;
        };

        let result = catch_panic("tick runtime", || {
            runtime.tick().map_err(|e| runtime_panic_err!("tick runtime", e))
        });

        if let Err(error) = result {
            self.fail(error);
        }
    }

    fn run(&mut self, snapshot: &DependencySnapshot<M, S, E>) {
        // Whatever the previous attempt built is superseded.
        self.runtime = None;

        let (Some(module), Some(surface)) = (&snapshot.module, &snapshot.surface) else {
            debug!(
                has_module = snapshot.module.is_some(),
                has_surface = snapshot.surface.is_some(),
                "Bootstrap preconditions not met, staying idle"
            );
            self.state = BootstrapState::Idle;
            return;
        };

        self.state = BootstrapState::Attempting;
        self.attempts += 1;

        info!(attempt = self.attempts, "Bootstrapping runtime");

        let acquirer = &mut self.acquirer;
        let config = &self.config;

        let result = catch_panic("bootstrap runtime", || {
            attempt(
                acquirer,
                config,
                module,
                surface,
                &snapshot.vert_shader,
                &snapshot.frag_shader,
            )
        });

        match result {
            Ok(runtime) => {
                info!(attempt = self.attempts, "Runtime is running");
                self.runtime = Some(runtime);
                self.state = BootstrapState::Running;
            }
            Err(error) => {
                self.state = BootstrapState::Failed;
                warn!(attempt = self.attempts, error = %error.report(), "Bootstrap attempt failed");
                snapshot.on_error.report(error);
            }
        }
    }

    fn fail(&mut self, error: BootstrapError) {
        self.runtime = None;
        self.state = BootstrapState::Failed;

        warn!(error = %error.report(), "Runtime failed");

        if let Some(snapshot) = &self.snapshot {
            snapshot.on_error.report(error);
        }
    }
}

impl<M, S, E> fmt::Debug for RuntimeBootstrap<M, S, E>
where
    M: RuntimeModule,
    S: Surface,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeBootstrap")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("dimensions", &self.dimensions)
            .field("attempts", &self.attempts)
            .finish_non_exhaustive()
    }
}

/// One bootstrap attempt, from the panic hook to the first tick.
fn attempt<M, S>(
    acquirer: &mut ContextAcquirer<S>,
    config: &BootstrapConfig,
    module: &M,
    surface: &S,
    vert_shader: &str,
    frag_shader: &str,
) -> BootstrapResult<M::Runtime>
where
    M: RuntimeModule,
    S: Surface<Context = M::Context> + Identity + Clone,
{
    module.setup_panic_hook();

    let builder = module
        .runtime_builder()
        .map_err(|e| construction_err!("create runtime builder", e))?;

    let context = acquirer.acquire_for(surface)?;

    let builder = StagedBuilder::new(builder)
        .link_context(context)?
        .link_vertex_shader(vert_shader)?
        .link_fragment_shader(frag_shader)?;

    if config.debug_dumps() {
        builder.debug_state();
    }

    let runtime = builder.create_runtime()?;

    if config.debug_dumps() {
        runtime.debug_state();
    }

    runtime.tick().map_err(|e| runtime_panic_err!("tick runtime", e))?;

    Ok(runtime)
}
