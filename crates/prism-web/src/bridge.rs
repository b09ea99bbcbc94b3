//! JavaScript classes wrapping the runtime builder and the runtime.

use prism_bootstrap::{Dimensions, Runtime as _, RuntimeBuilder as _};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast as _;
use web_sys::WebGlRenderingContext;

use crate::error::{PrismError, PrismErrorKind, RenderError};
use crate::module::{WebRuntime, WebRuntimeBuilder};

#[wasm_bindgen]
pub struct RuntimeBuilder(Option<WebRuntimeBuilder>);

#[wasm_bindgen]
impl RuntimeBuilder {
    #[wasm_bindgen(constructor)]
    pub fn new() -> RuntimeBuilder {
        Self(Some(WebRuntimeBuilder::new()))
    }

    #[wasm_bindgen(js_name = "linkWebglContext")]
    pub fn link_webgl_context(&mut self, maybe_context: JsValue) -> Result<(), PrismError> {
        let context = maybe_context
            .dyn_into::<WebGlRenderingContext>()
            .map_err(|value| PrismError::from(RenderError::NotAWebGlContext(format!("{value:?}"))))?;

        self.inner()?
            .link_webgl_context(context)
            .map_err(|e| PrismError::from(e).with_kind(PrismErrorKind::Link))
    }

    #[wasm_bindgen(js_name = "linkVertShader")]
    pub fn link_vert_shader(&mut self, shader_source: &str) -> Result<(), PrismError> {
        self.inner()?
            .link_vert_shader(shader_source)
            .map_err(|e| PrismError::from(e).with_kind(PrismErrorKind::Link))
    }

    #[wasm_bindgen(js_name = "linkFragShader")]
    pub fn link_frag_shader(&mut self, shader_source: &str) -> Result<(), PrismError> {
        self.inner()?
            .link_frag_shader(shader_source)
            .map_err(|e| PrismError::from(e).with_kind(PrismErrorKind::Link))
    }

    #[wasm_bindgen(js_name = "debugState")]
    pub fn debug_state(&self) {
        match &self.0 {
            Some(builder) => builder.debug_state(),
            None => debug!("Runtime builder already consumed"),
        }
    }

    /// Consumes the builder. Any later call on it fails.
    #[wasm_bindgen(js_name = "createRuntime")]
    pub fn create_runtime(&mut self) -> Result<Runtime, PrismError> {
        let builder = self
            .0
            .take()
            .ok_or_else(|| PrismError::from(RenderError::BuilderConsumed))?;

        builder
            .create_runtime()
            .map(Runtime)
            .map_err(|e| PrismError::from(e).with_kind(PrismErrorKind::Construction))
    }

    fn inner(&mut self) -> Result<&mut WebRuntimeBuilder, PrismError> {
        self.0
            .as_mut()
            .ok_or_else(|| PrismError::from(RenderError::BuilderConsumed))
    }
}

#[wasm_bindgen]
pub struct Runtime(WebRuntime);

#[wasm_bindgen]
impl Runtime {
    pub fn tick(&self) -> Result<(), PrismError> {
        self.0
            .tick()
            .map_err(|e| PrismError::from(e).with_kind(PrismErrorKind::RuntimePanic))
    }

    #[wasm_bindgen(js_name = "debugState")]
    pub fn debug_state(&self) {
        self.0.debug_state();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.0.resize(Dimensions::new(width, height));
    }
}
