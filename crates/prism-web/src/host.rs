use prism_bootstrap::{BootstrapConfig, BootstrapError, BootstrapInputs, Dimensions, ErrorSink, Identity, RuntimeBootstrap};
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::error::PrismError;
use crate::module::WebModule;
use crate::surface::CanvasSurface;

/// JavaScript error callback, compared with `Object.is` semantics.
#[derive(Clone, Debug)]
pub(crate) struct JsErrorCallback(js_sys::Function);

impl Identity for JsErrorCallback {
    fn is_same(&self, other: &Self) -> bool {
        let this: &JsValue = self.0.as_ref();
        let other: &JsValue = other.0.as_ref();
        js_sys::Object::is(this, other)
    }
}

impl ErrorSink for JsErrorCallback {
    fn report(&self, error: BootstrapError) {
        let error = JsValue::from(PrismError::from(error));

        if let Err(e) = self.0.call1(&JsValue::NULL, &error) {
            error!(error = ?e, "Error callback threw");
        }
    }
}

/// Bootstraps the WebGL runtime against a canvas, once per change of its inputs.
#[wasm_bindgen]
pub struct RuntimeHost(RuntimeBootstrap<WebModule, CanvasSurface, JsErrorCallback>);

#[wasm_bindgen]
impl RuntimeHost {
    /// When `rebootstrap_on_resize` is set, a change of dimensions alone bootstraps a new runtime.
    #[wasm_bindgen(constructor)]
    pub fn new(rebootstrap_on_resize: Option<bool>) -> RuntimeHost {
        let config = BootstrapConfig::default().with_rebootstrap_on_resize(rebootstrap_on_resize.unwrap_or(false));
        Self(RuntimeBootstrap::new(config))
    }

    /// To be called every time the host renders.
    ///
    /// Never throws: failures are delivered to `on_error` as a `PrismError`.
    pub fn update(
        &mut self,
        canvas: Option<HtmlCanvasElement>,
        width: u32,
        height: u32,
        on_error: js_sys::Function,
        vert_shader: String,
        frag_shader: String,
    ) {
        self.0.update(BootstrapInputs {
            surface: canvas.map(CanvasSurface::new),
            // The module is the running wasm instance itself.
            module: Some(WebModule),
            dimensions: Dimensions::new(width, height),
            on_error: JsErrorCallback(on_error),
            vert_shader,
            frag_shader,
        });
    }

    /// Renders one more frame with the running runtime, if any.
    pub fn tick(&mut self) {
        self.0.tick();
    }

    /// One of `idle`, `attempting`, `running` or `failed`.
    pub fn state(&self) -> String {
        self.0.state().to_string()
    }

    pub fn attempts(&self) -> u32 {
        u32::try_from(self.0.attempts()).unwrap_or(u32::MAX)
    }
}
