use prism_bootstrap::{Identity, Surface};
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{HtmlCanvasElement, WebGlRenderingContext};

/// Browser canvas, compared with `Object.is` semantics.
#[derive(Clone, Debug)]
pub(crate) struct CanvasSurface(HtmlCanvasElement);

impl CanvasSurface {
    pub(crate) fn new(canvas: HtmlCanvasElement) -> Self {
        Self(canvas)
    }
}

impl Identity for CanvasSurface {
    fn is_same(&self, other: &Self) -> bool {
        let this: &JsValue = self.0.as_ref();
        let other: &JsValue = other.0.as_ref();
        js_sys::Object::is(this, other)
    }
}

impl Surface for CanvasSurface {
    type Context = WebGlRenderingContext;

    fn get_context(&self, kind: &str) -> Option<Self::Context> {
        match self.0.get_context(kind) {
            Ok(Some(context)) => context.dyn_into::<WebGlRenderingContext>().ok(),
            Ok(None) => None,
            Err(error) => {
                warn!(kind, ?error, "Canvas refused to provide a context");
                None
            }
        }
    }
}
