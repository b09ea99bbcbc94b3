use prism_bootstrap::{Dimensions, Identity, LinkProgress, LinkStage};
use web_sys::{WebGlBuffer, WebGlProgram, WebGlRenderingContext, WebGlShader};

use crate::error::RenderError;
use crate::gl::{self, ShaderKind};

const TRIANGLE: [f32; 9] = [-0.7, -0.7, 0.0, 0.7, -0.7, 0.0, 0.0, 0.7, 0.0];

/// This very WebAssembly module, seen as a runtime module.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct WebModule;

impl Identity for WebModule {
    fn is_same(&self, _: &Self) -> bool {
        // There is a single instance of the module per page.
        true
    }
}

impl prism_bootstrap::RuntimeModule for WebModule {
    type Context = WebGlRenderingContext;
    type Runtime = WebRuntime;
    type Builder = WebRuntimeBuilder;
    type Error = RenderError;

    fn setup_panic_hook(&self) {
        crate::set_panic_hook();
    }

    fn runtime_builder(&self) -> Result<Self::Builder, Self::Error> {
        Ok(WebRuntimeBuilder::new())
    }

    fn runtime(&self) -> Result<Self::Runtime, Self::Error> {
        // A runtime cannot draw anything without a linked context.
        Err(RenderError::ExpectedContext)
    }
}

#[derive(Debug, Default)]
pub(crate) struct WebRuntimeBuilder {
    progress: LinkProgress,
    gl: Option<WebGlRenderingContext>,
    vert_shader: Option<WebGlShader>,
    frag_shader: Option<WebGlShader>,
}

impl WebRuntimeBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn context(&self) -> Result<&WebGlRenderingContext, RenderError> {
        self.gl.as_ref().ok_or(RenderError::ExpectedContext)
    }

    fn compile(&mut self, stage: LinkStage, kind: ShaderKind, source: &str) -> Result<WebGlShader, RenderError> {
        self.progress.expect(stage)?;
        let shader = gl::compile_shader(self.context()?, kind, source)?;
        self.progress.record(stage)?;
        Ok(shader)
    }
}

impl prism_bootstrap::RuntimeBuilder for WebRuntimeBuilder {
    type Context = WebGlRenderingContext;
    type Runtime = WebRuntime;
    type Error = RenderError;

    fn link_webgl_context(&mut self, context: Self::Context) -> Result<(), Self::Error> {
        self.progress.record(LinkStage::Context)?;
        self.gl = Some(context);
        Ok(())
    }

    fn link_vert_shader(&mut self, source: &str) -> Result<(), Self::Error> {
        let shader = self.compile(LinkStage::VertexShader, ShaderKind::Vertex, source)?;
        self.vert_shader = Some(shader);
        Ok(())
    }

    fn link_frag_shader(&mut self, source: &str) -> Result<(), Self::Error> {
        let shader = self.compile(LinkStage::FragmentShader, ShaderKind::Fragment, source)?;
        self.frag_shader = Some(shader);
        Ok(())
    }

    fn debug_state(&self) {
        debug!(state = ?self, "Runtime builder state");
    }

    fn create_runtime(mut self) -> Result<Self::Runtime, Self::Error> {
        self.progress.ensure_complete()?;

        let gl = self.context()?.clone();
        let (Some(vert_shader), Some(frag_shader)) = (self.vert_shader.clone(), self.frag_shader.clone()) else {
            return Err(RenderError::ExpectedContext);
        };

        // Until the runtime exists, the shaders are deleted along with the builder.
        let program = gl::link_program(&gl, &vert_shader, &frag_shader)?;

        let buffer = match gl::upload_vertices(&gl, &TRIANGLE) {
            Ok(buffer) => buffer,
            Err(e) => {
                gl.delete_program(Some(&program));
                return Err(e);
            }
        };

        gl.use_program(Some(&program));

        self.vert_shader = None;
        self.frag_shader = None;

        Ok(WebRuntime {
            gl,
            program,
            vert_shader,
            frag_shader,
            buffer,
            vertex_count: 3,
        })
    }
}

impl Drop for WebRuntimeBuilder {
    fn drop(&mut self) {
        let Some(gl) = &self.gl else {
            return;
        };

        for shader in [&self.vert_shader, &self.frag_shader].into_iter().flatten() {
            gl.delete_shader(Some(shader));
        }
    }
}

#[derive(Debug)]
pub(crate) struct WebRuntime {
    gl: WebGlRenderingContext,
    program: WebGlProgram,
    vert_shader: WebGlShader,
    frag_shader: WebGlShader,
    buffer: WebGlBuffer,
    vertex_count: i32,
}

impl WebRuntime {
    /// Sets the viewport to cover `dimensions`, in canvas pixels.
    pub(crate) fn resize(&mut self, dimensions: Dimensions) {
        let width = i32::try_from(dimensions.width).unwrap_or(i32::MAX);
        let height = i32::try_from(dimensions.height).unwrap_or(i32::MAX);

        debug!(width, height, "Resizing viewport");
        self.gl.viewport(0, 0, width, height);
    }
}

impl Drop for WebRuntime {
    fn drop(&mut self) {
        self.gl.delete_buffer(Some(&self.buffer));
        self.gl.delete_program(Some(&self.program));
        self.gl.delete_shader(Some(&self.vert_shader));
        self.gl.delete_shader(Some(&self.frag_shader));
    }
}

impl prism_bootstrap::Runtime for WebRuntime {
    type Error = RenderError;

    fn debug_state(&self) {
        debug!(state = ?self, "Runtime state");
    }

    fn tick(&self) -> Result<(), Self::Error> {
        if self.gl.is_context_lost() {
            return Err(RenderError::ContextLost);
        }

        self.gl.use_program(Some(&self.program));
        self.gl.bind_buffer(WebGlRenderingContext::ARRAY_BUFFER, Some(&self.buffer));
        self.gl.clear_color(0.0, 0.0, 0.0, 1.0);
        self.gl.clear(WebGlRenderingContext::COLOR_BUFFER_BIT);
        self.gl.draw_arrays(WebGlRenderingContext::TRIANGLES, 0, self.vertex_count);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use prism_bootstrap::{RuntimeBuilder as _, StageError};

    use super::*;

    // None of these reach the WebGL API: protocol checks run first, and a builder without
    // a context has nothing to delete when dropped.

    #[test]
    fn incomplete_builder_cannot_create_runtime() {
        let error = WebRuntimeBuilder::new().create_runtime().unwrap_err();

        assert_eq!(
            error,
            RenderError::Stage(StageError::Incomplete {
                missing: LinkStage::Context
            })
        );
    }

    #[test]
    fn shader_before_context_is_rejected() {
        let mut builder = WebRuntimeBuilder::new();

        let error = builder.link_frag_shader("void main(){}").unwrap_err();

        assert_eq!(
            error,
            RenderError::Stage(StageError::OutOfOrder {
                expected: LinkStage::Context,
                found: LinkStage::FragmentShader,
            })
        );
        assert!(builder.frag_shader.is_none());
    }
}
