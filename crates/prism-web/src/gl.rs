use web_sys::{WebGlBuffer, WebGlProgram, WebGlRenderingContext as Gl, WebGlShader};

use crate::error::RenderError;

/// Index of the `position` vertex attribute.
const POSITION_ATTRIBUTE: u32 = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    fn constant(self) -> u32 {
        match self {
            ShaderKind::Vertex => Gl::VERTEX_SHADER,
            ShaderKind::Fragment => Gl::FRAGMENT_SHADER,
        }
    }
}

pub(crate) fn compile_shader(gl: &Gl, kind: ShaderKind, source: &str) -> Result<WebGlShader, RenderError> {
    let shader = gl.create_shader(kind.constant()).ok_or(RenderError::CannotCreateShader)?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let did_compile = gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);

    if did_compile {
        Ok(shader)
    } else {
        let reason = gl.get_shader_info_log(&shader);
        gl.delete_shader(Some(&shader));
        Err(RenderError::FailedToCompileShader(reason))
    }
}

pub(crate) fn link_program(
    gl: &Gl,
    vert_shader: &WebGlShader,
    frag_shader: &WebGlShader,
) -> Result<WebGlProgram, RenderError> {
    let program = gl.create_program().ok_or(RenderError::CannotCreateProgram)?;

    gl.attach_shader(&program, vert_shader);
    gl.attach_shader(&program, frag_shader);
    gl.bind_attrib_location(&program, POSITION_ATTRIBUTE, "position");
    gl.link_program(&program);

    let did_link = gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);

    if did_link {
        Ok(program)
    } else {
        let reason = gl.get_program_info_log(&program);
        gl.delete_program(Some(&program));
        Err(RenderError::FailedToLinkProgram(reason))
    }
}

/// Uploads `vertices` (three floats per vertex) into a new array buffer bound to the
/// `position` attribute.
pub(crate) fn upload_vertices(gl: &Gl, vertices: &[f32]) -> Result<WebGlBuffer, RenderError> {
    let buffer = gl.create_buffer().ok_or(RenderError::FailedToCreateBuffer)?;

    // Copied into a JS-owned array, so later wasm memory growth cannot detach it.
    let data = js_sys::Float32Array::from(vertices);

    gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&buffer));
    gl.buffer_data_with_array_buffer_view(Gl::ARRAY_BUFFER, &data, Gl::STATIC_DRAW);
    gl.vertex_attrib_pointer_with_i32(POSITION_ATTRIBUTE, 3, Gl::FLOAT, false, 0, 0);
    gl.enable_vertex_attrib_array(POSITION_ATTRIBUTE);

    Ok(buffer)
}
