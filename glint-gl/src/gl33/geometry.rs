//! OpenGL vertex arrays holding a single interleaved vertex buffer.

use crate::gl33::{
  state::{Bind, GLState},
  GL33,
};
use gl::types::*;
use glint::{
  backend::geometry::Geometry,
  geometry::{GeometryError, Mode},
  vertex::Vertex,
};
use std::{cell::RefCell, rc::Rc};

/// Wrapped OpenGL buffer.
///
/// Used to drop the buffer.
#[derive(Debug)]
struct BufferWrapper {
  handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl Drop for BufferWrapper {
  fn drop(&mut self) {
    unsafe {
      self.state.borrow_mut().unbind_buffer(self.handle);
      gl::DeleteBuffers(1, &self.handle);
    }
  }
}

/// A vertex array and the static vertex buffer it reads from.
///
/// Both are deleted on drop.
#[derive(Debug)]
pub struct VertexArray {
  vao: GLuint,
  // dropped after the vertex array
  buffer: BufferWrapper,
}

impl Drop for VertexArray {
  fn drop(&mut self) {
    self.buffer.state.borrow_mut().forget_vertex_array(self.vao);

    unsafe {
      gl::DeleteVertexArrays(1, &self.vao);
    }
  }
}

unsafe impl Geometry for GL33 {
  type GeometryRepr = VertexArray;

  unsafe fn new_geometry(
    &mut self,
    vertices: &[Vertex],
  ) -> Result<Self::GeometryRepr, GeometryError> {
    let vertex_nb = vertices.len();
    let bytes = buffer_size(vertex_nb).ok_or(GeometryError::TooManyVertices(vertex_nb))?;

    let mut gfx_st = self.state.borrow_mut();
    let mut vao: GLuint = 0;
    let mut handle: GLuint = 0;

    gl::GenVertexArrays(1, &mut vao);

    // force binding the vertex array so that previously bound vertex arrays (possibly the same
    // handle) don’t prevent us from binding here
    gfx_st.bind_vertex_array(vao, Bind::Forced);

    gl::GenBuffers(1, &mut handle);

    // force binding as it’s meaningful when a vao is bound
    gfx_st.bind_array_buffer(handle, Bind::Forced);

    gl::BufferData(
      gl::ARRAY_BUFFER,
      bytes,
      vertices.as_ptr() as _,
      gl::STATIC_DRAW,
    );

    log::trace!("vertex array {} with buffer {} ({} bytes)", vao, handle, bytes);

    Ok(VertexArray {
      vao,
      buffer: BufferWrapper {
        handle,
        state: self.state.clone(),
      },
    })
  }

  unsafe fn end_geometry(&mut self, _: &Self::GeometryRepr) {
    let mut gfx_st = self.state.borrow_mut();
    gfx_st.unbind_vertex_array();
    gfx_st.bind_array_buffer(0, Bind::Cached);
  }

  unsafe fn render(&mut self, geometry: &Self::GeometryRepr, mode: Mode, start: usize, count: usize) {
    // both fit since start + count never exceeds the vertex count checked at creation
    let first = start as GLint;
    let count = count as GLsizei;

    self
      .state
      .borrow_mut()
      .bind_vertex_array(geometry.vao, Bind::Cached);

    gl::DrawArrays(opengl_mode(mode), first, count);
  }

  unsafe fn unbind_geometry(&mut self) {
    self.state.borrow_mut().unbind_vertex_array();
  }
}

// Size in bytes of a buffer holding `vertex_nb` vertices, if OpenGL can address it.
fn buffer_size(vertex_nb: usize) -> Option<GLsizeiptr> {
  if GLsizei::try_from(vertex_nb).is_err() {
    return None;
  }

  vertex_nb
    .checked_mul(Vertex::STRIDE)
    .and_then(|bytes| GLsizeiptr::try_from(bytes).ok())
}

fn opengl_mode(mode: Mode) -> GLenum {
  match mode {
    Mode::Point => gl::POINTS,
    Mode::Line => gl::LINES,
    Mode::LineStrip => gl::LINE_STRIP,
    Mode::Triangle => gl::TRIANGLES,
    Mode::TriangleFan => gl::TRIANGLE_FAN,
    Mode::TriangleStrip => gl::TRIANGLE_STRIP,
  }
}
