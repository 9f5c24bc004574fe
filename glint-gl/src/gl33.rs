//! OpenGL 3.3 backend.
//!
//! This module implements an OpenGL 3.3 backend for glint. The backend type is [`GL33`].

mod geometry;
mod shader;
mod state;

pub use self::geometry::VertexArray;
pub use self::shader::{Program, Stage};
pub use self::state::GLState;
pub use self::state::StateQueryError;
use gl::types::*;
use std::cell::RefCell;
use std::rc::Rc;

/// An OpenGL 3.3 backend.
///
/// This type is to be used as a glint backend type. It implements the whole backend API, plus a
/// few framebuffer helpers the backend API doesn’t cover.
#[derive(Debug)]
pub struct GL33 {
  pub(crate) state: Rc<RefCell<GLState>>,
}

impl GL33 {
  /// Create a new OpenGL 3.3 backend.
  ///
  /// An OpenGL context must be current on the calling thread and its function pointers loaded.
  /// Only one backend can exist per thread; trying to create a second one fails with
  /// [`StateQueryError::UnavailableGLState`].
  pub fn new() -> Result<Self, StateQueryError> {
    let state = GLState::new()?;
    log::debug!("acquired OpenGL 3.3 state: {:?}", state);

    Ok(GL33 {
      state: Rc::new(RefCell::new(state)),
    })
  }

  /// Set the color the color buffer is cleared with.
  pub fn set_clear_color(&mut self, color: [f32; 4]) {
    unsafe { self.state.borrow_mut().set_clear_color(color) };
  }

  /// Clear the color buffer of the default framebuffer.
  pub fn clear(&mut self) {
    unsafe { gl::Clear(gl::COLOR_BUFFER_BIT) };
  }

  /// Set the viewport to a `width` × `height` rectangle anchored at the lower-left corner.
  ///
  /// Dimensions that don’t fit a `GLsizei` are clamped.
  pub fn set_viewport(&mut self, width: u32, height: u32) {
    let viewport = [0, 0, to_glsizei(width), to_glsizei(height)];
    unsafe { self.state.borrow_mut().set_viewport(viewport) };
  }
}

fn to_glsizei(x: u32) -> GLsizei {
  GLsizei::try_from(x).unwrap_or(GLsizei::MAX)
}
