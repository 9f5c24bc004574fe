//! Graphics state.

use gl::types::*;
use std::cell::RefCell;
use std::error;
use std::fmt;
use std::marker::PhantomData;

// TLS synchronization barrier for `GLState`.
thread_local!(static TLS_ACQUIRE_GFX_STATE: RefCell<Option<()>> = RefCell::new(Some(())));

// Take the graphics state token of the current thread. Succeeds once per thread.
fn acquire_thread_state() -> Result<(), StateQueryError> {
  TLS_ACQUIRE_GFX_STATE.with(|rc| {
    rc.borrow_mut()
      .take()
      .ok_or(StateQueryError::UnavailableGLState)
  })
}

/// Cached value.
///
/// A cached value is used to prevent issuing costy GPU commands if we know the target value is
/// already set to what the command tries to set. For instance, if you ask to clear with a given
/// color twice, the second request doesn’t reach the GPU.
///
/// Note: do not confuse [`Cached`] with [`Bind`]. The latter is for internal use only and is used
/// to either use the regular cache mechanism or override it to force a value to be written.
#[derive(Debug)]
struct Cached<T>(T)
where
  T: PartialEq;

impl<T> Cached<T>
where
  T: PartialEq,
{
  /// Cache a value.
  fn new(initial: T) -> Self {
    Cached(initial)
  }

  fn set(&mut self, value: T) {
    self.0 = value;
  }

  /// Check if the cached value is invalid regarding a value, i.e. if it differs from it.
  fn is_invalid(&self, new_val: &T) -> bool {
    self.0 != *new_val
  }
}

/// The graphics state.
///
/// This type represents the current state of a given graphics context. It acts as a forward-gate
/// to the few OpenGL bindings glint uses but adds a small cache layer over it to prevent from
/// issuing the same API call (with the same parameters).
#[derive(Debug)]
pub struct GLState {
  _a: PhantomData<*const ()>, // !Send and !Sync

  // viewport
  viewport: Cached<[GLint; 4]>,

  // clear buffers
  clear_color: Cached<[GLfloat; 4]>,

  // array buffer
  bound_array_buffer: GLuint,

  // vertex array
  bound_vertex_array: GLuint,

  // shader program
  current_program: GLuint,
}

impl GLState {
  /// Create a new `GLState`.
  ///
  /// > Note: keep in mind you can create only one per thread.
  pub(crate) fn new() -> Result<Self, StateQueryError> {
    acquire_thread_state()?;
    Self::get_from_context()
  }

  /// Get a `GLState` from the current OpenGL context.
  fn get_from_context() -> Result<Self, StateQueryError> {
    unsafe {
      let viewport = Cached::new(get_ctx_viewport()?);
      let clear_color = Cached::new(get_ctx_clear_color()?);
      let bound_vertex_array = get_ctx_bound_vertex_array()?;
      let current_program = get_ctx_current_program()?;

      Ok(GLState {
        _a: PhantomData,
        viewport,
        clear_color,
        bound_array_buffer: 0,
        bound_vertex_array,
        current_program,
      })
    }
  }

  /// Invalidate the currently in-use vertex array.
  pub fn invalidate_vertex_array(&mut self) {
    self.bound_vertex_array = 0;
  }

  /// Invalidate the currently in-use shader program.
  pub fn invalidate_shader_program(&mut self) {
    self.current_program = 0;
  }

  pub(crate) unsafe fn set_viewport(&mut self, viewport: [GLint; 4]) {
    if self.viewport.is_invalid(&viewport) {
      gl::Viewport(viewport[0], viewport[1], viewport[2], viewport[3]);
      self.viewport.set(viewport);
    }
  }

  pub(crate) unsafe fn set_clear_color(&mut self, clear_color: [GLfloat; 4]) {
    if self.clear_color.is_invalid(&clear_color) {
      gl::ClearColor(
        clear_color[0],
        clear_color[1],
        clear_color[2],
        clear_color[3],
      );
      self.clear_color.set(clear_color);
    }
  }

  pub(crate) unsafe fn bind_array_buffer(&mut self, handle: GLuint, bind: Bind) {
    if bind == Bind::Forced || self.bound_array_buffer != handle {
      gl::BindBuffer(gl::ARRAY_BUFFER, handle);
      self.bound_array_buffer = handle;
    }
  }

  pub(crate) unsafe fn unbind_buffer(&mut self, handle: GLuint) {
    if self.bound_array_buffer == handle {
      self.bind_array_buffer(0, Bind::Cached);
    }
  }

  pub(crate) unsafe fn bind_vertex_array(&mut self, handle: GLuint, bind: Bind) {
    if bind == Bind::Forced || self.bound_vertex_array != handle {
      gl::BindVertexArray(handle);
      self.bound_vertex_array = handle;
    }
  }

  pub(crate) unsafe fn unbind_vertex_array(&mut self) {
    self.bind_vertex_array(0, Bind::Cached)
  }

  pub(crate) unsafe fn use_program(&mut self, handle: GLuint) {
    if self.current_program != handle {
      gl::UseProgram(handle);
      self.current_program = handle;
    }
  }

  // A deleted program stays in use until another one replaces it; forget it so that a new program
  // reusing the same handle gets bound again.
  pub(crate) fn forget_program(&mut self, handle: GLuint) {
    if self.current_program == handle {
      self.invalidate_shader_program();
    }
  }

  pub(crate) fn forget_vertex_array(&mut self, handle: GLuint) {
    if self.bound_vertex_array == handle {
      self.invalidate_vertex_array();
    }
  }
}

/// Should the binding be cached or forced to the provided value?
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Bind {
  Forced,
  Cached,
}

/// An error that might happen when the context is queried.
#[non_exhaustive]
#[derive(Debug)]
pub enum StateQueryError {
  /// The [`GLState`] object is unavailable.
  ///
  /// That might occur if the current thread doesn’t support allocating a new graphics state. It
  /// might happen if you try to have more than one state on the same thread, for instance.
  UnavailableGLState,
}

impl fmt::Display for StateQueryError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StateQueryError::UnavailableGLState => write!(f, "unavailable graphics state"),
    }
  }
}

impl error::Error for StateQueryError {}

unsafe fn get_ctx_viewport() -> Result<[GLint; 4], StateQueryError> {
  let mut viewport = [0; 4];
  gl::GetIntegerv(gl::VIEWPORT, viewport.as_mut_ptr());
  Ok(viewport)
}

unsafe fn get_ctx_clear_color() -> Result<[GLfloat; 4], StateQueryError> {
  let mut color = [0.0; 4];
  gl::GetFloatv(gl::COLOR_CLEAR_VALUE, color.as_mut_ptr());
  Ok(color)
}

unsafe fn get_ctx_bound_vertex_array() -> Result<GLuint, StateQueryError> {
  let mut bound = 0 as GLint;
  gl::GetIntegerv(gl::VERTEX_ARRAY_BINDING, &mut bound);
  Ok(bound as GLuint)
}

unsafe fn get_ctx_current_program() -> Result<GLuint, StateQueryError> {
  let mut used = 0 as GLint;
  gl::GetIntegerv(gl::CURRENT_PROGRAM, &mut used);
  Ok(used as GLuint)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::thread;

  #[test]
  fn cached_value() {
    let mut cached = Cached::new([0, 0, 800, 600]);

    assert!(!cached.is_invalid(&[0, 0, 800, 600]));
    assert!(cached.is_invalid(&[0, 0, 1024, 768]));

    cached.set([0, 0, 1024, 768]);
    assert!(!cached.is_invalid(&[0, 0, 1024, 768]));
    assert!(cached.is_invalid(&[0, 0, 800, 600]));
  }

  #[test]
  fn one_state_per_thread() {
    // each test runs on its own thread, so the token is fresh here
    assert!(acquire_thread_state().is_ok());
    assert!(matches!(
      acquire_thread_state(),
      Err(StateQueryError::UnavailableGLState)
    ));

    let other = thread::spawn(|| acquire_thread_state().is_ok());
    assert!(other.join().unwrap());
  }
}
