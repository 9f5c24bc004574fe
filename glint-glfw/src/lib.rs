//! [GLFW](https://crates.io/crates/glfw) backend for glint.
//!
//! [`GlfwSurface`] opens a window with an OpenGL 3.3 core context, loads the OpenGL symbols and
//! bootstraps a [`GL33`] backend on it. It implements [`Surface`], so it can be driven by a
//! [`glint_windowing::Application`].

#![deny(missing_docs)]

use glfw::{self, Action, Context as _, Glfw, InitError, Key, Window, WindowEvent, WindowMode};
use glint::{context::GraphicsContext, registry::Registry};
pub use glint_gl::gl33::StateQueryError;
use glint_gl::GL33;
use glint_windowing::{CursorMode, Surface, SurfaceEvent, WindowDim, WindowOpt};
use std::{error, fmt, os::raw::c_void, sync::mpsc::Receiver};

/// Error that can be risen while creating a surface.
#[non_exhaustive]
#[derive(Debug)]
pub enum GlfwSurfaceError {
  /// Initialization of the surface went wrong.
  ///
  /// This variant exposes a **glfw** error for further information about what went wrong.
  InitError(InitError),

  /// A fullscreen window was asked for but there is no primary monitor.
  NoPrimaryMonitor,

  /// The primary monitor doesn’t report any video mode.
  NoVideoMode,

  /// GLFW failed to create the window or its OpenGL context.
  WindowCreationFailed,

  /// The graphics state is not available.
  ///
  /// This error is generated when the initialization code is called on a thread on which the
  /// graphics state has already been acquired.
  GraphicsStateError(StateQueryError),
}

impl fmt::Display for GlfwSurfaceError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      GlfwSurfaceError::InitError(ref e) => write!(f, "initialization error: {}", e),
      GlfwSurfaceError::NoPrimaryMonitor => f.write_str("no primary monitor"),
      GlfwSurfaceError::NoVideoMode => f.write_str("no primary monitor video mode"),
      GlfwSurfaceError::WindowCreationFailed => f.write_str("failed to create window"),
      GlfwSurfaceError::GraphicsStateError(ref e) => {
        write!(f, "failed to get graphics state: {}", e)
      }
    }
  }
}

impl From<InitError> for GlfwSurfaceError {
  fn from(e: InitError) -> Self {
    GlfwSurfaceError::InitError(e)
  }
}

impl error::Error for GlfwSurfaceError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      GlfwSurfaceError::InitError(e) => Some(e),
      GlfwSurfaceError::GraphicsStateError(e) => Some(e),
      _ => None,
    }
  }
}

/// GLFW surface.
///
/// This type is a helper that exposes two important concepts: the GLFW event receiver that you
/// can use to poll events and the [`GL33Context`], which allows you to perform the rendering part.
#[derive(Debug)]
pub struct GlfwSurface {
  /// Wrapped GLFW events queue.
  pub events_rx: Receiver<(f64, WindowEvent)>,

  /// Wrapped glint context.
  pub context: GL33Context,
}

impl GlfwSurface {
  /// Initialize GLFW and open a window titled `title` to provide a glint environment.
  pub fn new(title: &str, win_opt: WindowOpt) -> Result<Self, GlfwSurfaceError> {
    #[cfg(feature = "log-errors")]
    let error_cbk = glfw::LOG_ERRORS;
    #[cfg(not(feature = "log-errors"))]
    let error_cbk = glfw::FAIL_ON_ERRORS;

    let mut glfw = glfw::init(error_cbk)?;

    // OpenGL hints
    glfw.window_hint(glfw::WindowHint::OpenGlProfile(
      glfw::OpenGlProfileHint::Core,
    ));
    glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
    glfw.window_hint(glfw::WindowHint::ContextVersionMajor(3));
    glfw.window_hint(glfw::WindowHint::ContextVersionMinor(3));
    glfw.window_hint(glfw::WindowHint::Samples(win_opt.num_samples()));

    let (mut window, events_rx) = create_window(&mut glfw, title, *win_opt.dim())?;

    window.make_current();
    window.set_cursor_mode(glfw_cursor_mode(win_opt.cursor_mode()));
    window.set_framebuffer_size_polling(true);
    window.set_close_polling(true);
    window.set_key_polling(true);

    // init OpenGL
    gl::load_with(|s| window.get_proc_address(s) as *const c_void);

    let gl = GL33::new().map_err(GlfwSurfaceError::GraphicsStateError)?;

    let (w, h) = window.get_framebuffer_size();
    log::info!("opened “{}” ({}×{} framebuffer)", title, w, h);

    let context = GL33Context {
      registry: Registry::new(),
      gl,
      window,
    };
    let surface = GlfwSurface { events_rx, context };

    Ok(surface)
  }
}

impl Surface for GlfwSurface {
  type Context = GL33Context;

  fn context(&mut self) -> &mut Self::Context {
    &mut self.context
  }

  fn framebuffer_size(&self) -> [u32; 2] {
    let (w, h) = self.context.window.get_framebuffer_size();
    [clamp_size(w), clamp_size(h)]
  }

  fn poll_events(&mut self) -> Vec<SurfaceEvent> {
    self.context.window.glfw.poll_events();

    glfw::flush_messages(&self.events_rx)
      .filter_map(|(_, event)| adapt_event(event))
      .collect()
  }

  fn swap_buffers(&mut self) {
    self.context.window.swap_buffers();
  }
}

/// glint OpenGL 3.3 context.
///
/// This type also re-exports the GLFW window, if you need access to it.
#[derive(Debug)]
pub struct GL33Context {
  // fields drop in declaration order: shared GPU resources, then the backend, then the window
  // holding the OpenGL context
  registry: Registry<GL33>,

  /// OpenGL 3.3 state.
  gl: GL33,

  /// Wrapped GLFW window.
  pub window: Window,
}

unsafe impl GraphicsContext for GL33Context {
  type Backend = GL33;

  fn backend(&mut self) -> &mut Self::Backend {
    &mut self.gl
  }

  fn registry(&mut self) -> &mut Registry<Self::Backend> {
    &mut self.registry
  }
}

fn create_window(
  glfw: &mut Glfw,
  title: &str,
  dim: WindowDim,
) -> Result<(Window, Receiver<(f64, WindowEvent)>), GlfwSurfaceError> {
  match dim {
    WindowDim::Windowed { width, height } => glfw
      .create_window(width, height, title, WindowMode::Windowed)
      .ok_or(GlfwSurfaceError::WindowCreationFailed),

    WindowDim::Fullscreen => glfw.with_primary_monitor(|glfw, monitor| {
      let monitor = monitor.ok_or(GlfwSurfaceError::NoPrimaryMonitor)?;
      let vmode = monitor
        .get_video_mode()
        .ok_or(GlfwSurfaceError::NoVideoMode)?;
      let (w, h) = (vmode.width, vmode.height);

      glfw
        .create_window(w, h, title, WindowMode::FullScreen(monitor))
        .ok_or(GlfwSurfaceError::WindowCreationFailed)
    }),

    WindowDim::FullscreenRestricted { width, height } => {
      glfw.with_primary_monitor(|glfw, monitor| {
        let monitor = monitor.ok_or(GlfwSurfaceError::NoPrimaryMonitor)?;

        glfw
          .create_window(width, height, title, WindowMode::FullScreen(monitor))
          .ok_or(GlfwSurfaceError::WindowCreationFailed)
      })
    }
  }
}

fn glfw_cursor_mode(mode: CursorMode) -> glfw::CursorMode {
  match mode {
    CursorMode::Visible => glfw::CursorMode::Normal,
    CursorMode::Invisible => glfw::CursorMode::Hidden,
    CursorMode::Disabled => glfw::CursorMode::Disabled,
  }
}

fn adapt_event(event: WindowEvent) -> Option<SurfaceEvent> {
  match event {
    WindowEvent::Close | WindowEvent::Key(Key::Escape, _, Action::Release, _) => {
      Some(SurfaceEvent::Closed)
    }

    WindowEvent::FramebufferSize(width, height) => Some(SurfaceEvent::Resized {
      width: clamp_size(width),
      height: clamp_size(height),
    }),

    _ => None,
  }
}

fn clamp_size(x: i32) -> u32 {
  x.max(0) as u32
}

#[cfg(test)]
mod tests {
  use super::*;
  use glfw::Modifiers;

  #[test]
  fn framebuffer_resize() {
    assert_eq!(
      adapt_event(WindowEvent::FramebufferSize(1280, 720)),
      Some(SurfaceEvent::Resized {
        width: 1280,
        height: 720
      })
    );

    // minimized windows on some platforms
    assert_eq!(
      adapt_event(WindowEvent::FramebufferSize(-1, 0)),
      Some(SurfaceEvent::Resized {
        width: 0,
        height: 0
      })
    );
  }

  #[test]
  fn close_and_escape_quit() {
    assert_eq!(adapt_event(WindowEvent::Close), Some(SurfaceEvent::Closed));
    assert_eq!(
      adapt_event(WindowEvent::Key(
        Key::Escape,
        0,
        Action::Release,
        Modifiers::empty()
      )),
      Some(SurfaceEvent::Closed)
    );
    assert_eq!(
      adapt_event(WindowEvent::Key(
        Key::Escape,
        0,
        Action::Press,
        Modifiers::empty()
      )),
      None
    );
  }

  #[test]
  fn other_events_are_ignored() {
    assert_eq!(adapt_event(WindowEvent::Focus(true)), None);
    assert_eq!(adapt_event(WindowEvent::Pos(10, 20)), None);
  }

  #[test]
  fn cursor_modes() {
    assert_eq!(
      glfw_cursor_mode(CursorMode::Visible),
      glfw::CursorMode::Normal
    );
    assert_eq!(
      glfw_cursor_mode(CursorMode::Invisible),
      glfw::CursorMode::Hidden
    );
    assert_eq!(
      glfw_cursor_mode(CursorMode::Disabled),
      glfw::CursorMode::Disabled
    );
  }
}
