//! # glint windowing
//!
//! This is the base, abstract crate for windowing common types in glint. The `glint` crate
//! abstracts over the graphics API, but it doesn’t give you a way to create an OpenGL context.
//! Creating and managing contexts is tightly related to the type of application you target, so
//! several crates (`glint-*`) solve that problem. They all provide a different implementation for
//! a simple need: opening a window with an OpenGL context and managing its events.
//!
//! # What’s included
//!
//! - [`WindowDim`]: dimension of a window and its mode (windowed, fullscreen, fullscreen
//!   restricted).
//! - [`WindowOpt`]: hints to customize the window integration, such as its dimension or whether
//!   the cursor should be hidden or not.
//! - [`Surface`]: what a windowing backend must implement so that an application is completely
//!   agnostic of it.
//! - [`Application`]: the shell driving a surface, from startup to shutdown, through a handful of
//!   callbacks.

#![deny(missing_docs)]

use std::{error, fmt};

/// Dimension metrics.
///
///   - `Windowed { width, height }` opens in windowed mode with the wished resolution.
///   - `Fullscreen` opens in fullscreen mode by using the primary monitor resolution.
///   - `FullscreenRestricted { width, height }` is a mix between `Windowed` and `Fullscreen`. It
///     opens in fullscreen mode by using the wished resolution.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WindowDim {
  /// Windowed mode.
  Windowed {
    /// Width of the window.
    width: u32,
    /// Height of the window.
    height: u32,
  },
  /// Fullscreen mode (adapt to your screen).
  Fullscreen,
  /// Fullscreen mode with restricted viewport dimension.
  FullscreenRestricted {
    /// Width of the window.
    width: u32,
    /// Height of the window.
    height: u32,
  },
}

/// Cursor mode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CursorMode {
  /// The cursor is always visible.
  Visible,
  /// The cursor exists yet has been disabled.
  Invisible,
  /// The cursor is disabled.
  Disabled,
}

/// Different window options.
///
/// Feel free to look at the different methods available to tweak the options. You may want to start
/// with `default()` though.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WindowOpt {
  dim: WindowDim,
  cursor_mode: CursorMode,
  num_samples: Option<u32>,
}

impl Default for WindowOpt {
  /// Defaults:
  ///
  /// - `dim` set to a 960 × 540 window.
  /// - `cursor_mode` set to `CursorMode::Visible`.
  /// - `num_samples` set to `None`.
  fn default() -> Self {
    WindowOpt {
      dim: WindowDim::Windowed {
        width: 960,
        height: 540,
      },
      cursor_mode: CursorMode::Visible,
      num_samples: None,
    }
  }
}

impl WindowOpt {
  /// Set the dimension of the window.
  #[inline]
  pub fn set_dim(self, dim: WindowDim) -> Self {
    WindowOpt { dim, ..self }
  }

  /// Get the dimension of the window.
  #[inline]
  pub fn dim(&self) -> &WindowDim {
    &self.dim
  }

  /// Hide, unhide or disable the cursor. Default to `CursorMode::Visible`.
  #[inline]
  pub fn set_cursor_mode(self, mode: CursorMode) -> Self {
    WindowOpt {
      cursor_mode: mode,
      ..self
    }
  }

  /// Get the cursor mode.
  #[inline]
  pub fn cursor_mode(&self) -> CursorMode {
    self.cursor_mode
  }

  /// Set the number of samples to use for multisampling.
  ///
  /// Pass `None` to disable multisampling.
  #[inline]
  pub fn set_num_samples<S>(self, samples: S) -> Self
  where
    S: Into<Option<u32>>,
  {
    WindowOpt {
      num_samples: samples.into(),
      ..self
    }
  }

  /// Get the number of samples to use in multisampling, if any.
  #[inline]
  pub fn num_samples(&self) -> Option<u32> {
    self.num_samples
  }
}

/// Events a [`Surface`] reports to the [`Application`] driving it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SurfaceEvent {
  /// The framebuffer was resized.
  Resized {
    /// New width, in pixels.
    width: u32,
    /// New height, in pixels.
    height: u32,
  },
  /// The user asked to close the window.
  Closed,
}

/// Rendering surface.
///
/// A surface owns a window and the graphics context bound to it.
pub trait Surface {
  /// Graphics context handed to the application callbacks.
  type Context;

  /// Access the graphics context.
  fn context(&mut self) -> &mut Self::Context;

  /// Size of the surface’s framebuffer, in pixels.
  fn framebuffer_size(&self) -> [u32; 2];

  /// Collect the events that occurred since the last call, without blocking.
  fn poll_events(&mut self) -> Vec<SurfaceEvent>;

  /// Swap the back and front buffers.
  fn swap_buffers(&mut self);
}

/// Errors an [`Application`] can fail with.
#[non_exhaustive]
#[derive(Debug)]
pub enum ApplicationError<E> {
  /// The startup callback failed.
  Startup(E),
}

impl<E> fmt::Display for ApplicationError<E>
where
  E: fmt::Display,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      ApplicationError::Startup(ref e) => write!(f, "application startup failed: {}", e),
    }
  }
}

impl<E> error::Error for ApplicationError<E>
where
  E: error::Error + 'static,
{
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      ApplicationError::Startup(e) => Some(e),
    }
  }
}

type ResizeFn<T, C> = Box<dyn FnMut(&mut T, &mut C, u32, u32)>;
type DestroyFn<T, C> = Box<dyn FnOnce(Option<T>, &mut C)>;

/// Application shell.
///
/// An application owns a [`Surface`] and the state built by its startup callback. It dispatches
/// resizes, stops when the window gets closed and tears everything down in order: the destroy
/// callback runs exactly once, then the state is dropped, and only then the surface and its
/// context.
pub struct Application<S, T>
where
  S: Surface,
{
  // fields drop in declaration order; the state must go before the surface
  state: Option<T>,
  resize: ResizeFn<T, S::Context>,
  destroy: Option<DestroyFn<T, S::Context>>,
  surface: S,
}

impl<S, T> Application<S, T>
where
  S: Surface,
{
  /// Start an application on `surface`.
  ///
  /// `startup` builds the application state. If it fails, `destroy` is called with no state and the
  /// error is returned. Otherwise, `resize` is called right away with the current framebuffer size.
  ///
  /// `resize` receives the new framebuffer width and height. `destroy` receives the state (by value,
  /// so that GPU resources can be released while the context is still alive).
  pub fn create<E, Start, Resize, Destroy>(
    mut surface: S,
    startup: Start,
    mut resize: Resize,
    destroy: Destroy,
  ) -> Result<Self, ApplicationError<E>>
  where
    Start: FnOnce(&mut S::Context) -> Result<T, E>,
    Resize: FnMut(&mut T, &mut S::Context, u32, u32) + 'static,
    Destroy: FnOnce(Option<T>, &mut S::Context) + 'static,
  {
    let mut state = match startup(surface.context()) {
      Ok(state) => state,
      Err(e) => {
        log::debug!("startup failed; tearing down");
        destroy(None, surface.context());
        return Err(ApplicationError::Startup(e));
      }
    };

    let [width, height] = surface.framebuffer_size();
    resize(&mut state, surface.context(), width, height);

    Ok(Application {
      state: Some(state),
      resize: Box::new(resize),
      destroy: Some(Box::new(destroy)),
      surface,
    })
  }

  /// Run the main loop until `tick` returns `false` or the window is closed, then shut down.
  ///
  /// Every iteration calls `tick`, dispatches pending events and swaps buffers. Returns the process
  /// exit code.
  pub fn run<F>(mut self, mut tick: F) -> i32
  where
    F: FnMut(&mut T, &mut S::Context) -> bool,
  {
    let mut frames = 0u64;

    'app: while let Some(ref mut state) = self.state {
      if !tick(state, self.surface.context()) {
        break;
      }

      for event in self.surface.poll_events() {
        match event {
          SurfaceEvent::Resized { width, height } => {
            log::debug!("framebuffer resized to {}×{}", width, height);
            (self.resize)(state, self.surface.context(), width, height);
          }

          SurfaceEvent::Closed => {
            log::info!("window closed");
            break 'app;
          }
        }
      }

      self.surface.swap_buffers();
      frames += 1;
    }

    log::debug!("main loop exited after {} frames", frames);
    self.shutdown();

    0
  }

  fn shutdown(&mut self) {
    if let Some(destroy) = self.destroy.take() {
      destroy(self.state.take(), self.surface.context());
    }
  }
}

impl<S, T> Drop for Application<S, T>
where
  S: Surface,
{
  fn drop(&mut self) {
    self.shutdown();
  }
}
