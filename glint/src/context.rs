//! Graphics context.
//!
//! A graphics context is an object that abstracts all the low-level operations that happen on a
//! graphics device. This crate doesn’t provide you with creating such contexts; windowing crates
//! do it for you.
//!
//! # On context and threads
//!
//!   - An object which type implements [`GraphicsContext`] must be `!Send` and `!Sync`. This
//!     enforces that it cannot be moved nor shared between threads.
//!   - You can only create a single context per thread.

use crate::{backend::shader::Shader, registry::Registry};

/// Class of graphics context.
///
/// A context gives access to its backend and to the [`Registry`] of resources shared by everything
/// rendered with it. Resources held by the registry must be released before the backend goes away,
/// which implementors typically ensure through field order.
pub unsafe trait GraphicsContext {
  /// Backend type.
  type Backend: Shader;

  /// Access the underlying backend.
  fn backend(&mut self) -> &mut Self::Backend;

  /// Access the resources shared across this context.
  fn registry(&mut self) -> &mut Registry<Self::Backend>;
}
