//! Context-wide shared resources.
//!
//! Some GPU resources are meant to be built once and shared by everything rendering through the
//! same context. The [`Registry`] owns them:
//!
//! - it is created empty along with the context;
//! - a resource is created on first use and kept behind an [`Rc`] so that users share it;
//! - everything is released when the registry is [cleared](Registry::clear) or dropped with its
//!   context. A resource still in use elsewhere lives until its last user drops it.
//!
//! The only resource currently registered is the default shader program (see
//! [`ShaderProgram::compile_default`](crate::shader::ShaderProgram::compile_default)).

use std::{fmt, rc::Rc};

use crate::backend::shader::Shader;

/// Shared resources of a graphics context.
pub struct Registry<B>
where
  B: Shader,
{
  default_program: Option<Rc<B::ProgramRepr>>,
}

impl<B> Registry<B>
where
  B: Shader,
{
  /// Create an empty registry.
  pub fn new() -> Self {
    Registry {
      default_program: None,
    }
  }

  /// The memoized default program, if it was already compiled.
  pub fn default_program(&self) -> Option<Rc<B::ProgramRepr>> {
    self.default_program.clone()
  }

  pub(crate) fn set_default_program(&mut self, program: Rc<B::ProgramRepr>) {
    self.default_program = Some(program);
  }

  /// Drop every registered resource.
  pub fn clear(&mut self) {
    if self.default_program.take().is_some() {
      log::debug!("released default shader program");
    }
  }
}

impl<B> Default for Registry<B>
where
  B: Shader,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<B> fmt::Debug for Registry<B>
where
  B: Shader,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Registry")
      .field("default_program", &self.default_program.is_some())
      .finish()
  }
}
