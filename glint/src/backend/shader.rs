//! Shader backend interface.
//!
//! This interface defines the low-level API shaders must implement to be usable.

use crate::{
  shader::{ProgramError, StageError, StageType, Uniform, UniformWarning, VertexAttribWarning},
  vertex::VertexAttribDesc,
};

/// Shader support.
///
/// Stages are compiled first, then linked into programs. Stage representations are dropped by the
/// caller once the program is linked (or once linking failed); backends must release the stage
/// objects on drop.
pub unsafe trait Shader {
  /// Backend representation of a shader stage.
  type StageRepr;

  /// Backend representation of a linked shader program.
  type ProgramRepr;

  /// Compile a new shader stage from its source.
  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError>;

  /// Link a vertex and a fragment stage into a program.
  ///
  /// On failure, the partially built program must be released before returning.
  unsafe fn new_program(
    &mut self,
    vertex: &Self::StageRepr,
    fragment: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError>;

  /// Raw handle of a program, as seen by the driver. Never `0` for a linked program.
  unsafe fn program_handle(program: &Self::ProgramRepr) -> u32;

  /// Look up a uniform by name.
  unsafe fn ask_uniform(program: &Self::ProgramRepr, name: &str)
    -> Result<Uniform, UniformWarning>;

  /// Make the program the current one.
  unsafe fn use_program(&mut self, program: &Self::ProgramRepr);

  /// Upload a column-major 4x4 matrix to a uniform of the current program.
  unsafe fn set_uniform_matrix(&mut self, uniform: &Uniform, matrix: &[[f32; 4]; 4]);

  /// Describe a vertex attribute of the program to the currently bound vertex array.
  ///
  /// The attribute is looked up by name. An attribute that the program doesn’t expose must be
  /// reported as a warning and left untouched.
  unsafe fn set_vertex_attrib(
    &mut self,
    program: &Self::ProgramRepr,
    desc: &VertexAttribDesc,
  ) -> Result<(), VertexAttribWarning>;
}
