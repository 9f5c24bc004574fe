//! Shader programs.
//!
//! A [`ShaderProgram`] wraps a GPU program made of a vertex and a fragment stage. Programs used
//! with glint all share the same interface:
//!
//! - a `mat4` uniform named `u_matrix`, the model-view-projection matrix;
//! - a `vec3` attribute named `vertex` and a `vec4` attribute named `color`, matching the
//!   interleaved layout of [`Vertex`].
//!
//! A built-in pair of sources implementing that interface is available through
//! [`ShaderProgram::compile_default`]. The resulting program is compiled once per graphics context
//! and shared afterwards; see [`Registry`](crate::registry::Registry).

use std::{error, fmt, rc::Rc};

use crate::{backend::shader::Shader, context::GraphicsContext, linear::Mat4, vertex::Vertex};

/// Name of the model-view-projection uniform.
pub const MATRIX_UNIFORM: &str = "u_matrix";

/// Vertex stage source of the default program.
pub const DEFAULT_VERTEX_SHADER: &str = "#version 150
in vec3 vertex;
in vec4 color;

uniform mat4 u_matrix;

out vec4 f_color;

void main()
{
    gl_Position = u_matrix * vec4(vertex.xyz, 1.0);
    f_color = color;
}
";

/// Fragment stage source of the default program.
pub const DEFAULT_FRAGMENT_SHADER: &str = "#version 150
in vec4 f_color;
out vec4 color;

void main()
{
    color = f_color;
}
";

/// A shader stage type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StageType {
  /// Vertex shader.
  VertexShader,
  /// Fragment shader.
  FragmentShader,
}

impl fmt::Display for StageType {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageType::VertexShader => f.write_str("vertex shader"),
      StageType::FragmentShader => f.write_str("fragment shader"),
    }
  }
}

/// Errors that shader stages can emit.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StageError {
  /// Occurs when a shader fails to compile.
  CompilationFailed(StageType, String),
}

impl StageError {
  /// Occurs when a shader fails to compile.
  pub fn compilation_failed(ty: StageType, reason: impl Into<String>) -> Self {
    StageError::CompilationFailed(ty, reason.into())
  }
}

impl fmt::Display for StageError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageError::CompilationFailed(ref ty, ref r) => write!(f, "{} compilation error: {}", ty, r),
    }
  }
}

impl error::Error for StageError {}

/// Errors that a shader program can generate.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProgramError {
  /// A shader stage failed to compile.
  StageError(StageError),
  /// Program link failed. You can inspect the reason by looking at the contained [`String`].
  LinkFailed(String),
}

impl ProgramError {
  /// Program link failed.
  pub fn link_failed(reason: impl Into<String>) -> Self {
    ProgramError::LinkFailed(reason.into())
  }
}

impl fmt::Display for ProgramError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ProgramError::StageError(ref e) => write!(f, "shader program has stage error: {}", e),

      ProgramError::LinkFailed(ref s) => write!(f, "shader program failed to link: {}", s),
    }
  }
}

impl error::Error for ProgramError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      ProgramError::StageError(e) => Some(e),
      _ => None,
    }
  }
}

impl From<StageError> for ProgramError {
  fn from(e: StageError) -> Self {
    ProgramError::StageError(e)
  }
}

/// Warnings related to uniform issues.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UniformWarning {
  /// Inactive uniform (not in use / no participation to the final output in shaders).
  Inactive(String),
}

impl UniformWarning {
  /// Create an inactive uniform warning.
  pub fn inactive(name: impl Into<String>) -> Self {
    UniformWarning::Inactive(name.into())
  }
}

impl fmt::Display for UniformWarning {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      UniformWarning::Inactive(ref s) => write!(f, "inactive {} uniform", s),
    }
  }
}

impl error::Error for UniformWarning {}

/// Warnings related to vertex attributes issues.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VertexAttribWarning {
  /// Inactive vertex attribute (not read).
  Inactive(String),
}

impl VertexAttribWarning {
  /// Inactive vertex attribute (not read).
  pub fn inactive(attrib: impl Into<String>) -> Self {
    VertexAttribWarning::Inactive(attrib.into())
  }
}

impl fmt::Display for VertexAttribWarning {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      VertexAttribWarning::Inactive(ref s) => write!(f, "inactive {} vertex attribute", s),
    }
  }
}

impl error::Error for VertexAttribWarning {}

/// A resolved uniform location.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Uniform {
  index: i32,
}

impl Uniform {
  /// Create a new uniform from its location.
  ///
  /// # Safety
  ///
  /// Backends must only create uniforms from locations they resolved on a linked program.
  pub unsafe fn new(index: i32) -> Self {
    Uniform { index }
  }

  /// Location of the uniform in its program.
  pub fn index(&self) -> i32 {
    self.index
  }
}

/// A shader program.
///
/// A freshly created program is empty (its [`id`](ShaderProgram::id) is `0`) and must be compiled
/// before use. Compiling again replaces the underlying GPU program only if the new one links; a
/// failed compilation leaves the previous program in place.
pub struct ShaderProgram<B>
where
  B: Shader,
{
  program: Option<Rc<B::ProgramRepr>>,
  matrix: Option<Uniform>,
}

impl<B> ShaderProgram<B>
where
  B: Shader,
{
  /// Create an empty shader program.
  pub fn new() -> Self {
    ShaderProgram {
      program: None,
      matrix: None,
    }
  }

  /// Raw handle of the GPU program; `0` if nothing was compiled yet.
  pub fn id(&self) -> u32 {
    self
      .program
      .as_ref()
      .map_or(0, |program| unsafe { B::program_handle(program) })
  }

  /// Whether a program was successfully compiled.
  pub fn is_compiled(&self) -> bool {
    self.program.is_some()
  }

  /// Compile the built-in default program.
  ///
  /// The first successful compilation is memoized in the context’s registry; further calls, on
  /// this or any other [`ShaderProgram`], share it instead of compiling again.
  pub fn compile_default<C>(&mut self, ctx: &mut C) -> Result<(), ProgramError>
  where
    C: GraphicsContext<Backend = B>,
  {
    if let Some(program) = ctx.registry().default_program() {
      log::trace!("reusing default shader program");
      self.adopt(program);
      return Ok(());
    }

    let program = Rc::new(Self::link(
      ctx.backend(),
      DEFAULT_VERTEX_SHADER,
      DEFAULT_FRAGMENT_SHADER,
    )?);

    ctx.registry().set_default_program(program.clone());
    self.adopt(program);

    Ok(())
  }

  /// Compile and link a program from a vertex and a fragment source.
  ///
  /// On failure, the driver-reported reason is logged and returned.
  pub fn compile<C>(
    &mut self,
    ctx: &mut C,
    vertex_src: &str,
    fragment_src: &str,
  ) -> Result<(), ProgramError>
  where
    C: GraphicsContext<Backend = B>,
  {
    let program = Self::link(ctx.backend(), vertex_src, fragment_src)?;
    self.adopt(Rc::new(program));

    Ok(())
  }

  /// Make the program current. Does nothing if nothing was compiled.
  pub fn use_program<C>(&self, ctx: &mut C)
  where
    C: GraphicsContext<Backend = B>,
  {
    if let Some(ref program) = self.program {
      unsafe { ctx.backend().use_program(program) };
    }
  }

  /// Make the program current and upload `matrix` to its `u_matrix` uniform.
  pub fn setup_matrices<C>(&self, ctx: &mut C, matrix: &Mat4)
  where
    C: GraphicsContext<Backend = B>,
  {
    self.use_program(ctx);

    if let Some(ref uniform) = self.matrix {
      unsafe { ctx.backend().set_uniform_matrix(uniform, matrix.as_array()) };
    }
  }

  /// Describe the interleaved [`Vertex`] layout to the currently bound vertex array.
  ///
  /// Attributes the program doesn’t read are skipped; they are logged and returned as warnings.
  pub fn setup_attributes<C>(&self, ctx: &mut C) -> Vec<VertexAttribWarning>
  where
    C: GraphicsContext<Backend = B>,
  {
    let mut warnings = Vec::new();

    for desc in &Vertex::ATTRIBS {
      let result = match self.program {
        Some(ref program) => unsafe { ctx.backend().set_vertex_attrib(program, desc) },
        None => Err(VertexAttribWarning::inactive(desc.name)),
      };

      if let Err(warning) = result {
        log::warn!("{}", warning);
        warnings.push(warning);
      }
    }

    warnings
  }

  fn link(
    backend: &mut B,
    vertex_src: &str,
    fragment_src: &str,
  ) -> Result<B::ProgramRepr, ProgramError> {
    let linked = unsafe { Self::link_stages(backend, vertex_src, fragment_src) };

    linked.map_err(|e| {
      log::error!("{}", e);
      e
    })
  }

  // stages are dropped, hence released, on every return path
  unsafe fn link_stages(
    backend: &mut B,
    vertex_src: &str,
    fragment_src: &str,
  ) -> Result<B::ProgramRepr, ProgramError> {
    let vertex = backend.new_stage(StageType::VertexShader, vertex_src)?;
    let fragment = backend.new_stage(StageType::FragmentShader, fragment_src)?;

    backend.new_program(&vertex, &fragment)
  }

  fn adopt(&mut self, program: Rc<B::ProgramRepr>) {
    self.matrix = match unsafe { B::ask_uniform(&program, MATRIX_UNIFORM) } {
      Ok(uniform) => Some(uniform),
      Err(warning) => {
        log::warn!("{}", warning);
        None
      }
    };

    self.program = Some(program);
  }
}

impl<B> Default for ShaderProgram<B>
where
  B: Shader,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<B> fmt::Debug for ShaderProgram<B>
where
  B: Shader,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("ShaderProgram")
      .field("id", &self.id())
      .field("matrix", &self.matrix)
      .finish()
  }
}
