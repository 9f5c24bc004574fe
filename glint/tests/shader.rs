mod common;

use common::{Call, Recorder};
use glint::{
  linear::Mat4,
  shader::{ProgramError, ShaderProgram, StageError, StageType, VertexAttribWarning},
};

const VS: &str = "#version 150
in vec3 vertex;
in vec4 color;
uniform mat4 u_matrix;
out vec4 f_color;
void main()
{
    gl_Position = u_matrix * vec4(vertex, 1.0);
    f_color = color;
}
";

const FS: &str = "#version 150
in vec4 f_color;
out vec4 color;
void main()
{
    color = f_color;
}
";

// no color attribute and no matrix
const FLAT_VS: &str = "#version 150
in vec3 vertex;
out vec4 f_color;
void main()
{
    gl_Position = vec4(vertex, 1.0);
    f_color = vec4(1.0);
}
";

const BROKEN: &str = "#version 150
void main(
";

#[test]
fn invalid_source_fails_and_leaves_program_unset() {
  let mut ctx = Recorder::new();
  let mut shader = ShaderProgram::new();

  let result = shader.compile(&mut ctx, BROKEN, FS);

  match result {
    Err(ProgramError::StageError(StageError::CompilationFailed(ty, log))) => {
      assert_eq!(ty, StageType::VertexShader);
      assert!(log.contains("syntax error"));
    }
    _ => panic!("expected a vertex compilation error, got {:?}", result),
  }

  assert_eq!(shader.id(), 0);
  assert!(!shader.is_compiled());
  assert_eq!(ctx.count(|c| matches!(c, Call::NewProgram(_))), 0);
}

#[test]
fn failed_recompile_keeps_previous_program() {
  let mut ctx = Recorder::new();
  let mut shader = ShaderProgram::new();

  shader.compile(&mut ctx, VS, FS).unwrap();
  let id = shader.id();
  assert_ne!(id, 0);

  assert!(shader.compile(&mut ctx, VS, BROKEN).is_err());
  assert_eq!(shader.id(), id);
}

#[test]
fn stages_are_released_after_link() {
  let mut ctx = Recorder::new();
  let mut shader = ShaderProgram::new();

  shader.compile(&mut ctx, VS, FS).unwrap();

  let calls = ctx.calls();
  let stages: Vec<u32> = calls
    .iter()
    .filter_map(|c| match *c {
      Call::NewStage(_, handle) => Some(handle),
      _ => None,
    })
    .collect();
  assert_eq!(stages.len(), 2);

  let linked = calls
    .iter()
    .position(|c| matches!(c, Call::NewProgram(_)))
    .unwrap();

  for stage in stages {
    let deleted = calls
      .iter()
      .position(|c| *c == Call::DeleteStage(stage))
      .unwrap();
    assert!(deleted > linked);
  }

  assert_eq!(ctx.count(|c| matches!(c, Call::DeleteProgram(_))), 0);
}

#[test]
fn fragment_failure_releases_vertex_stage() {
  let mut ctx = Recorder::new();
  let mut shader = ShaderProgram::new();

  let result = shader.compile(&mut ctx, VS, BROKEN);
  assert!(matches!(
    result,
    Err(ProgramError::StageError(StageError::CompilationFailed(
      StageType::FragmentShader,
      _
    )))
  ));

  let created = ctx.count(|c| matches!(c, Call::NewStage(..)));
  let deleted = ctx.count(|c| matches!(c, Call::DeleteStage(_)));
  assert_eq!(created, 2);
  assert_eq!(deleted, 2);
}

#[test]
fn link_failure_releases_program() {
  let mut ctx = Recorder::new();
  let mut shader = ShaderProgram::new();

  let fs = "#version 150
in vec4 f_normal;
out vec4 color;
void main()
{
    color = f_normal;
}
";

  let result = shader.compile(&mut ctx, VS, fs);
  assert!(matches!(result, Err(ProgramError::LinkFailed(_))));
  assert_eq!(shader.id(), 0);

  let created = ctx.count(|c| matches!(c, Call::NewProgram(_)));
  let deleted = ctx.count(|c| matches!(c, Call::DeleteProgram(_)));
  assert_eq!((created, deleted), (1, 1));
}

#[test]
fn default_program_is_compiled_once() {
  let mut ctx = Recorder::new();
  let mut a = ShaderProgram::new();
  let mut b = ShaderProgram::new();

  a.compile_default(&mut ctx).unwrap();
  b.compile_default(&mut ctx).unwrap();
  a.compile_default(&mut ctx).unwrap();

  assert_ne!(a.id(), 0);
  assert_eq!(a.id(), b.id());
  assert_eq!(ctx.count(|c| matches!(c, Call::NewProgram(_))), 1);
  assert!(ctx.registry.default_program().is_some());
}

#[test]
fn custom_sources_always_recompile() {
  let mut ctx = Recorder::new();
  let mut shader = ShaderProgram::new();

  shader.compile_default(&mut ctx).unwrap();
  let default_id = shader.id();

  shader.compile(&mut ctx, VS, FS).unwrap();
  let first = shader.id();
  shader.compile(&mut ctx, VS, FS).unwrap();

  assert_ne!(first, default_id);
  assert_ne!(shader.id(), first);
  assert_eq!(ctx.count(|c| matches!(c, Call::NewProgram(_))), 3);

  // the default program is still owned by the registry
  assert_eq!(ctx.count(|c| *c == Call::DeleteProgram(default_id)), 0);
}

#[test]
fn default_program_lives_until_registry_and_users_release_it() {
  let mut ctx = Recorder::new();
  let mut shader = ShaderProgram::new();

  shader.compile_default(&mut ctx).unwrap();
  let id = shader.id();

  ctx.registry.clear();
  assert_eq!(ctx.count(|c| *c == Call::DeleteProgram(id)), 0);

  drop(shader);
  assert_eq!(ctx.count(|c| *c == Call::DeleteProgram(id)), 1);

  // compiled again on next use
  let mut shader = ShaderProgram::new();
  shader.compile_default(&mut ctx).unwrap();
  assert_ne!(shader.id(), id);
}

#[test]
fn setup_matrices_binds_then_uploads() {
  let mut ctx = Recorder::new();
  let mut shader = ShaderProgram::new();
  shader.compile(&mut ctx, VS, FS).unwrap();
  ctx.clear_calls();

  let mut matrix = Mat4::diagonal(2.);
  matrix[3].x = 5.;
  shader.setup_matrices(&mut ctx, &matrix);

  assert_eq!(
    ctx.calls(),
    vec![
      Call::UseProgram(shader.id()),
      Call::SetMatrix(
        0,
        [
          [2., 0., 0., 0.],
          [0., 2., 0., 0.],
          [0., 0., 2., 0.],
          [5., 0., 0., 2.]
        ]
      ),
    ]
  );
}

#[test]
fn inactive_matrix_is_skipped() {
  let mut ctx = Recorder::new();
  let mut shader = ShaderProgram::new();
  shader.compile(&mut ctx, FLAT_VS, FS).unwrap();
  ctx.clear_calls();

  shader.setup_matrices(&mut ctx, &Mat4::IDENTITY);

  assert_eq!(ctx.calls(), vec![Call::UseProgram(shader.id())]);
}

#[test]
fn unset_program_issues_nothing() {
  let mut ctx = Recorder::new();
  let shader = ShaderProgram::new();

  shader.use_program(&mut ctx);
  shader.setup_matrices(&mut ctx, &Mat4::IDENTITY);

  assert!(ctx.calls().is_empty());
}

#[test]
fn attributes_follow_interleaved_layout() {
  let mut ctx = Recorder::new();
  let mut shader = ShaderProgram::new();
  shader.compile_default(&mut ctx).unwrap();
  ctx.clear_calls();

  let warnings = shader.setup_attributes(&mut ctx);

  assert!(warnings.is_empty());
  assert_eq!(
    ctx.calls(),
    vec![
      Call::VertexAttrib {
        program: shader.id(),
        name: "vertex",
        components: 3,
        offset: 0,
        stride: 28,
      },
      Call::VertexAttrib {
        program: shader.id(),
        name: "color",
        components: 4,
        offset: 12,
        stride: 28,
      },
    ]
  );
}

#[test]
fn missing_attribute_is_a_warning() {
  let mut ctx = Recorder::new();
  let mut shader = ShaderProgram::new();
  shader.compile(&mut ctx, FLAT_VS, FS).unwrap();
  ctx.clear_calls();

  let warnings = shader.setup_attributes(&mut ctx);

  assert_eq!(warnings, vec![VertexAttribWarning::inactive("color")]);
  assert_eq!(ctx.count(|c| matches!(c, Call::VertexAttrib { .. })), 1);
}
