//! A backend that records every call it receives instead of talking to a GPU.

#![allow(dead_code)]

use glint::{
  backend::{geometry::Geometry, shader::Shader},
  context::GraphicsContext,
  geometry::{GeometryError, Mode},
  registry::Registry,
  shader::{ProgramError, StageError, StageType, Uniform, UniformWarning, VertexAttribWarning},
  vertex::{Vertex, VertexAttribDesc},
};
use std::{cell::RefCell, rc::Rc};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
  NewStage(StageType, u32),
  DeleteStage(u32),
  NewProgram(u32),
  DeleteProgram(u32),
  UseProgram(u32),
  SetMatrix(i32, [[f32; 4]; 4]),
  VertexAttrib {
    program: u32,
    name: &'static str,
    components: usize,
    offset: usize,
    stride: usize,
  },
  NewGeometry {
    vao: u32,
    vertices: Vec<Vertex>,
  },
  EndGeometry(u32),
  Draw {
    vao: u32,
    mode: Mode,
    start: usize,
    count: usize,
  },
  UnbindGeometry,
  DeleteGeometry(u32),
}

pub type Log = Rc<RefCell<Vec<Call>>>;

pub struct MockStage {
  handle: u32,
  src: String,
  log: Log,
}

impl Drop for MockStage {
  fn drop(&mut self) {
    self.log.borrow_mut().push(Call::DeleteStage(self.handle));
  }
}

pub struct MockProgram {
  handle: u32,
  uniforms: Vec<String>,
  attribs: Vec<String>,
  log: Log,
}

impl Drop for MockProgram {
  fn drop(&mut self) {
    self.log.borrow_mut().push(Call::DeleteProgram(self.handle));
  }
}

pub struct MockGeometry {
  vao: u32,
  log: Log,
}

impl Drop for MockGeometry {
  fn drop(&mut self) {
    self.log.borrow_mut().push(Call::DeleteGeometry(self.vao));
  }
}

/// Recording backend and context at once.
pub struct Recorder {
  pub registry: Registry<Recorder>,
  /// Largest vertex count `new_geometry` accepts.
  pub max_vertices: usize,
  log: Log,
  next_handle: u32,
}

impl Recorder {
  pub fn new() -> Self {
    Recorder {
      registry: Registry::new(),
      max_vertices: usize::MAX,
      log: Rc::new(RefCell::new(Vec::new())),
      next_handle: 1,
    }
  }

  pub fn calls(&self) -> Vec<Call> {
    self.log.borrow().clone()
  }

  pub fn clear_calls(&self) {
    self.log.borrow_mut().clear();
  }

  pub fn draws(&self) -> Vec<(Mode, usize, usize)> {
    self
      .log
      .borrow()
      .iter()
      .filter_map(|call| match *call {
        Call::Draw {
          mode, start, count, ..
        } => Some((mode, start, count)),
        _ => None,
      })
      .collect()
  }

  pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
    self.log.borrow().iter().filter(|call| pred(call)).count()
  }

  fn handle(&mut self) -> u32 {
    let handle = self.next_handle;
    self.next_handle += 1;
    handle
  }

  fn push(&self, call: Call) {
    self.log.borrow_mut().push(call);
  }
}

// names declared by lines such as `<keyword> <type> <name>;`
fn declared(src: &str, keyword: &str) -> Vec<String> {
  src
    .lines()
    .map(str::trim)
    .filter_map(|line| line.strip_prefix(keyword))
    .filter_map(|rest| rest.trim_end_matches(';').split_whitespace().last())
    .map(str::to_owned)
    .collect()
}

unsafe impl Shader for Recorder {
  type StageRepr = MockStage;

  type ProgramRepr = MockProgram;

  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError> {
    let handle = self.handle();
    self.push(Call::NewStage(ty, handle));

    if src.contains("void main()") {
      Ok(MockStage {
        handle,
        src: src.to_owned(),
        log: self.log.clone(),
      })
    } else {
      self.push(Call::DeleteStage(handle));
      Err(StageError::compilation_failed(
        ty,
        "0:1(1): error: syntax error, unexpected end of file",
      ))
    }
  }

  unsafe fn new_program(
    &mut self,
    vertex: &Self::StageRepr,
    fragment: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError> {
    let handle = self.handle();
    self.push(Call::NewProgram(handle));

    let program = MockProgram {
      handle,
      uniforms: declared(&vertex.src, "uniform "),
      attribs: declared(&vertex.src, "in "),
      log: self.log.clone(),
    };

    // every fragment input must be written by the vertex stage
    let outputs = declared(&vertex.src, "out ");
    match declared(&fragment.src, "in ")
      .into_iter()
      .find(|input| !outputs.contains(input))
    {
      Some(input) => Err(ProgramError::link_failed(format!(
        "error: fragment shader input `{}` has no matching vertex shader output",
        input
      ))),
      None => Ok(program),
    }
  }

  unsafe fn program_handle(program: &Self::ProgramRepr) -> u32 {
    program.handle
  }

  unsafe fn ask_uniform(
    program: &Self::ProgramRepr,
    name: &str,
  ) -> Result<Uniform, UniformWarning> {
    program
      .uniforms
      .iter()
      .position(|uniform| uniform == name)
      .map(|index| Uniform::new(index as i32))
      .ok_or_else(|| UniformWarning::inactive(name))
  }

  unsafe fn use_program(&mut self, program: &Self::ProgramRepr) {
    self.push(Call::UseProgram(program.handle));
  }

  unsafe fn set_uniform_matrix(&mut self, uniform: &Uniform, matrix: &[[f32; 4]; 4]) {
    self.push(Call::SetMatrix(uniform.index(), *matrix));
  }

  unsafe fn set_vertex_attrib(
    &mut self,
    program: &Self::ProgramRepr,
    desc: &VertexAttribDesc,
  ) -> Result<(), VertexAttribWarning> {
    if program.attribs.iter().any(|attrib| attrib == desc.name) {
      self.push(Call::VertexAttrib {
        program: program.handle,
        name: desc.name,
        components: desc.components,
        offset: desc.offset,
        stride: desc.stride,
      });
      Ok(())
    } else {
      Err(VertexAttribWarning::inactive(desc.name))
    }
  }
}

unsafe impl Geometry for Recorder {
  type GeometryRepr = MockGeometry;

  unsafe fn new_geometry(
    &mut self,
    vertices: &[Vertex],
  ) -> Result<Self::GeometryRepr, GeometryError> {
    if vertices.len() > self.max_vertices {
      return Err(GeometryError::TooManyVertices(vertices.len()));
    }

    let vao = self.handle();
    self.push(Call::NewGeometry {
      vao,
      vertices: vertices.to_vec(),
    });

    Ok(MockGeometry {
      vao,
      log: self.log.clone(),
    })
  }

  unsafe fn end_geometry(&mut self, geometry: &Self::GeometryRepr) {
    self.push(Call::EndGeometry(geometry.vao));
  }

  unsafe fn render(
    &mut self,
    geometry: &Self::GeometryRepr,
    mode: Mode,
    start: usize,
    count: usize,
  ) {
    self.push(Call::Draw {
      vao: geometry.vao,
      mode,
      start,
      count,
    });
  }

  unsafe fn unbind_geometry(&mut self) {
    self.push(Call::UnbindGeometry);
  }
}

unsafe impl GraphicsContext for Recorder {
  type Backend = Recorder;

  fn backend(&mut self) -> &mut Self::Backend {
    self
  }

  fn registry(&mut self) -> &mut Registry<Self::Backend> {
    &mut self.registry
  }
}
