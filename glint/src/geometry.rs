//! GPU geometries.
//!
//! A [`GeometryBuffer`] gathers colored vertices on the CPU, then uploads them once to a GPU
//! vertex buffer. Building one goes through three phases:
//!
//! 1. Append vertices. [`GeometryBuffer::color`] sets the paint color and
//!    [`GeometryBuffer::vertex`] appends a position painted with it.
//! 2. [`GeometryBuffer::setup`] uploads the pending vertices and forgets them on the CPU side.
//! 3. [`GeometryBuffer::render`] draws what was uploaded, as many times as needed.
//!
//! # Faces
//!
//! By default, a render draws every uploaded vertex in a single batch. Recording faces with
//! [`GeometryBuffer::add_face`] splits the render into one draw per face instead. Faces are always
//! drawn by ascending start index, whatever the order they were added in.

use std::{error, fmt};

use crate::{
  backend::geometry::Geometry,
  context::GraphicsContext,
  linear::{Vec3, Vec4},
  shader::ShaderProgram,
  vertex::Vertex,
};

/// Vertices can be connected via several modes.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Mode {
  /// A single point.
  ///
  /// Points are left unconnected from each other and represent a _point cloud_.
  Point,
  /// A line, defined by two points.
  Line,
  /// A strip line, defined by at least two points and zero or many other ones.
  LineStrip,
  /// A triangle, defined by three points.
  #[default]
  Triangle,
  /// A triangle fan, defined by at least three points and zero or many other ones.
  ///
  /// The first vertex is the center of the fan; every new vertex creates a triangle with the
  /// center and the previous vertex.
  TriangleFan,
  /// A triangle strip, defined by at least three points and zero or many other ones.
  ///
  /// Every new vertex creates a triangle with the two previous ones.
  TriangleStrip,
}

impl fmt::Display for Mode {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      Mode::Point => f.write_str("point"),
      Mode::Line => f.write_str("line"),
      Mode::LineStrip => f.write_str("line strip"),
      Mode::Triangle => f.write_str("triangle"),
      Mode::TriangleFan => f.write_str("triangle fan"),
      Mode::TriangleStrip => f.write_str("triangle strip"),
    }
  }
}

/// Possible errors that might occur when setting up a geometry.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GeometryError {
  /// Nothing to upload.
  NoVertices,
  /// More vertices than the backend can address in a single buffer.
  TooManyVertices(usize),
}

impl fmt::Display for GeometryError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      GeometryError::NoVertices => f.write_str("no vertices to upload"),
      GeometryError::TooManyVertices(nb) => write!(f, "too many vertices to upload: {}", nb),
    }
  }
}

impl error::Error for GeometryError {}

/// A contiguous range of vertices drawn as an independent batch.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Face {
  /// Index of the first vertex.
  pub start: usize,
  /// Number of vertices.
  pub count: usize,
}

impl Face {
  fn end(&self) -> Option<usize> {
    self.start.checked_add(self.count)
  }
}

/// Colored vertices uploaded to the GPU.
pub struct GeometryBuffer<B>
where
  B: Geometry,
{
  pending: Vec<Vertex>,
  next_color: Vec4,
  // sorted by start index; starts are unique
  faces: Vec<Face>,
  mode: Mode,
  vertex_count: usize,
  repr: Option<B::GeometryRepr>,
}

impl<B> GeometryBuffer<B>
where
  B: Geometry,
{
  /// Create an empty buffer, rendering triangles.
  pub fn new() -> Self {
    GeometryBuffer {
      pending: Vec::new(),
      next_color: Vec4::default(),
      faces: Vec::new(),
      mode: Mode::default(),
      vertex_count: 0,
      repr: None,
    }
  }

  /// Set the color painted on the next vertices appended with [`GeometryBuffer::vertex`].
  pub fn color(&mut self, color: Vec4) -> &mut Self {
    self.next_color = color;
    self
  }

  /// Append a vertex at `pos`, painted with the current color.
  pub fn vertex(&mut self, pos: Vec3) -> &mut Self {
    self.pending.push(Vertex::new(pos, self.next_color));
    self
  }

  /// Append a fully specified vertex. The current color is left untouched.
  pub fn push(&mut self, vertex: Vertex) -> &mut Self {
    self.pending.push(vertex);
    self
  }

  /// Vertices appended since the last [`GeometryBuffer::setup`].
  pub fn pending(&self) -> &[Vertex] {
    &self.pending
  }

  /// Primitive mode used to connect vertices.
  pub fn mode(&self) -> Mode {
    self.mode
  }

  /// Change the primitive mode used by the next renders.
  pub fn set_mode(&mut self, mode: Mode) -> &mut Self {
    self.mode = mode;
    self
  }

  /// Record a face: `count` vertices starting at `start`, drawn as their own batch.
  ///
  /// Only one face can start at a given index; recording another one with the same start is
  /// ignored.
  pub fn add_face(&mut self, start: usize, count: usize) -> &mut Self {
    match self.faces.binary_search_by_key(&start, |face| face.start) {
      Ok(_) => log::debug!("face starting at {} already recorded; ignored", start),
      Err(index) => self.faces.insert(index, Face { start, count }),
    }

    self
  }

  /// Recorded faces, by ascending start index.
  pub fn faces(&self) -> &[Face] {
    &self.faces
  }

  /// Number of vertices uploaded by the most recent successful [`GeometryBuffer::setup`].
  pub fn vertex_count(&self) -> usize {
    self.vertex_count
  }

  /// Whether vertices are currently uploaded.
  pub fn is_uploaded(&self) -> bool {
    self.repr.is_some()
  }

  /// Upload the pending vertices with the current primitive mode.
  pub fn setup_with_current_mode<C>(
    &mut self,
    ctx: &mut C,
    shader: &ShaderProgram<B>,
  ) -> Result<(), GeometryError>
  where
    C: GraphicsContext<Backend = B>,
  {
    let mode = self.mode;
    self.setup(ctx, mode, shader)
  }

  /// Upload the pending vertices to a new GPU buffer and describe their layout with `shader`.
  ///
  /// The pending vertices are cleared once uploaded. Any previous upload is released and replaced.
  /// If there is nothing pending, [`GeometryError::NoVertices`] is returned and the previous upload
  /// is kept.
  pub fn setup<C>(
    &mut self,
    ctx: &mut C,
    mode: Mode,
    shader: &ShaderProgram<B>,
  ) -> Result<(), GeometryError>
  where
    C: GraphicsContext<Backend = B>,
  {
    if self.pending.is_empty() {
      return Err(GeometryError::NoVertices);
    }

    let repr = unsafe { ctx.backend().new_geometry(&self.pending)? };
    shader.setup_attributes(ctx);
    unsafe { ctx.backend().end_geometry(&repr) };

    log::debug!("uploaded {} vertices ({})", self.pending.len(), mode);

    self.mode = mode;
    self.vertex_count = self.pending.len();
    self.repr = Some(repr);
    self.pending.clear();

    Ok(())
  }

  /// Draw the uploaded vertices.
  ///
  /// Without faces, everything is drawn in one batch; otherwise, each face is drawn in turn. Faces
  /// reaching past the uploaded vertices are skipped. Nothing is drawn if nothing is uploaded.
  pub fn render<C>(&self, ctx: &mut C)
  where
    C: GraphicsContext<Backend = B>,
  {
    let repr = match self.repr {
      Some(ref repr) => repr,
      None => return,
    };

    let backend = ctx.backend();

    unsafe {
      if self.faces.is_empty() {
        backend.render(repr, self.mode, 0, self.vertex_count);
      } else {
        for face in &self.faces {
          match face.end() {
            Some(end) if end <= self.vertex_count => {
              backend.render(repr, self.mode, face.start, face.count)
            }

            _ => log::warn!(
              "face {:?} out of the {} uploaded vertices; skipped",
              face,
              self.vertex_count
            ),
          }
        }
      }

      backend.unbind_geometry();
    }
  }

  /// Release the GPU vertex array and buffer. Calling it again does nothing.
  ///
  /// Dropping the buffer has the same effect.
  pub fn cleanup(&mut self) {
    if self.repr.take().is_some() {
      log::debug!("released geometry of {} vertices", self.vertex_count);
    }
  }
}

impl<B> Default for GeometryBuffer<B>
where
  B: Geometry,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<B> fmt::Debug for GeometryBuffer<B>
where
  B: Geometry,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("GeometryBuffer")
      .field("pending", &self.pending.len())
      .field("next_color", &self.next_color)
      .field("faces", &self.faces)
      .field("mode", &self.mode)
      .field("vertex_count", &self.vertex_count)
      .field("uploaded", &self.repr.is_some())
      .finish()
  }
}
