//! Geometry backend interface.
//!
//! A geometry is a vertex array bound to a single, static vertex buffer holding interleaved
//! [`Vertex`] values.

use crate::{
  backend::shader::Shader,
  geometry::{GeometryError, Mode},
  vertex::Vertex,
};

/// Geometry support.
///
/// A geometry is built in two steps. [`Geometry::new_geometry`] allocates and fills the GPU storage
/// and leaves it bound, so that the shader side can describe its attributes with
/// [`Shader::set_vertex_attrib`]. [`Geometry::end_geometry`] then unbinds everything.
pub unsafe trait Geometry: Shader {
  /// Backend representation of a geometry.
  ///
  /// Dropping it releases both the vertex array and the vertex buffer.
  type GeometryRepr;

  /// Allocate a vertex array and a static vertex buffer sized exactly to `vertices`, upload them
  /// and leave both bound.
  unsafe fn new_geometry(&mut self, vertices: &[Vertex]) -> Result<Self::GeometryRepr, GeometryError>;

  /// Unbind the vertex array and vertex buffer bound by [`Geometry::new_geometry`].
  unsafe fn end_geometry(&mut self, geometry: &Self::GeometryRepr);

  /// Draw `count` vertices starting at `start`, connected with `mode`.
  unsafe fn render(&mut self, geometry: &Self::GeometryRepr, mode: Mode, start: usize, count: usize);

  /// Unbind whatever geometry was bound by [`Geometry::render`].
  unsafe fn unbind_geometry(&mut self);
}
