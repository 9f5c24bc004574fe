//! Vertex type and its memory layout.
//!
//! Vertices are stored **interleaved**: a position immediately followed by a color, for every
//! vertex. Shaders consume them through two attributes, `vertex` and `color`, which is why those
//! names are fixed.

use std::mem;

use crate::linear::{Vec3, Vec4};

/// Name of the position attribute in shader sources.
pub const POSITION_ATTRIB: &str = "vertex";

/// Name of the color attribute in shader sources.
pub const COLOR_ATTRIB: &str = "color";

/// A colored vertex.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
  /// Position.
  pub pos: Vec3,
  /// RGBA color.
  pub col: Vec4,
}

impl Vertex {
  /// Create a new vertex.
  pub const fn new(pos: Vec3, col: Vec4) -> Self {
    Vertex { pos, col }
  }

  /// Size in bytes of a single vertex; also the stride between two vertices in a buffer.
  pub const STRIDE: usize = mem::size_of::<Vertex>();

  /// Layout of a vertex, one entry per attribute.
  pub const ATTRIBS: [VertexAttribDesc; 2] = [
    VertexAttribDesc {
      name: POSITION_ATTRIB,
      components: 3,
      offset: mem::offset_of!(Vertex, pos),
      stride: Vertex::STRIDE,
    },
    VertexAttribDesc {
      name: COLOR_ATTRIB,
      components: 4,
      offset: mem::offset_of!(Vertex, col),
      stride: Vertex::STRIDE,
    },
  ];
}

/// Description of a single floating-point vertex attribute inside an interleaved buffer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct VertexAttribDesc {
  /// Name the attribute has in the shader.
  pub name: &'static str,
  /// Number of `f32` components.
  pub components: usize,
  /// Offset in bytes from the start of a vertex.
  pub offset: usize,
  /// Distance in bytes between two consecutive vertices.
  pub stride: usize,
}
