//! Linear algebra types and functions.
//!
//! This module provides the small set of value types needed to move vertices around and build
//! camera transforms: [`Vec3`], [`Vec4`] and [`Mat4`]. All of them are `Copy`, `#[repr(C)]` and
//! can be handed to the GPU as-is.
//!
//! Matrices are stored **column-major**, the way OpenGL expects them: `m[i]` is the `i`-th column
//! and `m[i][j]` is the `j`-th row of that column.
//!
//! Multiplying a matrix by a vector comes in two flavors, and they are **not** the same operation:
//!
//! - `m * v` treats `v` as a column vector;
//! - `v * m` treats `v` as a row vector.
//!
//! Pick the one that matches the convention of the transform you built.

use std::{
  f32::consts::PI,
  fmt,
  ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub},
};

/// A 3 dimensional vector.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
  pub x: f32,
  pub y: f32,
  pub z: f32,
}

impl Vec3 {
  /// Create a new vector.
  pub const fn new(x: f32, y: f32, z: f32) -> Self {
    Vec3 { x, y, z }
  }

  /// Create a vector with all components set to `v`.
  pub const fn splat(v: f32) -> Self {
    Vec3 { x: v, y: v, z: v }
  }

  /// Red channel; alias of `x`.
  #[inline]
  pub fn r(&self) -> f32 {
    self.x
  }

  /// Green channel; alias of `y`.
  #[inline]
  pub fn g(&self) -> f32 {
    self.y
  }

  /// Blue channel; alias of `z`.
  #[inline]
  pub fn b(&self) -> f32 {
    self.z
  }
}

impl From<f32> for Vec3 {
  fn from(v: f32) -> Self {
    Vec3::splat(v)
  }
}

impl From<[f32; 3]> for Vec3 {
  fn from([x, y, z]: [f32; 3]) -> Self {
    Vec3 { x, y, z }
  }
}

impl From<Vec3> for [f32; 3] {
  fn from(v: Vec3) -> Self {
    [v.x, v.y, v.z]
  }
}

impl Index<usize> for Vec3 {
  type Output = f32;

  fn index(&self, index: usize) -> &Self::Output {
    match index {
      0 => &self.x,
      1 => &self.y,
      2 => &self.z,
      _ => panic!("Vec3 index out of range: {}", index),
    }
  }
}

impl IndexMut<usize> for Vec3 {
  fn index_mut(&mut self, index: usize) -> &mut Self::Output {
    match index {
      0 => &mut self.x,
      1 => &mut self.y,
      2 => &mut self.z,
      _ => panic!("Vec3 index out of range: {}", index),
    }
  }
}

impl Add for Vec3 {
  type Output = Vec3;

  fn add(self, rhs: Vec3) -> Self::Output {
    Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
  }
}

impl Sub for Vec3 {
  type Output = Vec3;

  fn sub(self, rhs: Vec3) -> Self::Output {
    Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
  }
}

impl Neg for Vec3 {
  type Output = Vec3;

  fn neg(self) -> Self::Output {
    Vec3::new(-self.x, -self.y, -self.z)
  }
}

impl Mul<f32> for Vec3 {
  type Output = Vec3;

  fn mul(self, rhs: f32) -> Self::Output {
    Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
  }
}

impl Div<f32> for Vec3 {
  type Output = Vec3;

  fn div(self, rhs: f32) -> Self::Output {
    Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
  }
}

impl fmt::Display for Vec3 {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "({}, {}, {})", self.x, self.y, self.z)
  }
}

/// A 4 dimensional vector.
///
/// Also used as an RGBA color.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec4 {
  pub x: f32,
  pub y: f32,
  pub z: f32,
  pub w: f32,
}

impl Vec4 {
  /// Create a new vector.
  pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
    Vec4 { x, y, z, w }
  }

  /// Create a vector with all components set to `v`.
  pub const fn splat(v: f32) -> Self {
    Vec4 {
      x: v,
      y: v,
      z: v,
      w: v,
    }
  }

  /// Red channel; alias of `x`.
  #[inline]
  pub fn r(&self) -> f32 {
    self.x
  }

  /// Green channel; alias of `y`.
  #[inline]
  pub fn g(&self) -> f32 {
    self.y
  }

  /// Blue channel; alias of `z`.
  #[inline]
  pub fn b(&self) -> f32 {
    self.z
  }

  /// Alpha channel; alias of `w`.
  #[inline]
  pub fn a(&self) -> f32 {
    self.w
  }

  fn dot(self, rhs: Vec4) -> f32 {
    self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
  }
}

impl From<f32> for Vec4 {
  fn from(v: f32) -> Self {
    Vec4::splat(v)
  }
}

impl From<[f32; 4]> for Vec4 {
  fn from([x, y, z, w]: [f32; 4]) -> Self {
    Vec4 { x, y, z, w }
  }
}

impl From<Vec4> for [f32; 4] {
  fn from(v: Vec4) -> Self {
    [v.x, v.y, v.z, v.w]
  }
}

impl Index<usize> for Vec4 {
  type Output = f32;

  fn index(&self, index: usize) -> &Self::Output {
    match index {
      0 => &self.x,
      1 => &self.y,
      2 => &self.z,
      3 => &self.w,
      _ => panic!("Vec4 index out of range: {}", index),
    }
  }
}

impl IndexMut<usize> for Vec4 {
  fn index_mut(&mut self, index: usize) -> &mut Self::Output {
    match index {
      0 => &mut self.x,
      1 => &mut self.y,
      2 => &mut self.z,
      3 => &mut self.w,
      _ => panic!("Vec4 index out of range: {}", index),
    }
  }
}

impl Add for Vec4 {
  type Output = Vec4;

  fn add(self, rhs: Vec4) -> Self::Output {
    Vec4::new(
      self.x + rhs.x,
      self.y + rhs.y,
      self.z + rhs.z,
      self.w + rhs.w,
    )
  }
}

impl Sub for Vec4 {
  type Output = Vec4;

  fn sub(self, rhs: Vec4) -> Self::Output {
    Vec4::new(
      self.x - rhs.x,
      self.y - rhs.y,
      self.z - rhs.z,
      self.w - rhs.w,
    )
  }
}

impl fmt::Display for Vec4 {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
  }
}

/// 4x4 floating matrix, stored as four columns.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Mat4 {
  cols: [Vec4; 4],
}

impl Mat4 {
  /// The identity matrix.
  pub const IDENTITY: Mat4 = Mat4::diagonal(1.);

  /// Build a matrix from its four columns.
  pub const fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
    Mat4 {
      cols: [c0, c1, c2, c3],
    }
  }

  /// Diagonal matrix with `v` on the diagonal and zeros everywhere else.
  pub const fn diagonal(v: f32) -> Self {
    Mat4::from_cols(
      Vec4::new(v, 0., 0., 0.),
      Vec4::new(0., v, 0., 0.),
      Vec4::new(0., 0., v, 0.),
      Vec4::new(0., 0., 0., v),
    )
  }

  /// Columns of the matrix.
  pub fn cols(&self) -> &[Vec4; 4] {
    &self.cols
  }

  /// Column-major view of the sixteen floats, ready to be uploaded.
  pub fn as_array(&self) -> &[[f32; 4]; 4] {
    // Mat4 and Vec4 are repr(C) structs of plain f32s, so the layouts are identical
    unsafe { &*(self as *const Mat4 as *const [[f32; 4]; 4]) }
  }
}

impl From<[[f32; 4]; 4]> for Mat4 {
  fn from(cols: [[f32; 4]; 4]) -> Self {
    Mat4::from_cols(
      cols[0].into(),
      cols[1].into(),
      cols[2].into(),
      cols[3].into(),
    )
  }
}

impl From<Mat4> for [[f32; 4]; 4] {
  fn from(m: Mat4) -> Self {
    *m.as_array()
  }
}

impl Index<usize> for Mat4 {
  type Output = Vec4;

  fn index(&self, index: usize) -> &Self::Output {
    &self.cols[index]
  }
}

impl IndexMut<usize> for Mat4 {
  fn index_mut(&mut self, index: usize) -> &mut Self::Output {
    &mut self.cols[index]
  }
}

/// Column vector product.
impl Mul<Vec4> for Mat4 {
  type Output = Vec4;

  fn mul(self, v: Vec4) -> Self::Output {
    let m = &self;

    Vec4::new(
      m[0][0] * v[0] + m[1][0] * v[1] + m[2][0] * v[2] + m[3][0] * v[3],
      m[0][1] * v[0] + m[1][1] * v[1] + m[2][1] * v[2] + m[3][1] * v[3],
      m[0][2] * v[0] + m[1][2] * v[1] + m[2][2] * v[2] + m[3][2] * v[3],
      m[0][3] * v[0] + m[1][3] * v[1] + m[2][3] * v[2] + m[3][3] * v[3],
    )
  }
}

/// Row vector product.
impl Mul<Mat4> for Vec4 {
  type Output = Vec4;

  fn mul(self, m: Mat4) -> Self::Output {
    Vec4::new(
      self.dot(m[0]),
      self.dot(m[1]),
      self.dot(m[2]),
      self.dot(m[3]),
    )
  }
}

impl Mul for Mat4 {
  type Output = Mat4;

  fn mul(self, rhs: Mat4) -> Self::Output {
    Mat4::from_cols(
      self * rhs[0],
      self * rhs[1],
      self * rhs[2],
      self * rhs[3],
    )
  }
}

impl fmt::Display for Mat4 {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(
      f,
      "mat4x4({}, {}, {}, {})",
      self.cols[0], self.cols[1], self.cols[2], self.cols[3]
    )
  }
}

/// Cross product.
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
  Vec3::new(
    a.y * b.z - a.z * b.y,
    a.z * b.x - a.x * b.z,
    a.x * b.y - a.y * b.x,
  )
}

/// Dot product.
pub fn dot(a: Vec3, b: Vec3) -> f32 {
  a.x * b.x + a.y * b.y + a.z * b.z
}

/// Euclidean length.
pub fn length(v: Vec3) -> f32 {
  dot(v, v).sqrt()
}

/// Unit vector pointing in the same direction as `v`.
///
/// `v` must not be the zero vector; the result would be made of non-finite components.
pub fn normal(v: Vec3) -> Vec3 {
  v / length(v)
}

/// Convert degrees to radians.
pub fn radians(degrees: f32) -> f32 {
  degrees * (PI / 180.)
}

/// Right-handed perspective projection, mapping the near and far planes to `-1` and `1`.
///
/// `fovy` is the vertical field of view in radians. The projection is degenerate if `z_far ==
/// z_near` or `aspect == 0`.
pub fn perspective(fovy: f32, aspect: f32, z_near: f32, z_far: f32) -> Mat4 {
  let tan_half_fovy = (fovy / 2.).tan();

  let mut m = Mat4::diagonal(0.);
  m[0][0] = 1. / (aspect * tan_half_fovy);
  m[1][1] = 1. / tan_half_fovy;
  m[2][2] = -(z_far + z_near) / (z_far - z_near);
  m[2][3] = -1.;
  m[3][2] = -(2. * z_far * z_near) / (z_far - z_near);
  m
}

/// Right-handed view matrix looking from `eye` toward `target`.
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
  let zaxis = normal(eye - target);
  let xaxis = normal(cross(up, zaxis));
  let yaxis = cross(zaxis, xaxis);

  let orientation = Mat4::from_cols(
    Vec4::new(xaxis.x, yaxis.x, zaxis.x, 0.),
    Vec4::new(xaxis.y, yaxis.y, zaxis.y, 0.),
    Vec4::new(xaxis.z, yaxis.z, zaxis.z, 0.),
    Vec4::new(0., 0., 0., 1.),
  );

  let translation = Mat4::from_cols(
    Vec4::new(1., 0., 0., 0.),
    Vec4::new(0., 1., 0., 0.),
    Vec4::new(0., 0., 1., 0.),
    Vec4::new(-eye.x, -eye.y, -eye.z, 1.),
  );

  orientation * translation
}

impl From<cgmath::Vector3<f32>> for Vec3 {
  fn from(v: cgmath::Vector3<f32>) -> Self {
    Vec3::new(v.x, v.y, v.z)
  }
}

impl From<Vec3> for cgmath::Vector3<f32> {
  fn from(v: Vec3) -> Self {
    cgmath::Vector3::new(v.x, v.y, v.z)
  }
}

impl From<cgmath::Vector4<f32>> for Vec4 {
  fn from(v: cgmath::Vector4<f32>) -> Self {
    Vec4::new(v.x, v.y, v.z, v.w)
  }
}

impl From<Vec4> for cgmath::Vector4<f32> {
  fn from(v: Vec4) -> Self {
    cgmath::Vector4::new(v.x, v.y, v.z, v.w)
  }
}

impl From<cgmath::Matrix4<f32>> for Mat4 {
  fn from(m: cgmath::Matrix4<f32>) -> Self {
    Mat4::from_cols(m.x.into(), m.y.into(), m.z.into(), m.w.into())
  }
}

impl From<Mat4> for cgmath::Matrix4<f32> {
  fn from(m: Mat4) -> Self {
    cgmath::Matrix4::from_cols(m[0].into(), m[1].into(), m[2].into(), m[3].into())
  }
}
