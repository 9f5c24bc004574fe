//! OpenGL backends.
//!
//! This crate exports [OpenGL](https://www.khronos.org/opengl/) backends for glint. The only one so
//! far targets OpenGL 3.3 core and is available as [`GL33`].
//!
//! Backends are not meant to be driven directly: windowing crates (e.g. `glint-glfw`) create one
//! once the OpenGL context is current and hand it to glint through their graphics context.

pub mod gl33;

pub use gl33::GL33;
