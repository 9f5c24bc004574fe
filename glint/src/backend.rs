//! Backend interfacing.
//!
//! Almost everything declared in this module and its submodules is `unsafe`. An end-user **is not
//! supposed to implement any of this.** Library authors might use some traits from here, required
//! by generic code, but no one but backend authors should implement any symbols from here.
//!
//! # Conventions
//!
//! Backends are types implementing the traits of the submodules. Each trait exposes _associated
//! types_ suffixed with `Repr` (e.g. [`Shader::ProgramRepr`](shader::Shader::ProgramRepr)). Those
//! are the backend representations of GPU objects; they must release the GPU object they own when
//! dropped.

pub mod geometry;
pub mod shader;
