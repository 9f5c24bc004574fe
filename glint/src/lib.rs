//! # What is this?
//!
//! `glint` is the small toolkit behind a set of single-file OpenGL 3.3 tutorials. It gathers the
//! few reusable pieces those tutorials need and nothing else:
//!
//! - **linear algebra**: [`Vec3`](linear::Vec3), [`Vec4`](linear::Vec4) and
//!   [`Mat4`](linear::Mat4) value types, plus [`look_at`](linear::look_at) and
//!   [`perspective`](linear::perspective) to build a camera;
//! - **shaders**: [`ShaderProgram`](shader::ShaderProgram) compiles a vertex and a fragment stage
//!   and feeds them one model-view-projection matrix;
//! - **geometries**: [`GeometryBuffer`](geometry::GeometryBuffer) accumulates colored vertices,
//!   uploads them once and draws them, optionally face by face.
//!
//! # Backends
//!
//! This crate doesn’t issue any graphics call by itself. Everything GPU-related goes through the
//! traits of the [`backend`] module, implemented by backend crates (e.g. `glint-gl` for OpenGL
//! 3.3). Front-end types are generic over the backend and take a
//! [`GraphicsContext`](context::GraphicsContext) whenever they need to talk to the GPU.
//!
//! # Windowing
//!
//! `glint` doesn’t create windows nor contexts either. See `glint-windowing` and its
//! implementations (e.g. `glint-glfw`).

pub mod backend;
pub mod context;
pub mod geometry;
pub mod linear;
pub mod registry;
pub mod shader;
pub mod vertex;
