//! This example shows how to draw a colored square with the default shader.
//!
//! The square is uploaded once as a triangle fan and seen through a perspective camera placed
//! above one of its corners. The projection follows the aspect ratio of the window.
//!
//! Press <escape> to quit or close the window.

mod common;

use common::CLIOpts;
use glint::{
  context::GraphicsContext as _,
  geometry::{GeometryBuffer, Mode},
  linear::{look_at, perspective, radians, Mat4, Vec3, Vec4},
  shader::ShaderProgram,
};
use glint_gl::GL33;
use glint_glfw::{GL33Context, GlfwSurface};
use glint_windowing::Application;
use std::{error::Error, process};
use structopt::StructOpt;

const EXAMPLE_NAME: &str = file!();

struct State {
  matrix: Mat4,
  position: Vec3,
  shader: ShaderProgram<GL33>,
  square: GeometryBuffer<GL33>,
}

fn startup(ctx: &mut GL33Context) -> Result<State, Box<dyn Error>> {
  log::info!("{} startup()", EXAMPLE_NAME);

  ctx.backend().set_clear_color([0., 0.8, 1., 1.]);

  let mut shader = ShaderProgram::new();
  shader.compile_default(ctx)?;

  let mut square = GeometryBuffer::new();
  square
    .color(Vec4::new(0., 1., 1., 1.)) // mint
    .vertex(Vec3::new(-10., -10., 0.))
    .color(Vec4::new(1., 1., 0., 1.)) // yellow
    .vertex(Vec3::new(-10., 10., 0.))
    .color(Vec4::new(1., 0., 1., 1.)) // purple
    .vertex(Vec3::new(10., 10., 0.))
    .color(Vec4::new(1., 1., 1., 1.)) // white
    .vertex(Vec3::new(10., -10., 0.));
  square.setup(ctx, Mode::TriangleFan, &shader)?;

  Ok(State {
    matrix: Mat4::IDENTITY,
    position: Vec3::default(),
    shader,
    square,
  })
}

fn resize(state: &mut State, ctx: &mut GL33Context, width: u32, height: u32) {
  log::info!("{} resize({}, {})", EXAMPLE_NAME, width, height);
  ctx.backend().set_viewport(width, height);

  // minimized
  if width == 0 || height == 0 {
    return;
  }

  // projection and view matrix
  let aspect = width as f32 / height as f32;
  let eye = state.position + Vec3::splat(12.);

  state.matrix = perspective(radians(90.), aspect, 0.1, 4096.)
    * look_at(eye, state.position, Vec3::new(0., 0., 1.));
}

fn destroy(state: Option<State>, _: &mut GL33Context) {
  log::info!("{} destroy()", EXAMPLE_NAME);

  if let Some(mut state) = state {
    state.square.cleanup();
  }
}

fn tick(state: &mut State, ctx: &mut GL33Context) -> bool {
  ctx.backend().clear();

  state.shader.setup_matrices(ctx, &state.matrix);
  state.square.render(ctx);

  true // to keep running
}

fn main() {
  env_logger::init();

  let cli_opts = CLIOpts::from_args();

  let surface = match GlfwSurface::new(EXAMPLE_NAME, cli_opts.window_opt()) {
    Ok(surface) => surface,
    Err(e) => {
      log::error!("cannot create graphics surface: {}", e);
      process::exit(1);
    }
  };

  let app = match Application::create(surface, startup, resize, destroy) {
    Ok(app) => app,
    Err(e) => {
      log::error!("{}", e);
      process::exit(1);
    }
  };

  process::exit(app.run(tick));
}
