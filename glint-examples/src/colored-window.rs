//! This example shows how to clear the window with a color.
//!
//! The viewport follows the size of the window.
//!
//! Press <escape> to quit or close the window.

mod common;

use common::CLIOpts;
use glint::context::GraphicsContext as _;
use glint_glfw::{GL33Context, GlfwSurface};
use glint_windowing::Application;
use std::{convert::Infallible, process};
use structopt::StructOpt;

const EXAMPLE_NAME: &str = file!();

fn startup(_: &mut GL33Context) -> Result<(), Infallible> {
  log::info!("{} startup()", EXAMPLE_NAME);
  Ok(())
}

fn resize(_: &mut (), ctx: &mut GL33Context, width: u32, height: u32) {
  log::info!("{} resize({}, {})", EXAMPLE_NAME, width, height);
  ctx.backend().set_viewport(width, height);
}

fn destroy(_: Option<()>, _: &mut GL33Context) {
  log::info!("{} destroy()", EXAMPLE_NAME);
}

fn tick(_: &mut (), ctx: &mut GL33Context) -> bool {
  let gl = ctx.backend();
  gl.set_clear_color([0., 0.4, 1., 1.]);
  gl.clear();

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
