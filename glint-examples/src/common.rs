//! Command line shared by every example.

use glint_windowing::{WindowDim, WindowOpt};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
pub struct CLIOpts {
  #[structopt(long)]
  /// Width of the window (or of the video mode, with --fullscreen).
  width: Option<u32>,

  #[structopt(long)]
  /// Height of the window (or of the video mode, with --fullscreen).
  height: Option<u32>,

  #[structopt(short, long)]
  /// Open in fullscreen on the primary monitor.
  fullscreen: bool,
}

impl CLIOpts {
  /// Window options matching the command line.
  pub fn window_opt(&self) -> WindowOpt {
    let default = WindowOpt::default();

    let (default_width, default_height) = match *default.dim() {
      WindowDim::Windowed { width, height } => (width, height),
      _ => (960, 540),
    };

    let dim = match (self.fullscreen, self.width, self.height) {
      (true, None, None) => WindowDim::Fullscreen,
      (true, width, height) => WindowDim::FullscreenRestricted {
        width: width.unwrap_or(default_width),
        height: height.unwrap_or(default_height),
      },
      (false, width, height) => WindowDim::Windowed {
        width: width.unwrap_or(default_width),
        height: height.unwrap_or(default_height),
      },
    };

    default.set_dim(dim)
  }
}
