pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod model;
pub mod surface;

pub use canvas::{BufferCache, Canvas, DrawCall, Recorder};
pub use color::parse_color;
pub use config::SurfaceConfig;
pub use error::ColorError;
pub use model::*;
pub use surface::{DrawingSurface, TouchAction};
