pub mod paint;

pub use paint::{SceneCanvas, buffer_image, paint_surface};
