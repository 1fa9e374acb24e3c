pub mod form;
pub mod image;
pub mod render;

pub use form::*;
pub use image::*;
pub use render::*;
