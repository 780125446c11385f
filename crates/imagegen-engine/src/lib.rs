#![warn(missing_debug_implementations)]
#![allow(clippy::single_match)]
//#![warn(missing_docs)]

//! The imagegen-engine crate composites shapes onto a raster surface and exports the result to image files.
//!
//! The main entry point is the [Canvas] struct.

// Modules
pub mod canvas;
mod codecs;
pub mod drawable;
pub mod ext;
pub mod render;
mod surface;

// Re-exports
pub use canvas::Canvas;
pub use drawable::Drawable;
pub use render::ExportFormat;
pub use render::Image;
pub use render::RenderOptions;
