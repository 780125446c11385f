#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![allow(clippy::single_match)]

//! the imagegen-compose crate provides the building blocks for generated images: colors, shapes and the
//! randomized parameter ranges they are sampled from.

// Modules
/// colors
pub mod color;
/// the error type shared by the imagegen crates
pub mod error;
/// module for shapes
pub mod shapes;
/// other misc utilities
pub mod utils;

// Re-exports
pub use color::Color;
pub use color::ColorRange;
pub use error::Error;
pub use error::Result;
pub use shapes::Shape;
pub use shapes::ShapeRange;
