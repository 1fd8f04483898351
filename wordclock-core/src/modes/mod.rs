//! Built-in animated modes

pub mod spiral;

pub use spiral::Spiral;
