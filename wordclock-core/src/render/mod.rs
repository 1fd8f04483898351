//! Frame production and compositing

pub mod compositor;
pub mod digits;

pub use compositor::{Compositor, SmoothingFactor};
pub use digits::draw_digital_clock;
