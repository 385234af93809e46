pub mod color;
pub mod spectrum;

pub use color::*;
pub use spectrum::*;
