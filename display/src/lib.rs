pub use color::{Rgb, UnknownColor};
pub use display::{Display, DisplayError};

mod color;
mod display;
