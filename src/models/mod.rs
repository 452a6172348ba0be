pub mod ec_level;
pub mod matrix;
pub mod pixel;

pub use ec_level::ECLevel;
pub use matrix::ModuleMatrix;
pub use pixel::{BLACK, PixelBuffer, WHITE};
