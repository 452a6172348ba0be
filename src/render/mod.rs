//! Module matrix to pixels
//!
//! - [`rasterize`](rasterize::rasterize): one pixel per module
//! - [`IconCompositor`](compose::IconCompositor): modules with a centered icon
//! - [`scale`](scale::scale): letterboxed icon scaling

pub mod compose;
pub mod rasterize;
pub mod scale;

pub use compose::{Geometry, IconCompositor, Zone};
pub use rasterize::rasterize;
pub use scale::scale;
