//! Material catalog and hotbar config crate.
#![forbid(unsafe_code)]

pub mod hotbar;
pub mod material;

pub use hotbar::HotbarConfig;
pub use material::{FaceTiles, MaterialCatalog, MaterialDef, MaterialId};
