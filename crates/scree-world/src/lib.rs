//! World model: block storage, sector partitioning, exposure-driven
//! visibility, and the deferred show/hide queue.
#![forbid(unsafe_code)]

pub mod queue;
pub mod sector;
pub mod store;

pub use queue::{DeferredQueue, PendingOp};
pub use sector::{SECTOR_PAD, SECTOR_SIZE, SectorCoord, sectorize};
pub use store::{Apply, WorldStore};
