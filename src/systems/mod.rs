//! Systems: the per-tick worker and the per-cell-type behaviours it drives.

pub mod behaviors;
pub mod worker;

pub use behaviors::{Behavior, BehaviorRegistry};
pub use worker::{scan_chunk, CellRule, UpdateContext};
