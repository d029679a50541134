//! Replay pipeline module.

mod replay;
mod sector_cache;
mod stats;

pub use replay::{Replay, ReplayTick};
