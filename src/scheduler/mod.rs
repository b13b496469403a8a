//! Process-wide periodic housekeeping.
//!
//! The [`Scheduler`] spawns and owns the task loops: the disconnected
//! player [`sweep`], the game-list broadcast through the
//! [`Broadcaster`] seam, and the optional one-shot [`Announcer`]
//! alive announcement.

mod announce;
mod broadcast;
mod liveness;
mod scheduler;

pub use announce::*;
pub use broadcast::*;
pub use liveness::*;
pub use scheduler::*;
