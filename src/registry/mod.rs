//! Mapping from game id to live game.
//!
//! The [`Registry`] handles creation, lookup, and destruction, and is
//! the source of the lobby view: [`GameSummary`] entries filtered
//! through a [`ListFilter`].

mod registry;
mod summary;

pub use registry::*;
pub use summary::*;
