//! The per-game round state machine and roster.
//!
//! A [`Game`] is one play session: its roster of [`Player`]s, its
//! decks, its active [`Round`], and its phase. [`GameOptions`] is
//! validated up front at creation, and every mutation reports
//! [`GameEvent`]s for the broadcast layer to publish.

mod event;
mod game;
mod options;
mod player;
mod round;

pub use event::*;
pub use game::*;
pub use options::*;
pub use player::*;
pub use round::*;
