//! Card definitions, the external catalog seam, and per-game piles.
//!
//! [`BlackCard`] and [`WhiteCard`] carry immutable card text, grouped
//! into named [`CardSet`]s and loaded once through the read-only
//! [`Catalog`] seam. Each game owns one shuffled [`Deck`] pile pair per
//! card color, and each player holds white cards in a [`Hand`].

mod card;
mod catalog;
mod deck;
mod hand;
mod set;

pub use card::*;
pub use catalog::*;
pub use deck::*;
pub use hand::*;
pub use set::*;
