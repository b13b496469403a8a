//! Server core for a multi-room, fill-in-the-blank party card game.
//!
//! Many independent game sessions run concurrently, each advancing through
//! deal/submit/judge rounds while tracking player presence. Transport,
//! session authentication, and card-set storage live behind trait seams;
//! this crate owns the per-game state machine, the registry of live games,
//! and the periodic housekeeping that keeps both honest.
//!
//! Card definitions and decks live in [`cards`], the per-game state
//! machine in [`gameplay`], the map of live games in [`registry`], and
//! the periodic housekeeping in [`scheduler`]. Clients drive everything
//! through [`actions`]; state changes go out as [`protocol`] messages
//! over the broadcast sink.

pub mod actions;
pub mod cards;
pub mod config;
pub mod context;
pub mod error;
pub mod gameplay;
pub mod protocol;
pub mod registry;
pub mod scheduler;

pub use config::Config;
pub use context::Context;
pub use error::GameError;

/// A player's accumulated round wins within one game.
pub type Score = u32;

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Unique identifier trait for domain entities.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

/// Compile-time-typed wrapper over uuid::Uuid.
///
/// Uses v7 UUIDs, so `Ord` on an ID is creation-time order. The registry
/// leans on this to list games oldest-first without a separate counter.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
}

impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}
impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self::from(uuid::Uuid::now_v7())
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl<T> serde::Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.inner.serialize(serializer)
    }
}
impl<'de, T> serde::Deserialize<'de> for ID<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        uuid::Uuid::deserialize(deserializer).map(Self::from)
    }
}

// ============================================================================
// GAME PARAMETERS
// ============================================================================
/// Default white cards held per player.
pub const HAND_SIZE: usize = 10;
/// Smallest roster that can start a round (one judge, two submitters).
pub const MIN_PLAYERS: usize = 3;
/// Hard cap on players per game.
pub const MAX_PLAYERS: usize = 20;
/// Highest configurable score limit.
pub const MAX_SCORE_LIMIT: Score = 69;
/// Highest configurable round limit.
pub const MAX_ROUND_LIMIT: u32 = 100;

// ============================================================================
// SCHEDULER CADENCE
// ============================================================================
use std::time::Duration;

/// Warm-up before the first disconnected-player sweep.
pub const PING_START_DELAY: Duration = Duration::from_secs(60);
/// Interval between disconnected-player sweeps.
pub const PING_CHECK_DELAY: Duration = Duration::from_secs(5);
/// Warm-up before the first game-list broadcast.
pub const BROADCAST_UPDATE_START_DELAY: Duration = Duration::from_secs(60);
/// Interval between game-list broadcasts.
pub const BROADCAST_UPDATE_DELAY: Duration = Duration::from_secs(60);

/// No heartbeat for this long marks a player disconnected.
pub const LIVENESS_TIMEOUT: Duration = Duration::from_secs(90);
/// A game untouched for this long is torn down by the sweep.
pub const IDLE_GAME_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Broadcast topic for clients viewing the lobby.
pub const LOBBY: &str = "lobby";

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
