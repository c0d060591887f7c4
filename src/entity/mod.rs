//! Entity Module
//!
//! Per-commander session state: game mode, wing, friends, vehicle and location.

mod state;
mod status;
pub mod vehicles;

pub use state::{parse_journal_timestamp, EntityState, Location, JOURNAL_TIMESTAMP_FORMAT};
pub use status::{FriendStatus, GameMode};
