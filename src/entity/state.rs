//! Entity State Module
//!
//! Session, social and location state of one commander, as reconstructed from
//! journal events.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::{SnapshotFile, TimedLruCache};
use crate::config::Config;
use crate::entity::status::{FriendStatus, GameMode};
use crate::entity::vehicles;
use crate::error::{CacheError, Result};

/// Timestamp format used by journal events
pub const JOURNAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Placeholder for an unknown place
pub const UNKNOWN_PLACE: &str = "Unknown";

/// Parses a journal timestamp such as `2017-10-15T10:00:00Z`.
pub fn parse_journal_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, JOURNAL_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| CacheError::InvalidTimestamp(format!("{}: {}", raw, e)))
}

// == Location ==
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub star_system: Option<String>,
    pub place: Option<String>,
}

// == Entity State ==
/// Mutable state of a commander during a session.
///
/// The membership facet moves between "not yet observed" (no game mode),
/// "active" (with a game mode) and "eliminated" (mode and wing parked in the
/// `previous_*` fields until [`restore`](Self::restore)).
#[derive(Debug, Clone)]
pub struct EntityState {
    pub name: String,
    vehicle: Option<String>,
    location: Location,
    game_mode: Option<GameMode>,
    previous_mode: Option<GameMode>,
    wing: Vec<String>,
    previous_wing: Vec<String>,
    /// Set once a session was observed from its first event
    born_this_session: bool,
    last_update: DateTime<Utc>,
    friends: TimedLruCache<String, FriendStatus>,
}

impl EntityState {
    // == Constructors ==
    /// Creates a state around an existing friends cache.
    pub fn new(name: impl Into<String>, friends: TimedLruCache<String, FriendStatus>) -> Self {
        Self {
            name: name.into(),
            vehicle: None,
            location: Location::default(),
            game_mode: None,
            previous_mode: None,
            wing: Vec::new(),
            previous_wing: Vec::new(),
            born_this_session: false,
            last_update: Utc::now(),
            friends,
        }
    }

    /// Creates a state with an empty friends cache sized from the config.
    pub fn from_config(name: impl Into<String>, config: &Config) -> Self {
        Self::new(
            name,
            TimedLruCache::new(config.max_friends_size, config.friends_age()),
        )
    }

    /// Creates a state with friends restored from the snapshot in `cache_dir`.
    pub fn open(name: impl Into<String>, config: &Config) -> Self {
        let friends = SnapshotFile::new(config.friends_snapshot_path())
            .load(config.max_friends_size, config.friends_age());
        Self::new(name, friends)
    }

    /// Saves the friends cache to the snapshot in `cache_dir`.
    pub fn persist(&self, config: &Config) -> Result<()> {
        SnapshotFile::new(config.friends_snapshot_path()).save(&self.friends)
    }

    pub fn friends(&self) -> &TimedLruCache<String, FriendStatus> {
        &self.friends
    }

    // == Session Lifecycle ==
    /// Marks the start of a session observed from its very first event.
    ///
    /// From here on the social information is complete.
    pub fn begin(&mut self) {
        self.born_this_session = true;
        self.previous_mode = None;
        self.previous_wing.clear();
        self.wing.clear();
    }

    /// Parks the current mode and wing after the commander was destroyed.
    pub fn eliminate(&mut self) {
        self.previous_mode = self.game_mode.take();
        self.previous_wing = std::mem::take(&mut self.wing);
    }

    /// Brings back the mode and wing parked by [`eliminate`](Self::eliminate).
    pub fn restore(&mut self) {
        self.game_mode = self.previous_mode.take();
        self.wing = std::mem::take(&mut self.previous_wing);
    }

    pub fn has_partial_social_info(&self) -> bool {
        !self.born_this_session
    }

    pub fn game_mode(&self) -> Option<GameMode> {
        self.game_mode
    }

    pub fn previous_mode(&self) -> Option<GameMode> {
        self.previous_mode
    }

    pub fn set_game_mode(&mut self, mode: Option<GameMode>) {
        self.game_mode = mode;
    }

    pub fn in_solo_or_private(&self) -> bool {
        matches!(self.game_mode, Some(GameMode::Solo | GameMode::Group))
    }

    pub fn in_open(&self) -> bool {
        self.game_mode == Some(GameMode::Open)
    }

    // == Wing ==
    /// Replaces the wing with `others`.
    pub fn join_wing(&mut self, others: Vec<String>) {
        self.wing = others;
    }

    pub fn leave_wing(&mut self) {
        self.wing.clear();
    }

    /// Appends a wingmate unless already present.
    pub fn add_to_wing(&mut self, other: impl Into<String>) {
        let other = other.into();
        if !self.wing.contains(&other) {
            self.wing.push(other);
        }
    }

    /// Exact, case-sensitive membership test.
    pub fn is_in_wing(&self, name: &str) -> bool {
        self.wing.iter().any(|w| w == name)
    }

    pub fn wing(&self) -> &[String] {
        &self.wing
    }

    pub fn previous_wing(&self) -> &[String] {
        &self.previous_wing
    }

    // == Friends ==
    /// Applies a friends event. Returns whether the friends list was touched.
    ///
    /// `Lost` removes the friend, active statuses are stored, `Requested` and
    /// unknown statuses are ignored.
    pub fn update_friend(&mut self, name: &str, status: &str) -> bool {
        match status.parse::<FriendStatus>() {
            Ok(FriendStatus::Lost) => {
                self.remove_friend(name);
                true
            }
            Ok(status) if status.is_active() => {
                self.friends.set(name.to_string(), status);
                true
            }
            _ => false,
        }
    }

    pub fn remove_friend(&mut self, name: &str) {
        self.friends.remove(name);
    }

    /// True while a fresh friends entry exists for `name`.
    pub fn is_friend(&mut self, name: &str) -> bool {
        self.friends.get(name).is_some()
    }

    /// `None` if `name` is not a friend, otherwise whether they are online.
    pub fn is_friend_online(&mut self, name: &str) -> Option<bool> {
        self.friends
            .get(name)
            .map(|status| *status == FriendStatus::Online)
    }

    /// Whether `other` can only hear this commander through local channels.
    ///
    /// Without complete social information this answers false, assuming
    /// broader reachability rather than guessing from partial history.
    pub fn is_only_reachable_locally(&mut self, other: &str) -> bool {
        if self.has_partial_social_info() {
            return false;
        }
        !(self.is_friend(other) || self.is_in_wing(other))
    }

    // == Vehicle ==
    pub fn vehicle(&self) -> Option<&str> {
        self.vehicle.as_deref()
    }

    /// Stores the canonical form of `raw` and returns it.
    pub fn set_vehicle(&mut self, raw: Option<&str>) -> &str {
        self.vehicle.insert(vehicles::canonicalize(raw))
    }

    // == Location ==
    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn star_system(&self) -> Option<&str> {
        self.location.star_system.as_deref()
    }

    pub fn set_star_system(&mut self, star_system: Option<String>) {
        self.location.star_system = star_system;
    }

    /// Current place, or `"Unknown"`.
    pub fn place(&self) -> &str {
        self.location.place.as_deref().unwrap_or(UNKNOWN_PLACE)
    }

    pub fn set_place(&mut self, place: Option<String>) {
        self.location.place = place;
    }

    /// True while vehicle, star system or place is unknown.
    pub fn has_partial_status(&self) -> bool {
        self.vehicle.is_none()
            || self.location.star_system.is_none()
            || self.location.place.is_none()
    }

    // == Obsolescence-Guarded Updates ==
    // Each one rewrites its field and the shared timestamp only when the value
    // changed, so replayed events do not re-stamp a known fact.

    pub fn update_vehicle_if_obsolete(&mut self, raw: &str, timestamp: DateTime<Utc>) -> bool {
        let canonical = vehicles::canonicalize(Some(raw));
        if self.vehicle.as_deref() == Some(canonical.as_str()) {
            return false;
        }
        debug!(previous = ?self.vehicle, vehicle = %canonical, "Updating vehicle (missing or obsolete)");
        self.vehicle = Some(canonical);
        self.last_update = timestamp;
        true
    }

    pub fn update_star_system_if_obsolete(
        &mut self,
        star_system: &str,
        timestamp: DateTime<Utc>,
    ) -> bool {
        if self.location.star_system.as_deref() == Some(star_system) {
            return false;
        }
        debug!(previous = ?self.location.star_system, star_system, "Updating star system (missing or obsolete)");
        self.location.star_system = Some(star_system.to_string());
        self.last_update = timestamp;
        true
    }

    pub fn update_place_if_obsolete(&mut self, place: &str, timestamp: DateTime<Utc>) -> bool {
        if self.location.place.as_deref() == Some(place) {
            return false;
        }
        debug!(previous = ?self.location.place, place, "Updating place (missing or obsolete)");
        self.location.place = Some(place.to_string());
        self.last_update = timestamp;
        true
    }

    // == Timestamps ==
    pub fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }

    pub fn set_timestamp(&mut self, timestamp: DateTime<Utc>) {
        self.last_update = timestamp;
    }

    pub fn journal_timestamp(&self) -> String {
        self.last_update.format(JOURNAL_TIMESTAMP_FORMAT).to_string()
    }

    /// Milliseconds since the Unix epoch.
    pub fn timestamp_js_epoch(&self) -> i64 {
        self.last_update.timestamp_millis()
    }
}
