//! Journal status values: game modes and friend statuses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// == Game Mode ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Solo,
    Group,
    Open,
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Solo" => Ok(GameMode::Solo),
            "Group" => Ok(GameMode::Group),
            "Open" => Ok(GameMode::Open),
            other => Err(format!("Unknown game mode: {}", other)),
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameMode::Solo => "Solo",
            GameMode::Group => "Group",
            GameMode::Open => "Open",
        };
        f.write_str(s)
    }
}

// == Friend Status ==
/// Status reported by a friends event.
///
/// Only `Accepted`, `Online` and `Offline` describe an active friendship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FriendStatus {
    Requested,
    Accepted,
    Online,
    Offline,
    Lost,
}

impl FriendStatus {
    pub fn is_active(self) -> bool {
        matches!(
            self,
            FriendStatus::Accepted | FriendStatus::Online | FriendStatus::Offline
        )
    }
}

impl FromStr for FriendStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Requested" => Ok(FriendStatus::Requested),
            "Accepted" => Ok(FriendStatus::Accepted),
            "Online" => Ok(FriendStatus::Online),
            "Offline" => Ok(FriendStatus::Offline),
            "Lost" => Ok(FriendStatus::Lost),
            other => Err(format!("Unknown friend status: {}", other)),
        }
    }
}
