//! Directory Module
//!
//! Profile lookup across the local source and the external directory, with
//! a cache in front of each.

mod profiles;
mod sources;
mod storage;

pub use profiles::{DirectoryStats, ProfileDirectory};
pub use sources::{DirectorySource, LocalSource};
pub use storage::ProfileStorage;
