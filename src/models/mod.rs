//! Data Models Module
//!
//! Profiles returned by the two commander data sources.

mod dex;
mod profile;

pub use dex::DexRecord;
pub use profile::{DirectoryProfile, LocalProfile, Profile};
