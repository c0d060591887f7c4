//! Profile Models
//!
//! The two kinds of commander profile and the rules for merging them.

use serde::{Deserialize, Serialize};

use crate::models::DexRecord;

// == Local Profile ==
/// Profile from the locally authoritative source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalProfile {
    /// Identifier used when exchanging dex records with the local source
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub squadron: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub karma: i32,
    #[serde(default)]
    pub dex: Option<DexRecord>,
}

impl LocalProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            squadron: None,
            role: None,
            power: None,
            karma: 0,
            dex: None,
        }
    }

    /// Attaches a dex record fetched for this profile.
    pub fn apply_dex(&mut self, dex: DexRecord) {
        self.dex = Some(dex);
    }

    /// Current dex record, empty if none was ever attached.
    pub fn dex_record(&self) -> DexRecord {
        self.dex.clone().unwrap_or_default()
    }

    pub fn tag(&mut self, tag: &str) -> bool {
        self.dex.get_or_insert_with(DexRecord::new).tag(tag)
    }

    pub fn untag(&mut self, tag: &str) -> bool {
        self.dex.as_mut().is_some_and(|dex| dex.untag(tag))
    }

    pub fn set_memo(&mut self, memo: &str) -> bool {
        self.dex.get_or_insert_with(DexRecord::new).set_memo(memo)
    }

    pub fn remove_memo(&mut self) -> bool {
        self.dex.as_mut().is_some_and(DexRecord::remove_memo)
    }

    // == Complement ==
    /// Fills gaps from a directory profile.
    ///
    /// | field | result |
    /// |---|---|
    /// | `squadron`, `role`, `power` | local value, else the directory's |
    /// | `id`, `name`, `karma`, `dex` | always local |
    pub fn complement(&mut self, other: &DirectoryProfile) {
        fill(&mut self.squadron, &other.squadron);
        fill(&mut self.role, &other.role);
        fill(&mut self.power, &other.power);
    }
}

fn fill(field: &mut Option<String>, fallback: &Option<String>) {
    if field.is_none() {
        field.clone_from(fallback);
    }
}

// == Directory Profile ==
/// Profile from the slower external directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryProfile {
    pub name: String,
    #[serde(default)]
    pub squadron: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub power: Option<String>,
}

impl DirectoryProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            squadron: None,
            role: None,
            power: None,
        }
    }
}

// == Profile ==
/// Result of a lookup: the (possibly merged) local profile, or the directory
/// profile alone when no local profile exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum Profile {
    Local(LocalProfile),
    Directory(DirectoryProfile),
}

impl Profile {
    pub fn name(&self) -> &str {
        match self {
            Profile::Local(p) => &p.name,
            Profile::Directory(p) => &p.name,
        }
    }

    pub fn squadron(&self) -> Option<&str> {
        match self {
            Profile::Local(p) => p.squadron.as_deref(),
            Profile::Directory(p) => p.squadron.as_deref(),
        }
    }

    pub fn role(&self) -> Option<&str> {
        match self {
            Profile::Local(p) => p.role.as_deref(),
            Profile::Directory(p) => p.role.as_deref(),
        }
    }

    pub fn power(&self) -> Option<&str> {
        match self {
            Profile::Local(p) => p.power.as_deref(),
            Profile::Directory(p) => p.power.as_deref(),
        }
    }

    pub fn as_local(&self) -> Option<&LocalProfile> {
        match self {
            Profile::Local(p) => Some(p),
            Profile::Directory(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complement_local_wins() {
        let mut local = LocalProfile::new("42", "Jameson");
        local.squadron = Some("LOCAL".to_string());

        let mut directory = DirectoryProfile::new("jameson");
        directory.squadron = Some("REMOTE".to_string());
        directory.role = Some("Wingman".to_string());

        local.complement(&directory);

        assert_eq!(local.squadron.as_deref(), Some("LOCAL"));
        assert_eq!(local.role.as_deref(), Some("Wingman"));
        assert_eq!(local.power, None);
        assert_eq!(local.name, "Jameson");
    }

    #[test]
    fn test_dex_mutations_create_record_lazily() {
        let mut profile = LocalProfile::new("1", "Kirk");

        assert!(!profile.untag("outlaw"));
        assert!(!profile.remove_memo());
        assert!(profile.dex.is_none());

        assert!(profile.tag("outlaw"));
        assert!(profile.set_memo("shot first"));
        assert_eq!(profile.dex_record().tags, vec!["outlaw".to_string()]);
        assert_eq!(profile.dex_record().memo.as_deref(), Some("shot first"));
    }

    #[test]
    fn test_profile_accessors() {
        let mut directory = DirectoryProfile::new("Spock");
        directory.power = Some("Aisling Duval".to_string());
        let profile = Profile::Directory(directory);

        assert_eq!(profile.name(), "Spock");
        assert_eq!(profile.power(), Some("Aisling Duval"));
        assert_eq!(profile.squadron(), None);
        assert!(profile.as_local().is_none());
    }

    #[test]
    fn test_profile_serializes_with_source_tag() {
        let profile = Profile::Local(LocalProfile::new("7", "Uhura"));

        let json = serde_json::to_value(&profile).unwrap();

        assert_eq!(json["source"], "local");
        assert_eq!(json["name"], "Uhura");
    }
}
