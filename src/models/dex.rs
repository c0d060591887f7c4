//! Dex Record Model
//!
//! Personal annotations (tags and a memo) attached to a local profile.

use serde::{Deserialize, Serialize};

// == Dex Record ==
/// Tags and memo a player keeps about a commander.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DexRecord {
    /// Normalized tags, in the order they were added
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl DexRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes a tag: surrounding whitespace trimmed, lowercased.
    pub fn normalize_tag(tag: &str) -> String {
        tag.trim().to_lowercase()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = Self::normalize_tag(tag);
        self.tags.iter().any(|t| *t == tag)
    }

    // == Tag ==
    /// Adds a tag. Returns false for a blank tag or one already present.
    pub fn tag(&mut self, tag: &str) -> bool {
        let tag = Self::normalize_tag(tag);
        if tag.is_empty() || self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    // == Untag ==
    /// Removes a tag. Returns false if it was not present.
    pub fn untag(&mut self, tag: &str) -> bool {
        let tag = Self::normalize_tag(tag);
        let before = self.tags.len();
        self.tags.retain(|t| *t != tag);
        self.tags.len() != before
    }

    // == Memo ==
    /// Replaces the memo. Returns false for blank or unchanged text.
    pub fn set_memo(&mut self, memo: &str) -> bool {
        let memo = memo.trim();
        if memo.is_empty() || self.memo.as_deref() == Some(memo) {
            return false;
        }
        self.memo = Some(memo.to_string());
        true
    }

    /// Clears the memo. Returns false if there was none.
    pub fn remove_memo(&mut self) -> bool {
        self.memo.take().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.memo.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_normalizes_and_rejects_duplicates() {
        let mut dex = DexRecord::new();

        assert!(dex.tag("  Outlaw "));
        assert!(!dex.tag("outlaw"));
        assert!(!dex.tag("   "));

        assert_eq!(dex.tags, vec!["outlaw".to_string()]);
        assert!(dex.has_tag("OUTLAW"));
    }

    #[test]
    fn test_untag() {
        let mut dex = DexRecord::new();
        dex.tag("friend");

        assert!(!dex.untag("enemy"));
        assert!(dex.untag("Friend"));
        assert!(dex.is_empty());
    }

    #[test]
    fn test_memo_lifecycle() {
        let mut dex = DexRecord::new();

        assert!(!dex.remove_memo());
        assert!(dex.set_memo("met at Jameson"));
        assert!(!dex.set_memo("met at Jameson"));
        assert!(!dex.set_memo(""));
        assert_eq!(dex.memo.as_deref(), Some("met at Jameson"));

        assert!(dex.remove_memo());
        assert!(dex.memo.is_none());
    }

    #[test]
    fn test_serialization_skips_missing_memo() {
        let mut dex = DexRecord::new();
        dex.tag("ally");

        let json = serde_json::to_value(&dex).unwrap();

        assert_eq!(json, serde_json::json!({ "tags": ["ally"] }));
    }
}
