use serde::{Deserialize, Serialize};

/// Prefix for category ids that did not resolve to a canonical category
pub const UNKNOWN_CATEGORY_ID: &str = "unknown";

/// Display title used when a section has no usable chapter label
pub const UNKNOWN_CATEGORY_TITLE: &str = "Unknown";

/// Identifier of a resolved category
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryId(pub String);

impl CategoryId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The shared bucket for sections without any chapter label
    #[must_use]
    pub fn unknown() -> Self {
        Self(UNKNOWN_CATEGORY_ID.to_string())
    }

    /// A distinct unknown bucket for an unmapped, non-empty label
    #[must_use]
    pub fn unknown_for(label: &str) -> Self {
        Self(format!("{UNKNOWN_CATEGORY_ID}:{label}"))
    }

    /// True for both the bare unknown bucket and label-derived unknown buckets
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_CATEGORY_ID || self.0.starts_with("unknown:")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Classification of one output row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiffStatus {
    /// Both sides present and nearly identical
    Match,
    /// Both sides present, similar but reworded
    Modified,
    /// Only present in the right (newer) edition
    Add,
    /// Only present in the left (older) edition
    Remove,
}

impl DiffStatus {
    /// Classify a paired score against the match cutoff
    #[must_use]
    pub fn from_score(score: f64, match_threshold: f64) -> Self {
        if score > match_threshold {
            Self::Match
        } else {
            Self::Modified
        }
    }

    /// The status seen from the other edition's point of view
    #[must_use]
    pub fn mirrored(self) -> Self {
        match self {
            Self::Add => Self::Remove,
            Self::Remove => Self::Add,
            other => other,
        }
    }
}

impl std::fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match => write!(f, "MATCH"),
            Self::Modified => write!(f, "MODIFIED"),
            Self::Add => write!(f, "ADD"),
            Self::Remove => write!(f, "REMOVE"),
        }
    }
}
