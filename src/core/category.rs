use serde::{Deserialize, Serialize};

use crate::core::types::CategoryId;

/// One entry of the cross-edition chapter taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalCategory {
    /// Stable identifier, e.g. "judicial"
    pub id: CategoryId,

    /// Display name, e.g. "Judiciary"
    pub name: String,

    /// Other headings known to denote this category (native-language titles,
    /// historical wordings)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl CanonicalCategory {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(id),
            name: name.into(),
            aliases: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// The display name followed by every alias
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_includes_aliases() {
        let category =
            CanonicalCategory::new("judicial", "Judiciary").with_aliases(["Courts", "ตุลาการ (ศาล)"]);
        let names: Vec<&str> = category.names().collect();
        assert_eq!(names, vec!["Judiciary", "Courts", "ตุลาการ (ศาล)"]);
    }
}
