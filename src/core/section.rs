use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::validation::parse_section_number;

/// A single numbered section (article) of one document edition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section identifier, usually a number such as "12" or "12/1"
    #[serde(deserialize_with = "deserialize_section_id")]
    pub id: String,

    /// Raw text of the section
    pub content: String,

    /// Chapter heading this section was printed under
    #[serde(default, alias = "chapter", skip_serializing_if = "Option::is_none")]
    pub chapter_name: Option<String>,

    /// Pre-assigned category id, when the edition was already classified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,

    /// Page of the source scan the section starts on
    #[serde(default, alias = "pageNumber", skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,

    /// Generated summary of the section's chapter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,

    /// Generated key-change note for the section's chapter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_change: Option<String>,
}

impl Section {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            chapter_name: None,
            category_id: None,
            page_number: None,
            ai_summary: None,
            key_change: None,
        }
    }

    #[must_use]
    pub fn with_chapter(mut self, chapter: impl Into<String>) -> Self {
        self.chapter_name = Some(chapter.into());
        self
    }

    #[must_use]
    pub fn with_category_id(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page_number = Some(page);
        self
    }

    #[must_use]
    pub fn with_summary(mut self, ai_summary: impl Into<String>) -> Self {
        self.ai_summary = Some(ai_summary.into());
        self
    }

    #[must_use]
    pub fn with_key_change(mut self, key_change: impl Into<String>) -> Self {
        self.key_change = Some(key_change.into());
        self
    }

    /// Numeric value of the id used for ordering; `None` sorts last
    #[must_use]
    pub fn number(&self) -> Option<f64> {
        parse_section_number(&self.id)
    }

    /// The chapter label, ignoring blank headings
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.chapter_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Section ids appear as both strings and bare numbers in edition files
pub(crate) fn deserialize_section_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Integer(n) => n.to_string(),
        RawId::Float(f) => f.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let section = Section::new("5", "Parliament consists of two houses")
            .with_chapter("Legislature")
            .with_page(3)
            .with_summary("Bicameral parliament");

        assert_eq!(section.id, "5");
        assert_eq!(section.label(), Some("Legislature"));
        assert_eq!(section.page_number, Some(3));
        assert_eq!(section.ai_summary.as_deref(), Some("Bicameral parliament"));
        assert!(section.key_change.is_none());
    }

    #[test]
    fn test_blank_label_is_absent() {
        let section = Section::new("1", "text").with_chapter("   ");
        assert_eq!(section.label(), None);
    }

    #[test]
    fn test_deserialize_numeric_id() {
        let section: Section =
            serde_json::from_str(r#"{"id": 12, "content": "text", "chapter": "Monarchy"}"#)
                .unwrap();
        assert_eq!(section.id, "12");
        assert_eq!(section.chapter_name.as_deref(), Some("Monarchy"));
    }

    #[test]
    fn test_deserialize_optional_fields_absent() {
        let section: Section = serde_json::from_str(r#"{"id": "3/1", "content": "x"}"#).unwrap();
        assert_eq!(section.id, "3/1");
        assert!(section.chapter_name.is_none());
        assert!(section.category_id.is_none());
        assert_eq!(section.number(), Some(3.0));
    }
}
