use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::core::section::{deserialize_section_id, Section};
use crate::parsing::ParseError;
use crate::utils::validation::MAX_SECTIONS;

/// Layout of a JSON edition file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditionFormat {
    /// Array of chapters, each holding its sections and chapter notes
    Rich,
    /// Array of sections (optionally wrapped in `{"sections": [...]}`)
    Flat,
}

/// A chapter entry of the rich format
#[derive(Debug, Deserialize)]
struct RichChapter {
    #[serde(default)]
    category_id: Option<String>,
    #[serde(default, alias = "chapter_name")]
    category_name: Option<String>,
    #[serde(default)]
    ai_summary: Option<String>,
    #[serde(default)]
    key_change: Option<String>,
    #[serde(default)]
    sections: Vec<RichSection>,
}

#[derive(Debug, Deserialize)]
struct RichSection {
    #[serde(deserialize_with = "deserialize_section_id")]
    id: String,
    content: String,
    #[serde(default, alias = "pageNumber")]
    page_number: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct FlatWrapper {
    sections: Vec<Section>,
}

/// Parse an edition JSON file into sections
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_edition_file(path: &Path) -> Result<Vec<Section>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_edition_json(&content)
}

/// Parse edition JSON in either the rich (chapters) or flat (sections) layout
///
/// # Errors
///
/// Returns `ParseError::Json` for malformed JSON or missing required fields,
/// `ParseError::InvalidFormat` for unrecognized layouts or empty section ids,
/// or `ParseError::TooManySections` if the limit is exceeded.
pub fn parse_edition_json(json: &str) -> Result<Vec<Section>, ParseError> {
    let value: Value = serde_json::from_str(json)?;

    let sections = match detect_format(&value)? {
        EditionFormat::Rich => {
            let chapters: Vec<RichChapter> = serde_json::from_value(value)?;
            flatten_chapters(chapters)
        }
        EditionFormat::Flat if value.is_object() => {
            serde_json::from_value::<FlatWrapper>(value)?.sections
        }
        EditionFormat::Flat => serde_json::from_value(value)?,
    };

    validate_sections(sections)
}

/// Decide which layout a parsed JSON document uses
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the document is neither an array
/// nor an object with a `sections` array.
pub fn detect_format(value: &Value) -> Result<EditionFormat, ParseError> {
    match value {
        Value::Array(items) => {
            let is_rich = items
                .first()
                .and_then(Value::as_object)
                .is_some_and(|first| first.contains_key("sections"));
            Ok(if is_rich {
                EditionFormat::Rich
            } else {
                EditionFormat::Flat
            })
        }
        Value::Object(map) if map.get("sections").is_some_and(Value::is_array) => {
            Ok(EditionFormat::Flat)
        }
        _ => Err(ParseError::InvalidFormat(
            "expected an array of chapters or sections, or an object with a 'sections' array"
                .to_string(),
        )),
    }
}

/// Sections inherit their chapter's heading, id, and notes
fn flatten_chapters(chapters: Vec<RichChapter>) -> Vec<Section> {
    let mut sections = Vec::new();
    for chapter in chapters {
        for rich in chapter.sections {
            sections.push(Section {
                id: rich.id,
                content: rich.content,
                chapter_name: chapter.category_name.clone(),
                category_id: chapter.category_id.clone(),
                page_number: rich.page_number,
                ai_summary: chapter.ai_summary.clone(),
                key_change: chapter.key_change.clone(),
            });
        }
    }
    sections
}

fn validate_sections(sections: Vec<Section>) -> Result<Vec<Section>, ParseError> {
    if sections.len() > MAX_SECTIONS {
        return Err(ParseError::TooManySections(sections.len()));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for (i, section) in sections.iter().enumerate() {
        if section.id.trim().is_empty() {
            return Err(ParseError::InvalidFormat(format!(
                "Section {} has an empty id",
                i + 1
            )));
        }
        if !seen.insert(section.id.as_str()) {
            warn!("Duplicate section id '{}' in edition", section.id);
        }
    }

    Ok(sections)
}
