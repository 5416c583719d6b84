use std::path::Path;

use crate::core::section::Section;
use crate::parsing::ParseError;
use crate::utils::validation::check_section_limit;

/// Parse a TSV/CSV file with columns: id, chapter, content
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_tsv_file(path: &Path, delimiter: char) -> Result<Vec<Section>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_tsv_text(&content, delimiter)
}

/// Parse TSV/CSV text with columns: id, chapter, content
///
/// The content column takes the rest of the line, so it may itself contain
/// the delimiter. Each field is trimmed on its own. An empty chapter column
/// leaves the section unlabelled, and an empty content column is kept as
/// empty text.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if lines have fewer than 3 fields or
/// an empty id, or `ParseError::TooManySections` if the limit is exceeded.
pub fn parse_tsv_text(text: &str, delimiter: char) -> Result<Vec<Section>, ParseError> {
    let mut sections = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        // Only line endings are stripped; empty edge fields stay in place
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.splitn(3, delimiter).collect();

        // Check if first non-empty/non-comment line is a header
        if first_data_line {
            first_data_line = false;
            let first = fields.first().map(|s| s.trim().to_lowercase()).unwrap_or_default();
            if first == "id" || first == "section" || first == "section_id" {
                continue;
            }
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if fields.len() < 3 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has fewer than 3 fields"
            )));
        }

        let id = fields[0].trim();
        if id.is_empty() {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has an empty section id"
            )));
        }

        let mut section = Section::new(id, fields[2].trim());
        let chapter = fields[1].trim();
        if !chapter.is_empty() {
            section.chapter_name = Some(chapter.to_string());
        }

        // Check section limit for DOS protection
        if check_section_limit(sections.len()).is_some() {
            return Err(ParseError::TooManySections(sections.len()));
        }

        sections.push(section);
    }

    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tsv_text() {
        let tsv = "id\tchapter\tcontent
1\tMonarchy\tThe King shall reign
2\tMonarchy\tThe King is head of the armed forces
9\tJudicial Branch\tCourts shall be independent
";

        let sections = parse_tsv_text(tsv, '\t').unwrap();
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].id, "1");
        assert_eq!(sections[0].label(), Some("Monarchy"));
        assert_eq!(sections[2].content, "Courts shall be independent");
    }

    #[test]
    fn test_parse_csv_content_keeps_delimiter() {
        let csv = "section,chapter,content
5,Legislature,Parliament consists of two houses, the House and the Senate
";

        let sections = parse_csv(csv);
        assert_eq!(sections.len(), 1);
        assert_eq!(
            sections[0].content,
            "Parliament consists of two houses, the House and the Senate"
        );
    }

    fn parse_csv(text: &str) -> Vec<Section> {
        parse_tsv_text(text, ',').unwrap()
    }

    #[test]
    fn test_parse_tsv_no_header() {
        let tsv = "1\tMonarchy\tThe King shall reign\n2\t\tUnlabelled text\n";
        let sections = parse_tsv_text(tsv, '\t').unwrap();
        assert_eq!(sections.len(), 2);
        assert!(sections[1].chapter_name.is_none());
    }

    #[test]
    fn test_parse_tsv_comments_before_header() {
        // Test that header detection works even with comments before it
        let tsv = "# Edition of 2475
# Exported from OCR

id\tchapter\tcontent
1\tPreamble\tWhereas the people
";
        let sections = parse_tsv_text(tsv, '\t').unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].id, "1");
    }

    #[test]
    fn test_parse_tsv_too_few_fields() {
        let result = parse_tsv_text("1\tMonarchy\n", '\t');
        assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_tsv_empty_id() {
        let result = parse_tsv_text("1\tA\tx\n\tB\ty\n", '\t');
        match result {
            Err(ParseError::InvalidFormat(msg)) => {
                assert!(msg.contains("Line 2 has an empty section id"), "{msg}");
            }
            other => panic!("expected empty id error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_tsv_empty_content() {
        let tsv = "1\tMonarchy\t\n2\tMonarchy\tThe King shall reign\r\n";
        let sections = parse_tsv_text(tsv, '\t').unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].id, "1");
        assert_eq!(sections[0].label(), Some("Monarchy"));
        assert_eq!(sections[0].content, "");
        assert_eq!(sections[1].content, "The King shall reign");
    }

    #[test]
    fn test_parse_tsv_fields_trimmed_individually() {
        let tsv = "  7 \t Monarchy \t  The King shall reign  \n   \n  # indented comment\n";
        let sections = parse_tsv_text(tsv, '\t').unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].id, "7");
        assert_eq!(sections[0].label(), Some("Monarchy"));
        assert_eq!(sections[0].content, "The King shall reign");
    }

    #[test]
    fn test_parse_tsv_empty_text() {
        assert!(parse_tsv_text("", '\t').unwrap().is_empty());
    }
}
