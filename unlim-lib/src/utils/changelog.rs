use crate::utils::encoding::decode_content;
use log::warn;

pub const NOTES_UNAVAILABLE: &str = "Could not load release notes.";
pub const NOTES_MISSING: &str = "No release notes for this version.";
pub const NOTES_PARSE_ERROR: &str = "Error parsing release notes.";

const SECTION_PREFIX: &str = "## [";

/// Release notes for `version` from a base64 encoded changelog. Always returns
/// something displayable.
pub fn parse_changelog(content: Option<&str>, version: &str) -> String {
    let content = match content {
        Some(content) if !content.is_empty() => content,
        _ => return NOTES_UNAVAILABLE.to_string(),
    };

    let document = match decode_content(content) {
        Ok(document) => document,
        Err(e) => {
            warn!("Error parsing changelog: {}", e);
            return NOTES_PARSE_ERROR.to_string();
        }
    };

    extract_release_notes(&document, version).unwrap_or_else(|| NOTES_MISSING.to_string())
}

/// The section after the first `## [<version>]` header, up to the next `## [` header.
///
/// `None` when the header is missing or nothing follows it. A section holding only
/// whitespace comes back as an empty string.
pub fn extract_release_notes(document: &str, version: &str) -> Option<String> {
    let marker = format!("{}{}]", SECTION_PREFIX, version);
    let start = document.find(&marker)? + marker.len();
    let section = &document[start..];
    if section.is_empty() {
        return None;
    }
    let end = section.find(SECTION_PREFIX).unwrap_or(section.len());
    Some(section[..end].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose;
    use base64::Engine;

    const CHANGELOG: &str = "## [2.0.0]\nFix A\n## [1.0.0]\nFix B";

    fn encoded(text: &str) -> String {
        general_purpose::STANDARD.encode(text)
    }

    #[test]
    fn test_notes_for_latest_version() {
        assert_eq!(parse_changelog(Some(&encoded(CHANGELOG)), "2.0.0"), "Fix A");
    }

    #[test]
    fn test_notes_for_last_section() {
        assert_eq!(parse_changelog(Some(&encoded(CHANGELOG)), "1.0.0"), "Fix B");
    }

    #[test]
    fn test_notes_missing_version() {
        assert_eq!(
            parse_changelog(Some(&encoded(CHANGELOG)), "3.0.0"),
            "No release notes for this version."
        );
    }

    #[test]
    fn test_notes_empty_content() {
        assert_eq!(parse_changelog(Some(""), "2.0.0"), "Could not load release notes.");
        assert_eq!(parse_changelog(None, "2.0.0"), "Could not load release notes.");
    }

    #[test]
    fn test_notes_invalid_content() {
        assert_eq!(
            parse_changelog(Some("%%%"), "2.0.0"),
            "Error parsing release notes."
        );
    }

    #[test]
    fn test_header_at_end_of_document() {
        assert_eq!(
            parse_changelog(Some(&encoded("# Changelog\n## [2.0.0]")), "2.0.0"),
            NOTES_MISSING
        );
    }

    #[test]
    fn test_blank_section_is_empty() {
        assert_eq!(
            extract_release_notes("## [2.0.0]\n\n## [1.0.0]\nFix B", "2.0.0"),
            Some(String::new())
        );
    }

    #[test]
    fn test_keep_a_changelog_layout() {
        let document = "# Changelog\n\n## [1.1.0] - 2024-05-01\n### Added\n- Dark mode\n\n## [1.0.0] - 2024-04-01\n- Initial release\n";
        assert_eq!(
            extract_release_notes(document, "1.1.0").as_deref(),
            Some("- 2024-05-01\n### Added\n- Dark mode")
        );
    }

    #[test]
    fn test_version_is_matched_literally() {
        assert_eq!(extract_release_notes(CHANGELOG, "2.0"), None);
    }
}
