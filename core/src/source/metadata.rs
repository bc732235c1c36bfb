use crate::telemetry::log::LogManager;
use deunicode::deunicode;
use serde::Serialize;
use std::collections::BTreeMap;

pub const DEFAULT_SEPARATOR: char = '_';

/// Slug-keyed entries of one metadata block; keys without a value map to `None`.
pub type MetadataBlock = BTreeMap<String, Option<String>>;

/// All key/value blocks of an instrument export.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata {
    /// Entries preceding the first section title.
    pub preamble: MetadataBlock,
    /// Titled blocks, keyed by the slug of the title.
    pub sections: BTreeMap<String, MetadataBlock>,
}

impl Metadata {
    /// Value of a preamble entry.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.preamble.get(key).and_then(|value| value.as_deref())
    }

    pub fn section(&self, name: &str) -> Option<&MetadataBlock> {
        self.sections.get(name)
    }

    pub fn section_value(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|block| block.get(key))
            .and_then(|value| value.as_deref())
    }
}

/// Parse tab-separated `key<TAB>value` lines into a block.
///
/// A line without a tab becomes a key with no value. Lines with more than
/// one tab are logged and skipped.
pub fn parse_key_value_pairs(content: &str) -> MetadataBlock {
    let logger = LogManager::new("chromacore::source");
    let mut block = MetadataBlock::new();

    for line in content.lines().map(|line| line.trim_end_matches('\r')) {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        match fields.as_slice() {
            [key] => {
                block.insert(slugify_key(key, DEFAULT_SEPARATOR), None);
            }
            [key, value] => {
                block.insert(
                    slugify_key(key, DEFAULT_SEPARATOR),
                    Some(value.trim().to_string()),
                );
            }
            _ => logger.warn(&format!("unknown metadata line format: {:?}", line)),
        }
    }

    block
}

/// Transliterate `text` to ASCII, lowercase it and join its alphanumeric
/// runs with `separator`.
///
/// `"Injection Date / Time"` becomes `"injection_date_time"` and
/// `"Volume [µl]"` becomes `"volume_ul"`.
pub fn slugify_key(text: &str, separator: char) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_separator = false;

    for ch in ascii.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push(separator);
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators_and_lowercases() {
        assert_eq!(slugify_key("Injection Date / Time", '_'), "injection_date_time");
        assert_eq!(slugify_key("  Sample-Name: ", '_'), "sample_name");
        assert_eq!(slugify_key("Signal Parameter Information", '-'), "signal-parameter-information");
        assert_eq!(slugify_key("Step (s)", '_'), "step_s");
        assert_eq!(slugify_key("", '_'), "");
    }

    #[test]
    fn slugify_transliterates_unit_symbols() {
        assert_eq!(slugify_key("Volume [µl]", '_'), "volume_ul");
        assert_eq!(slugify_key("Säule", '_'), "saule");
    }

    #[test]
    fn key_value_lines_are_parsed() {
        let block = parse_key_value_pairs("Sample Name\tBSA 2mg\nOperator\tlab\n");
        assert_eq!(block.get("sample_name"), Some(&Some("BSA 2mg".to_string())));
        assert_eq!(block.get("operator"), Some(&Some("lab".to_string())));
    }

    #[test]
    fn key_without_value_maps_to_none() {
        let block = parse_key_value_pairs("Comment\n");
        assert_eq!(block.get("comment"), Some(&None));
    }

    #[test]
    fn lines_with_extra_tabs_are_skipped() {
        let block = parse_key_value_pairs("A\t1\t2\nB\t3\n\n");
        assert_eq!(block.len(), 1);
        assert_eq!(block.get("b"), Some(&Some("3".to_string())));
    }

    #[test]
    fn metadata_lookups() {
        let mut sections = BTreeMap::new();
        sections.insert(
            "injection_information".to_string(),
            parse_key_value_pairs("Injection Volume\t100.0"),
        );
        let metadata = Metadata {
            preamble: parse_key_value_pairs("Injection\tRun 7\nNote\n"),
            sections,
        };

        assert_eq!(metadata.value("injection"), Some("Run 7"));
        assert_eq!(metadata.value("note"), None);
        assert_eq!(
            metadata.section_value("injection_information", "injection_volume"),
            Some("100.0")
        );
        assert!(metadata.section("signal_parameter_information").is_none());
    }
}
