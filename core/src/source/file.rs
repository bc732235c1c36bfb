use crate::prelude::{ChromaError, ChromaResult};
use crate::source::metadata::{parse_key_value_pairs, slugify_key, Metadata, DEFAULT_SEPARATOR};
use crate::source::signal::SignalSource;
use std::fs;
use std::path::Path;

/// A parsed instrument export: metadata blocks plus the chromatogram table.
///
/// Layout:
/// ```text
/// Key<TAB>Value            <- preamble block
/// Injection Information:   <- section title (any line ending in ':')
/// Key<TAB>Value
/// ...
/// Chromatogram Data:       <- last section: the numeric table
/// Time (min)<TAB>Step (s)<TAB>Value (EU)
/// 0.000<TAB>n.a.<TAB>0.012
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChromatogramFile {
    pub metadata: Metadata,
    pub signal: SignalSource,
}

impl ChromatogramFile {
    /// Read and parse an export. Only an unreadable file is an error.
    pub fn read<P: AsRef<Path>>(path: P) -> ChromaResult<Self> {
        let path_ref = path.as_ref();
        let content = fs::read_to_string(path_ref).map_err(|source| ChromaError::Io {
            path: path_ref.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let (preamble, mut sections) = split_sections(content);

        // Without any title the whole text is the table.
        let table = match sections.pop() {
            Some((_, body)) => body,
            None => {
                return Self {
                    metadata: Metadata::default(),
                    signal: SignalSource::parse_table(&preamble),
                };
            }
        };

        let mut metadata = Metadata {
            preamble: parse_key_value_pairs(&preamble),
            ..Default::default()
        };
        for (title, body) in sections {
            metadata.sections.insert(title, parse_key_value_pairs(&body));
        }

        Self {
            metadata,
            signal: SignalSource::parse_table(&table),
        }
    }
}

fn is_section_title(line: &str) -> bool {
    line.len() > 1 && line.ends_with(':')
}

/// Split into the preamble text and `(slug title, body)` sections.
fn split_sections(content: &str) -> (String, Vec<(String, String)>) {
    let mut preamble = String::new();
    let mut sections: Vec<(String, String)> = Vec::new();

    for line in content.lines().map(|line| line.trim_end_matches('\r')) {
        if is_section_title(line) {
            let title = slugify_key(line.trim_end_matches(':'), DEFAULT_SEPARATOR);
            sections.push((title, String::new()));
            continue;
        }
        let body = match sections.last_mut() {
            Some((_, body)) => body,
            None => &mut preamble,
        };
        body.push_str(line);
        body.push('\n');
    }

    (preamble, sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const EXPORT: &str = "Injection\tBSA run 3\n\
Comment\n\
Injection Information:\n\
Injection Volume\t100.0\n\
Chromatogram Data Information:\n\
Time Min.\t0.000 [min]\n\
Signal Parameter Information:\n\
Signal Info\tUV_VIS_1\n\
Chromatogram Data:\n\
Time (min)\tStep (s)\tValue (EU)\n\
0.000\tn.a.\t0.5\n\
0.010\t0.60\t0.7\n\
0.020\t0.60\tbroken\n\
0.030\t0.60\t0.9\n";

    #[test]
    fn sections_become_metadata_and_last_section_is_the_table() {
        let file = ChromatogramFile::parse(EXPORT);

        assert_eq!(file.metadata.value("injection"), Some("BSA run 3"));
        assert_eq!(file.metadata.preamble.get("comment"), Some(&None));
        assert_eq!(
            file.metadata
                .section_value("injection_information", "injection_volume"),
            Some("100.0")
        );
        assert_eq!(
            file.metadata
                .section_value("signal_parameter_information", "signal_info"),
            Some("UV_VIS_1")
        );
        assert!(file.metadata.section("chromatogram_data").is_none());

        assert_eq!(file.signal.len(), 3);
        assert_eq!(file.signal.times().to_vec(), vec![0.0, 0.01, 0.03]);
        assert_eq!(file.signal.steps()[0], 0.0);
    }

    #[test]
    fn bare_table_without_titles() {
        let file = ChromatogramFile::parse("time\tstep\tvalue\n1.0\t0.0\t2.0\n");
        assert!(file.metadata.preamble.is_empty());
        assert_eq!(file.signal.len(), 1);
    }

    #[test]
    fn read_from_disk() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(EXPORT.as_bytes()).unwrap();
        let file = ChromatogramFile::read(temp.path()).unwrap();
        assert_eq!(file.signal.len(), 3);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        match ChromatogramFile::read(&path) {
            Err(ChromaError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected {:?}", other.map(|file| file.signal.len())),
        }
    }
}
