use crate::error::TrainError;
use anyhow::Result;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read one corpus entry per line. Lines that are not valid UTF-8 are rejected.
pub fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for (ix, raw) in reader.split(b'\n').enumerate() {
        let line = String::from_utf8(raw?)
            .map_err(|_| TrainError::MalformedCorpusLine { line_number: ix + 1 })?;
        lines.push(line);
    }
    Ok(lines)
}

/// Split a single text into corpus entries on `delimiter`.
pub fn split_corpus(text: &str, delimiter: &str) -> Vec<String> {
    text.split(delimiter).map(str::to_string).collect()
}

/// Load a corpus file, splitting on `delimiter` when given and on newlines otherwise.
pub fn load_corpus(path: &Path, delimiter: Option<&str>) -> Result<Vec<String>> {
    match delimiter {
        None => read_lines(BufReader::new(File::open(path)?)),
        Some(delimiter) => {
            let bytes = std::fs::read(path)?;
            let text = String::from_utf8(bytes).map_err(|e| {
                let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
                let line_number = valid.iter().filter(|&&b| b == b'\n').count() + 1;
                TrainError::MalformedCorpusLine { line_number }
            })?;
            Ok(split_corpus(&text, delimiter))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_lines() {
        let lines = read_lines(Cursor::new("low\nlower\r\nnewest")).unwrap();
        assert_eq!(lines, vec!["low", "lower\r", "newest"]);
    }

    #[test]
    fn test_read_lines_rejects_invalid_utf8() {
        let err = read_lines(Cursor::new(b"ok\n\xff\xfe\n".to_vec())).unwrap_err();
        let err = err.downcast::<TrainError>().unwrap();
        assert!(matches!(err, TrainError::MalformedCorpusLine { line_number: 2 }));
    }

    #[test]
    fn test_split_corpus_reference() {
        let lines = split_corpus("crazy_, hazy_, day_", ",");
        assert_eq!(lines, vec!["crazy_", " hazy_", " day_"]);
    }

    #[test]
    fn test_load_corpus_with_delimiter() {
        let path = std::env::temp_dir().join("pmi_bpe_test_load_corpus.txt");
        std::fs::write(&path, "crazy_, hazy_, day_").unwrap();
        let lines = load_corpus(&path, Some(",")).unwrap();
        assert_eq!(lines.len(), 3);
        let lines = load_corpus(&path, None).unwrap();
        assert_eq!(lines, vec!["crazy_, hazy_, day_"]);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_corpus_missing_file() {
        let path = std::env::temp_dir().join("pmi_bpe_test_does_not_exist.txt");
        assert!(load_corpus(&path, None).is_err());
    }
}
