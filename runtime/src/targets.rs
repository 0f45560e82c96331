//! Target list loading.
//!
//! One URL per line. Surrounding whitespace is trimmed; blank lines and lines
//! starting with `#` are skipped.

use crate::error::TargetsError;
use std::path::Path;

/// Parse target list text into URLs, preserving order.
pub fn parse_targets(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Read and parse the target list at `path`.
///
/// A missing file and a file without any URL are reported as distinct errors
/// so the operator gets a precise message instead of an empty report.
pub fn load_targets(path: &Path) -> Result<Vec<String>, TargetsError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(TargetsError::NotFound(path.to_path_buf()))
        }
        Err(source) => {
            return Err(TargetsError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let targets = parse_targets(&text);
    if targets.is_empty() {
        return Err(TargetsError::Empty(path.to_path_buf()));
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let text = "# internal systems\nhttps://a.example\n\n   \nhttps://b.example/api  \n#https://c.example\n";
        assert_eq!(
            parse_targets(text),
            vec!["https://a.example", "https://b.example/api"]
        );
    }

    #[test]
    fn test_parse_handles_crlf() {
        assert_eq!(
            parse_targets("https://a.example\r\nhttps://b.example\r\n"),
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_targets(&dir.path().join("urls.txt")).unwrap_err();
        assert!(matches!(err, TargetsError::NotFound(_)));
    }

    #[test]
    fn test_load_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.txt");
        std::fs::write(&path, "# nothing yet\n\n").unwrap();
        assert!(matches!(load_targets(&path), Err(TargetsError::Empty(_))));
    }

    #[test]
    fn test_load_ok() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.txt");
        std::fs::write(&path, "https://a.example\n").unwrap();
        assert_eq!(load_targets(&path).unwrap(), vec!["https://a.example"]);
    }
}
