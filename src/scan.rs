//! Identifier reports over source text, checked against a [`Vocabulary`].
//!
//! Comments and string literals are blanked out first, then delimiters and
//! operators split the remaining code into tokens.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::VocabularyError;
use crate::vocabulary::{TokenClass, Vocabulary};

const DELIMITERS: &[char] = &[
    '{', '}', '(', ')', '[', ']', ',', '.', ';', '+', '-', '*', '/', '%', '=', '<', '>',
];

/// Identifiers found in a source, excluding reserved words and numbers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentifierReport {
    /// Valid identifiers and how often each occurs.
    pub valid: BTreeMap<String, usize>,
    /// Invalid identifiers and the distinct 1-based lines they occur on.
    pub invalid: BTreeMap<String, Vec<usize>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    Literal,
    BlockComment,
}

#[derive(Default)]
struct Stripper {
    in_block_comment: bool,
}

impl Stripper {
    // Keeps only the code of `line`; comments and literals become a single space.
    fn strip(&mut self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        let mut state = if self.in_block_comment {
            State::BlockComment
        } else {
            State::Code
        };
        let mut chars = line.chars().peekable();
        while let Some(ch) = chars.next() {
            match state {
                State::Code => match ch {
                    '"' => {
                        state = State::Literal;
                        out.push(' ');
                    }
                    '/' if chars.peek() == Some(&'/') => break,
                    '/' if chars.peek() == Some(&'*') => {
                        chars.next();
                        state = State::BlockComment;
                        out.push(' ');
                    }
                    _ => out.push(ch),
                },
                State::Literal => match ch {
                    '\\' => {
                        chars.next();
                    }
                    '"' => state = State::Code,
                    _ => {}
                },
                State::BlockComment => {
                    if ch == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        state = State::Code;
                    }
                }
            }
        }
        // Literals end with the line, block comments carry over
        self.in_block_comment = state == State::BlockComment;
        out
    }
}

fn tokens(code: &str) -> impl Iterator<Item = &str> {
    code.split(|ch: char| ch.is_whitespace() || DELIMITERS.contains(&ch))
        .filter(|token| !token.is_empty())
}

impl Vocabulary {
    /// Scans source text line by line and reports the identifiers it uses.
    ///
    /// Reserved words and numbers are skipped. Every other token is counted
    /// as valid or recorded as invalid with its line numbers.
    pub fn scan<R: BufRead>(&self, reader: R) -> Result<IdentifierReport, VocabularyError> {
        let mut report = IdentifierReport::default();
        let mut stripper = Stripper::default();
        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let code = stripper.strip(&line?);
            for token in tokens(&code) {
                match self.classify(token) {
                    TokenClass::Identifier => {
                        *report.valid.entry(token.to_owned()).or_insert(0) += 1;
                    }
                    TokenClass::Invalid => {
                        let lines = report.invalid.entry(token.to_owned()).or_default();
                        if lines.last() != Some(&line_number) {
                            lines.push(line_number);
                        }
                    }
                    TokenClass::Reserved | TokenClass::Number => {}
                }
            }
        }
        tracing::debug!(
            valid = report.valid.len(),
            invalid = report.invalid.len(),
            "source scanned"
        );
        Ok(report)
    }

    /// Scans the source stored at `path`, which must be a regular file.
    pub fn scan_file<P: AsRef<Path>>(&self, path: P) -> Result<IdentifierReport, VocabularyError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(VocabularyError::NotAFile(path.to_path_buf()));
        }
        let file = File::open(path)?;
        self.scan(BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYWORDS: &str = "class\nint\npublic\nreturn\nstatic\nvoid\nwhile\n";

    fn vocabulary() -> Vocabulary {
        Vocabulary::load(KEYWORDS.as_bytes()).unwrap()
    }

    fn valid(report: &IdentifierReport) -> Vec<(&str, usize)> {
        report
            .valid
            .iter()
            .map(|(token, count)| (token.as_str(), *count))
            .collect()
    }

    #[test]
    fn test_scan_counts_identifiers() {
        let source = "public class Counter {\n    int count = count + 1;\n}\n";
        let report = vocabulary().scan(source.as_bytes()).unwrap();
        assert_eq!(valid(&report), [("Counter", 1), ("count", 2)]);
        assert!(report.invalid.is_empty());
    }

    #[test]
    fn test_scan_line_comment() {
        let source = "int total = 0; // while bogus#name\n";
        let report = vocabulary().scan(source.as_bytes()).unwrap();
        assert_eq!(valid(&report), [("total", 1)]);
        assert!(report.invalid.is_empty());
    }

    #[test]
    fn test_scan_block_comment() {
        let source = "int a; /* starts here\n   bogus#name inside\nends */ int b;\n/* one line */ c\n";
        let report = vocabulary().scan(source.as_bytes()).unwrap();
        assert_eq!(valid(&report), [("a", 1), ("b", 1), ("c", 1)]);
        assert!(report.invalid.is_empty());
    }

    #[test]
    fn test_scan_string_literal() {
        let source = "print(\"while 2bad \\\" inner\");\nlabel = \"\";\n";
        let report = vocabulary().scan(source.as_bytes()).unwrap();
        assert_eq!(valid(&report), [("label", 1), ("print", 1)]);
        assert!(report.invalid.is_empty());
    }

    #[test]
    fn test_scan_comment_marker_inside_string() {
        let source = "url = \"http://host\"; next\n";
        let report = vocabulary().scan(source.as_bytes()).unwrap();
        assert_eq!(valid(&report), [("next", 1), ("url", 1)]);
    }

    #[test]
    fn test_scan_invalid_line_numbers() {
        let source = "int 2x = 2x + 1;\nreturn 3;\n2x = a#b;\n";
        let report = vocabulary().scan(source.as_bytes()).unwrap();
        assert_eq!(report.invalid.get("2x"), Some(&vec![1, 3]));
        assert_eq!(report.invalid.get("a#b"), Some(&vec![3]));
        assert_eq!(report.invalid.len(), 2);
        assert!(report.valid.is_empty());
    }

    #[test]
    fn test_scan_invalid_utf8() {
        let result = vocabulary().scan(&b"int a;\n\xff\n"[..]);
        assert!(matches!(result, Err(VocabularyError::Io(_))));
    }

    #[test]
    fn test_scan_file_rejects_directory() {
        let err = vocabulary().scan_file(std::env::temp_dir()).unwrap_err();
        assert!(matches!(err, VocabularyError::NotAFile(_)));
    }
}
