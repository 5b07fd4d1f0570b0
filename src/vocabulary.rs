//! A vocabulary of reserved words backed by an [`AvlTree`].
//!
//! Words are loaded one per line from any [`BufRead`] source and queried
//! through [`Vocabulary::is_reserved`] or [`Vocabulary::classify`].

use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::VocabularyError;
use crate::tree::{AvlTree, Order};

/// Settings applied while loading words.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Skip lines that are empty after trimming instead of inserting `""`.
    pub skip_blank_lines: bool,
}

/// How a token relates to a vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// The token is one of the vocabulary's words.
    Reserved,
    /// Not reserved, and a syntactically valid identifier.
    Identifier,
    /// Not reserved, and contains no alphabetic characters.
    Number,
    /// Anything else, including the empty token.
    Invalid,
}

/// A set of reserved words.
///
/// ```
/// use avl_vocab::{TokenClass, Vocabulary};
/// let vocabulary = Vocabulary::load("while\nfor\n  if \n".as_bytes()).unwrap();
/// assert!(vocabulary.is_reserved("if"));
/// assert_eq!(vocabulary.classify("index"), TokenClass::Identifier);
/// assert_eq!(vocabulary.render(avl_vocab::Order::Inorder), "for if while ");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
    words: AvlTree<String>,
    options: LoadOptions,
}

impl Vocabulary {
    /// Creates an empty vocabulary with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty vocabulary that loads words with the given options.
    pub fn with_options(options: LoadOptions) -> Self {
        Self {
            words: AvlTree::new(),
            options,
        }
    }

    /// Reads one word per line, in order, with default options.
    pub fn load<R: BufRead>(reader: R) -> Result<Self, VocabularyError> {
        Self::load_with(reader, LoadOptions::default())
    }

    /// Reads one word per line, in order, with the given options.
    pub fn load_with<R: BufRead>(reader: R, options: LoadOptions) -> Result<Self, VocabularyError> {
        let mut vocabulary = Self::with_options(options);
        let mut num_lines = 0usize;
        for line in reader.lines() {
            vocabulary.insert(&line?);
            num_lines += 1;
        }
        tracing::debug!(
            lines = num_lines,
            words = vocabulary.len(),
            "vocabulary loaded"
        );
        Ok(vocabulary)
    }

    /// Loads the vocabulary stored at `path` with default options.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, VocabularyError> {
        Self::open_with(path, LoadOptions::default())
    }

    /// Loads the vocabulary stored at `path`, which must be a regular file.
    pub fn open_with<P: AsRef<Path>>(path: P, options: LoadOptions) -> Result<Self, VocabularyError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(VocabularyError::NotAFile(path.to_path_buf()));
        }
        tracing::debug!(path = %path.display(), "opening vocabulary");
        let file = File::open(path)?;
        Self::load_with(BufReader::new(file), options)
    }

    /// Trims and inserts a word.
    /// Returns whether the word was new.
    pub fn insert(&mut self, word: &str) -> bool {
        let word = word.trim();
        if word.is_empty() && self.options.skip_blank_lines {
            return false;
        }
        self.words.insert(word.to_owned())
    }

    /// Returns true if `token` is one of the vocabulary's words.
    pub fn is_reserved(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Classifies a token against the vocabulary and identifier syntax.
    pub fn classify(&self, token: &str) -> TokenClass {
        if self.is_reserved(token) {
            TokenClass::Reserved
        } else if is_identifier(token) {
            TokenClass::Identifier
        } else if !token.is_empty() && is_number(token) {
            TokenClass::Number
        } else {
            TokenClass::Invalid
        }
    }

    /// Renders the words in the given order, each followed by a single space.
    pub fn render(&self, order: Order) -> String {
        render(self.words.traverse(order))
    }

    /// Returns the number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the vocabulary holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns the options words were loaded with.
    pub fn options(&self) -> LoadOptions {
        self.options
    }

    /// Returns the underlying tree.
    pub fn tree(&self) -> &AvlTree<String> {
        &self.words
    }
}

/// Joins elements with a trailing space after each one.
pub fn render<I>(elements: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut out = String::new();
    for element in elements {
        out.push_str(&element.to_string());
        out.push(' ');
    }
    out
}

/// Returns true if `token` starts with a letter, `_` or `$` and continues
/// with letters, digits, `_` or `$`.
pub fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '$')
        }
        _ => false,
    }
}

/// Returns true if `token` contains no alphabetic characters.
pub fn is_number(token: &str) -> bool {
    !token.chars().any(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYWORDS: &str = "abstract\n  class\nwhile \nfor\nif\nint\n\nclass\n";

    #[test]
    fn test_load_trims_and_dedups() {
        let vocabulary = Vocabulary::load(KEYWORDS.as_bytes()).unwrap();
        // The blank line is kept as "" and "class" appears twice
        assert_eq!(vocabulary.len(), 7);
        assert!(vocabulary.is_reserved("class"));
        assert!(vocabulary.is_reserved(""));
        assert!(!vocabulary.is_reserved("  class"));
        vocabulary.tree().check_consistency();
    }

    #[test]
    fn test_load_skip_blank_lines() {
        let options = LoadOptions {
            skip_blank_lines: true,
        };
        let vocabulary = Vocabulary::load_with(KEYWORDS.as_bytes(), options).unwrap();
        assert_eq!(vocabulary.len(), 6);
        assert!(!vocabulary.is_reserved(""));
        assert_eq!(vocabulary.options(), options);
    }

    #[test]
    fn test_classify() {
        let vocabulary = Vocabulary::load("int\nwhile\n".as_bytes()).unwrap();
        assert_eq!(vocabulary.classify("while"), TokenClass::Reserved);
        assert_eq!(vocabulary.classify("count"), TokenClass::Identifier);
        assert_eq!(vocabulary.classify("_tmp$1"), TokenClass::Identifier);
        assert_eq!(vocabulary.classify("42"), TokenClass::Number);
        assert_eq!(vocabulary.classify("3.14"), TokenClass::Number);
        assert_eq!(vocabulary.classify("2fast"), TokenClass::Invalid);
        assert_eq!(vocabulary.classify("a#b"), TokenClass::Invalid);
        assert_eq!(vocabulary.classify(""), TokenClass::Invalid);
    }

    #[test]
    fn test_identifier_and_number() {
        assert!(is_identifier("x"));
        assert!(is_identifier("$value"));
        assert!(!is_identifier("9lives"));
        assert!(!is_identifier(""));
        assert!(!is_number("0x"));
        assert!(is_number("1234"));
        assert!(!is_number("12ab"));
    }

    #[test]
    fn test_render() {
        let vocabulary = Vocabulary::load("def\nabc\nxyz\n".as_bytes()).unwrap();
        assert_eq!(vocabulary.render(Order::Inorder), "abc def xyz ");
        assert_eq!(vocabulary.render(Order::Preorder), "def abc xyz ");
        assert_eq!(vocabulary.render(Order::Postorder), "abc xyz def ");
        assert_eq!(Vocabulary::new().render(Order::Inorder), "");
        assert_eq!(render([1, 2]), "1 2 ");
    }

    #[test]
    fn test_load_invalid_utf8() {
        let result = Vocabulary::load(&b"for\n\xff\xfe\nwhile\n"[..]);
        assert!(matches!(result, Err(VocabularyError::Io(_))));
    }

    #[test]
    fn test_insert_after_load() {
        let mut vocabulary = Vocabulary::new();
        assert!(vocabulary.is_empty());
        assert!(vocabulary.insert(" goto "));
        assert!(!vocabulary.insert("goto"));
        assert!(vocabulary.is_reserved("goto"));
    }

    #[test]
    fn test_open_rejects_missing_file() {
        let path = std::env::temp_dir().join("avl-vocab-does-not-exist.txt");
        let err = Vocabulary::open(&path).unwrap_err();
        assert!(matches!(err, VocabularyError::NotAFile(p) if p == path));

        let err = Vocabulary::open(std::env::temp_dir()).unwrap_err();
        assert!(matches!(err, VocabularyError::NotAFile(_)));
    }

    #[test]
    fn test_open_file() {
        let path = std::env::temp_dir().join(format!("avl-vocab-{}.txt", std::process::id()));
        std::fs::write(&path, "public\nstatic\nvoid\n").unwrap();
        let vocabulary = Vocabulary::open(&path);
        std::fs::remove_file(&path).unwrap();

        let vocabulary = vocabulary.unwrap();
        assert_eq!(vocabulary.render(Order::Inorder), "public static void ");
    }
}
