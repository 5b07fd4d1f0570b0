use std::io;
use std::path::PathBuf;

/// Errors returned by [`AvlTree`](crate::AvlTree) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The operation exists on the interface but the tree does not implement it.
    #[error("{operation} is not supported by this tree")]
    UnsupportedOperation { operation: &'static str },
}

/// Errors raised while building a [`Vocabulary`](crate::Vocabulary).
#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    #[error("failed to read vocabulary: {0}")]
    Io(#[from] io::Error),
    #[error("vocabulary source is not a readable file: {}", .0.display())]
    NotAFile(PathBuf),
}
