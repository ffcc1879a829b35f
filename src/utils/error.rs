use thiserror::Error;

use crate::models::DocumentType;

#[derive(Debug, Error)]
pub enum MrzError {
    #[error("{0} is not a valid number of lines, expecting 2 or 3 lines")]
    InvalidLineCount(usize),

    #[error("All lines must have same length: line #{line} has {found} characters, expected {expected}")]
    InconsistentLineLength {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Unknown document type for {lines} lines of {length} characters")]
    UnknownDocumentType { lines: usize, length: usize },

    #[error("Line #{line} does not match the {document_type} grammar at column {column}: {content}")]
    GrammarMismatch {
        document_type: DocumentType,
        line: usize,
        column: usize,
        content: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, MrzError>;
