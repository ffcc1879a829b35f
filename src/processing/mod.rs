pub mod classifier;
pub mod extractor;
pub mod grammar;

pub use classifier::{classify, DocumentClassifier};
pub use extractor::{extract, tokenize_names, FieldExtractor};
