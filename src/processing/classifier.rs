use log::debug;

use crate::models::DocumentType;

/// Maps line count and width to one of the ICAO layouts
pub struct DocumentClassifier;

impl DocumentClassifier {
    /// Classify already well-formed MRZ lines.
    ///
    /// The caller is expected to have checked the line count and that every
    /// line has the same width; anything unrecognised comes back as `Unknown`.
    pub fn classify<S: AsRef<str>>(lines: &[S]) -> DocumentType {
        let first = match lines.first() {
            Some(line) => line.as_ref(),
            None => return DocumentType::Unknown,
        };
        let length = first.chars().count();
        let leading = first.chars().next();

        let document_type = match (lines.len(), length) {
            (3, 30) => DocumentType::TD1,
            (2, 44) if leading == Some('P') => DocumentType::TD3,
            (2, 44) => DocumentType::MRVA,
            (2, 36) if leading == Some('V') => DocumentType::MRVB,
            (2, 36) => DocumentType::TD2,
            _ => DocumentType::Unknown,
        };

        debug!(
            "Classified {} line(s) of {} characters as {}",
            lines.len(),
            length,
            document_type
        );
        document_type
    }
}

pub fn classify<S: AsRef<str>>(lines: &[S]) -> DocumentType {
    DocumentClassifier::classify(lines)
}
