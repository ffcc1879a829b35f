use log::{debug, info};

use crate::models::{DocumentType, MrzRecord, MrzReport};
use crate::processing::{DocumentClassifier, FieldExtractor};
use crate::utils::{MrzError, Result};
use crate::validation::MrzValidator;

/// DocumentReader runs classification, field extraction and check digit
/// validation over one set of MRZ lines
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentReader;

impl DocumentReader {
    pub fn new() -> Self {
        DocumentReader
    }

    // Main read function that orchestrates the entire process
    pub fn read<S: AsRef<str>>(&self, lines: &[S]) -> Result<MrzReport> {
        // Step 1: Reject malformed input before anything else
        Self::ensure_well_formed(lines)?;

        // Step 2: Determine the layout
        let document_type = DocumentClassifier::classify(lines);
        if document_type == DocumentType::Unknown {
            return Err(MrzError::UnknownDocumentType {
                lines: lines.len(),
                length: lines[0].as_ref().chars().count(),
            });
        }
        info!("Document Type: {}", document_type);

        // Step 3: Extract fields
        let fields = FieldExtractor::extract(document_type, lines)?;

        // Step 4: Verify check digits, independently of the extracted fields
        let mrz_validation = MrzValidator::validate(document_type, lines);
        debug!(
            "{} document read, check digits {}",
            document_type,
            if mrz_validation.is_valid { "OK" } else { "NOK" }
        );

        Ok(MrzReport {
            record: MrzRecord {
                document_type,
                fields,
            },
            mrz_validation,
        })
    }

    /// Line count must be 2 or 3 and every line must have the width of the
    /// first one
    pub fn ensure_well_formed<S: AsRef<str>>(lines: &[S]) -> Result<()> {
        if lines.len() != 2 && lines.len() != 3 {
            return Err(MrzError::InvalidLineCount(lines.len()));
        }

        let expected = lines[0].as_ref().chars().count();
        for (index, line) in lines.iter().enumerate().skip(1) {
            let found = line.as_ref().chars().count();
            if found != expected {
                return Err(MrzError::InconsistentLineLength {
                    line: index,
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }

    /// Split text into MRZ lines, dropping CR/LF and blank lines
    pub fn lines_from_text(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}
