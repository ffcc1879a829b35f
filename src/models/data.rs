use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// ICAO Doc 9303 MRZ layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DocumentType {
    Unknown,
    TD1,  // ID Card (85.6mm × 54.0mm)
    TD2,  // ID Card (105.0mm × 74.0mm)
    TD3,  // Passport (125.0mm × 88.0mm)
    MRVA, // Visa Format-A (80.0mm × 120.0mm)
    MRVB, // Visa Format-B (74.0mm × 105.0mm)
}

impl DocumentType {
    pub fn dimensions(&self) -> Option<(f32, f32)> {
        match self {
            DocumentType::Unknown => None,
            DocumentType::TD1 => Some((85.6, 54.0)),   // mm
            DocumentType::TD2 => Some((105.0, 74.0)),  // mm
            DocumentType::TD3 => Some((125.0, 88.0)),  // mm
            DocumentType::MRVA => Some((80.0, 120.0)), // mm
            DocumentType::MRVB => Some((74.0, 105.0)), // mm
        }
    }

    pub fn mrz_lines(&self) -> usize {
        match self {
            DocumentType::Unknown => 0,
            DocumentType::TD1 => 3,
            DocumentType::TD2 => 2,
            DocumentType::TD3 => 2,
            DocumentType::MRVA => 2,
            DocumentType::MRVB => 2,
        }
    }

    pub fn mrz_chars_per_line(&self) -> usize {
        match self {
            DocumentType::Unknown => 0,
            DocumentType::TD1 => 30,
            DocumentType::TD2 => 36,
            DocumentType::TD3 => 44,
            DocumentType::MRVA => 44,
            DocumentType::MRVB => 36,
        }
    }

    pub fn is_visa(&self) -> bool {
        matches!(self, DocumentType::MRVA | DocumentType::MRVB)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            DocumentType::Unknown => "Unknown",
            DocumentType::TD1 => "TD1",
            DocumentType::TD2 => "TD2",
            DocumentType::TD3 => "TD3",
            DocumentType::MRVA => "MRVA",
            DocumentType::MRVB => "MRVB",
        };
        f.write_str(name)
    }
}

/// A named MRZ field. The value is the raw column content, fillers included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub value: String,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Field {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Fields of one document, in line/column order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MrzRecord {
    pub document_type: DocumentType,
    pub fields: Vec<Field>,
}

impl MrzRecord {
    /// First field with the given name. `hash` appears several times per
    /// record; use `iter` to see all of them.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn surname(&self) -> Option<&str> {
        self.get("surname")
    }

    pub fn given_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|field| field.name.starts_with("given_name_"))
            .map(|field| field.value.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub issue_type: ValidationIssueType,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValidationIssueType {
    Mrz,
    Expiry,
}

/// Check digit outcome for one document.
///
/// `personal_number_check_valid` is only present for TD3 and
/// `composite_check_valid` is absent for visas, which carry no composite digit.
/// For TD1 the composite is the "upper and middle lines" check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MrzValidationResult {
    pub document_type: DocumentType,
    pub is_valid: bool,
    pub document_number_check_valid: bool,
    pub date_of_birth_check_valid: bool,
    pub date_of_expiry_check_valid: bool,
    pub personal_number_check_valid: Option<bool>,
    pub composite_check_valid: Option<bool>,
    pub issues: Vec<ValidationIssue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpiryValidationResult {
    pub is_valid: bool,
    pub not_expired: bool,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_expiry: Option<NaiveDate>,
    pub issues: Vec<ValidationIssue>,
}

/// Everything the reader learns from one set of MRZ lines
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MrzReport {
    pub record: MrzRecord,
    pub mrz_validation: MrzValidationResult,
}
