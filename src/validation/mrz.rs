use log::{debug, warn};

use crate::models::{DocumentType, MrzValidationResult, ValidationIssue, ValidationIssueType};
use crate::validation::check_digit::{DigitCheck, Span};

// Column ranges are inclusive and 0-indexed

const TD1_DOCUMENT_NUMBER: DigitCheck = DigitCheck {
    spans: &[Span::new(0, 5, 13, 0)],
    line: 0,
    column: 14,
};
const TD1_DATE_OF_BIRTH: DigitCheck = DigitCheck {
    spans: &[Span::new(1, 0, 5, 0)],
    line: 1,
    column: 6,
};
const TD1_DATE_OF_EXPIRY: DigitCheck = DigitCheck {
    spans: &[Span::new(1, 8, 13, 0)],
    line: 1,
    column: 14,
};
const TD1_UPPER_AND_MIDDLE_LINES: DigitCheck = DigitCheck {
    spans: &[
        Span::new(0, 5, 29, 0),
        Span::new(1, 0, 6, 25),
        Span::new(1, 8, 14, 32),
        Span::new(1, 18, 28, 39),
    ],
    line: 1,
    column: 29,
};

// TD2, TD3 and both visa formats share the line 1 layout up to the expiry date
const DOCUMENT_NUMBER: DigitCheck = DigitCheck {
    spans: &[Span::new(1, 0, 8, 0)],
    line: 1,
    column: 9,
};
const DATE_OF_BIRTH: DigitCheck = DigitCheck {
    spans: &[Span::new(1, 13, 18, 0)],
    line: 1,
    column: 19,
};
const DATE_OF_EXPIRY: DigitCheck = DigitCheck {
    spans: &[Span::new(1, 21, 26, 0)],
    line: 1,
    column: 27,
};

const TD2_COMPOSITE: DigitCheck = DigitCheck {
    spans: &[
        Span::new(1, 0, 9, 0),
        Span::new(1, 13, 19, 10),
        Span::new(1, 21, 34, 17),
    ],
    line: 1,
    column: 35,
};

const TD3_PERSONAL_NUMBER: DigitCheck = DigitCheck {
    spans: &[Span::new(1, 28, 41, 0)],
    line: 1,
    column: 42,
};
const TD3_COMPOSITE: DigitCheck = DigitCheck {
    spans: &[
        Span::new(1, 0, 9, 0),
        Span::new(1, 13, 19, 10),
        Span::new(1, 21, 42, 17),
    ],
    line: 1,
    column: 43,
};

/// The checks protecting one layout
struct LayoutChecks {
    document_number: DigitCheck,
    date_of_birth: DigitCheck,
    date_of_expiry: DigitCheck,
    personal_number: Option<DigitCheck>,
    composite: Option<DigitCheck>,
}

fn layout_checks(document_type: DocumentType) -> Option<LayoutChecks> {
    match document_type {
        DocumentType::Unknown => None,
        DocumentType::TD1 => Some(LayoutChecks {
            document_number: TD1_DOCUMENT_NUMBER,
            date_of_birth: TD1_DATE_OF_BIRTH,
            date_of_expiry: TD1_DATE_OF_EXPIRY,
            personal_number: None,
            composite: Some(TD1_UPPER_AND_MIDDLE_LINES),
        }),
        DocumentType::TD2 => Some(LayoutChecks {
            document_number: DOCUMENT_NUMBER,
            date_of_birth: DATE_OF_BIRTH,
            date_of_expiry: DATE_OF_EXPIRY,
            personal_number: None,
            composite: Some(TD2_COMPOSITE),
        }),
        DocumentType::TD3 => Some(LayoutChecks {
            document_number: DOCUMENT_NUMBER,
            date_of_birth: DATE_OF_BIRTH,
            date_of_expiry: DATE_OF_EXPIRY,
            personal_number: Some(TD3_PERSONAL_NUMBER),
            composite: Some(TD3_COMPOSITE),
        }),
        DocumentType::MRVA | DocumentType::MRVB => Some(LayoutChecks {
            document_number: DOCUMENT_NUMBER,
            date_of_birth: DATE_OF_BIRTH,
            date_of_expiry: DATE_OF_EXPIRY,
            personal_number: None,
            composite: None,
        }),
    }
}

pub struct MrzValidator;

impl MrzValidator {
    /// Recompute every check digit of the layout.
    ///
    /// Never fails: a mismatch, or a column missing from malformed input, is a
    /// `false` flag plus an issue. Each check is computed independently.
    pub fn validate<S: AsRef<str>>(document_type: DocumentType, lines: &[S]) -> MrzValidationResult {
        let mut issues = Vec::new();

        let checks = match layout_checks(document_type) {
            Some(checks) => checks,
            None => {
                issues.push(ValidationIssue {
                    issue_type: ValidationIssueType::Mrz,
                    message: "Unknown document type, no check digits to verify".to_string(),
                });
                return MrzValidationResult {
                    document_type,
                    is_valid: false,
                    document_number_check_valid: false,
                    date_of_birth_check_valid: false,
                    date_of_expiry_check_valid: false,
                    personal_number_check_valid: None,
                    composite_check_valid: None,
                    issues,
                };
            }
        };

        let lines: Vec<Vec<char>> = lines.iter().map(|line| line.as_ref().chars().collect()).collect();
        let mut run = |label: &str, check: &DigitCheck| {
            let valid = check.verify(&lines);
            debug!("{} check digit: {}", label, if valid { "OK" } else { "NOK" });
            if !valid {
                warn!("{} check digit mismatch on {} document", label, document_type);
                issues.push(ValidationIssue {
                    issue_type: ValidationIssueType::Mrz,
                    message: format!("{} check digit mismatch", label),
                });
            }
            valid
        };

        // Step 1: Document (passport) number
        let document_number_label = if document_type == DocumentType::TD3 {
            "Passport number"
        } else {
            "Document number"
        };
        let document_number_check_valid = run(document_number_label, &checks.document_number);

        // Step 2: Dates
        let date_of_birth_check_valid = run("Date of birth", &checks.date_of_birth);
        let date_of_expiry_check_valid = run("Date of expiry", &checks.date_of_expiry);

        // Step 3: Optional checks depending on the layout
        let personal_number_check_valid = checks
            .personal_number
            .as_ref()
            .map(|check| run("Personal number", check));

        let composite_label = if document_type == DocumentType::TD1 {
            "Upper and middle lines"
        } else {
            "Composite"
        };
        let composite_check_valid = checks
            .composite
            .as_ref()
            .map(|check| run(composite_label, check));

        let is_valid = document_number_check_valid
            && date_of_birth_check_valid
            && date_of_expiry_check_valid
            && personal_number_check_valid.unwrap_or(true)
            && composite_check_valid.unwrap_or(true);

        MrzValidationResult {
            document_type,
            is_valid,
            document_number_check_valid,
            date_of_birth_check_valid,
            date_of_expiry_check_valid,
            personal_number_check_valid,
            composite_check_valid,
            issues,
        }
    }
}

pub fn validate<S: AsRef<str>>(document_type: DocumentType, lines: &[S]) -> MrzValidationResult {
    MrzValidator::validate(document_type, lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TD1: [&str; 3] = [
        "I<UTOD231458907<<<<<<<<<<<<<<<",
        "7408122F1204159UTO<<<<<<<<<<<6",
        "ERIKSSON<<ANNA<MARIA<<<<<<<<<<",
    ];
    const TD2: [&str; 2] = [
        "I<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<",
        "D231458907UTO7408122F1204159<<<<<<<6",
    ];
    const TD3: [&str; 2] = [
        "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
        "L898902C36UTO7408122F1204159ZE184226B<<<<<10",
    ];
    const MRVA: [&str; 2] = [
        "V<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
        "L8988901C4XXX4009078F96121096ZE184226B<<<<<<",
    ];
    const MRVB: [&str; 2] = [
        "V<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<",
        "L8988901C4XXX4009078F9612109<<<<<<<<",
    ];

    fn replace_char(line: &str, column: usize, c: char) -> String {
        line.chars()
            .enumerate()
            .map(|(i, old)| if i == column { c } else { old })
            .collect()
    }

    #[test]
    fn test_td1_valid() {
        let result = validate(DocumentType::TD1, &TD1);
        assert!(result.is_valid);
        assert!(result.document_number_check_valid);
        assert!(result.date_of_birth_check_valid);
        assert!(result.date_of_expiry_check_valid);
        assert_eq!(result.personal_number_check_valid, None);
        assert_eq!(result.composite_check_valid, Some(true));
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_td1_composite_with_optional_data() {
        // The weight cycle runs on uninterrupted through the optional data of
        // the middle line
        let lines = [TD1[0], "7408122F1204159UTOAB12<<<<<<<4", TD1[2]];
        let result = validate(DocumentType::TD1, &lines);
        assert_eq!(result.composite_check_valid, Some(true));

        let lines = [TD1[0], "7408122F1204159UTOAB12<<<<<<<0", TD1[2]];
        let result = validate(DocumentType::TD1, &lines);
        assert_eq!(result.composite_check_valid, Some(false));
        assert!(result.document_number_check_valid);
    }

    #[test]
    fn test_td2_valid() {
        let result = validate(DocumentType::TD2, &TD2);
        assert!(result.is_valid);
        assert_eq!(result.composite_check_valid, Some(true));
        assert_eq!(result.personal_number_check_valid, None);
    }

    #[test]
    fn test_td3_valid() {
        let result = validate(DocumentType::TD3, &TD3);
        assert!(result.is_valid);
        assert!(result.document_number_check_valid);
        assert!(result.date_of_birth_check_valid);
        assert!(result.date_of_expiry_check_valid);
        assert_eq!(result.personal_number_check_valid, Some(true));
        assert_eq!(result.composite_check_valid, Some(true));
    }

    #[test]
    fn test_visas_valid() {
        for (document_type, lines) in [(DocumentType::MRVA, MRVA), (DocumentType::MRVB, MRVB)] {
            let result = validate(document_type, &lines);
            assert!(result.is_valid, "{} should be valid", document_type);
            assert_eq!(result.personal_number_check_valid, None);
            assert_eq!(result.composite_check_valid, None);
        }
    }

    #[test]
    fn test_document_number_mutation() {
        // "L898902C3" -> "L898912C3" without touching the check digit
        let lines = [TD3[0].to_string(), replace_char(TD3[1], 5, '1')];
        let result = validate(DocumentType::TD3, &lines);

        assert!(!result.document_number_check_valid);
        assert!(result.date_of_birth_check_valid);
        assert!(result.date_of_expiry_check_valid);
        assert_eq!(result.personal_number_check_valid, Some(true));
        // The composite covers the document number as well
        assert_eq!(result.composite_check_valid, Some(false));
        assert!(!result.is_valid);
        assert_eq!(result.issues.len(), 2);
        assert_eq!(result.issues[0].message, "Passport number check digit mismatch");
    }

    #[test]
    fn test_td1_document_number_mutation() {
        let lines = [replace_char(TD1[0], 7, '4'), TD1[1].to_string(), TD1[2].to_string()];
        let result = validate(DocumentType::TD1, &lines);
        assert!(!result.document_number_check_valid);
        assert!(result.date_of_birth_check_valid);
        assert!(result.date_of_expiry_check_valid);
        assert_eq!(result.issues[0].message, "Document number check digit mismatch");
    }

    #[test]
    fn test_filler_check_digit_is_zero() {
        // An all-filler document number has check value 0, and `<` in the
        // check column also reads as 0
        let line: String = "<<<<<<<<<<".chars().chain(MRVB[1].chars().skip(10)).collect();
        let lines = [MRVB[0].to_string(), line];
        let result = validate(DocumentType::MRVB, &lines);
        assert!(result.document_number_check_valid);
        assert!(result.date_of_birth_check_valid);
    }

    #[test]
    fn test_short_lines_do_not_panic() {
        let lines = ["P<UTO", "L898902C36"];
        let result = validate(DocumentType::TD3, &lines);
        assert!(result.document_number_check_valid);
        assert!(!result.date_of_birth_check_valid);
        assert!(!result.date_of_expiry_check_valid);
        assert_eq!(result.personal_number_check_valid, Some(false));
        assert_eq!(result.composite_check_valid, Some(false));
    }

    #[test]
    fn test_unknown_type() {
        let result = validate(DocumentType::Unknown, &TD3);
        assert!(!result.is_valid);
        assert!(!result.document_number_check_valid);
        assert_eq!(result.issues.len(), 1);
    }
}
