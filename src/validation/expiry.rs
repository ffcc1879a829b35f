use chrono::{Datelike, NaiveDate};
use log::warn;

use crate::models::{ExpiryValidationResult, MrzRecord, ValidationIssue, ValidationIssueType};

pub struct ExpiryValidator;

impl ExpiryValidator {
    /// Interpret the YYMMDD dates of a record and check expiry against `today`
    pub fn validate(record: &MrzRecord, today: NaiveDate) -> ExpiryValidationResult {
        let mut issues = Vec::new();

        let date_of_birth = record
            .get("birth_date")
            .and_then(|value| Self::parse_birth_date(value, today));
        if date_of_birth.is_none() {
            issues.push(ValidationIssue {
                issue_type: ValidationIssueType::Expiry,
                message: "Invalid date of birth".to_string(),
            });
        }

        let date_of_expiry = record
            .get("expiry_date")
            .and_then(|value| Self::parse_expiry_date(value, today));

        let mut not_expired = false;
        match date_of_expiry {
            Some(date) => {
                // Check if document is expired
                not_expired = date >= today;
                if !not_expired {
                    warn!("Document expired on {}", date);
                    issues.push(ValidationIssue {
                        issue_type: ValidationIssueType::Expiry,
                        message: format!("Document expired on {}", date),
                    });
                }
            }
            None => issues.push(ValidationIssue {
                issue_type: ValidationIssueType::Expiry,
                message: "Invalid expiry date format".to_string(),
            }),
        }

        ExpiryValidationResult {
            is_valid: issues.is_empty(),
            not_expired,
            date_of_birth,
            date_of_expiry,
            issues,
        }
    }

    /// A birth date is never in the future: `740812` read in 2026 is 1974,
    /// `180101` is 2018
    pub fn parse_birth_date(yymmdd: &str, today: NaiveDate) -> Option<NaiveDate> {
        let (yy, month, day) = Self::split_date(yymmdd)?;
        let century = today.year() / 100 * 100;
        match NaiveDate::from_ymd_opt(century + yy, month, day) {
            Some(date) if date <= today => Some(date),
            _ => NaiveDate::from_ymd_opt(century - 100 + yy, month, day),
        }
    }

    /// Expiry dates are read in the current century
    pub fn parse_expiry_date(yymmdd: &str, today: NaiveDate) -> Option<NaiveDate> {
        let (yy, month, day) = Self::split_date(yymmdd)?;
        NaiveDate::from_ymd_opt(today.year() / 100 * 100 + yy, month, day)
    }

    // Split "YYMMDD" into its numeric parts
    fn split_date(yymmdd: &str) -> Option<(i32, u32, u32)> {
        if yymmdd.len() != 6 || !yymmdd.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let yy = yymmdd[0..2].parse::<i32>().ok()?;
        let month = yymmdd[2..4].parse::<u32>().ok()?;
        let day = yymmdd[4..6].parse::<u32>().ok()?;
        Some((yy, month, day))
    }
}
