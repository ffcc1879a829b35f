//! ICAO Doc 9303 machine readable zone parsing.
//!
//! Lines already read from a passport, visa or ID card are classified into
//! one of the five MRZ layouts (TD1, TD2, TD3, MRV-A, MRV-B), split into named
//! fields and checked against their embedded check digits.
//!
//! ```
//! use mrzcheck::DocumentReader;
//!
//! let lines = [
//!     "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
//!     "L898902C36UTO7408122F1204159ZE184226B<<<<<10",
//! ];
//! let report = DocumentReader::new().read(&lines)?;
//! assert_eq!(report.record.get("doc_number"), Some("L898902C3"));
//! assert!(report.mrz_validation.is_valid);
//! # Ok::<(), mrzcheck::MrzError>(())
//! ```

pub mod models;
pub mod processing;
pub mod validation;
pub mod utils;
pub mod document_reader;

pub use document_reader::DocumentReader;
pub use models::{DocumentType, Field, MrzRecord, MrzReport, MrzValidationResult};
pub use processing::{classify, extract};
pub use utils::{MrzError, Result};
pub use validation::validate;
