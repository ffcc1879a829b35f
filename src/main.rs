// Command line front-end for MRZ parsing and validation

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;

use mrzcheck::{
    models::{DocumentType, ExpiryValidationResult, MrzRecord, MrzValidationResult},
    processing::{DocumentClassifier, FieldExtractor},
    validation::{ExpiryValidator, MrzValidator},
    DocumentReader, MrzError, Result,
};

/// Parse and validate ICAO Doc 9303 machine readable zones.
///
/// FILE holds one MRZ line per text line (2 or 3 lines).
#[derive(Parser, Debug)]
#[command(name = "mrzcheck", version, about)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify the lines and print the extracted fields
    Parse { file: PathBuf },
    /// Verify the check digits
    Validate { file: PathBuf },
    /// Fields, check digits and expiry in one report
    Check {
        file: PathBuf,
        /// Reference date for the expiry check (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<String>,
    },
}

#[derive(Serialize)]
struct CheckReport<'a> {
    record: &'a MrzRecord,
    mrz_validation: &'a MrzValidationResult,
    expiry_validation: &'a ExpiryValidationResult,
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    let lines = DocumentReader::lines_from_text(&text);
    for (i, line) in lines.iter().enumerate() {
        info!("Line #{}: {} [{}]", i, line, line.chars().count());
    }
    DocumentReader::ensure_well_formed(&lines)?;
    Ok(lines)
}

fn classify(lines: &[String]) -> Result<DocumentType> {
    match DocumentClassifier::classify(lines) {
        DocumentType::Unknown => Err(MrzError::UnknownDocumentType {
            lines: lines.len(),
            length: lines[0].chars().count(),
        }),
        document_type => Ok(document_type),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| MrzError::Io(e.into()))?;
    println!("{}", json);
    Ok(())
}

fn status(valid: bool) -> &'static str {
    if valid {
        "OK"
    } else {
        "**NOK**"
    }
}

fn print_record(record: &MrzRecord) {
    println!("=========================");
    println!("=== Document Type: {} ===", record.document_type);
    for field in record.iter() {
        println!("{}:\t{}", field.name, field.value);
    }
    println!("=========================");
}

fn print_mrz_validation(result: &MrzValidationResult) {
    println!("CHECK DIGITS:");
    let document_number = if result.document_type == DocumentType::TD3 {
        "Passport number"
    } else {
        "Document number"
    };
    println!("  {}: {}", document_number, status(result.document_number_check_valid));
    println!("  Date of birth: {}", status(result.date_of_birth_check_valid));
    println!("  Date of expiry: {}", status(result.date_of_expiry_check_valid));
    if let Some(valid) = result.personal_number_check_valid {
        println!("  Personal number: {}", status(valid));
    }
    if let Some(valid) = result.composite_check_valid {
        let label = if result.document_type == DocumentType::TD1 {
            "Upper and middle lines"
        } else {
            "Composite"
        };
        println!("  {}: {}", label, status(valid));
    }
}

fn print_expiry_validation(result: &ExpiryValidationResult) {
    println!("EXPIRY:");
    match result.date_of_birth {
        Some(date) => println!("  Date of birth: {}", date),
        None => println!("  Date of birth: invalid"),
    }
    match result.date_of_expiry {
        Some(date) => println!("  Date of expiry: {}", date),
        None => println!("  Date of expiry: invalid"),
    }
    println!("  Not expired: {}", status(result.not_expired));
}

fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Parse { file } => {
            let lines = read_lines(&file)?;
            let document_type = classify(&lines)?;
            let record = MrzRecord {
                document_type,
                fields: FieldExtractor::extract(document_type, &lines)?,
            };
            if cli.json {
                print_json(&record)?;
            } else {
                print_record(&record);
            }
            Ok(true)
        }
        Commands::Validate { file } => {
            let lines = read_lines(&file)?;
            let document_type = classify(&lines)?;
            let result = MrzValidator::validate(document_type, &lines);
            if cli.json {
                print_json(&result)?;
            } else {
                println!("=== Document Type: {} ===", document_type);
                print_mrz_validation(&result);
            }
            Ok(result.is_valid)
        }
        Commands::Check { file, today } => {
            let today = match today {
                Some(date) => NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                    .map_err(|e| MrzError::InvalidDate(format!("{}: {}", date, e)))?,
                None => Local::now().naive_local().date(),
            };
            let lines = read_lines(&file)?;
            let report = DocumentReader::new().read(&lines)?;
            let expiry_validation = ExpiryValidator::validate(&report.record, today);

            if cli.json {
                print_json(&CheckReport {
                    record: &report.record,
                    mrz_validation: &report.mrz_validation,
                    expiry_validation: &expiry_validation,
                })?;
            } else {
                print_record(&report.record);
                print_mrz_validation(&report.mrz_validation);
                print_expiry_validation(&expiry_validation);

                let issues = report
                    .mrz_validation
                    .issues
                    .iter()
                    .chain(expiry_validation.issues.iter());
                let mut any = false;
                for issue in issues {
                    if !any {
                        println!("\nISSUES FOUND:");
                        any = true;
                    }
                    println!("  - [{:?}] {}", issue.issue_type, issue.message);
                }
            }

            let is_valid = report.mrz_validation.is_valid && expiry_validation.is_valid;
            if !cli.json {
                println!(
                    "\nDocument result: {}",
                    if is_valid { "VALID" } else { "INVALID" }
                );
            }
            Ok(is_valid)
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        // Check digit or expiry failures
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Error reading MRZ: {}", err);
            ExitCode::from(2)
        }
    }
}
