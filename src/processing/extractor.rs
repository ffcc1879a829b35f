use log::{debug, warn};

use crate::models::{DocumentType, Field};
use crate::processing::grammar::{self, Group, LineGrammar};
use crate::utils::{MrzError, Result};

/// FieldExtractor splits MRZ lines into named fields using the fixed-column
/// grammar of the document type
pub struct FieldExtractor;

impl FieldExtractor {
    /// Extract all fields of a document, line by line.
    ///
    /// Fails on the first line that does not satisfy its grammar; no partial
    /// field list is returned in that case.
    pub fn extract<S: AsRef<str>>(document_type: DocumentType, lines: &[S]) -> Result<Vec<Field>> {
        let grammars = grammar::grammar_for(document_type).ok_or_else(|| {
            let length = lines.first().map_or(0, |line| line.as_ref().chars().count());
            MrzError::UnknownDocumentType {
                lines: lines.len(),
                length,
            }
        })?;

        if lines.len() != grammars.len() {
            return Err(MrzError::InvalidLineCount(lines.len()));
        }

        let mut fields = Vec::new();
        for (index, (line, groups)) in lines.iter().zip(grammars.iter()).enumerate() {
            Self::extract_line(document_type, index, line.as_ref(), *groups, &mut fields)?;
        }

        debug!("Extracted {} fields from {} document", fields.len(), document_type);
        Ok(fields)
    }

    fn extract_line(
        document_type: DocumentType,
        index: usize,
        line: &str,
        groups: LineGrammar,
        fields: &mut Vec<Field>,
    ) -> Result<()> {
        let chars: Vec<char> = line.chars().collect();
        let mismatch = |column: usize| {
            warn!(
                "Line #{} is not a valid {} line (column {}): {}",
                index, document_type, column, line
            );
            MrzError::GrammarMismatch {
                document_type,
                line: index,
                column,
                content: line.to_string(),
            }
        };

        let width = grammar::line_width(groups);
        if chars.len() != width {
            return Err(mismatch(chars.len().min(width)));
        }

        // Validate the whole line before emitting anything
        let mut column = 0;
        for group in groups {
            let class = group.class();
            for (position, c) in chars[column..column + group.width()].iter().enumerate() {
                if !class.accepts(position, *c) {
                    return Err(mismatch(column + position));
                }
            }
            column += group.width();
        }

        let mut column = 0;
        for group in groups {
            let value: String = chars[column..column + group.width()].iter().collect();
            match group {
                Group::Field(name, _, _) => fields.push(Field::new(*name, value)),
                Group::Names(_) => fields.extend(tokenize_names(&value)),
            }
            column += group.width();
        }

        Ok(())
    }
}

/// Split a names group into `surname` and `given_name_N` fields.
///
/// Fillers act as separators, so `ERIKSSON<<ANNA<MARIA<<<` gives ERIKSSON,
/// ANNA and MARIA. A names group made only of fillers yields nothing.
pub fn tokenize_names(names: &str) -> Vec<Field> {
    let spaced = names.replace('<', " ");
    let mut tokens = spaced.split_whitespace();

    let mut fields = Vec::new();
    if let Some(surname) = tokens.next() {
        fields.push(Field::new("surname", surname));
        for (i, given_name) in tokens.enumerate() {
            fields.push(Field::new(format!("given_name_{}", i), given_name));
        }
    }
    fields
}

pub fn extract<S: AsRef<str>>(document_type: DocumentType, lines: &[S]) -> Result<Vec<Field>> {
    FieldExtractor::extract(document_type, lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names_of(fields: &[Field]) -> Vec<&str> {
        fields.iter().map(|field| field.name.as_str()).collect()
    }

    fn value_of<'a>(fields: &'a [Field], name: &str) -> Option<&'a str> {
        fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    #[test]
    fn test_tokenize_names() {
        let fields = tokenize_names("ERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<<<<<");
        assert_eq!(
            fields,
            vec![
                Field::new("surname", "ERIKSSON"),
                Field::new("given_name_0", "ANNA"),
                Field::new("given_name_1", "MARIA"),
            ]
        );
    }

    #[test]
    fn test_tokenize_names_only_fillers() {
        assert!(tokenize_names("<<<<<<<<<<<<<<<").is_empty());
        assert!(tokenize_names("").is_empty());
    }

    #[test]
    fn test_extract_td3() {
        let lines = [
            "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
            "L898902C36UTO7408122F1204159ZE184226B<<<<<10",
        ];
        let fields = extract(DocumentType::TD3, &lines).unwrap();

        assert_eq!(
            names_of(&fields),
            vec![
                "doc",
                "country",
                "surname",
                "given_name_0",
                "given_name_1",
                "doc_number",
                "hash",
                "nationality",
                "birth_date",
                "hash",
                "sex",
                "expiry_date",
                "hash",
                "personal_number",
                "hash",
                "final_hash",
            ]
        );
        assert_eq!(value_of(&fields, "doc"), Some("P<"));
        assert_eq!(value_of(&fields, "country"), Some("UTO"));
        assert_eq!(value_of(&fields, "doc_number"), Some("L898902C3"));
        assert_eq!(value_of(&fields, "birth_date"), Some("740812"));
        assert_eq!(value_of(&fields, "sex"), Some("F"));
        assert_eq!(value_of(&fields, "expiry_date"), Some("120415"));
        // Fillers are kept as-is
        assert_eq!(value_of(&fields, "personal_number"), Some("ZE184226B<<<<<"));
        assert_eq!(value_of(&fields, "final_hash"), Some("0"));
    }

    #[test]
    fn test_extract_td1() {
        let lines = [
            "I<UTOD231458907<<<<<<<<<<<<<<<",
            "7408122F1204159UTO<<<<<<<<<<<6",
            "ERIKSSON<<ANNA<MARIA<<<<<<<<<<",
        ];
        let fields = extract(DocumentType::TD1, &lines).unwrap();

        assert_eq!(
            names_of(&fields),
            vec![
                "doc",
                "country",
                "doc_number",
                "hash",
                "optional_data1",
                "birth_date",
                "hash",
                "sex",
                "expiry_date",
                "hash",
                "nationality",
                "optional_data2",
                "final_hash",
                "surname",
                "given_name_0",
                "given_name_1",
            ]
        );
        assert_eq!(value_of(&fields, "doc_number"), Some("D23145890"));
        assert_eq!(value_of(&fields, "optional_data1"), Some("<<<<<<<<<<<<<<<"));
        assert_eq!(value_of(&fields, "nationality"), Some("UTO"));
        assert_eq!(value_of(&fields, "final_hash"), Some("6"));
    }

    #[test]
    fn test_extract_td2() {
        let lines = [
            "I<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<",
            "D231458907UTO7408122F1204159<<<<<<<6",
        ];
        let fields = extract(DocumentType::TD2, &lines).unwrap();

        assert_eq!(value_of(&fields, "doc"), Some("I<"));
        assert_eq!(value_of(&fields, "doc_number"), Some("D23145890"));
        assert_eq!(value_of(&fields, "optional_data1"), Some("<<<<<<<"));
        assert_eq!(value_of(&fields, "final_hash"), Some("6"));
        assert_eq!(fields.len(), 3 + 2 + 10);
    }

    #[test]
    fn test_extract_visas() {
        let mrva = [
            "V<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
            "L8988901C4XXX4009078F96121096ZE184226B<<<<<<",
        ];
        let fields = extract(DocumentType::MRVA, &mrva).unwrap();
        assert_eq!(value_of(&fields, "doc_number"), Some("L8988901C"));
        assert_eq!(value_of(&fields, "nationality"), Some("XXX"));
        assert_eq!(value_of(&fields, "optional_data"), Some("6ZE184226B<<<<<<"));
        assert_eq!(value_of(&fields, "final_hash"), None);

        let mrvb = [
            "V<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<",
            "L8988901C4XXX4009078F9612109<<<<<<<<",
        ];
        let fields = extract(DocumentType::MRVB, &mrvb).unwrap();
        assert_eq!(value_of(&fields, "expiry_date"), Some("961210"));
        assert_eq!(value_of(&fields, "optional_data"), Some("<<<<<<<<"));
    }

    #[test]
    fn test_extract_rejects_bad_character_class() {
        // Letter in the birth date
        let lines = [
            "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
            "L898902C36UTO74O8122F1204159ZE184226B<<<<<10",
        ];
        match extract(DocumentType::TD3, &lines) {
            Err(MrzError::GrammarMismatch {
                document_type,
                line,
                column,
                content,
            }) => {
                assert_eq!(document_type, DocumentType::TD3);
                assert_eq!(line, 1);
                assert_eq!(column, 15);
                assert_eq!(content, lines[1]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_extract_rejects_wrong_leading_character() {
        let lines = [
            "X<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<",
            "D231458907UTO7408122F1204159<<<<<<<6",
        ];
        assert!(matches!(
            extract(DocumentType::TD2, &lines),
            Err(MrzError::GrammarMismatch { line: 0, column: 0, .. })
        ));
    }

    #[test]
    fn test_extract_rejects_invalid_sex_and_lowercase() {
        let lines = [
            "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
            "L898902C36UTO7408122Q1204159ZE184226B<<<<<10",
        ];
        assert!(matches!(
            extract(DocumentType::TD3, &lines),
            Err(MrzError::GrammarMismatch { line: 1, column: 20, .. })
        ));

        let lines = [
            "P<UTOeriksson<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
            "L898902C36UTO7408122F1204159ZE184226B<<<<<10",
        ];
        assert!(matches!(
            extract(DocumentType::TD3, &lines),
            Err(MrzError::GrammarMismatch { line: 0, column: 5, .. })
        ));
    }

    #[test]
    fn test_extract_unknown_type() {
        let lines = ["ABC", "DEF"];
        assert!(matches!(
            extract(DocumentType::Unknown, &lines),
            Err(MrzError::UnknownDocumentType { lines: 2, length: 3 })
        ));
    }

    #[test]
    fn test_extract_wrong_width() {
        let lines = [
            "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<",
            "D231458907UTO7408122F1204159<<<<<<<6",
        ];
        assert!(matches!(
            extract(DocumentType::TD3, &lines),
            Err(MrzError::GrammarMismatch { line: 0, column: 36, .. })
        ));
    }
}
