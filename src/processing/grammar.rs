use crate::models::DocumentType;

/// Characters allowed in one column group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// `[A-Z0-9<]`
    Any,
    /// `[0-9]`
    Digit,
    /// `[A-Z]`
    Alpha,
    /// `[MFX<]`
    Sex,
    /// First character from the given set, the rest `[A-Z0-9<]`
    Leading(&'static [char]),
}

impl CharClass {
    pub fn accepts(&self, position: usize, c: char) -> bool {
        match self {
            CharClass::Any => is_mrz_char(c),
            CharClass::Digit => c.is_ascii_digit(),
            CharClass::Alpha => c.is_ascii_uppercase(),
            CharClass::Sex => matches!(c, 'M' | 'F' | 'X' | '<'),
            CharClass::Leading(first) if position == 0 => first.contains(&c),
            CharClass::Leading(_) => is_mrz_char(c),
        }
    }
}

pub fn is_mrz_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || c == '<'
}

/// One fixed-width column group of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    /// Emitted as a single field under `name`
    Field(&'static str, usize, CharClass),
    /// Surname and given names, tokenized into several fields
    Names(usize),
}

impl Group {
    pub fn width(&self) -> usize {
        match self {
            Group::Field(_, width, _) => *width,
            Group::Names(width) => *width,
        }
    }

    pub fn class(&self) -> CharClass {
        match self {
            Group::Field(_, _, class) => *class,
            Group::Names(_) => CharClass::Any,
        }
    }
}

pub type LineGrammar = &'static [Group];

const ID_CARD_DOC: Group = Group::Field("doc", 2, CharClass::Leading(&['A', 'C', 'I']));
const PASSPORT_DOC: Group = Group::Field("doc", 2, CharClass::Leading(&['P']));
const VISA_DOC: Group = Group::Field("doc", 2, CharClass::Leading(&['V']));
const COUNTRY: Group = Group::Field("country", 3, CharClass::Alpha);
const NATIONALITY: Group = Group::Field("nationality", 3, CharClass::Alpha);
const DOC_NUMBER: Group = Group::Field("doc_number", 9, CharClass::Any);
const HASH: Group = Group::Field("hash", 1, CharClass::Digit);
const FINAL_HASH: Group = Group::Field("final_hash", 1, CharClass::Digit);
const BIRTH_DATE: Group = Group::Field("birth_date", 6, CharClass::Digit);
const EXPIRY_DATE: Group = Group::Field("expiry_date", 6, CharClass::Digit);
const SEX: Group = Group::Field("sex", 1, CharClass::Sex);

const TD1: &[LineGrammar] = &[
    &[
        ID_CARD_DOC,
        COUNTRY,
        DOC_NUMBER,
        HASH,
        Group::Field("optional_data1", 15, CharClass::Any),
    ],
    &[
        BIRTH_DATE,
        HASH,
        SEX,
        EXPIRY_DATE,
        HASH,
        NATIONALITY,
        Group::Field("optional_data2", 11, CharClass::Any),
        FINAL_HASH,
    ],
    &[Group::Names(30)],
];

const TD2: &[LineGrammar] = &[
    &[ID_CARD_DOC, COUNTRY, Group::Names(31)],
    &[
        DOC_NUMBER,
        HASH,
        NATIONALITY,
        BIRTH_DATE,
        HASH,
        SEX,
        EXPIRY_DATE,
        HASH,
        Group::Field("optional_data1", 7, CharClass::Any),
        FINAL_HASH,
    ],
];

const TD3: &[LineGrammar] = &[
    &[PASSPORT_DOC, COUNTRY, Group::Names(39)],
    &[
        DOC_NUMBER,
        HASH,
        NATIONALITY,
        BIRTH_DATE,
        HASH,
        SEX,
        EXPIRY_DATE,
        HASH,
        Group::Field("personal_number", 14, CharClass::Any),
        HASH,
        FINAL_HASH,
    ],
];

const MRVA: &[LineGrammar] = &[
    &[VISA_DOC, COUNTRY, Group::Names(39)],
    &[
        DOC_NUMBER,
        HASH,
        NATIONALITY,
        BIRTH_DATE,
        HASH,
        SEX,
        EXPIRY_DATE,
        HASH,
        Group::Field("optional_data", 16, CharClass::Any),
    ],
];

const MRVB: &[LineGrammar] = &[
    &[VISA_DOC, COUNTRY, Group::Names(31)],
    &[
        DOC_NUMBER,
        HASH,
        NATIONALITY,
        BIRTH_DATE,
        HASH,
        SEX,
        EXPIRY_DATE,
        HASH,
        Group::Field("optional_data", 8, CharClass::Any),
    ],
];

/// Per-line grammars for a layout, `None` for `Unknown`
pub fn grammar_for(document_type: DocumentType) -> Option<&'static [LineGrammar]> {
    match document_type {
        DocumentType::Unknown => None,
        DocumentType::TD1 => Some(TD1),
        DocumentType::TD2 => Some(TD2),
        DocumentType::TD3 => Some(TD3),
        DocumentType::MRVA => Some(MRVA),
        DocumentType::MRVB => Some(MRVB),
    }
}

pub fn line_width(grammar: &[Group]) -> usize {
    grammar.iter().map(Group::width).sum()
}
