// ICAO Doc 9303 Part 3, 4.9: check digit computation

use std::collections::HashMap;

use lazy_static::lazy_static;

pub const WEIGHTS: [u32; 3] = [7, 3, 1];

lazy_static! {
    /// `0-9` map to 0-9, `A-Z` to 10-35 and the filler `<` to 0
    pub static ref CHAR_VALUES: HashMap<char, u32> = {
        let mut m = HashMap::new();
        for (value, c) in "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ".chars().enumerate() {
            m.insert(c, value as u32);
        }
        m.insert('<', 0);
        m
    };
}

/// Numeric value of an MRZ character. Characters outside the MRZ alphabet
/// count as 0, like the filler.
pub fn char_value(c: char) -> u32 {
    CHAR_VALUES.get(&c).copied().unwrap_or(0)
}

/// An inclusive column range of one line taking part in a check.
///
/// `phase` is the position of `start` in the 7-3-1 weight cycle, so that
/// discontinuous ranges can be summed as one composite string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub start: usize,
    pub end: usize,
    pub phase: usize,
}

impl Span {
    pub const fn new(line: usize, start: usize, end: usize, phase: usize) -> Self {
        Span {
            line,
            start,
            end,
            phase,
        }
    }
}

/// Check digit of a sequence of spans, compared to the character at
/// `line`/`column`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitCheck {
    pub spans: &'static [Span],
    pub line: usize,
    pub column: usize,
}

impl DigitCheck {
    /// `false` when a span or the check column falls outside the lines
    pub fn verify(&self, lines: &[Vec<char>]) -> bool {
        let mut sum = 0;
        for span in self.spans {
            match weighted_sum(lines, span) {
                Some(partial) => sum += partial,
                None => return false,
            }
        }
        match lines.get(self.line).and_then(|line| line.get(self.column)) {
            Some(&c) => sum % 10 == char_value(c),
            None => false,
        }
    }
}

pub fn weighted_sum(lines: &[Vec<char>], span: &Span) -> Option<u32> {
    let line = lines.get(span.line)?;
    let chars = line.get(span.start..=span.end)?;
    let sum = chars
        .iter()
        .enumerate()
        .map(|(i, &c)| char_value(c) * WEIGHTS[(i + span.phase) % 3])
        .sum();
    Some(sum)
}

/// Check digit of a whole string, e.g. `compute_check_digit("L898902C3") == 6`
pub fn compute_check_digit(data: &str) -> u32 {
    let sum: u32 = data
        .chars()
        .enumerate()
        .map(|(i, c)| char_value(c) * WEIGHTS[i % 3])
        .sum();
    sum % 10
}
