use crate::error::LineError;
use crate::ordinal::{EnglishOrdinals, NumberWords};
use crate::token::CodepointToken;

/// Read position over a single line. Created fresh for every line.
struct Cursor {
    chars: Vec<char>,
    current: usize,
}

impl Cursor {
    fn new(line: &str) -> Self {
        Self {
            chars: line.chars().collect(),
            current: 0,
        }
    }

    fn at(&self) -> char {
        self.peek(0)
    }

    fn peek(&self, offset: usize) -> char {
        self.chars
            .get(self.current + offset)
            .copied()
            .unwrap_or('\0')
    }

    fn advance(&mut self) {
        self.current += 1;
    }

    fn is_eof(&self) -> bool {
        self.current >= self.chars.len()
    }

    fn rest(&self) -> String {
        self.chars
            .get(self.current..)
            .map(|rest| rest.iter().collect())
            .unwrap_or_default()
    }
}

/// Turns codepoint description lines into tokens.
///
/// A line looks like `<label> <value>`. The label becomes a PascalCase
/// identifier: underscores start a new word and are dropped, a leading run of
/// digits is spelled out as ordinal words, and the first space ends the label.
/// Everything after that space is the value, copied verbatim.
pub struct Tokenizer<'w, W: NumberWords> {
    words: &'w W,
}

impl<'w, W: NumberWords> Tokenizer<'w, W> {
    pub fn new(words: &'w W) -> Self {
        Self { words }
    }

    pub fn parse_line(&self, line: &str) -> Result<CodepointToken, LineError> {
        let mut cursor = Cursor::new(line);

        let identifier = self.parse_identifier(&mut cursor)?;
        if identifier.is_empty() {
            return Err(LineError::IdentifierEmpty);
        }

        Ok(CodepointToken::new(identifier, cursor.rest()))
    }

    fn parse_identifier(&self, cursor: &mut Cursor) -> Result<String, LineError> {
        let mut identifier = String::new();
        let mut is_next_upper = true;

        if cursor.at().is_ascii_digit() {
            identifier.push_str(&self.parse_number(cursor)?);
        }

        while !cursor.is_eof() {
            match cursor.at() {
                '_' => {
                    is_next_upper = true;
                    cursor.advance();
                }
                ' ' => {
                    cursor.advance();
                    break;
                }
                ch => {
                    identifier.push(if is_next_upper {
                        to_upper(ch)
                    } else {
                        to_lower(ch)
                    });
                    is_next_upper = false;
                    cursor.advance();
                }
            }
        }

        Ok(identifier)
    }

    /// Consumes the leading digit run, plus its ordinal suffix when the label
    /// already spells one (`1st`), and returns the number as words.
    fn parse_number(&self, cursor: &mut Cursor) -> Result<String, LineError> {
        let mut digits = String::new();
        while cursor.at().is_ascii_digit() {
            digits.push(cursor.at());
            cursor.advance();
        }

        let number: u64 = digits
            .parse()
            .map_err(|_| LineError::NumberTooLarge(digits.clone()))?;

        if let Some(suffix) = self.words.ordinal_suffix(number) {
            skip_suffix(cursor, suffix);
        }

        Ok(self.words.ordinal_words(number))
    }
}

/// Skips `suffix` (case-insensitively) when it is a whole word of the label.
fn skip_suffix(cursor: &mut Cursor, suffix: &str) {
    let len = suffix.chars().count();
    let matches = suffix
        .chars()
        .enumerate()
        .all(|(i, expected)| cursor.peek(i).eq_ignore_ascii_case(&expected));

    if matches && matches!(cursor.peek(len), '\0' | ' ' | '_') {
        for _ in 0..len {
            cursor.advance();
        }
    }
}

/// Simple one-to-one case mapping; characters whose mapping expands (`ß`)
/// are left alone.
fn to_upper(ch: char) -> char {
    single(ch.to_uppercase()).unwrap_or(ch)
}

fn to_lower(ch: char) -> char {
    single(ch.to_lowercase()).unwrap_or(ch)
}

fn single(mut mapped: impl Iterator<Item = char>) -> Option<char> {
    match (mapped.next(), mapped.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

/// Parses one line with English ordinal expansion.
pub fn parse_line(line: &str) -> Result<CodepointToken, LineError> {
    Tokenizer::new(&EnglishOrdinals).parse_line(line)
}
