use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while generating enums from a directory of codepoint files.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("FileNotFoundError: {0}")]
    FileNotFound(String),
    #[error("IOError: {0}")]
    IO(#[from] std::io::Error),
    #[error("{0}")]
    Lexing(#[from] LexingError),
    #[error("ConfigError: {0}")]
    Config(#[from] serde_json::Error),
    #[error("OutputError: generated file would overwrite its input {}", .0.display())]
    OverwritesInput(PathBuf),
}

/// Why a single line could not be turned into a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("identifier cannot be empty")]
    IdentifierEmpty,
    #[error("leading number {0} is too large")]
    NumberTooLarge(String),
}

/// A [`LineError`] located in a specific input file.
#[derive(Debug, Error)]
#[error("LexingError: {kind}\n  --> {}:{line}\n   | {text}", .path.display())]
pub struct LexingError {
    pub(crate) path: PathBuf,
    pub(crate) line: usize,
    pub(crate) text: String,
    pub(crate) kind: LineError,
}

impl LexingError {
    /// `line` is zero-based, as counted by the reader; it is reported one-based.
    pub fn new(path: PathBuf, line: usize, text: String, kind: LineError) -> Self {
        Self {
            path,
            line: line + 1,
            text,
            kind,
        }
    }
}
