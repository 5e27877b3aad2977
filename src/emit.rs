use std::io::{self, Write};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::token::CodepointToken;

/// Writes an enum declaration piece by piece in some target language.
pub trait EnumEmitter {
    /// Extension given to generated files, without the dot.
    fn extension(&self) -> &'static str;

    fn write_header(&self, out: &mut dyn Write, name: &str) -> io::Result<()>;

    fn write_member(&self, out: &mut dyn Write, token: &CodepointToken) -> io::Result<()>;

    fn write_footer(&self, out: &mut dyn Write) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    #[value(name = "csharp")]
    CSharp,
    Rust,
}

impl Target {
    pub fn emitter(self) -> &'static dyn EnumEmitter {
        match self {
            Target::CSharp => &CSharpEmitter,
            Target::Rust => &RustEmitter,
        }
    }
}

/// `public enum` with a `[Description]` attribute carrying the character.
pub struct CSharpEmitter;

impl EnumEmitter for CSharpEmitter {
    fn extension(&self) -> &'static str {
        "cs"
    }

    fn write_header(&self, out: &mut dyn Write, name: &str) -> io::Result<()> {
        writeln!(out, "public enum {}", name)?;
        writeln!(out, "{{")
    }

    fn write_member(&self, out: &mut dyn Write, token: &CodepointToken) -> io::Result<()> {
        writeln!(out, "    [Description(\"\\u{}\")]", token.value())?;
        writeln!(out, "    {},", token.identifier())
    }

    fn write_footer(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "}}")
    }
}

/// `pub enum` with the character as the variant's doc string.
pub struct RustEmitter;

impl EnumEmitter for RustEmitter {
    fn extension(&self) -> &'static str {
        "rs"
    }

    fn write_header(&self, out: &mut dyn Write, name: &str) -> io::Result<()> {
        writeln!(out, "pub enum {} {{", name)
    }

    fn write_member(&self, out: &mut dyn Write, token: &CodepointToken) -> io::Result<()> {
        writeln!(out, "    #[doc = \"\\u{{{}}}\"]", token.value())?;
        writeln!(out, "    {},", token.identifier())
    }

    fn write_footer(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "}}")
    }
}
