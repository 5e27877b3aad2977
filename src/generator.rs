use std::fs;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::emit::EnumEmitter;
use crate::error::{GeneratorError, LexingError};
use crate::lexer::parse_line;
use crate::token::CodepointToken;

/// Pulls one token per line out of a codepoints file.
///
/// Lines are parsed lazily and in order. The first read error is yielded once
/// and ends the stream.
pub struct CodepointParser<'a, R> {
    lines: io::Lines<R>,
    path: &'a Path,
    line: usize,
    finished: bool,
}

impl<'a, R: BufRead> CodepointParser<'a, R> {
    pub fn new(reader: R, path: &'a Path) -> Self {
        Self {
            lines: reader.lines(),
            path,
            line: 0,
            finished: false,
        }
    }
}

impl<R: BufRead> Iterator for CodepointParser<'_, R> {
    type Item = Result<CodepointToken, GeneratorError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let text = match self.lines.next()? {
            Ok(text) => text,
            Err(err) => {
                self.finished = true;
                return Some(Err(err.into()));
            }
        };

        let line = self.line;
        self.line += 1;

        Some(parse_line(&text).map_err(|kind| {
            GeneratorError::from(LexingError::new(self.path.to_path_buf(), line, text, kind))
        }))
    }
}

/// What a generation run produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub outputs: Vec<PathBuf>,
    pub members: usize,
}

/// Lists the files in `dir` with the given extension, sorted by path.
pub fn find_codepoint_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, GeneratorError> {
    if !dir.exists() {
        return Err(GeneratorError::FileNotFound(format!(
            "Input directory not found: {}\n\nTo fix this:\n1. Create the directory\n2. Add your .{} files there\n3. Or set input_dir in your config file (enumgen config init)",
            dir.display(),
            extension
        )));
    }

    if !dir.is_dir() {
        return Err(GeneratorError::FileNotFound(format!(
            "Expected {} to be a directory",
            dir.display()
        )));
    }

    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some(extension) {
            found.push(path);
        }
    }
    found.sort();

    if found.is_empty() {
        warn!(dir = %dir.display(), extension, "no input files found");
    }

    Ok(found)
}

/// Generates the enum for one input file next to it and returns the output
/// path and the number of members written.
///
/// If any line fails to parse the partially written output is removed.
pub fn generate_file(
    input: &Path,
    emitter: &dyn EnumEmitter,
) -> Result<(PathBuf, usize), GeneratorError> {
    let output = input.with_extension(emitter.extension());
    if output == input {
        return Err(GeneratorError::OverwritesInput(output));
    }

    let name = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    debug!(input = %input.display(), output = %output.display(), %name, "generating enum");

    let reader = BufReader::new(fs::File::open(input)?);
    let mut writer = BufWriter::new(fs::File::create(&output)?);

    match write_enum(reader, input, &mut writer, emitter, &name) {
        Ok(members) => {
            info!(output = %output.display(), members, "wrote enum");
            Ok((output, members))
        }
        Err(err) => {
            drop(writer);
            let _ = fs::remove_file(&output);
            Err(err)
        }
    }
}

fn write_enum<R: BufRead>(
    reader: R,
    path: &Path,
    out: &mut dyn Write,
    emitter: &dyn EnumEmitter,
    name: &str,
) -> Result<usize, GeneratorError> {
    emitter.write_header(out, name)?;

    let mut members = 0;
    for token in CodepointParser::new(reader, path) {
        emitter.write_member(out, &token?)?;
        members += 1;
    }

    emitter.write_footer(out)?;
    out.flush()?;
    Ok(members)
}

/// Generates an enum for every matching file in `dir`, in path order.
///
/// Each generated file is echoed to `echo` when one is given. The first
/// failure stops the run.
pub fn generate_all(
    dir: &Path,
    extension: &str,
    emitter: &dyn EnumEmitter,
    mut echo: Option<&mut dyn Write>,
) -> Result<Summary, GeneratorError> {
    let mut summary = Summary::default();

    for input in find_codepoint_files(dir, extension)? {
        let (output, members) = generate_file(&input, emitter)?;

        if let Some(echo) = echo.as_deref_mut() {
            echo.write_all(fs::read_to_string(&output)?.as_bytes())?;
        }

        summary.outputs.push(output);
        summary.members += members;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::Target;
    use crate::error::LineError;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn tokens(input: &str) -> Vec<Result<CodepointToken, GeneratorError>> {
        CodepointParser::new(Cursor::new(input), Path::new("test.codepoints")).collect()
    }

    #[test]
    fn test_one_token_per_line_in_order() {
        let parsed: Vec<_> = tokens("en_dash 2013\r\nem_dash 2014\n3rd_box 2462")
            .into_iter()
            .map(|t| t.unwrap())
            .collect();

        assert_eq!(
            parsed,
            vec![
                CodepointToken::new("EnDash".to_string(), "2013".to_string()),
                CodepointToken::new("EmDash".to_string(), "2014".to_string()),
                CodepointToken::new("ThirdBox".to_string(), "2462".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_line_reports_its_position() {
        let parsed = tokens("en_dash 2013\n\nem_dash 2014\n");
        assert_eq!(parsed.len(), 3);
        assert!(parsed[0].is_ok());
        match &parsed[1] {
            Err(GeneratorError::Lexing(err)) => {
                assert_eq!(err.kind, LineError::IdentifierEmpty);
                assert_eq!(err.line, 2);
            }
            other => panic!("expected lexing error, got {:?}", other),
        }
        assert!(parsed[2].is_ok());
    }

    struct FailingReader;

    impl io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn test_read_error_ends_stream() {
        let reader = BufReader::new(FailingReader);
        let parsed: Vec<_> = CodepointParser::new(reader, Path::new("x")).collect();
        assert_eq!(parsed.len(), 1);
        assert!(matches!(parsed[0], Err(GeneratorError::IO(_))));
    }

    #[test]
    fn test_find_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.codepoints"), "").unwrap();
        fs::write(dir.path().join("a.codepoints"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested.codepoints")).unwrap();

        let found = find_codepoint_files(dir.path(), "codepoints").unwrap();
        assert_eq!(
            found,
            vec![
                dir.path().join("a.codepoints"),
                dir.path().join("b.codepoints")
            ]
        );
    }

    #[test]
    fn test_find_files_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let result = find_codepoint_files(&dir.path().join("missing"), "codepoints");
        assert!(matches!(result, Err(GeneratorError::FileNotFound(_))));
    }

    #[test]
    fn test_generate_file_writes_enum_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Dashes.codepoints");
        fs::write(&input, "en_dash 2013\nem_dash 2014\n").unwrap();

        let (output, members) = generate_file(&input, Target::CSharp.emitter()).unwrap();

        assert_eq!(output, dir.path().join("Dashes.cs"));
        assert_eq!(members, 2);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "public enum Dashes\n{\n    [Description(\"\\u2013\")]\n    EnDash,\n    [Description(\"\\u2014\")]\n    EmDash,\n}\n"
        );
    }

    #[test]
    fn test_generate_file_removes_output_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Broken.codepoints");
        fs::write(&input, "ok 0041\n___ 0042\n").unwrap();

        let err = generate_file(&input, Target::Rust.emitter()).unwrap_err();

        assert!(matches!(err, GeneratorError::Lexing(_)));
        assert!(err.to_string().contains("Broken.codepoints:2"));
        assert!(!dir.path().join("Broken.rs").exists());
    }

    #[test]
    fn test_generate_file_refuses_to_overwrite_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Glyphs.rs");
        fs::write(&input, "bullet 2022\n").unwrap();

        let err = generate_file(&input, Target::Rust.emitter()).unwrap_err();
        assert!(matches!(err, GeneratorError::OverwritesInput(_)));
        assert_eq!(fs::read_to_string(&input).unwrap(), "bullet 2022\n");
    }

    #[test]
    fn test_generate_all_echoes_each_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Arrows.codepoints"), "left_arrow 2190\n").unwrap();
        fs::write(dir.path().join("Blocks.codepoints"), "1st_quadrant 2598\nfull_block 2588\n")
            .unwrap();

        let mut echoed = Vec::new();
        let summary = generate_all(
            dir.path(),
            "codepoints",
            Target::Rust.emitter(),
            Some(&mut echoed as &mut dyn Write),
        )
        .unwrap();

        assert_eq!(
            summary,
            Summary {
                outputs: vec![dir.path().join("Arrows.rs"), dir.path().join("Blocks.rs")],
                members: 3,
            }
        );
        assert_eq!(
            String::from_utf8(echoed).unwrap(),
            "pub enum Arrows {\n    #[doc = \"\\u{2190}\"]\n    LeftArrow,\n}\n\
             pub enum Blocks {\n    #[doc = \"\\u{2598}\"]\n    FirstQuadrant,\n    #[doc = \"\\u{2588}\"]\n    FullBlock,\n}\n"
        );
    }

    #[test]
    fn test_generate_all_stops_at_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.codepoints"), " 2190\n").unwrap();
        fs::write(dir.path().join("b.codepoints"), "bullet 2022\n").unwrap();

        let result = generate_all(dir.path(), "codepoints", Target::CSharp.emitter(), None);

        assert!(matches!(result, Err(GeneratorError::Lexing(_))));
        assert!(!dir.path().join("b.cs").exists());
    }

    #[test]
    fn test_generate_all_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let summary =
            generate_all(dir.path(), "codepoints", Target::CSharp.emitter(), None).unwrap();
        assert_eq!(summary, Summary::default());
    }
}
