use {
    crate::{
        constants::VERSION_KEY,
        error::{DeckError, ParseErrorKind, Result},
        schema::DeckFile,
    },
    log::warn,
};

/// Walks the lines of one deck file, tracking the 1-based line number for
/// diagnostics.
pub struct LineCursor<'a> {
    file: DeckFile,
    lines: Vec<&'a str>,
    /// Index of the next line
    next: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(file: DeckFile, text: &'a str) -> Self {
        LineCursor {
            file,
            lines: text.lines().collect(),
            next: 0,
        }
    }

    /// Line number of the most recently consumed line.
    pub fn line(&self) -> usize {
        self.next
    }

    pub fn error(&self, kind: ParseErrorKind) -> DeckError {
        self.error_at(self.line(), kind)
    }

    pub fn error_at(&self, line: usize, kind: ParseErrorKind) -> DeckError {
        DeckError::Parse {
            file: self.file,
            line,
            kind,
        }
    }

    pub fn next_line(&mut self, expected: &str) -> Result<&'a str> {
        match self.lines.get(self.next) {
            Some(line) => {
                self.next += 1;
                Ok(line.trim_end())
            }
            None => Err(self.error_at(
                self.next + 1,
                ParseErrorKind::UnexpectedEof {
                    expected: expected.to_owned(),
                },
            )),
        }
    }

    /// Consumes a literal header line.
    pub fn expect_marker(&mut self, marker: &str) -> Result<()> {
        let line = self.next_line(marker)?;
        if line == marker.trim_end() {
            Ok(())
        } else {
            Err(self.error(ParseErrorKind::MarkerMismatch {
                expected: marker.trim_end().to_owned(),
                found: line.to_owned(),
            }))
        }
    }

    /// Consumes the `Pcp_File_Version=N` line, warning when the version
    /// differs from `expected`.
    pub fn expect_version(&mut self, expected: u32) -> Result<u32> {
        let line = self.next_line(VERSION_KEY)?;
        let value = line
            .trim()
            .strip_prefix(VERSION_KEY)
            .and_then(|rest| rest.trim_start().strip_prefix('='))
            .ok_or_else(|| {
                self.error(ParseErrorKind::MarkerMismatch {
                    expected: format!("{}={}", VERSION_KEY, expected),
                    found: line.to_owned(),
                })
            })?
            .trim();
        let version = value.parse::<u32>().map_err(|_| {
            self.error(ParseErrorKind::InvalidToken {
                field: VERSION_KEY,
                expected: "integer",
                token: value.to_owned(),
            })
        })?;
        if version != expected {
            warn!(
                "{} has file version {}, expected {}",
                self.file, version, expected
            );
        }
        Ok(version)
    }

    /// Lines left after the last consumed one that are not blank.
    pub fn remaining(&self) -> usize {
        self.lines[self.next.min(self.lines.len())..]
            .iter()
            .filter(|line| !line.trim().is_empty())
            .count()
    }
}
