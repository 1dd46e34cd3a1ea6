use {
    crate::schema::{DeckFile, SectionId},
    std::{fmt, io, path::PathBuf},
    thiserror::Error,
};

pub type Result<T> = std::result::Result<T, DeckError>;

/// Failure of a single write or read operation.
///
/// All variants are terminal for the operation that raised them; nothing is
/// retried and no partial output is handed back.
#[derive(Error, Debug)]
pub enum DeckError {
    /// Invalid flag combination or out-of-range parameter.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A table does not have the shape the active layout requires.
    #[error("{section}: {record} {}: expected {expected}, found {found}", row_label(.row))]
    Schema {
        section: SectionId,
        record: &'static str,
        /// `None` when the row count is wrong, otherwise the offending row.
        row: Option<usize>,
        expected: usize,
        found: usize,
    },

    /// A layout record that the value encoder or decoder does not handle.
    #[error("{section}: no values are mapped for record {record}")]
    UnhandledRecord {
        section: SectionId,
        record: &'static str,
    },

    /// A line of a deck file could not be interpreted.
    #[error("{file}:{line}: {kind}")]
    Parse {
        file: DeckFile,
        line: usize,
        kind: ParseErrorKind,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    UnexpectedEof {
        expected: String,
    },
    MarkerMismatch {
        expected: String,
        found: String,
    },
    TokenCount {
        record: &'static str,
        expected: usize,
        found: usize,
    },
    InvalidToken {
        field: &'static str,
        expected: &'static str,
        token: String,
    },
    UnknownVariant {
        field: &'static str,
        value: i64,
    },
    Inconsistent(String),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::UnexpectedEof { expected } => {
                write!(f, "unexpected end of file, expected {}", expected)
            }
            ParseErrorKind::MarkerMismatch { expected, found } => {
                write!(f, "expected line {:?}, found {:?}", expected, found)
            }
            ParseErrorKind::TokenCount {
                record,
                expected,
                found,
            } => write!(
                f,
                "{} has {} tokens, expected {}",
                record, found, expected
            ),
            ParseErrorKind::InvalidToken {
                field,
                expected,
                token,
            } => write!(f, "{} = {:?} is not a valid {}", field, token, expected),
            ParseErrorKind::UnknownVariant { field, value } => {
                write!(f, "unsupported {} identifier {}", field, value)
            }
            ParseErrorKind::Inconsistent(message) => write!(f, "{}", message),
        }
    }
}

fn row_label(row: &Option<usize>) -> String {
    match row {
        Some(row) => format!("row {} columns", row + 1),
        None => "rows".to_owned(),
    }
}

impl DeckError {
    pub(crate) fn config<S: Into<String>>(message: S) -> Self {
        DeckError::Config(message.into())
    }

    pub(crate) fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        DeckError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn schema_message_names_row() {
        let err = DeckError::Schema {
            section: SectionId::Materials,
            record: "materials",
            row: Some(0),
            expected: 7,
            found: 11,
        };
        assert_eq!(
            err.to_string(),
            "Materials: materials row 1 columns: expected 7, found 11"
        );
    }

    #[test]
    fn parse_message_names_file_and_line() {
        let err = DeckError::Parse {
            file: DeckFile::Selector,
            line: 12,
            kind: ParseErrorKind::TokenCount {
                record: "MaxIt",
                expected: 4,
                found: 3,
            },
        };
        assert_eq!(
            err.to_string(),
            "Selector.in:12: MaxIt has 3 tokens, expected 4"
        );
    }
}
