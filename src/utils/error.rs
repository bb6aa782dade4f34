//! Error handling for CALS table mapping
//!
//! Three separate failure taxonomies, matching how callers react to them:
//! configuration errors are fatal caller bugs surfaced at construction time,
//! structural errors are expected parse-time results the caller checks for,
//! and write rejections mean the enclosing transaction must not commit.

use std::fmt;

/// Configuration error raised while resolving table options
///
/// These are not recoverable: the caller is expected to fix its option tree,
/// not retry.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// An option key that does not exist anywhere in the default option tree
    UnsupportedOption { path: String },
    /// A known option key carrying a value that cannot be used
    InvalidValue { path: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnsupportedOption { path } => {
                write!(f, "Unsupported option: {}", path)
            }
            ConfigError::InvalidValue { path, message } => {
                write!(f, "Invalid value for option '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ConfigError {
    pub fn unsupported(path: impl Into<String>) -> Self {
        ConfigError::UnsupportedOption { path: path.into() }
    }

    pub fn invalid_value(path: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Structural parse error produced by the grid-model builder
///
/// Returned as a value, never panicked: malformed markup is an expected input
/// and callers abort the requested operation instead of propagating.
#[derive(Debug, Clone, PartialEq)]
pub enum StructureError {
    /// A `namest`/`nameend` pair resolving to a span below 1, or a column
    /// name reference that does not match any column
    InvalidColumnSpan { message: String },
    /// A cell footprint reaching past the declared column count
    ColumnCountOverflow { row: usize, message: String },
    /// A row that ends with unoccupied coordinates
    IncompleteRow { row: usize, message: String },
    /// Row-span coverage from above fell short of an otherwise empty row
    MissingRowSpans { row: usize, message: String },
    /// A `morerows` value spanning past the last body row
    RowSpanPastEnd { row: usize, message: String },
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureError::InvalidColumnSpan { message } => {
                write!(f, "Invalid column span: {}", message)
            }
            StructureError::ColumnCountOverflow { row, message } => {
                write!(f, "Column count overflow in row {}: {}", row, message)
            }
            StructureError::IncompleteRow { row, message } => {
                write!(f, "Incomplete row {}: {}", row, message)
            }
            StructureError::MissingRowSpans { row, message } => {
                write!(f, "Not enough row spans provided for row {}: {}", row, message)
            }
            StructureError::RowSpanPastEnd { row, message } => {
                write!(f, "Row span past the last row in row {}: {}", row, message)
            }
        }
    }
}

impl std::error::Error for StructureError {}

impl StructureError {
    pub fn invalid_column_span(message: impl Into<String>) -> Self {
        StructureError::InvalidColumnSpan {
            message: message.into(),
        }
    }

    pub fn column_count_overflow(row: usize, message: impl Into<String>) -> Self {
        StructureError::ColumnCountOverflow {
            row,
            message: message.into(),
        }
    }

    pub fn incomplete_row(row: usize, message: impl Into<String>) -> Self {
        StructureError::IncompleteRow {
            row,
            message: message.into(),
        }
    }

    pub fn missing_row_spans(row: usize, message: impl Into<String>) -> Self {
        StructureError::MissingRowSpans {
            row,
            message: message.into(),
        }
    }

    pub fn row_span_past_end(row: usize, message: impl Into<String>) -> Self {
        StructureError::RowSpanPastEnd {
            row,
            message: message.into(),
        }
    }
}

/// A rejected element or attribute write
///
/// The synthesizer maps this to a `false` return; the caller treats the
/// surrounding transaction as not committed.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteError {
    pub message: String,
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Write rejected: {}", self.message)
    }
}

impl std::error::Error for WriteError {}

impl WriteError {
    pub fn new(message: impl Into<String>) -> Self {
        WriteError {
            message: message.into(),
        }
    }
}

/// Umbrella error for the top-level convenience entry points and the CLI
#[derive(Debug, Clone, PartialEq)]
pub enum CalsError {
    /// The input text is not well-formed XML
    ParseError { message: String },
    /// Configuration could not be resolved
    Config(ConfigError),
    /// The markup is well-formed XML but structurally broken as a CALS table
    Structure(StructureError),
    /// A write was rejected during synthesis
    Write(WriteError),
    /// Input that is valid XML but not a CALS table under the configuration
    InvalidInput { message: String },
}

impl fmt::Display for CalsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalsError::ParseError { message } => write!(f, "Parse error: {}", message),
            CalsError::Config(err) => write!(f, "{}", err),
            CalsError::Structure(err) => write!(f, "{}", err),
            CalsError::Write(err) => write!(f, "{}", err),
            CalsError::InvalidInput { message } => write!(f, "Invalid input: {}", message),
        }
    }
}

impl std::error::Error for CalsError {}

impl From<ConfigError> for CalsError {
    fn from(err: ConfigError) -> Self {
        CalsError::Config(err)
    }
}

impl From<StructureError> for CalsError {
    fn from(err: StructureError) -> Self {
        CalsError::Structure(err)
    }
}

impl From<WriteError> for CalsError {
    fn from(err: WriteError) -> Self {
        CalsError::Write(err)
    }
}

impl CalsError {
    pub fn parse(message: impl Into<String>) -> Self {
        CalsError::ParseError {
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        CalsError::InvalidInput {
            message: message.into(),
        }
    }
}

/// Result type for the top-level conversion operations
pub type CalsResult<T> = Result<T, CalsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_option_display() {
        let err = ConfigError::unsupported("table.localname");
        assert!(err.to_string().contains("Unsupported option"));
        assert!(err.to_string().contains("table.localname"));
    }

    #[test]
    fn test_structure_error_display() {
        let err = StructureError::incomplete_row(3, "2 of 4 columns filled");
        let msg = err.to_string();
        assert!(msg.contains("Incomplete row 3"));
        assert!(msg.contains("2 of 4"));
    }

    #[test]
    fn test_cals_error_from_structure() {
        let err: CalsError = StructureError::invalid_column_span("span of 0").into();
        assert!(err.to_string().contains("Invalid column span"));
    }
}
