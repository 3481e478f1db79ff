use thiserror::Error;

use crate::types::FieldKind;

/// Convenience result type for encode/decode operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Error type reported by custom field hooks ([`crate::codec::UnmarshalCsv`],
/// [`crate::codec::MarshalCsv`] and friends).
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type returned by every encode and decode entry point.
///
/// Row numbers are 1-based and count the header as row 1, so the first data record is row 2.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Tokenizer error while reading or writing a data record (ragged rows, invalid UTF-8, ...).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The decode target cannot receive records.
    #[error("invalid decode target: {message}")]
    InvalidTarget { message: String },

    /// No header row could be read from the document.
    #[error("malformed document: {message}")]
    MalformedDocument { message: String },

    /// A cell could not be coerced into the field's numeric type.
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// A field's own encode/decode hook reported failure.
    #[error("custom codec for field '{field}' failed at row {row}: {source}")]
    CustomCodec {
        row: usize,
        field: String,
        #[source]
        source: HookError,
    },

    /// Encoding reached a field type that has neither a built-in conversion nor a hook.
    #[error("unsupported field type for '{field}': {kind} values cannot be encoded")]
    UnsupportedType { field: String, kind: FieldKind },

    /// A bound column index lies past the end of the row's cells.
    #[error("row {row} has {found} cells but column '{column}' is at index {index}")]
    MissingCell {
        row: usize,
        column: String,
        index: usize,
        found: usize,
    },

    /// Invalid dialect or options configuration.
    #[error("invalid configuration: {message}")]
    Config { message: String },
}
