//! CSV dialect configuration.
//!
//! A [`Dialect`] can be built in code or loaded from JSON:
//!
//! ```rust
//! use csv_record_codec::document::{Dialect, RecordTerminator};
//!
//! let dialect = Dialect::from_json_str(r#"{ "delimiter": ";", "terminator": "crlf" }"#).unwrap();
//! assert_eq!(dialect.delimiter, ';');
//! assert_eq!(dialect.quote, '"');
//! assert_eq!(dialect.terminator, RecordTerminator::Crlf);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};

/// Line ending written after each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordTerminator {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    Crlf,
}

/// Delimiter, quoting and line-ending settings handed to the CSV reader/writer.
///
/// Reading accepts `\n`, `\r\n` and `\r` line endings regardless of [`Dialect::terminator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Dialect {
    /// Field delimiter. Must be a single ASCII character.
    pub delimiter: char,
    /// Quote character. Must be a single ASCII character.
    pub quote: char,
    /// Record terminator used when writing.
    pub terminator: RecordTerminator,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
            terminator: RecordTerminator::Lf,
        }
    }
}

impl Dialect {
    /// Parse and validate a dialect from JSON. Missing keys take their defaults.
    pub fn from_json_str(input: &str) -> CodecResult<Self> {
        let dialect: Dialect = serde_json::from_str(input).map_err(|e| CodecError::Config {
            message: format!("invalid dialect json: {e}"),
        })?;
        dialect.validate()?;
        Ok(dialect)
    }

    /// Read a dialect from a JSON file.
    pub fn from_json_path(path: impl AsRef<Path>) -> CodecResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check that the delimiter and quote are distinct single-byte characters.
    pub fn validate(&self) -> CodecResult<()> {
        ascii_byte("delimiter", self.delimiter)?;
        ascii_byte("quote", self.quote)?;
        if self.delimiter == self.quote {
            return Err(CodecError::Config {
                message: format!(
                    "delimiter and quote must differ (both are '{}')",
                    self.delimiter
                ),
            });
        }
        Ok(())
    }

    /// Reader configured for this dialect. The first record is treated as the header.
    pub fn reader_builder(&self) -> CodecResult<csv::ReaderBuilder> {
        self.validate()?;
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(true)
            .delimiter(ascii_byte("delimiter", self.delimiter)?)
            .quote(ascii_byte("quote", self.quote)?);
        Ok(builder)
    }

    /// Writer configured for this dialect.
    pub fn writer_builder(&self) -> CodecResult<csv::WriterBuilder> {
        self.validate()?;
        let terminator = match self.terminator {
            RecordTerminator::Lf => csv::Terminator::Any(b'\n'),
            RecordTerminator::Crlf => csv::Terminator::CRLF,
        };
        let mut builder = csv::WriterBuilder::new();
        builder
            .delimiter(ascii_byte("delimiter", self.delimiter)?)
            .quote(ascii_byte("quote", self.quote)?)
            .terminator(terminator);
        Ok(builder)
    }
}

fn ascii_byte(what: &str, c: char) -> CodecResult<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(CodecError::Config {
            message: format!("{what} must be an ASCII character, got '{c}'"),
        })
    }
}
