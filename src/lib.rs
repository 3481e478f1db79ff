//! `csv-record-codec` converts between CSV documents and collections of statically-typed
//! records, driven by declarative per-field metadata instead of hand-written parsing code.
//!
//! Record types are declared with [`record!`], which keeps the struct as written and derives a
//! field descriptor from it. Decoding matches header columns to fields by name and coerces each
//! cell to the field's type; encoding writes a header row followed by one row per record.
//!
//! ## Field metadata
//!
//! - `#[csv(rename = "Column")]`: bind to a column other than the field name.
//! - `#[csv(skip)]`: never encode or decode the field.
//! - `#[csv(true_literal = "Yes", false_literal = "No")]`: boolean text on the wire. Text that
//!   matches neither literal decodes as `true`.
//!
//! Only plain `pub` fields take part; private and restricted fields are left alone.
//!
//! ## Supported field types
//!
//! - `String`
//! - `i8` .. `i64`, `isize` (parsed as `i64`, then truncated to the field width) and `i128`
//! - `f32`, `f64` (finite text that overflows the precision is a parse error)
//! - `bool`
//! - `u8` .. `u128`, `usize`: encoded, but left at their default when decoding
//! - any type implementing [`codec::FieldValue`], including types with their own
//!   [`codec::UnmarshalCsv`] / [`codec::MarshalCsv`] hooks
//!
//! Fields of any other type are allowed. Decoding leaves them at their default; encoding rejects
//! them with [`CodecError::UnsupportedType`] unless they are private or skipped.
//!
//! ## Quick example
//!
//! ```rust
//! use csv_record_codec::{marshal, record, unmarshal};
//!
//! record! {
//!     #[derive(Debug, Default, Clone, PartialEq)]
//!     pub struct Person {
//!         #[csv(rename = "Name")]
//!         pub name: String,
//!         #[csv(rename = "Age")]
//!         pub age: i32,
//!         #[csv(rename = "Happy", true_literal = "Yes", false_literal = "No")]
//!         pub happy: bool,
//!     }
//! }
//!
//! # fn main() -> Result<(), csv_record_codec::CodecError> {
//! let doc = b"Name,Age,ignored,Happy\nJohn,23,,Yes\nJane,27,,No\n";
//! let mut people: Vec<Person> = Vec::new();
//! unmarshal(doc, &mut people)?;
//! assert_eq!(people.len(), 2);
//! assert_eq!(people[0], Person { name: "John".into(), age: 23, happy: true });
//!
//! let out = marshal(&people)?;
//! assert_eq!(out, b"Name,Age,Happy\nJohn,23,Yes\nJane,27,No\n");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`record`]: record descriptors and the [`record!`] macro
//! - [`codec`]: per-type conversions and custom hooks
//! - [`fieldmap`]: tag resolution and field-to-column binding
//! - [`document`]: decoder/encoder drivers, dialects, observers and entry points
//! - [`row`]: the row view handed to custom decode hooks
//! - [`error`]: error types

pub mod codec;
pub mod document;
pub mod error;
pub mod fieldmap;
pub mod record;
pub mod row;
pub mod types;

pub use document::{
    CodecOptions, Decoder, Dialect, Encoder, decode_document, decode_from_path, encode_document,
    encode_to_path, marshal, unmarshal,
};
pub use error::{CodecError, CodecResult, HookError};
pub use record::Record;
pub use row::Row;
pub use types::{FieldKind, FieldMeta, Visibility};
