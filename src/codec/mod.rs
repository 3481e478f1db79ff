//! Codec dispatch: how a field's static type turns cell text into typed storage and back.
//!
//! Every field type implements [`FieldValue`]. When a field is bound to a column the binding
//! asks the type once for its [`DecodeOp`] / [`EncodeOp`] and closes over the result; nothing is
//! re-derived per record.
//!
//! Types that want to take over their own conversion implement one of the hook traits and
//! return the matching operation:
//!
//! - [`UnmarshalCsv`]: decode through `&mut self` (the usual case).
//! - [`UnmarshalCsvShared`]: decode through `&self`, for handle types with interior mutability.
//! - [`MarshalCsv`]: encode to raw bytes, embedded verbatim as the cell text.
//!
//! ```rust
//! use csv_record_codec::codec::{DecodeOp, EncodeOp, FieldValue, MarshalCsv, UnmarshalCsv};
//! use csv_record_codec::{FieldKind, HookError, Row};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Cents(i64);
//!
//! impl UnmarshalCsv for Cents {
//!     fn unmarshal_csv(&mut self, cell: &str, _row: &Row<'_>) -> Result<(), HookError> {
//!         let (whole, frac) = cell.split_once('.').unwrap_or((cell, "0"));
//!         self.0 = whole.parse::<i64>()? * 100 + frac.parse::<i64>()?;
//!         Ok(())
//!     }
//! }
//!
//! impl MarshalCsv for Cents {
//!     fn marshal_csv(&self) -> Result<Vec<u8>, HookError> {
//!         Ok(format!("{}.{:02}", self.0 / 100, self.0 % 100).into_bytes())
//!     }
//! }
//!
//! impl FieldValue for Cents {
//!     const KIND: FieldKind = FieldKind::Struct;
//!
//!     fn decode_op() -> DecodeOp<Self> {
//!         DecodeOp::by_reference()
//!     }
//!
//!     fn encode_op() -> EncodeOp<Self> {
//!         EncodeOp::marshal()
//!     }
//! }
//! ```

mod dispatch;
mod primitive;

use crate::error::HookError;
use crate::row::Row;
use crate::types::{FieldKind, FieldMeta};

pub use dispatch::{DecodeFn, EncodeFn};
pub(crate) use dispatch::{FieldAccess, OpaqueField, TypedField};

/// A field that decodes itself from one cell plus the surrounding row, through `&mut self`.
pub trait UnmarshalCsv {
    /// Populate `self` from `cell`, the text of the bound column. `row` gives access to the
    /// other cells so a value can be composed from several columns.
    fn unmarshal_csv(&mut self, cell: &str, row: &Row<'_>) -> Result<(), HookError>;
}

/// A field that decodes itself through a shared reference.
///
/// Intended for handle types (`Rc<RefCell<_>>`, `Arc<Mutex<_>>`, ...) where the decoded state
/// lives behind interior mutability.
pub trait UnmarshalCsvShared {
    fn unmarshal_csv(&self, cell: &str, row: &Row<'_>) -> Result<(), HookError>;
}

/// A field that encodes itself. The returned bytes become the cell text verbatim.
pub trait MarshalCsv {
    fn marshal_csv(&self) -> Result<Vec<u8>, HookError>;
}

/// How a field of type `V` is populated from cell text.
pub enum DecodeOp<V> {
    /// Parse the cell into a fresh value. The error string becomes a
    /// [`crate::CodecError::ParseError`] message.
    Parse(fn(&str, &FieldMeta) -> Result<V, String>),
    /// Hand the cell to a hook that works on a shared reference.
    ValueHook(fn(&V, &str, &Row<'_>) -> Result<(), HookError>),
    /// Hand the cell to a hook that needs a mutable reference.
    ReferenceHook(fn(&mut V, &str, &Row<'_>) -> Result<(), HookError>),
    /// Leave the field at its default value.
    Ignore,
}

impl<V: UnmarshalCsv> DecodeOp<V> {
    /// Decode through [`UnmarshalCsv`].
    pub fn by_reference() -> Self {
        DecodeOp::ReferenceHook(<V as UnmarshalCsv>::unmarshal_csv)
    }
}

impl<V: UnmarshalCsvShared> DecodeOp<V> {
    /// Decode through [`UnmarshalCsvShared`].
    pub fn by_value() -> Self {
        DecodeOp::ValueHook(<V as UnmarshalCsvShared>::unmarshal_csv)
    }
}

/// How a field of type `V` is rendered as cell text.
pub enum EncodeOp<V> {
    /// Format the value as text.
    Format(fn(&V, &FieldMeta) -> String),
    /// Delegate to a hook returning raw bytes.
    Hook(fn(&V) -> Result<Vec<u8>, HookError>),
    /// Always an empty cell.
    Blank,
    /// No conversion exists; binding fails with [`crate::CodecError::UnsupportedType`].
    Unsupported,
}

impl<V: MarshalCsv> EncodeOp<V> {
    /// Encode through [`MarshalCsv`].
    pub fn marshal() -> Self {
        EncodeOp::Hook(<V as MarshalCsv>::marshal_csv)
    }
}

/// A type that can be stored in a record field.
///
/// The default operations match what an undecorated type of the given [`FieldKind`] gets:
/// decoding leaves the field untouched, and encoding yields an empty cell for struct, interface
/// and array shapes and [`EncodeOp::Unsupported`] for everything else.
pub trait FieldValue: Sized + 'static {
    const KIND: FieldKind;

    fn decode_op() -> DecodeOp<Self> {
        DecodeOp::Ignore
    }

    fn encode_op() -> EncodeOp<Self> {
        match Self::KIND {
            FieldKind::Struct | FieldKind::Interface | FieldKind::Array => EncodeOp::Blank,
            _ => EncodeOp::Unsupported,
        }
    }
}
