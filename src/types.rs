//! Field-level data model shared by the descriptor, dispatch and field-map layers.
//!
//! A record type is described by an ordered list of fields (see [`crate::record`]); each field
//! carries a [`FieldKind`], a [`Visibility`] and the declarative [`FieldMeta`] consulted when
//! matching it to a CSV column.

use std::fmt;

/// Static shape of a field's type, as reported by [`crate::codec::FieldValue::KIND`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// UTF-8 string.
    Utf8,
    /// Signed integer of the given width.
    Int { bits: u32 },
    /// Unsigned integer of the given width.
    UInt { bits: u32 },
    /// 32-bit floating point number.
    Float32,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// Fixed-size array.
    Array,
    /// Struct-like value with no textual form of its own.
    Struct,
    /// Trait object.
    Interface,
    /// Growable sequence (`Vec<_>`).
    Sequence,
    /// Key/value map.
    Map,
    /// Optional value.
    Optional,
    /// Anything else.
    Other,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Utf8 => f.write_str("string"),
            FieldKind::Int { bits } => write!(f, "i{bits}"),
            FieldKind::UInt { bits } => write!(f, "u{bits}"),
            FieldKind::Float32 => f.write_str("f32"),
            FieldKind::Float64 => f.write_str("f64"),
            FieldKind::Bool => f.write_str("bool"),
            FieldKind::Array => f.write_str("array"),
            FieldKind::Struct => f.write_str("struct"),
            FieldKind::Interface => f.write_str("interface"),
            FieldKind::Sequence => f.write_str("sequence"),
            FieldKind::Map => f.write_str("map"),
            FieldKind::Optional => f.write_str("optional"),
            FieldKind::Other => f.write_str("other"),
        }
    }
}

/// Whether a field can be read and written from outside its defining type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Unrestricted `pub` field.
    #[default]
    Public,
    /// Private or restricted (`pub(crate)`, `pub(super)`, ...) field.
    Private,
}

impl Visibility {
    /// Classify a field from the source text of its visibility qualifier.
    ///
    /// Only a bare `pub` is externally visible. This is what [`crate::record!`] feeds in via
    /// `stringify!` on the captured `vis` fragment.
    pub fn from_qualifier(qualifier: &str) -> Self {
        if qualifier.trim() == "pub" {
            Visibility::Public
        } else {
            Visibility::Private
        }
    }
}

/// Declarative per-field metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMeta {
    /// Explicit column name; when `None` the field's declared name is used.
    pub column: Option<String>,
    /// Exclude the field from both directions.
    pub skip: bool,
    /// Text representing `true` (boolean fields only).
    pub true_literal: Option<String>,
    /// Text representing `false` (boolean fields only).
    pub false_literal: Option<String>,
}

impl FieldMeta {
    /// Text that stands for `true`, falling back to the canonical `"true"`.
    pub fn true_text(&self) -> &str {
        self.true_literal.as_deref().unwrap_or("true")
    }

    /// Text that stands for `false`, falling back to the canonical `"false"`.
    pub fn false_text(&self) -> &str {
        self.false_literal.as_deref().unwrap_or("false")
    }
}
