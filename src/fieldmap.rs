//! Tag resolution and field-to-column binding.
//!
//! [`resolve_column`] decides whether a field takes part and under which column name.
//! [`FieldMap::for_decode`] intersects the participating fields with a document header;
//! [`FieldMap::for_encode`] lays every participating field out as an output column. Either way
//! each [`FieldBinding`] carries its operation, resolved once when the map is built.

use std::collections::HashMap;

use crate::codec::{DecodeFn, EncodeFn};
use crate::error::CodecResult;
use crate::record::{FieldDescriptor, RecordDescriptor};
use crate::row::Row;
use crate::types::{FieldKind, Visibility};

/// Column name a field binds to, or `None` if the field does not participate.
///
/// Private fields never participate; neither do fields marked `skip`. Otherwise the explicit
/// column name wins over the declared field name.
pub fn resolve_column<T>(field: &FieldDescriptor<T>) -> Option<&str> {
    if field.visibility() == Visibility::Private || field.meta().skip {
        return None;
    }
    Some(field.meta().column.as_deref().unwrap_or(field.name()))
}

/// Participating fields of `descriptor` in declaration order, with their resolved column names.
pub fn participating_fields<T>(
    descriptor: &RecordDescriptor<T>,
) -> impl Iterator<Item = (&FieldDescriptor<T>, &str)> {
    descriptor
        .fields()
        .iter()
        .filter_map(|field| resolve_column(field).map(|column| (field, column)))
}

/// One field bound to one column, plus the operation applied to every record.
pub struct FieldBinding<F> {
    column: usize,
    column_name: String,
    field: &'static str,
    kind: FieldKind,
    op: F,
}

impl<F> FieldBinding<F> {
    /// Position of the bound column.
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    /// Declared name of the bound field.
    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }
}

impl<T> FieldBinding<DecodeFn<T>> {
    /// Populate the bound field of `record` from `row`.
    pub fn apply(&self, record: &mut T, row: &Row<'_>) -> CodecResult<()> {
        (self.op)(record, row)
    }
}

impl<T> FieldBinding<EncodeFn<T>> {
    /// Render the bound field of `record`; `row` is only used in error reports.
    pub fn render(&self, record: &T, row: usize) -> CodecResult<Vec<u8>> {
        (self.op)(record, row)
    }
}

/// Ordered bindings for one record type against one column set.
pub struct FieldMap<F> {
    bindings: Vec<FieldBinding<F>>,
    ignored_columns: usize,
}

/// Field map used while decoding records of `T`.
pub type DecodeMap<T> = FieldMap<DecodeFn<T>>;

/// Field map used while encoding records of `T`.
pub type EncodeMap<T> = FieldMap<EncodeFn<T>>;

impl<F> FieldMap<F> {
    pub fn bindings(&self) -> &[FieldBinding<F>] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Document columns that no field bound to.
    pub fn ignored_columns(&self) -> usize {
        self.ignored_columns
    }

    /// Column names in binding order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|b| b.column_name.as_str())
    }
}

impl<T: 'static> FieldMap<DecodeFn<T>> {
    /// Bind the participating fields of `descriptor` to the columns of a document header.
    ///
    /// Matching is exact and case-sensitive. When the header repeats a name, the first
    /// occurrence wins. Fields without a matching column and columns without a matching field
    /// are left out.
    pub fn for_decode(descriptor: &RecordDescriptor<T>, columns: &[String]) -> Self {
        let mut lookup: HashMap<&str, usize> = HashMap::with_capacity(columns.len());
        for (idx, name) in columns.iter().enumerate() {
            lookup.entry(name.as_str()).or_insert(idx);
        }

        let bindings: Vec<_> = participating_fields(descriptor)
            .filter_map(|(field, name)| {
                let column = *lookup.get(name)?;
                Some(FieldBinding {
                    column,
                    column_name: name.to_owned(),
                    field: field.name(),
                    kind: field.kind(),
                    op: field
                        .access()
                        .bind_decoder(field.name(), column, name, field.meta()),
                })
            })
            .collect();

        let mut used = vec![false; columns.len()];
        for binding in &bindings {
            used[binding.column] = true;
        }
        let ignored_columns = used.iter().filter(|u| !**u).count();

        Self {
            bindings,
            ignored_columns,
        }
    }
}

impl<T: 'static> FieldMap<EncodeFn<T>> {
    /// Lay out every participating field of `descriptor` as an output column, in declaration
    /// order.
    ///
    /// Fails with [`crate::CodecError::UnsupportedType`] if a field type has no conversion.
    pub fn for_encode(descriptor: &RecordDescriptor<T>) -> CodecResult<Self> {
        let bindings = participating_fields(descriptor)
            .enumerate()
            .map(|(column, (field, name))| -> CodecResult<FieldBinding<EncodeFn<T>>> {
                Ok(FieldBinding {
                    column,
                    column_name: name.to_owned(),
                    field: field.name(),
                    kind: field.kind(),
                    op: field.access().bind_encoder(field.name(), field.meta())?,
                })
            })
            .collect::<CodecResult<Vec<_>>>()?;

        Ok(Self {
            bindings,
            ignored_columns: 0,
        })
    }
}
