//! Type-erased field access. A [`TypedField`] knows the concrete field type and turns the
//! operations reported by [`FieldValue`] into closures over the record type alone.

use crate::error::{CodecError, CodecResult};
use crate::row::Row;
use crate::types::{FieldKind, FieldMeta};

use super::{DecodeOp, EncodeOp, FieldValue};

/// Bound decode operation: populate one field of `T` from a row.
pub type DecodeFn<T> = Box<dyn Fn(&mut T, &Row<'_>) -> CodecResult<()> + Send + Sync>;

/// Bound encode operation: render one field of `T`. The `usize` is the output row number,
/// used only for error reporting.
pub type EncodeFn<T> = Box<dyn Fn(&T, usize) -> CodecResult<Vec<u8>> + Send + Sync>;

pub(crate) trait FieldAccess<T>: Send + Sync {
    fn bind_decoder(
        &self,
        field: &'static str,
        column: usize,
        column_name: &str,
        meta: &FieldMeta,
    ) -> DecodeFn<T>;

    fn bind_encoder(&self, field: &'static str, meta: &FieldMeta) -> CodecResult<EncodeFn<T>>;
}

pub(crate) struct TypedField<T, V> {
    get: fn(&T) -> &V,
    get_mut: fn(&mut T) -> &mut V,
}

impl<T, V> TypedField<T, V> {
    pub(crate) fn new(get: fn(&T) -> &V, get_mut: fn(&mut T) -> &mut V) -> Self {
        Self { get, get_mut }
    }
}

/// Stand-in for a field whose type has no conversion at all.
pub(crate) struct OpaqueField;

impl<T: 'static> FieldAccess<T> for OpaqueField {
    fn bind_decoder(
        &self,
        _field: &'static str,
        _column: usize,
        _column_name: &str,
        _meta: &FieldMeta,
    ) -> DecodeFn<T> {
        Box::new(|_: &mut T, _: &Row<'_>| Ok(()))
    }

    fn bind_encoder(&self, field: &'static str, _meta: &FieldMeta) -> CodecResult<EncodeFn<T>> {
        Err(CodecError::UnsupportedType {
            field: field.to_owned(),
            kind: FieldKind::Other,
        })
    }
}

fn cell<'r>(row: &Row<'r>, column: usize, column_name: &str) -> CodecResult<&'r str> {
    row.at(column).ok_or_else(|| CodecError::MissingCell {
        row: row.number(),
        column: column_name.to_owned(),
        index: column,
        found: row.len(),
    })
}

impl<T: 'static, V: FieldValue> FieldAccess<T> for TypedField<T, V> {
    fn bind_decoder(
        &self,
        field: &'static str,
        column: usize,
        column_name: &str,
        meta: &FieldMeta,
    ) -> DecodeFn<T> {
        let column_name = column_name.to_owned();
        let get = self.get;
        let get_mut = self.get_mut;

        match V::decode_op() {
            DecodeOp::Parse(parse) => {
                let meta = meta.clone();
                Box::new(move |record: &mut T, row: &Row<'_>| {
                    let raw = cell(row, column, &column_name)?;
                    let value = parse(raw, &meta).map_err(|message| CodecError::ParseError {
                        row: row.number(),
                        column: column_name.clone(),
                        raw: raw.to_owned(),
                        message,
                    })?;
                    *get_mut(record) = value;
                    Ok(())
                })
            }
            DecodeOp::ReferenceHook(hook) => Box::new(move |record: &mut T, row: &Row<'_>| {
                let raw = cell(row, column, &column_name)?;
                hook(get_mut(record), raw, row).map_err(|source| CodecError::CustomCodec {
                    row: row.number(),
                    field: field.to_owned(),
                    source,
                })
            }),
            DecodeOp::ValueHook(hook) => Box::new(move |record: &mut T, row: &Row<'_>| {
                let raw = cell(row, column, &column_name)?;
                hook(get(record), raw, row).map_err(|source| CodecError::CustomCodec {
                    row: row.number(),
                    field: field.to_owned(),
                    source,
                })
            }),
            DecodeOp::Ignore => Box::new(|_: &mut T, _: &Row<'_>| Ok(())),
        }
    }

    fn bind_encoder(&self, field: &'static str, meta: &FieldMeta) -> CodecResult<EncodeFn<T>> {
        let get = self.get;

        match V::encode_op() {
            EncodeOp::Format(format) => {
                let meta = meta.clone();
                Ok(Box::new(move |record: &T, _: usize| {
                    Ok(format(get(record), &meta).into_bytes())
                }))
            }
            EncodeOp::Hook(hook) => Ok(Box::new(move |record: &T, row: usize| {
                hook(get(record)).map_err(|source| CodecError::CustomCodec {
                    row,
                    field: field.to_owned(),
                    source,
                })
            })),
            EncodeOp::Blank => Ok(Box::new(|_: &T, _: usize| Ok(Vec::new()))),
            EncodeOp::Unsupported => Err(CodecError::UnsupportedType {
                field: field.to_owned(),
                kind: V::KIND,
            }),
        }
    }
}
