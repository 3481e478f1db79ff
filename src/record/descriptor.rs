use std::fmt;
use std::sync::Arc;

use crate::codec::{FieldAccess, FieldValue, OpaqueField, TypedField};
use crate::types::{FieldKind, FieldMeta, Visibility};

/// One field of a record type: declared name, static kind, visibility, metadata and accessors.
pub struct FieldDescriptor<T> {
    name: &'static str,
    kind: FieldKind,
    visibility: Visibility,
    meta: FieldMeta,
    access: Arc<dyn FieldAccess<T>>,
}

impl<T: 'static> FieldDescriptor<T> {
    /// Describe a public field with the given accessors.
    ///
    /// ```rust
    /// use csv_record_codec::record::FieldDescriptor;
    ///
    /// #[derive(Default)]
    /// struct Person {
    ///     name: String,
    /// }
    ///
    /// let field = FieldDescriptor::<Person>::new("name", |p| &p.name, |p| &mut p.name)
    ///     .rename("Full Name");
    /// assert_eq!(field.meta().column.as_deref(), Some("Full Name"));
    /// ```
    pub fn new<V: FieldValue>(
        name: &'static str,
        get: fn(&T) -> &V,
        get_mut: fn(&mut T) -> &mut V,
    ) -> Self {
        Self {
            name,
            kind: V::KIND,
            visibility: Visibility::Public,
            meta: FieldMeta::default(),
            access: Arc::new(TypedField::new(get, get_mut)),
        }
    }

    /// Describe a field whose type has no [`FieldValue`] implementation.
    ///
    /// Decoding leaves it at its default; encoding it fails with
    /// [`crate::CodecError::UnsupportedType`] unless the field is private or skipped.
    pub fn opaque(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Other,
            visibility: Visibility::Public,
            meta: FieldMeta::default(),
            access: Arc::new(OpaqueField),
        }
    }
}

impl<T> FieldDescriptor<T> {
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_meta(mut self, meta: FieldMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Bind the field to `column` instead of its declared name.
    pub fn rename(mut self, column: impl Into<String>) -> Self {
        self.meta.column = Some(column.into());
        self
    }

    /// Exclude the field from encoding and decoding.
    pub fn skip(mut self) -> Self {
        self.meta.skip = true;
        self
    }

    pub fn true_literal(mut self, text: impl Into<String>) -> Self {
        self.meta.true_literal = Some(text.into());
        self
    }

    pub fn false_literal(mut self, text: impl Into<String>) -> Self {
        self.meta.false_literal = Some(text.into());
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    pub(crate) fn access(&self) -> &dyn FieldAccess<T> {
        self.access.as_ref()
    }
}

impl<T> Clone for FieldDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            kind: self.kind,
            visibility: self.visibility,
            meta: self.meta.clone(),
            access: Arc::clone(&self.access),
        }
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("visibility", &self.visibility)
            .field("meta", &self.meta)
            .finish()
    }
}

/// Ordered field list for one record type.
pub struct RecordDescriptor<T> {
    type_name: &'static str,
    fields: Vec<FieldDescriptor<T>>,
}

impl<T> RecordDescriptor<T> {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            fields: Vec::new(),
        }
    }

    /// Append a field. Fields must be added in declaration order.
    pub fn field(mut self, field: FieldDescriptor<T>) -> Self {
        self.fields.push(field);
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    /// Returns the field declared as `name`, if present.
    pub fn field_named(&self, name: &str) -> Option<&FieldDescriptor<T>> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl<T> Clone for RecordDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name,
            fields: self.fields.clone(),
        }
    }
}

impl<T> fmt::Debug for RecordDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordDescriptor")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .finish()
    }
}
