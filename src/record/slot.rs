//! Field description support for [`crate::record!`].
//!
//! The macro knows each field's concrete type, so it can pick between a typed descriptor (the
//! type implements [`FieldValue`]) and an opaque one (it does not) by method resolution alone:
//! `DescribeTyped` is implemented on `FieldSlot` and is found before any auto-ref,
//! `DescribeOpaque` is implemented on `&FieldSlot` and only matches after auto-ref.
//! Opaque fields never decode and refuse to encode, so record types may hold any field type.

use std::marker::PhantomData;

use crate::codec::FieldValue;

use super::FieldDescriptor;

pub struct FieldSlot<T, V>(PhantomData<fn(&T) -> &V>);

impl<T, V> FieldSlot<T, V> {
    pub fn new() -> Self {
        FieldSlot(PhantomData)
    }
}

impl<T, V> Default for FieldSlot<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

pub trait DescribeTyped {
    type Record;
    type Value;

    fn describe(
        &self,
        name: &'static str,
        get: fn(&Self::Record) -> &Self::Value,
        get_mut: fn(&mut Self::Record) -> &mut Self::Value,
    ) -> FieldDescriptor<Self::Record>;
}

impl<T: 'static, V: FieldValue> DescribeTyped for FieldSlot<T, V> {
    type Record = T;
    type Value = V;

    fn describe(
        &self,
        name: &'static str,
        get: fn(&T) -> &V,
        get_mut: fn(&mut T) -> &mut V,
    ) -> FieldDescriptor<T> {
        FieldDescriptor::new(name, get, get_mut)
    }
}

pub trait DescribeOpaque {
    type Record;
    type Value;

    fn describe(
        &self,
        name: &'static str,
        get: fn(&Self::Record) -> &Self::Value,
        get_mut: fn(&mut Self::Record) -> &mut Self::Value,
    ) -> FieldDescriptor<Self::Record>;
}

impl<T: 'static, V> DescribeOpaque for &FieldSlot<T, V> {
    type Record = T;
    type Value = V;

    fn describe(
        &self,
        name: &'static str,
        _get: fn(&T) -> &V,
        _get_mut: fn(&mut T) -> &mut V,
    ) -> FieldDescriptor<T> {
        FieldDescriptor::opaque(name)
    }
}
