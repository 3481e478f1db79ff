//! `record!`: declare a struct together with its [`crate::record::Record`] implementation.

/// Declares a struct and implements [`Record`](crate::record::Record) for it.
///
/// The struct is emitted as written, minus the `#[csv(...)]` attributes. Every field is listed
/// in the descriptor in declaration order, with its visibility taken from the field's own
/// qualifier: only plain `pub` fields take part in encoding and decoding.
///
/// Field metadata goes in `#[csv(...)]` attributes:
///
/// - `rename = "Column Name"`: bind to a column other than the field name.
/// - `skip`: never encode or decode the field.
/// - `true_literal = "Yes"`, `false_literal = "No"`: boolean text on the wire.
///
/// Other field attributes (doc comments, `#[allow(..)]`, ...) are kept on the field.
///
/// Fields may have any type. Types without a [`FieldValue`](crate::codec::FieldValue)
/// implementation are left at their default when decoding; encoding a participating field of
/// such a type fails with [`UnsupportedType`](crate::CodecError::UnsupportedType).
///
/// ```rust
/// use std::path::PathBuf;
///
/// use csv_record_codec::{marshal, record};
///
/// record! {
///     #[derive(Debug, Default, Clone, PartialEq)]
///     pub struct Person {
///         /// Shown as "FullName" in the document.
///         #[csv(rename = "FullName")]
///         pub name: String,
///         pub age: i32,
///         #[csv(rename = "Happy", true_literal = "Yes!", false_literal = "Sad")]
///         pub happy: bool,
///         #[csv(skip)]
///         pub notes: PathBuf,
///         secret: char,
///     }
/// }
///
/// let people = vec![Person { name: "Smith, Joe".into(), age: 23, ..Default::default() }];
/// let out = marshal(&people).unwrap();
/// assert_eq!(out, b"FullName,age,Happy\n\"Smith, Joe\",23,Sad\n");
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$struct_attr:meta])*
        $struct_vis:vis struct $name:ident {
            $($body:tt)*
        }
    ) => {
        $crate::__record_fields! {
            name: [$name]
            head: [$(#[$struct_attr])* $struct_vis struct $name]
            fields: []
            attrs: []
            meta: []
            rest: [$($body)*]
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_fields {
    // `#[csv(...)]`: collect into the pending field's metadata
    (
        name: [$name:ident]
        head: [$($head:tt)*]
        fields: [$($fields:tt)*]
        attrs: [$($attrs:tt)*]
        meta: [$($meta:tt)*]
        rest: [#[csv($($csv:tt)*)] $($rest:tt)*]
    ) => {
        $crate::__record_fields! {
            name: [$name]
            head: [$($head)*]
            fields: [$($fields)*]
            attrs: [$($attrs)*]
            meta: [$($meta)* $($csv)* ,]
            rest: [$($rest)*]
        }
    };
    // any other attribute stays on the field
    (
        name: [$name:ident]
        head: [$($head:tt)*]
        fields: [$($fields:tt)*]
        attrs: [$($attrs:tt)*]
        meta: [$($meta:tt)*]
        rest: [#[$($attr:tt)*] $($rest:tt)*]
    ) => {
        $crate::__record_fields! {
            name: [$name]
            head: [$($head)*]
            fields: [$($fields)*]
            attrs: [$($attrs)* #[$($attr)*]]
            meta: [$($meta)*]
            rest: [$($rest)*]
        }
    };
    (
        name: [$name:ident]
        head: [$($head:tt)*]
        fields: [$($fields:tt)*]
        attrs: [$($attrs:tt)*]
        meta: [$($meta:tt)*]
        rest: [$field_vis:vis $field:ident : $ty:ty $(, $($rest:tt)*)?]
    ) => {
        $crate::__record_fields! {
            name: [$name]
            head: [$($head)*]
            fields: [$($fields)* {[$($attrs)*] [$($meta)*] $field_vis $field : $ty}]
            attrs: []
            meta: []
            rest: [$($($rest)*)?]
        }
    };
    (
        name: [$name:ident]
        head: [$($head:tt)*]
        fields: [$({[$($attrs:tt)*] [$($meta:tt)*] $field_vis:vis $field:ident : $ty:ty})*]
        attrs: []
        meta: []
        rest: []
    ) => {
        $($head)* {
            $( $($attrs)* $field_vis $field: $ty, )*
        }

        impl $crate::record::Record for $name {
            fn descriptor() -> $crate::record::RecordDescriptor<Self> {
                $crate::record::RecordDescriptor::new(stringify!($name))
                $(
                    .field($crate::__record_field_meta!(
                        {
                            #[allow(unused_imports)]
                            use $crate::record::slot::{DescribeOpaque as _, DescribeTyped as _};
                            (&$crate::record::slot::FieldSlot::<Self, $ty>::new())
                                .describe(
                                    stringify!($field),
                                    |record| &record.$field,
                                    |record| &mut record.$field,
                                )
                                .with_visibility($crate::record::Visibility::from_qualifier(
                                    stringify!($field_vis),
                                ))
                        };
                        $($meta)*
                    ))
                )*
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_field_meta {
    ($field:expr;) => {
        $field
    };
    ($field:expr; , $($rest:tt)*) => {
        $crate::__record_field_meta!($field; $($rest)*)
    };
    ($field:expr; skip $($rest:tt)*) => {
        $crate::__record_field_meta!($field.skip(); $($rest)*)
    };
    ($field:expr; rename = $column:literal $($rest:tt)*) => {
        $crate::__record_field_meta!($field.rename($column); $($rest)*)
    };
    ($field:expr; true_literal = $text:literal $($rest:tt)*) => {
        $crate::__record_field_meta!($field.true_literal($text); $($rest)*)
    };
    ($field:expr; false_literal = $text:literal $($rest:tt)*) => {
        $crate::__record_field_meta!($field.false_literal($text); $($rest)*)
    };
}
