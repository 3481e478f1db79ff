//! Built-in [`FieldValue`] implementations.

use std::collections::{BTreeMap, HashMap};

use crate::types::{FieldKind, FieldMeta};

use super::{DecodeOp, EncodeOp, FieldValue, MarshalCsv};

impl FieldValue for String {
    const KIND: FieldKind = FieldKind::Utf8;

    fn decode_op() -> DecodeOp<Self> {
        DecodeOp::Parse(|raw, _| Ok(raw.to_owned()))
    }

    fn encode_op() -> EncodeOp<Self> {
        EncodeOp::Format(|value, _| value.clone())
    }
}

// Text is parsed at `$wide` (i64 for every width up to 64 bits), then narrowed by a width
// cast that keeps the low bits.
macro_rules! signed_field {
    ($($t:ty => $wide:ty),*) => {
        $(
            impl FieldValue for $t {
                const KIND: FieldKind = FieldKind::Int { bits: <$t>::BITS };

                fn decode_op() -> DecodeOp<Self> {
                    DecodeOp::Parse(|raw, _| {
                        raw.parse::<$wide>().map(|n| n as $t).map_err(|e| e.to_string())
                    })
                }

                fn encode_op() -> EncodeOp<Self> {
                    EncodeOp::Format(|value, _| value.to_string())
                }
            }
        )*
    };
}

signed_field!(i8 => i64, i16 => i64, i32 => i64, i64 => i64, isize => i64, i128 => i128);

// Unsigned fields encode but are not populated on decode.
macro_rules! unsigned_field {
    ($($t:ty),*) => {
        $(
            impl FieldValue for $t {
                const KIND: FieldKind = FieldKind::UInt { bits: <$t>::BITS };

                fn encode_op() -> EncodeOp<Self> {
                    EncodeOp::Format(|value, _| value.to_string())
                }
            }
        )*
    };
}

unsigned_field!(u8, u16, u32, u64, u128, usize);

// Finite text that overflows the target precision is an error, not infinity.
fn in_range(raw: &str, infinite: bool) -> Result<(), String> {
    if !infinite {
        return Ok(());
    }
    let magnitude = raw.trim_start_matches(['+', '-']);
    if magnitude.eq_ignore_ascii_case("inf") || magnitude.eq_ignore_ascii_case("infinity") {
        Ok(())
    } else {
        Err("value out of range".to_string())
    }
}

impl FieldValue for f32 {
    const KIND: FieldKind = FieldKind::Float32;

    fn decode_op() -> DecodeOp<Self> {
        DecodeOp::Parse(|raw, _| {
            let value = raw.parse::<f32>().map_err(|e| e.to_string())?;
            in_range(raw, value.is_infinite())?;
            Ok(value)
        })
    }

    fn encode_op() -> EncodeOp<Self> {
        EncodeOp::Format(|value, _| value.to_string())
    }
}

impl FieldValue for f64 {
    const KIND: FieldKind = FieldKind::Float64;

    fn decode_op() -> DecodeOp<Self> {
        DecodeOp::Parse(|raw, _| {
            let value = raw.parse::<f64>().map_err(|e| e.to_string())?;
            in_range(raw, value.is_infinite())?;
            Ok(value)
        })
    }

    fn encode_op() -> EncodeOp<Self> {
        EncodeOp::Format(|value, _| value.to_string())
    }
}

fn decode_bool(raw: &str, meta: &FieldMeta) -> Result<bool, String> {
    if raw == meta.true_text() {
        Ok(true)
    } else if raw == meta.false_text() {
        Ok(false)
    } else {
        // Unrecognised text reads as true.
        Ok(true)
    }
}

fn encode_bool(value: &bool, meta: &FieldMeta) -> String {
    if *value {
        meta.true_text().to_owned()
    } else {
        meta.false_text().to_owned()
    }
}

impl FieldValue for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn decode_op() -> DecodeOp<Self> {
        DecodeOp::Parse(decode_bool)
    }

    fn encode_op() -> EncodeOp<Self> {
        EncodeOp::Format(encode_bool)
    }
}

impl<V: FieldValue, const N: usize> FieldValue for [V; N] {
    const KIND: FieldKind = FieldKind::Array;
}

impl<V: FieldValue> FieldValue for Vec<V> {
    const KIND: FieldKind = FieldKind::Sequence;
}

impl<V: FieldValue> FieldValue for Option<V> {
    const KIND: FieldKind = FieldKind::Optional;
}

impl<K: 'static, V: 'static, S: 'static> FieldValue for HashMap<K, V, S> {
    const KIND: FieldKind = FieldKind::Map;
}

impl<K: 'static, V: 'static> FieldValue for BTreeMap<K, V> {
    const KIND: FieldKind = FieldKind::Map;
}

impl FieldValue for Box<dyn MarshalCsv> {
    const KIND: FieldKind = FieldKind::Interface;

    fn encode_op() -> EncodeOp<Self> {
        EncodeOp::Hook(|value| value.marshal_csv())
    }
}
