//! Document-level encoding and decoding.
//!
//! Most callers should use [`unmarshal`] / [`marshal`], or the option-taking variants in
//! [`unified`] when they need a non-default [`Dialect`] or an [`CodecObserver`].
//!
//! Lower-level drivers:
//! - [`Decoder`] over a caller-supplied `csv::Reader`
//! - [`Encoder`] over a caller-supplied `csv::Writer`

pub mod decode;
pub mod dialect;
pub mod encode;
pub mod observability;
pub mod unified;

pub use decode::{Collection, Decoder, decode_reader};
pub use dialect::{Dialect, RecordTerminator};
pub use encode::{Encoder, encode_writer};
pub use observability::{
    CodecContext, CodecObserver, CodecSeverity, CodecStats, CompositeObserver, Direction,
    FileObserver, StdErrObserver, severity_for_error,
};
pub use unified::{
    CodecOptions, decode_document, decode_from_path, encode_document, encode_to_path, marshal,
    unmarshal,
};
