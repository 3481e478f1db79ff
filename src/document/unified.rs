//! Option-driven entry points.
//!
//! [`decode_document`] and [`encode_document`] (and their path-based variants) apply a
//! [`Dialect`] and report outcomes to an optional [`CodecObserver`]. [`unmarshal`] and
//! [`marshal`] are the same calls with default options.

use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

use crate::error::CodecResult;
use crate::record::{Record, descriptor_of};

use super::decode::{Collection, decode_reader};
use super::dialect::Dialect;
use super::encode::encode_writer;
use super::observability::{
    CodecContext, CodecObserver, CodecSeverity, CodecStats, Direction, severity_for_error,
};

/// Options controlling encode and decode calls.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct CodecOptions {
    /// Delimiter, quoting and line endings.
    pub dialect: Dialect,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn CodecObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: CodecSeverity,
}

impl fmt::Debug for CodecOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecOptions")
            .field("dialect", &self.dialect)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            observer: None,
            alert_at_or_above: CodecSeverity::Critical,
        }
    }
}

fn context<T: Record>(direction: Direction, path: Option<&Path>) -> CodecContext {
    CodecContext {
        direction,
        record_type: descriptor_of::<T>().type_name(),
        path: path.map(Path::to_path_buf),
    }
}

fn report<V>(
    options: &CodecOptions,
    ctx: &CodecContext,
    result: &CodecResult<V>,
    stats: impl Fn(&V) -> CodecStats,
) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    match result {
        Ok(v) => obs.on_success(ctx, stats(v)),
        Err(e) => {
            let sev = severity_for_error(e);
            obs.on_failure(ctx, sev, e);
            if sev >= options.alert_at_or_above {
                obs.on_alert(ctx, sev, e);
            }
        }
    }
}

/// Decode a complete CSV document into `target`, which must be empty.
///
/// ```rust
/// use csv_record_codec::{record, unmarshal};
///
/// record! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Person {
///         #[csv(rename = "Name")]
///         pub name: String,
///         #[csv(rename = "Age")]
///         pub age: i32,
///     }
/// }
///
/// let mut people: Vec<Person> = Vec::new();
/// unmarshal(b"Name,Age\nJohn,23\nJane,27\n", &mut people).unwrap();
/// assert_eq!(people[1], Person { name: "Jane".into(), age: 27 });
/// ```
pub fn unmarshal<C>(doc: &[u8], target: &mut C) -> CodecResult<()>
where
    C: Collection + ?Sized,
    C::Item: Record,
{
    decode_document(doc, target, &CodecOptions::default()).map(|_| ())
}

/// Encode `records` as a CSV document with a header row.
///
/// An empty slice produces the header row alone.
pub fn marshal<T: Record>(records: &[T]) -> CodecResult<Vec<u8>> {
    encode_document(records, &CodecOptions::default())
}

/// Decode a complete CSV document held in memory.
pub fn decode_document<C>(
    doc: &[u8],
    target: &mut C,
    options: &CodecOptions,
) -> CodecResult<CodecStats>
where
    C: Collection + ?Sized,
    C::Item: Record,
{
    let ctx = context::<C::Item>(Direction::Decode, None);
    let result = options
        .dialect
        .reader_builder()
        .and_then(|builder| decode_reader(builder.from_reader(doc), target));
    report(options, &ctx, &result, |stats| *stats);
    result
}

/// Decode the CSV file at `path`.
pub fn decode_from_path<C>(
    path: impl AsRef<Path>,
    target: &mut C,
    options: &CodecOptions,
) -> CodecResult<CodecStats>
where
    C: Collection + ?Sized,
    C::Item: Record,
{
    let path = path.as_ref();
    let ctx = context::<C::Item>(Direction::Decode, Some(path));
    let result = options.dialect.reader_builder().and_then(|builder| {
        let file = File::open(path)?;
        decode_reader(builder.from_reader(file), target)
    });
    report(options, &ctx, &result, |stats| *stats);
    result
}

/// Encode `records` into an in-memory CSV document.
pub fn encode_document<T: Record>(records: &[T], options: &CodecOptions) -> CodecResult<Vec<u8>> {
    let ctx = context::<T>(Direction::Encode, None);
    let result = options
        .dialect
        .writer_builder()
        .and_then(|builder| encode_writer(builder.from_writer(Vec::new()), records));
    report(options, &ctx, &result, |(_, stats)| *stats);
    result.map(|(bytes, _)| bytes)
}

/// Encode `records` into the file at `path`, replacing it if it exists.
pub fn encode_to_path<T: Record>(
    path: impl AsRef<Path>,
    records: &[T],
    options: &CodecOptions,
) -> CodecResult<CodecStats> {
    let path = path.as_ref();
    let ctx = context::<T>(Direction::Encode, Some(path));
    let result = options.dialect.writer_builder().and_then(|builder| {
        let file = BufWriter::new(File::create(path)?);
        let (mut sink, stats) = encode_writer(builder.from_writer(file), records)?;
        std::io::Write::flush(&mut sink)?;
        Ok(stats)
    });
    report(options, &ctx, &result, |stats| *stats);
    result
}
