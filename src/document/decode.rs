//! Whole-document decoding.

use std::collections::VecDeque;
use std::io;

use csv::StringRecord;

use crate::error::{CodecError, CodecResult};
use crate::fieldmap::{DecodeMap, FieldMap};
use crate::record::{Record, descriptor_of};
use crate::row::Row;

use super::observability::CodecStats;

/// An ordered collection that decoded records are appended to.
pub trait Collection {
    type Item;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append `records`, preserving their order.
    fn append_records(&mut self, records: Vec<Self::Item>);
}

impl<T> Collection for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn append_records(&mut self, records: Vec<T>) {
        self.extend(records);
    }
}

impl<T> Collection for VecDeque<T> {
    type Item = T;

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn append_records(&mut self, records: Vec<T>) {
        self.extend(records);
    }
}

/// Decodes every record of a CSV document into `T`.
///
/// The header is read and the field map built in [`Decoder::new`]; [`Decoder::decode_all`]
/// then applies the same bindings to every record.
pub struct Decoder<R, T: Record> {
    reader: csv::Reader<R>,
    columns: Vec<String>,
    map: DecodeMap<T>,
    type_name: &'static str,
}

impl<R: io::Read, T: Record> Decoder<R, T> {
    /// Read the header row from `reader` and bind the fields of `T` to it.
    ///
    /// Fails with [`CodecError::MalformedDocument`] if no header row can be read.
    pub fn new(mut reader: csv::Reader<R>) -> CodecResult<Self> {
        let header = read_header(&mut reader)?;
        let columns: Vec<String> = header.iter().map(str::to_owned).collect();

        let descriptor = descriptor_of::<T>();
        let map = FieldMap::for_decode(&descriptor, &columns);

        Ok(Self {
            reader,
            columns,
            map,
            type_name: descriptor.type_name(),
        })
    }

    /// Column names from the header row.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn field_map(&self) -> &DecodeMap<T> {
        &self.map
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Decode the remaining records, in document order.
    ///
    /// The first failing cell aborts the whole pass; records decoded before it are dropped.
    pub fn decode_all(&mut self) -> CodecResult<Vec<T>> {
        let mut out = Vec::new();
        let mut record = StringRecord::new();
        // header is row 1
        let mut number = 1;

        while self.reader.read_record(&mut record)? {
            number += 1;
            let row = Row::new(&self.columns, &record, number);
            let mut value = T::default();
            for binding in self.map.bindings() {
                binding.apply(&mut value, &row)?;
            }
            out.push(value);
        }

        Ok(out)
    }

    pub(crate) fn stats(&self, records: usize) -> CodecStats {
        CodecStats {
            records,
            bound_fields: self.map.len(),
            ignored_columns: self.map.ignored_columns(),
        }
    }
}

fn read_header<R: io::Read>(reader: &mut csv::Reader<R>) -> CodecResult<StringRecord> {
    let malformed = |message: String| CodecError::MalformedDocument { message };

    let header = if reader.has_headers() {
        reader
            .headers()
            .map_err(|e| malformed(format!("cannot read header row: {e}")))?
            .clone()
    } else {
        let mut first = StringRecord::new();
        let found = reader
            .read_record(&mut first)
            .map_err(|e| malformed(format!("cannot read header row: {e}")))?;
        if !found {
            first.clear();
        }
        first
    };

    if header.is_empty() {
        return Err(malformed("document has no header row".to_string()));
    }
    Ok(header)
}

/// Decode every record read from `reader` and append them to `target`.
///
/// `target` must be empty. It is only extended once the whole document has decoded, so on
/// error it is left untouched.
pub fn decode_reader<R, C>(reader: csv::Reader<R>, target: &mut C) -> CodecResult<CodecStats>
where
    R: io::Read,
    C: Collection + ?Sized,
    C::Item: Record,
{
    if !target.is_empty() {
        return Err(CodecError::InvalidTarget {
            message: format!(
                "target already holds {} records; decoding requires an empty collection",
                target.len()
            ),
        });
    }

    let mut decoder = Decoder::<R, C::Item>::new(reader)?;
    let records = decoder.decode_all()?;
    let stats = decoder.stats(records.len());
    target.append_records(records);
    Ok(stats)
}
