//! Whole-collection encoding.

use std::io;

use csv::ByteRecord;

use crate::error::{CodecError, CodecResult};
use crate::fieldmap::{EncodeMap, FieldMap};
use crate::record::{Record, descriptor_of};

use super::observability::CodecStats;

/// Encodes records of `T` as CSV: a header row from the field map, then one row per record.
pub struct Encoder<W: io::Write, T: Record> {
    writer: csv::Writer<W>,
    map: EncodeMap<T>,
    type_name: &'static str,
    header_written: bool,
    rows: usize,
    scratch: ByteRecord,
}

impl<W: io::Write, T: Record> Encoder<W, T> {
    /// Bind the fields of `T` for encoding.
    ///
    /// Fails with [`CodecError::UnsupportedType`] before anything is written if a
    /// participating field has no conversion.
    pub fn new(writer: csv::Writer<W>) -> CodecResult<Self> {
        let descriptor = descriptor_of::<T>();
        let map = FieldMap::for_encode(&descriptor)?;

        Ok(Self {
            writer,
            map,
            type_name: descriptor.type_name(),
            header_written: false,
            rows: 0,
            scratch: ByteRecord::new(),
        })
    }

    pub fn field_map(&self) -> &EncodeMap<T> {
        &self.map
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Records written so far.
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    fn write_header(&mut self) -> CodecResult<()> {
        if !self.header_written {
            self.writer.write_record(self.map.column_names())?;
            self.header_written = true;
        }
        Ok(())
    }

    /// Write one record, preceded by the header if this is the first.
    pub fn encode(&mut self, record: &T) -> CodecResult<()> {
        self.write_header()?;

        let row = self.rows + 2;
        self.scratch.clear();
        for binding in self.map.bindings() {
            let cell = binding.render(record, row)?;
            self.scratch.push_field(&cell);
        }
        self.writer.write_byte_record(&self.scratch)?;
        self.rows += 1;
        Ok(())
    }

    /// Write every record in order.
    pub fn encode_all<'a, I>(&mut self, records: I) -> CodecResult<()>
    where
        I: IntoIterator<Item = &'a T>,
    {
        for record in records {
            self.encode(record)?;
        }
        Ok(())
    }

    /// Write the header if no record was written, flush, and return the inner writer.
    pub fn finish(mut self) -> CodecResult<W> {
        self.write_header()?;
        self.writer.flush()?;
        self.writer
            .into_inner()
            .map_err(|e| CodecError::Io(e.into_error()))
    }

    pub(crate) fn stats(&self) -> CodecStats {
        CodecStats {
            records: self.rows,
            bound_fields: self.map.len(),
            ignored_columns: 0,
        }
    }
}

/// Encode `records` through `writer` and return the writer's inner sink with stats.
pub fn encode_writer<W, T>(writer: csv::Writer<W>, records: &[T]) -> CodecResult<(W, CodecStats)>
where
    W: io::Write,
    T: Record,
{
    let mut encoder = Encoder::<W, T>::new(writer)?;
    encoder.encode_all(records)?;
    let stats = encoder.stats();
    let inner = encoder.finish()?;
    Ok((inner, stats))
}
