//! Incremental walk over a top-level JSON array of objects
//!
//! The walker decodes one object at a time straight off the reader and hands
//! it to a [`RecordVisitor`], so neither pass ever materializes the whole
//! document. Both conversion drivers share this routine; only what they do
//! with each record differs.

use crate::error::{ConvertError, Result};
use crate::types::Record;
use serde::de::{DeserializeSeed, Deserializer, Error as _, SeqAccess, Visitor};
use serde_json::error::Category;
use std::fmt;
use std::io::{BufReader, Read};

/// Per-record callback for a walk over the input array.
///
/// Implementations: field indexing, record buffering, and CSV emission.
pub trait RecordVisitor {
    /// Consume one decoded record. Returning an error aborts the walk
    /// immediately and surfaces that error from [`walk_array`].
    fn visit_record(&mut self, record: Record) -> Result<()>;
}

/// Walk a top-level JSON array, invoking `visitor` once per element.
///
/// The document must be a single array of JSON objects; anything else is
/// rejected as [`ConvertError::MalformedInput`], including trailing bytes
/// after the closing bracket. I/O failures while reading surface as
/// [`ConvertError::SourceFailure`].
pub fn walk_array<R, V>(source: R, read_buffer_size: usize, visitor: &mut V) -> Result<()>
where
    R: Read,
    V: RecordVisitor,
{
    let reader = BufReader::with_capacity(read_buffer_size, source);
    let mut de = serde_json::Deserializer::from_reader(reader);

    // Visitor errors cannot cross the serde boundary intact, so the seed
    // stashes them here and raises a placeholder serde error instead.
    let mut aborted = None;
    let outcome = RecordSeq {
        visitor,
        aborted: &mut aborted,
    }
    .deserialize(&mut de)
    .and_then(|()| de.end());

    match outcome {
        Ok(()) => Ok(()),
        Err(err) => match aborted.take() {
            Some(visitor_err) => Err(visitor_err),
            None => Err(classify(err)),
        },
    }
}

fn classify(err: serde_json::Error) -> ConvertError {
    match err.classify() {
        Category::Io => ConvertError::SourceFailure(err.into()),
        _ => ConvertError::MalformedInput(err),
    }
}

/// Seed that decodes array elements one by one, forwarding each to the
/// visitor instead of collecting them.
struct RecordSeq<'a, V> {
    visitor: &'a mut V,
    aborted: &'a mut Option<ConvertError>,
}

impl<'de, V: RecordVisitor> DeserializeSeed<'de> for RecordSeq<'_, V> {
    type Value = ();

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<(), D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(self)
    }
}

impl<'de, V: RecordVisitor> Visitor<'de> for RecordSeq<'_, V> {
    type Value = ();

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON array of objects")
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<(), A::Error>
    where
        A: SeqAccess<'de>,
    {
        while let Some(record) = seq.next_element::<Record>()? {
            if let Err(err) = self.visitor.visit_record(record) {
                *self.aborted = Some(err);
                return Err(A::Error::custom("record visitor aborted the walk"));
            }
        }
        Ok(())
    }
}
