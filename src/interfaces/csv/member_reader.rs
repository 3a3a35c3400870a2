use crate::domain::member::Member;
use crate::error::{LedgerError, Result};
use std::io::Read;

/// Reads member records from a CSV source.
///
/// Expected header: `id, name, phone, joined, active` — the `active` column
/// may be omitted and defaults to true. Whitespace is trimmed and record
/// lengths are flexible.
pub struct MemberReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> MemberReader<R> {
    /// Creates a new `MemberReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes members.
    pub fn members(self) -> impl Iterator<Item = Result<Member>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(LedgerError::from))
    }
}
