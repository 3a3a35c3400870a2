use crate::domain::member::MemberId;
use crate::domain::month::MonthKey;
use crate::domain::payment::MONTHLY_CONTRIBUTION;
use crate::error::{LedgerError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One row of a payments CSV file.
///
/// Fine and status never appear here: they are derived by the ledger when
/// the row is recorded. A missing amount falls back to the standard
/// monthly contribution.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PaymentRecord {
    pub member: MemberId,
    pub month: MonthKey,
    pub amount: Option<Decimal>,
    pub paid_date: NaiveDate,
}

impl PaymentRecord {
    pub fn amount_paid(&self) -> Decimal {
        self.amount.unwrap_or(MONTHLY_CONTRIBUTION)
    }
}

/// Reads payment rows from a CSV source.
///
/// Expected header: `member, month, amount, paid_date` with `month` as
/// `YYYY-MM`. Wraps `csv::Reader` with trimming and flexible record
/// lengths, yielding `Result<PaymentRecord>` per row so a malformed line
/// does not abort the stream.
pub struct PaymentReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PaymentReader<R> {
    /// Creates a new `PaymentReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes payment rows.
    pub fn payments(self) -> impl Iterator<Item = Result<PaymentRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(LedgerError::from))
    }
}
