use crate::domain::member::{Member, MemberId};
use crate::domain::month::{ContributionMonth, MonthKey};
use crate::domain::payment::Payment;
use crate::domain::ports::{MemberStore, MonthStore, PaymentStore};
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;

/// Column family for member records.
pub const CF_MEMBERS: &str = "members";
/// Column family for contribution months.
pub const CF_MONTHS: &str = "months";
/// Column family for payments.
pub const CF_PAYMENTS: &str = "payments";

/// A persistent ledger store backed by RocksDB.
///
/// Each entity lives in its own column family with JSON-serialized values.
/// Payment keys are `<month>:<zero-padded member id>` so a column-family
/// scan yields payments grouped by month.
///
/// `Clone` shares the underlying `Arc<DB>`, which is how one opened
/// database serves all three store ports.
#[derive(Clone)]
pub struct RocksDbStore {
    db: Arc<DB>,
}

impl RocksDbStore {
    /// Opens or creates a RocksDB instance at the given path, ensuring all
    /// three column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cfs = [CF_MEMBERS, CF_MONTHS, CF_PAYMENTS]
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect::<Vec<_>>();

        let db = DB::open_cf_descriptors(&opts, path, cfs)?;
        Ok(Self { db: Arc::new(db) })
    }

    fn put<T: Serialize>(&self, cf_name: &str, key: &[u8], value: &T) -> Result<()> {
        let cf = self.cf(cf_name)?;
        let bytes = serde_json::to_vec(value)
            .map_err(|e| LedgerError::InternalError(Box::new(e)))?;
        self.db.put_cf(cf, key, bytes)?;
        Ok(())
    }

    fn fetch<T: DeserializeOwned>(&self, cf_name: &str, key: &[u8]) -> Result<Option<T>> {
        let cf = self.cf(cf_name)?;
        match self.db.get_cf(cf, key)? {
            Some(bytes) => {
                let value = serde_json::from_slice(&bytes)
                    .map_err(|e| LedgerError::InternalError(Box::new(e)))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn scan<T: DeserializeOwned>(&self, cf_name: &str) -> Result<Vec<T>> {
        let cf = self.cf(cf_name)?;
        let mut values = Vec::new();
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, bytes) = item?;
            let value = serde_json::from_slice(&bytes)
                .map_err(|e| LedgerError::InternalError(Box::new(e)))?;
            values.push(value);
        }
        Ok(values)
    }

    fn cf(&self, name: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            LedgerError::InternalError(Box::new(std::io::Error::other(format!(
                "column family {name} not found"
            ))))
        })
    }
}

fn payment_key(member: MemberId, month: MonthKey) -> Vec<u8> {
    format!("{month}:{member:010}").into_bytes()
}

#[async_trait]
impl MemberStore for RocksDbStore {
    async fn store(&self, member: Member) -> Result<()> {
        self.put(CF_MEMBERS, &member.id.to_be_bytes(), &member)
    }

    async fn get(&self, id: MemberId) -> Result<Option<Member>> {
        self.fetch(CF_MEMBERS, &id.to_be_bytes())
    }

    async fn get_all(&self) -> Result<Vec<Member>> {
        self.scan(CF_MEMBERS)
    }
}

#[async_trait]
impl MonthStore for RocksDbStore {
    async fn store(&self, month: ContributionMonth) -> Result<()> {
        self.put(CF_MONTHS, month.month.to_string().as_bytes(), &month)
    }

    async fn get(&self, key: MonthKey) -> Result<Option<ContributionMonth>> {
        self.fetch(CF_MONTHS, key.to_string().as_bytes())
    }

    async fn get_all(&self) -> Result<Vec<ContributionMonth>> {
        self.scan(CF_MONTHS)
    }
}

#[async_trait]
impl PaymentStore for RocksDbStore {
    async fn store(&self, payment: Payment) -> Result<()> {
        self.put(
            CF_PAYMENTS,
            &payment_key(payment.member, payment.month),
            &payment,
        )
    }

    async fn get(&self, member: MemberId, month: MonthKey) -> Result<Option<Payment>> {
        self.fetch(CF_PAYMENTS, &payment_key(member, month))
    }

    async fn exists(&self, member: MemberId, month: MonthKey) -> Result<bool> {
        let cf = self.cf(CF_PAYMENTS)?;
        // Key presence only, no value deserialization.
        let result = self.db.get_pinned_cf(cf, payment_key(member, month))?;
        Ok(result.is_some())
    }

    async fn get_all(&self) -> Result<Vec<Payment>> {
        self.scan(CF_PAYMENTS)
    }
}
