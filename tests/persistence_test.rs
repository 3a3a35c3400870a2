#![cfg(feature = "storage-rocksdb")]

mod common;

use chamabook::application::ledger::LedgerService;
use chamabook::domain::month::MonthKey;
use chamabook::infrastructure::rocksdb::RocksDbStore;
use common::{date, member};
use rust_decimal_macros::dec;
use tempfile::tempdir;

fn service_on(store: RocksDbStore) -> LedgerService {
    LedgerService::new(
        Box::new(store.clone()),
        Box::new(store.clone()),
        Box::new(store),
    )
}

#[tokio::test]
async fn test_ledger_survives_reopen() {
    let dir = tempdir().unwrap();
    let march = MonthKey::new(2025, 3).unwrap();

    {
        let service = service_on(RocksDbStore::open(dir.path()).unwrap());
        service.register_member(member(1, "Amina", true)).await.unwrap();
        service.open_month(march).await.unwrap();
        service
            .record_payment(1, march, dec!(2500), date(2025, 3, 12))
            .await
            .unwrap();
    }

    let service = service_on(RocksDbStore::open(dir.path()).unwrap());
    let stats = service.monthly_stats(march).await.unwrap();
    assert_eq!(stats.paid_members, 1);
    assert_eq!(stats.total_fines, dec!(550));

    // Uniqueness holds across processes too.
    let duplicate = service
        .record_payment(1, march, dec!(2500), date(2025, 3, 13))
        .await;
    assert!(duplicate.is_err());
}

#[tokio::test]
async fn test_locked_month_stays_locked_after_reopen() {
    let dir = tempdir().unwrap();
    let april = MonthKey::new(2025, 4).unwrap();

    {
        let service = service_on(RocksDbStore::open(dir.path()).unwrap());
        service.register_member(member(1, "Amina", true)).await.unwrap();
        service.open_month(april).await.unwrap();
        service.lock_month(april).await.unwrap();
    }

    let service = service_on(RocksDbStore::open(dir.path()).unwrap());
    let result = service
        .record_payment(1, april, dec!(2500), date(2025, 4, 3))
        .await;
    assert!(result.is_err());
}
