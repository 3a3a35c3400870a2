mod common;

use chamabook::domain::month::MonthKey;
use chamabook::domain::payment::PaymentStatus;
use chamabook::interfaces::csv::payment_reader::PaymentReader;
use common::{date, in_memory_service, member};
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_full_ledger_cycle_across_year_boundary() {
    let service = in_memory_service();
    service.register_member(member(1, "Amina", true)).await.unwrap();
    service.register_member(member(2, "Brian", true)).await.unwrap();

    let december = MonthKey::new(2024, 12).unwrap();
    let january = MonthKey::new(2025, 1).unwrap();
    service.open_month(december).await.unwrap();
    service.open_month(january).await.unwrap();

    // Brian pays December well into February: fined only up to January 5th.
    service
        .record_payment(1, december, dec!(2500), date(2024, 12, 5))
        .await
        .unwrap();
    let late = service
        .record_payment(2, december, dec!(2500), date(2025, 2, 20))
        .await
        .unwrap();
    assert_eq!(late.fine_amount, dec!(1150));
    assert_eq!(late.status, PaymentStatus::Late);

    service
        .record_payment(1, january, dec!(2500), date(2025, 1, 8))
        .await
        .unwrap();

    let stats = service.monthly_stats(december).await.unwrap();
    assert_eq!(stats.paid_members, 2);
    assert_eq!(stats.total_fines, dec!(1150));
    assert!(stats.pending_members.is_empty());

    let statement = service.member_statement(1, None, None).await.unwrap();
    assert_eq!(statement.total_payments, 2);
    // January first, then December.
    assert_eq!(statement.payments[0].month, january);
    assert_eq!(statement.payments[0].fine_amount, dec!(300));

    let outstanding = service.outstanding_payments(january).await.unwrap();
    assert_eq!(outstanding.outstanding_members.len(), 1);
    assert_eq!(outstanding.outstanding_members[0].name, "Brian");
    assert_eq!(outstanding.total_due, dec!(2500));

    let fines = service.fines_summary(None, None, true).await.unwrap();
    assert_eq!(fines.total_fines, dec!(1450));
    assert_eq!(fines.monthly.len(), 2);
    assert_eq!(fines.monthly[0].month, january);
    assert_eq!(fines.monthly[1].total, dec!(1150));
}

#[tokio::test]
async fn test_csv_rows_cannot_smuggle_fines() {
    // A payments file has no fine or status columns; whatever the ledger
    // persists comes from the assessment alone.
    let data = "member, month, amount, paid_date\n1, 2025-03, 2500, 2025-03-15";
    let record = PaymentReader::new(data.as_bytes())
        .payments()
        .next()
        .unwrap()
        .unwrap();

    let service = in_memory_service();
    service.register_member(member(1, "Amina", true)).await.unwrap();
    service.ensure_month(record.month).await.unwrap();

    let payment = service
        .record_payment(
            record.member,
            record.month,
            record.amount_paid(),
            record.paid_date,
        )
        .await
        .unwrap();

    assert_eq!(payment.fine_amount, dec!(625));
    assert_eq!(payment.status, PaymentStatus::Late);
}

#[tokio::test]
async fn test_locked_month_stays_reportable() {
    let service = in_memory_service();
    service.register_member(member(1, "Amina", true)).await.unwrap();
    let march = MonthKey::new(2025, 3).unwrap();
    service.open_month(march).await.unwrap();
    service
        .record_payment(1, march, dec!(2500), date(2025, 3, 4))
        .await
        .unwrap();

    service.lock_month(march).await.unwrap();

    // Locking closes entry but not reporting.
    let stats = service.monthly_stats(march).await.unwrap();
    assert_eq!(stats.paid_members, 1);
    assert!(
        service
            .record_payment(1, march, dec!(2500), date(2025, 3, 5))
            .await
            .is_err()
    );
}
