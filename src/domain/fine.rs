use super::payment::PaymentStatus;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Daily rate for the first five late days, in KSh.
pub const TIER_ONE_RATE: Decimal = dec!(100);
/// Daily rate from the sixth late day onward, in KSh.
pub const TIER_TWO_RATE: Decimal = dec!(25);
/// Number of days charged at the higher rate.
const TIER_ONE_DAYS: i64 = 5;

/// Outcome of assessing a payment against its due date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    pub fine: Decimal,
    pub status: PaymentStatus,
}

impl Assessment {
    pub const ON_TIME: Self = Self {
        fine: Decimal::ZERO,
        status: PaymentStatus::OnTime,
    };
}

/// Assesses the late fine for a payment.
///
/// The schedule is tiered per late day: the first five days cost
/// [`TIER_ONE_RATE`] each, every day after that [`TIER_TWO_RATE`]. Fines
/// stop accruing on the 5th of the month following the due date; a payment
/// made after that cap is fined as if made on the cap date, but its status
/// stays `Late`.
///
/// Pure and deterministic: no failure modes on well-formed dates, and day
/// arithmetic is signed so an early payment cannot underflow.
pub fn assess(due_date: NaiveDate, paid_date: NaiveDate) -> Assessment {
    let days_late = (paid_date - due_date).num_days();
    if days_late <= 0 {
        return Assessment::ON_TIME;
    }

    let cap_date = next_month_fifth(due_date);
    let chargeable = if paid_date > cap_date {
        (cap_date - due_date).num_days()
    } else {
        days_late
    };

    let tier_one = chargeable.min(TIER_ONE_DAYS);
    let tier_two = (chargeable - TIER_ONE_DAYS).max(0);

    Assessment {
        fine: Decimal::from(tier_one) * TIER_ONE_RATE + Decimal::from(tier_two) * TIER_TWO_RATE,
        status: PaymentStatus::Late,
    }
}

/// The 5th of the month after `due_date`, handling the December rollover.
fn next_month_fifth(due_date: NaiveDate) -> NaiveDate {
    let (year, month) = if due_date.month() == 12 {
        (due_date.year() + 1, 1)
    } else {
        (due_date.year(), due_date.month() + 1)
    };
    // Day 5 exists in every month.
    NaiveDate::from_ymd_opt(year, month, 5).expect("day 5 of a month")
}
