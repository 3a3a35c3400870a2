use super::member::MemberId;
use super::month::MonthKey;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard monthly contribution, in KSh.
pub const MONTHLY_CONTRIBUTION: Decimal = dec!(2500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[default]
    Pending,
    #[serde(rename = "On Time")]
    OnTime,
    Late,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "Pending"),
            PaymentStatus::OnTime => write!(f, "On Time"),
            PaymentStatus::Late => write!(f, "Late"),
        }
    }
}

/// A member's contribution for one month. Unique per (member, month).
///
/// `fine_amount` and `status` are derived: the ledger recomputes them from
/// `paid_date` before persisting, discarding whatever an input row claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub member: MemberId,
    pub month: MonthKey,
    pub amount_paid: Decimal,
    pub paid_date: NaiveDate,
    #[serde(default)]
    pub fine_amount: Decimal,
    #[serde(default)]
    pub status: PaymentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_matches_ledger_wording() {
        assert_eq!(PaymentStatus::Pending.to_string(), "Pending");
        assert_eq!(PaymentStatus::OnTime.to_string(), "On Time");
        assert_eq!(PaymentStatus::Late.to_string(), "Late");
    }

    #[test]
    fn test_payment_json_round_trip() {
        let payment = Payment {
            member: 7,
            month: "2025-03".parse().unwrap(),
            amount_paid: MONTHLY_CONTRIBUTION,
            paid_date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            fine_amount: Decimal::ZERO,
            status: PaymentStatus::OnTime,
        };

        let json = serde_json::to_string(&payment).unwrap();
        let back: Payment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payment);
    }

    #[test]
    fn test_derived_fields_default_to_pending_zero() {
        let json = r#"{"member":1,"month":"2025-03","amount_paid":"2500","paid_date":"2025-03-08"}"#;
        let payment: Payment = serde_json::from_str(json).unwrap();
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.fine_amount, Decimal::ZERO);
    }
}
