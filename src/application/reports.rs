use super::ledger::LedgerService;
use crate::domain::member::Member;
use crate::domain::month::MonthKey;
use crate::domain::payment::{MONTHLY_CONTRIBUTION, Payment, PaymentStatus};
use crate::error::Result;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};

/// Collection summary for one contribution month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyStats {
    pub month: MonthKey,
    pub total_members: usize,
    pub paid_members: usize,
    pub pending_members: Vec<Member>,
    pub total_collected: Decimal,
    pub total_fines: Decimal,
    pub on_time_count: usize,
    pub late_count: usize,
    pub average_fine: Decimal,
    pub collection_rate: f64,
    pub on_time_percentage: f64,
    pub payments: Vec<Payment>,
}

/// Payment history for one member, optionally bounded to a month range.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberStatement {
    pub member: Member,
    pub total_payments: usize,
    pub total_contributions: Decimal,
    pub total_fines: Decimal,
    pub on_time_count: usize,
    pub late_count: usize,
    pub on_time_percentage: f64,
    pub late_percentage: f64,
    pub payments: Vec<Payment>,
    pub period_start: Option<MonthKey>,
    pub period_end: Option<MonthKey>,
}

/// Active members who have not paid for a month.
#[derive(Debug, Clone, PartialEq)]
pub struct OutstandingReport {
    pub month: MonthKey,
    pub outstanding_members: Vec<Member>,
    pub paid_count: usize,
    pub total_members: usize,
    pub collection_rate: f64,
    pub total_due: Decimal,
}

/// Fines aggregated for one month within a [`FinesSummary`].
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyFines {
    pub month: MonthKey,
    pub total: Decimal,
    pub count: usize,
    pub average: Decimal,
}

/// All payments that attracted a fine, optionally bounded and grouped.
#[derive(Debug, Clone, PartialEq)]
pub struct FinesSummary {
    pub total_fines: Decimal,
    pub fine_count: usize,
    pub average_fine: Decimal,
    pub monthly: Vec<MonthlyFines>,
    pub payments: Vec<Payment>,
    pub period_start: Option<MonthKey>,
    pub period_end: Option<MonthKey>,
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn average(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        total / Decimal::from(count as u64)
    }
}

fn within(
    month: MonthKey,
    start: Option<MonthKey>,
    end: Option<MonthKey>,
) -> bool {
    start.is_none_or(|s| month >= s) && end.is_none_or(|e| month <= e)
}

impl LedgerService {
    /// Builds the monthly collection report for an opened month.
    pub async fn monthly_stats(&self, month: MonthKey) -> Result<MonthlyStats> {
        self.month_record(month).await?;

        let mut payments: Vec<Payment> = self
            .all_payments()
            .await?
            .into_iter()
            .filter(|p| p.month == month)
            .collect();
        payments.sort_by_key(|p| p.member);

        let members = self.active_members().await?;
        let paid_ids: HashSet<_> = payments.iter().map(|p| p.member).collect();
        let pending_members: Vec<Member> = members
            .iter()
            .filter(|m| !paid_ids.contains(&m.id))
            .cloned()
            .collect();

        let total_collected = payments.iter().map(|p| p.amount_paid).sum();
        let total_fines: Decimal = payments.iter().map(|p| p.fine_amount).sum();
        let on_time_count = payments
            .iter()
            .filter(|p| p.status == PaymentStatus::OnTime)
            .count();
        let late_count = payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Late)
            .count();

        Ok(MonthlyStats {
            month,
            total_members: members.len(),
            paid_members: payments.len(),
            pending_members,
            total_collected,
            total_fines,
            on_time_count,
            late_count,
            average_fine: average(total_fines, payments.len()),
            collection_rate: percentage(payments.len(), members.len()),
            on_time_percentage: percentage(on_time_count, payments.len()),
            payments,
        })
    }

    /// Builds a member's statement, newest month first.
    pub async fn member_statement(
        &self,
        member_id: crate::domain::member::MemberId,
        period_start: Option<MonthKey>,
        period_end: Option<MonthKey>,
    ) -> Result<MemberStatement> {
        let member = self.member(member_id).await?.ok_or_else(|| {
            crate::error::LedgerError::ValidationError(format!("unknown member {member_id}"))
        })?;

        let mut payments: Vec<Payment> = self
            .all_payments()
            .await?
            .into_iter()
            .filter(|p| p.member == member_id && within(p.month, period_start, period_end))
            .collect();
        payments.sort_by(|a, b| b.month.cmp(&a.month));

        let total_payments = payments.len();
        let on_time_count = payments
            .iter()
            .filter(|p| p.status == PaymentStatus::OnTime)
            .count();
        let late_count = payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Late)
            .count();

        Ok(MemberStatement {
            member,
            total_payments,
            total_contributions: payments.iter().map(|p| p.amount_paid).sum(),
            total_fines: payments.iter().map(|p| p.fine_amount).sum(),
            on_time_count,
            late_count,
            on_time_percentage: percentage(on_time_count, total_payments),
            late_percentage: percentage(late_count, total_payments),
            payments,
            period_start,
            period_end,
        })
    }

    /// Lists active members with no payment recorded for the month.
    pub async fn outstanding_payments(&self, month: MonthKey) -> Result<OutstandingReport> {
        self.month_record(month).await?;

        let paid_ids: HashSet<_> = self
            .all_payments()
            .await?
            .into_iter()
            .filter(|p| p.month == month)
            .map(|p| p.member)
            .collect();
        let members = self.active_members().await?;
        let outstanding_members: Vec<Member> = members
            .iter()
            .filter(|m| !paid_ids.contains(&m.id))
            .cloned()
            .collect();

        Ok(OutstandingReport {
            month,
            paid_count: paid_ids.len(),
            total_members: members.len(),
            collection_rate: percentage(paid_ids.len(), members.len()),
            total_due: Decimal::from(outstanding_members.len() as u64) * MONTHLY_CONTRIBUTION,
            outstanding_members,
        })
    }

    /// Summarizes fined payments, with a per-month breakdown when grouped.
    pub async fn fines_summary(
        &self,
        period_start: Option<MonthKey>,
        period_end: Option<MonthKey>,
        group_by_month: bool,
    ) -> Result<FinesSummary> {
        let mut payments: Vec<Payment> = self
            .all_payments()
            .await?
            .into_iter()
            .filter(|p| p.fine_amount > Decimal::ZERO && within(p.month, period_start, period_end))
            .collect();
        payments.sort_by(|a, b| b.month.cmp(&a.month).then(a.member.cmp(&b.member)));

        let total_fines: Decimal = payments.iter().map(|p| p.fine_amount).sum();
        let fine_count = payments.len();

        let monthly = if group_by_month {
            let mut buckets: BTreeMap<MonthKey, (Decimal, usize)> = BTreeMap::new();
            for payment in &payments {
                let bucket = buckets.entry(payment.month).or_default();
                bucket.0 += payment.fine_amount;
                bucket.1 += 1;
            }
            // Newest month first, matching the payment listing.
            buckets
                .into_iter()
                .rev()
                .map(|(month, (total, count))| MonthlyFines {
                    month,
                    total,
                    count,
                    average: average(total, count),
                })
                .collect()
        } else {
            Vec::new()
        };

        Ok(FinesSummary {
            total_fines,
            fine_count,
            average_fine: average(total_fines, fine_count),
            monthly,
            payments,
            period_start,
            period_end,
        })
    }
}
