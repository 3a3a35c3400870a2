use crate::domain::fine;
use crate::domain::member::{Member, MemberId};
use crate::domain::month::{ContributionMonth, MonthKey};
use crate::domain::payment::Payment;
use crate::domain::ports::{MemberStoreBox, MonthStoreBox, PaymentStoreBox};
use crate::error::{LedgerError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

/// The main entry point for recording contributions.
///
/// `LedgerService` owns the storage backends and enforces the ledger rules:
/// one payment per (member, month), no entries into locked months, and
/// fine/status always recomputed from the paid date before persistence.
pub struct LedgerService {
    members: MemberStoreBox,
    months: MonthStoreBox,
    payments: PaymentStoreBox,
}

impl LedgerService {
    pub fn new(members: MemberStoreBox, months: MonthStoreBox, payments: PaymentStoreBox) -> Self {
        Self {
            members,
            months,
            payments,
        }
    }

    pub async fn register_member(&self, member: Member) -> Result<()> {
        if self.members.get(member.id).await?.is_some() {
            return Err(LedgerError::ValidationError(format!(
                "member {} is already registered",
                member.id
            )));
        }
        debug!(id = member.id, name = %member.name, "member registered");
        self.members.store(member).await
    }

    pub async fn open_month(&self, key: MonthKey) -> Result<ContributionMonth> {
        if self.months.get(key).await?.is_some() {
            return Err(LedgerError::ValidationError(format!(
                "month {key} is already open"
            )));
        }
        let month = ContributionMonth::open(key);
        self.months.store(month.clone()).await?;
        debug!(month = %key, due = %month.due_date, "month opened");
        Ok(month)
    }

    /// Returns the month, opening it with the day-5 due date if unseen.
    pub async fn ensure_month(&self, key: MonthKey) -> Result<ContributionMonth> {
        match self.months.get(key).await? {
            Some(month) => Ok(month),
            None => self.open_month(key).await,
        }
    }

    pub async fn lock_month(&self, key: MonthKey) -> Result<()> {
        let mut month = self.months.get(key).await?.ok_or_else(|| {
            LedgerError::ValidationError(format!("month {key} has not been opened"))
        })?;
        month.locked = true;
        self.months.store(month).await
    }

    /// Records a contribution, assessing the late fine from the month's due
    /// date. The stored fine and status come from the assessment regardless
    /// of what the caller supplies elsewhere.
    pub async fn record_payment(
        &self,
        member: MemberId,
        month: MonthKey,
        amount_paid: Decimal,
        paid_date: NaiveDate,
    ) -> Result<Payment> {
        let member_record = self
            .members
            .get(member)
            .await?
            .ok_or_else(|| LedgerError::ValidationError(format!("unknown member {member}")))?;
        if !member_record.active {
            return Err(LedgerError::ValidationError(format!(
                "member {member} is inactive"
            )));
        }

        let month_record = self.months.get(month).await?.ok_or_else(|| {
            LedgerError::ValidationError(format!("month {month} has not been opened"))
        })?;
        if month_record.locked {
            return Err(LedgerError::ValidationError(format!(
                "month {month} is locked"
            )));
        }

        if amount_paid <= Decimal::ZERO {
            return Err(LedgerError::ValidationError(
                "amount paid must be positive".to_string(),
            ));
        }

        if self.payments.exists(member, month).await? {
            return Err(LedgerError::ValidationError(format!(
                "payment for member {member} in {month} is already recorded"
            )));
        }

        let assessment = fine::assess(month_record.due_date, paid_date);
        let payment = Payment {
            member,
            month,
            amount_paid,
            paid_date,
            fine_amount: assessment.fine,
            status: assessment.status,
        };
        debug!(
            member,
            month = %month,
            fine = %payment.fine_amount,
            status = %payment.status,
            "payment recorded"
        );
        self.payments.store(payment.clone()).await?;
        Ok(payment)
    }

    pub async fn member(&self, id: MemberId) -> Result<Option<Member>> {
        self.members.get(id).await
    }

    pub(crate) async fn active_members(&self) -> Result<Vec<Member>> {
        let mut members: Vec<Member> = self
            .members
            .get_all()
            .await?
            .into_iter()
            .filter(|m| m.active)
            .collect();
        members.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(members)
    }

    pub(crate) async fn all_payments(&self) -> Result<Vec<Payment>> {
        self.payments.get_all().await
    }

    pub(crate) async fn month_record(&self, key: MonthKey) -> Result<ContributionMonth> {
        self.months
            .get(key)
            .await?
            .ok_or_else(|| LedgerError::ValidationError(format!("month {key} has not been opened")))
    }
}
