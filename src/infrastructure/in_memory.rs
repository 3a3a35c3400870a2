use crate::domain::member::{Member, MemberId};
use crate::domain::month::{ContributionMonth, MonthKey};
use crate::domain::payment::Payment;
use crate::domain::ports::{MemberStore, MonthStore, PaymentStore};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for members.
///
/// Uses `Arc<RwLock<HashMap>>` for shared concurrent access. Suitable for
/// one-shot CLI runs and tests where persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryMemberStore {
    members: Arc<RwLock<HashMap<MemberId, Member>>>,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemberStore for InMemoryMemberStore {
    async fn store(&self, member: Member) -> Result<()> {
        let mut members = self.members.write().await;
        members.insert(member.id, member);
        Ok(())
    }

    async fn get(&self, id: MemberId) -> Result<Option<Member>> {
        let members = self.members.read().await;
        Ok(members.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Member>> {
        let members = self.members.read().await;
        Ok(members.values().cloned().collect())
    }
}

/// A thread-safe in-memory store for contribution months.
#[derive(Default, Clone)]
pub struct InMemoryMonthStore {
    months: Arc<RwLock<HashMap<MonthKey, ContributionMonth>>>,
}

impl InMemoryMonthStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MonthStore for InMemoryMonthStore {
    async fn store(&self, month: ContributionMonth) -> Result<()> {
        let mut months = self.months.write().await;
        months.insert(month.month, month);
        Ok(())
    }

    async fn get(&self, key: MonthKey) -> Result<Option<ContributionMonth>> {
        let months = self.months.read().await;
        Ok(months.get(&key).cloned())
    }

    async fn get_all(&self) -> Result<Vec<ContributionMonth>> {
        let months = self.months.read().await;
        Ok(months.values().cloned().collect())
    }
}

/// A thread-safe in-memory store for payments, keyed by (member, month).
///
/// The composite key is what enforces one payment per member per month at
/// the storage level.
#[derive(Default, Clone)]
pub struct InMemoryPaymentStore {
    payments: Arc<RwLock<HashMap<(MemberId, MonthKey), Payment>>>,
}

impl InMemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn store(&self, payment: Payment) -> Result<()> {
        let mut payments = self.payments.write().await;
        payments.insert((payment.member, payment.month), payment);
        Ok(())
    }

    async fn get(&self, member: MemberId, month: MonthKey) -> Result<Option<Payment>> {
        let payments = self.payments.read().await;
        Ok(payments.get(&(member, month)).cloned())
    }

    async fn exists(&self, member: MemberId, month: MonthKey) -> Result<bool> {
        let payments = self.payments.read().await;
        Ok(payments.contains_key(&(member, month)))
    }

    async fn get_all(&self) -> Result<Vec<Payment>> {
        let payments = self.payments.read().await;
        Ok(payments.values().cloned().collect())
    }
}
