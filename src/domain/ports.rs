use super::member::{Member, MemberId};
use super::month::{ContributionMonth, MonthKey};
use super::payment::Payment;
use crate::error::Result;
use async_trait::async_trait;

pub type MemberStoreBox = Box<dyn MemberStore>;
pub type MonthStoreBox = Box<dyn MonthStore>;
pub type PaymentStoreBox = Box<dyn PaymentStore>;

#[async_trait]
pub trait MemberStore: Send + Sync {
    async fn store(&self, member: Member) -> Result<()>;
    async fn get(&self, id: MemberId) -> Result<Option<Member>>;
    async fn get_all(&self) -> Result<Vec<Member>>;
}

#[async_trait]
pub trait MonthStore: Send + Sync {
    async fn store(&self, month: ContributionMonth) -> Result<()>;
    async fn get(&self, key: MonthKey) -> Result<Option<ContributionMonth>>;
    async fn get_all(&self) -> Result<Vec<ContributionMonth>>;
}

#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn store(&self, payment: Payment) -> Result<()>;
    async fn get(&self, member: MemberId, month: MonthKey) -> Result<Option<Payment>>;
    async fn exists(&self, member: MemberId, month: MonthKey) -> Result<bool>;
    async fn get_all(&self) -> Result<Vec<Payment>>;
}
