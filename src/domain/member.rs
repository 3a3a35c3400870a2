use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type MemberId = u32;

/// A registered member of the savings group.
///
/// Inactive members keep their payment history but are excluded from
/// report denominators and outstanding-payment lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub phone: String,
    pub joined: NaiveDate,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}
