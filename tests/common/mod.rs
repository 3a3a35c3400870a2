use chamabook::application::ledger::LedgerService;
use chamabook::domain::member::{Member, MemberId};
use chamabook::infrastructure::in_memory::{
    InMemoryMemberStore, InMemoryMonthStore, InMemoryPaymentStore,
};
use chrono::NaiveDate;

pub fn in_memory_service() -> LedgerService {
    LedgerService::new(
        Box::new(InMemoryMemberStore::new()),
        Box::new(InMemoryMonthStore::new()),
        Box::new(InMemoryPaymentStore::new()),
    )
}

pub fn member(id: MemberId, name: &str, active: bool) -> Member {
    Member {
        id,
        name: name.to_string(),
        phone: format!("+2547000000{id:02}"),
        joined: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        active,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
