pub mod fine;
pub mod member;
pub mod month;
pub mod payment;
pub mod ports;
