pub mod currency;
pub mod error;
pub mod event;
pub mod money;
