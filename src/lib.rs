//! Rebuilds a financial account's current state by replaying its recorded
//! events in order.
//!
//! - [`common`]: events, money, currency and error types
//! - [`domain`]: the account aggregate and its audit log
//! - [`worker`]: the replay itself, one handler per event type
//! - [`io`] and [`app`]: CSV adapter used by the `account_replay` binary

pub mod app;
pub mod common;
pub mod domain;
pub mod io;
pub mod worker;
