use chrono::{DateTime, Utc};

use crate::{
    common::error::AccountError,
    domain::account::{AccountAggregate, AccountStatus, LogKind},
};

use super::ensure_open;

const REACTIVATED: &str = "Account reactivated";

pub fn handle(acc: &mut AccountAggregate, timestamp: DateTime<Utc>) -> Result<(), AccountError> {
    ensure_open(acc)?;

    if acc.is_enabled() {
        return Ok(());
    }

    acc.status = AccountStatus::Enabled;
    acc.record(LogKind::Activate, REACTIVATED.to_string(), timestamp);
    tracing::debug!(account_id = %acc.account_id, "account reactivated");
    Ok(())
}
