use chrono::{DateTime, Utc};

use crate::{
    common::error::AccountError,
    domain::account::{AccountAggregate, AccountStatus, LogKind},
};

use super::ensure_open;

pub fn handle(
    acc: &mut AccountAggregate,
    reason: &str,
    timestamp: DateTime<Utc>,
) -> Result<(), AccountError> {
    ensure_open(acc)?;

    // Re-deactivating is allowed and still leaves a trail entry.
    acc.status = AccountStatus::Disabled;
    acc.record(LogKind::Deactivate, reason.to_string(), timestamp);
    tracing::debug!(account_id = %acc.account_id, reason, "account deactivated");
    Ok(())
}
