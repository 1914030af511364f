use chrono::{DateTime, Utc};

use crate::{
    common::error::AccountError,
    domain::account::{AccountAggregate, AccountStatus, LogKind},
};

/// Closes the account. Closing an already closed account only adds another
/// log entry.
pub fn handle(
    acc: &mut AccountAggregate,
    reason: &str,
    timestamp: DateTime<Utc>,
) -> Result<(), AccountError> {
    acc.status = AccountStatus::Closed;

    // whole units only; the stored balance keeps its decimals
    let closing_balance = acc.balance.floor_units();
    acc.record(
        LogKind::Closure,
        format!("Reason: {reason}, Closing Balance: {closing_balance}"),
        timestamp,
    );
    tracing::debug!(account_id = %acc.account_id, closing_balance, "account closed");
    Ok(())
}
