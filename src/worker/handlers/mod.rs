pub mod activation;
pub mod closure;
pub mod created;
pub mod deactivation;
pub mod deposit;
pub mod withdrawal;

use crate::{
    common::error::AccountError,
    domain::account::{AccountAggregate, AccountStatus},
};

/// Balance-changing events only apply to an enabled account. Closed is
/// reported ahead of disabled so callers can tell the two apart.
fn ensure_enabled(acc: &AccountAggregate) -> Result<(), AccountError> {
    match acc.status {
        AccountStatus::Enabled => Ok(()),
        AccountStatus::Closed => Err(AccountError::AccountClosed),
        AccountStatus::Disabled => Err(AccountError::AccountDisabled),
    }
}

fn ensure_open(acc: &AccountAggregate) -> Result<(), AccountError> {
    if acc.is_closed() {
        return Err(AccountError::AccountClosed);
    }
    Ok(())
}
