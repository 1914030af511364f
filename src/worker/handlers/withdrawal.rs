use crate::{
    common::{error::AccountError, money::Money},
    domain::account::AccountAggregate,
};

use super::ensure_enabled;

pub fn handle(acc: &mut AccountAggregate, amount: Money) -> Result<(), AccountError> {
    ensure_enabled(acc)?;

    if amount.is_negative() {
        return Err(AccountError::InvalidAmount);
    }
    if amount > acc.balance {
        return Err(AccountError::InsufficientFunds);
    }

    acc.balance = acc
        .balance
        .checked_sub(amount)
        .ok_or(AccountError::InsufficientFunds)?;
    Ok(())
}
