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

    // overflow can only mean the ceiling is blown as well
    let new_balance = acc
        .balance
        .checked_add(amount)
        .ok_or(AccountError::MaxBalanceExceeded)?;
    if new_balance > acc.max_balance {
        return Err(AccountError::MaxBalanceExceeded);
    }

    acc.balance = new_balance;
    Ok(())
}
