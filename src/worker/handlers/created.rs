use crate::{
    common::{currency::Currency, error::AccountError, money::Money},
    domain::account::AccountAggregate,
};

pub fn handle(
    account_id: &str,
    customer_id: &str,
    currency: Currency,
    initial_balance: Money,
    max_balance: Money,
) -> Result<AccountAggregate, AccountError> {
    if initial_balance.is_negative() {
        return Err(AccountError::InvalidAmount);
    }
    if initial_balance > max_balance {
        return Err(AccountError::MaxBalanceExceeded);
    }

    Ok(AccountAggregate::open(
        account_id.to_string(),
        customer_id.to_string(),
        currency,
        initial_balance,
        max_balance,
    ))
}
