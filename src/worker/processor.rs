use crate::{
    common::{error::AccountError, event::AccountEvent},
    domain::account::AccountAggregate,
    worker::handlers::{activation, closure, created, deactivation, deposit, withdrawal},
};

/// Step-wise replay of one account's history.
///
/// `process` takes the processor by value, so a rejected event leaves no
/// half-applied state behind for the caller to observe.
#[derive(Debug, Default)]
pub struct Processor {
    account: Option<AccountAggregate>,
}

impl Processor {
    pub fn new() -> Self {
        Self { account: None }
    }

    /// Continue from a previously replayed snapshot, e.g. to apply one new
    /// event live.
    pub fn resume(account: AccountAggregate) -> Self {
        Self {
            account: Some(account),
        }
    }

    pub fn process(self, event: &AccountEvent) -> Result<Self, AccountError> {
        tracing::trace!(event_type = event.event_type(), "applying event");

        let account = match self.account {
            None => match event {
                AccountEvent::AccountCreated {
                    account_id,
                    initial_balance,
                    max_balance,
                    currency,
                    customer_id,
                } => created::handle(
                    account_id,
                    customer_id,
                    *currency,
                    *initial_balance,
                    *max_balance,
                )?,
                _ => return Err(AccountError::AccountNotCreated),
            },
            Some(mut account) => {
                match event {
                    AccountEvent::AccountCreated { .. } => {
                        return Err(AccountError::AccountAlreadyCreated);
                    }
                    AccountEvent::Deposit { amount, .. } => deposit::handle(&mut account, *amount)?,
                    AccountEvent::Withdrawal { amount, .. } => {
                        withdrawal::handle(&mut account, *amount)?
                    }
                    AccountEvent::Deactivation { reason, timestamp } => {
                        deactivation::handle(&mut account, reason, *timestamp)?
                    }
                    AccountEvent::Activation { timestamp } => {
                        activation::handle(&mut account, *timestamp)?
                    }
                    AccountEvent::Closure { reason, timestamp } => {
                        closure::handle(&mut account, reason, *timestamp)?
                    }
                    AccountEvent::CurrencyChange { .. } => {
                        return Err(AccountError::UnimplementedTransition(event.event_type()));
                    }
                }
                account
            }
        };

        Ok(Self {
            account: Some(account),
        })
    }

    pub fn into_aggregate(self) -> Option<AccountAggregate> {
        self.account
    }
}

/// Rebuilds an account from its ordered history.
///
/// Returns `Ok(None)` for an empty history. The first rejected event aborts
/// the replay and its error is returned as is; later events are not looked at.
#[tracing::instrument(level = "debug", skip_all, fields(events = events.len()))]
pub fn reconstruct(events: &[AccountEvent]) -> Result<Option<AccountAggregate>, AccountError> {
    let processor = fold(Processor::new(), events)?;
    Ok(processor.into_aggregate())
}

/// Applies further events on top of an existing snapshot.
#[tracing::instrument(level = "debug", skip_all, fields(account_id = account.account_id(), events = events.len()))]
pub fn resume(
    account: AccountAggregate,
    events: &[AccountEvent],
) -> Result<AccountAggregate, AccountError> {
    let processor = fold(Processor::resume(account), events)?;
    // a resumed processor always holds an account
    processor.into_aggregate().ok_or(AccountError::AccountNotCreated)
}

fn fold(mut processor: Processor, events: &[AccountEvent]) -> Result<Processor, AccountError> {
    for (index, event) in events.iter().enumerate() {
        processor = processor.process(event).inspect_err(|err| {
            tracing::warn!(
                index,
                event_type = event.event_type(),
                error = %err,
                "replay aborted"
            );
        })?;
    }
    Ok(processor)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::{
        common::{currency::Currency, money::Money},
        domain::account::{AccountStatus, LogKind},
    };

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, minute, 0).unwrap()
    }

    fn created(balance: i64, max_balance: i64) -> AccountEvent {
        AccountEvent::AccountCreated {
            account_id: "acc-1".to_string(),
            initial_balance: Money::units(balance),
            max_balance: Money::units(max_balance),
            currency: Currency::Usd,
            customer_id: "cust-1".to_string(),
        }
    }

    fn deposit(amount: i64) -> AccountEvent {
        AccountEvent::Deposit {
            amount: Money::units(amount),
            timestamp: at(1),
        }
    }

    fn withdrawal(amount: i64) -> AccountEvent {
        AccountEvent::Withdrawal {
            amount: Money::units(amount),
            timestamp: at(2),
        }
    }

    fn deactivation(reason: &str) -> AccountEvent {
        AccountEvent::Deactivation {
            reason: reason.to_string(),
            timestamp: at(3),
        }
    }

    fn closure(reason: &str) -> AccountEvent {
        AccountEvent::Closure {
            reason: reason.to_string(),
            timestamp: at(4),
        }
    }

    #[test]
    fn empty_history_has_no_aggregate() {
        assert_eq!(reconstruct(&[]), Ok(None));
    }

    #[test]
    fn created_then_deposit() {
        let acc = reconstruct(&[created(100, 500), deposit(50)])
            .unwrap()
            .expect("aggregate");

        assert_eq!(acc.balance(), Money::units(150));
        assert_eq!(acc.status(), AccountStatus::Enabled);
        assert_eq!(acc.account_id(), "acc-1");
    }

    #[test]
    fn overdraw_fails_with_insufficient_funds() {
        assert_eq!(
            reconstruct(&[created(100, 500), withdrawal(150)]),
            Err(AccountError::InsufficientFunds)
        );
    }

    #[test]
    fn deposit_past_ceiling_fails() {
        assert_eq!(
            reconstruct(&[created(100, 500), deposit(450)]),
            Err(AccountError::MaxBalanceExceeded)
        );
    }

    #[test]
    fn deposit_on_deactivated_account_fails() {
        let events = [created(100, 500), deactivation("fraud check")];
        let acc = reconstruct(&events).unwrap().unwrap();
        assert_eq!(acc.log().len(), 1);
        assert_eq!(acc.log()[0].kind, LogKind::Deactivate);

        let mut with_deposit = events.to_vec();
        with_deposit.push(deposit(10));
        assert_eq!(reconstruct(&with_deposit), Err(AccountError::AccountDisabled));
    }

    #[test]
    fn deactivate_then_activate() {
        let acc = reconstruct(&[
            created(100, 500),
            deactivation("x"),
            AccountEvent::Activation { timestamp: at(5) },
        ])
        .unwrap()
        .unwrap();

        assert_eq!(acc.status(), AccountStatus::Enabled);
        let kinds: Vec<_> = acc.log().iter().map(|l| l.kind).collect();
        assert_eq!(kinds, [LogKind::Deactivate, LogKind::Activate]);
    }

    #[test]
    fn closed_account_rejects_further_money_movement() {
        let acc = reconstruct(&[created(100, 500), closure("user request")])
            .unwrap()
            .unwrap();

        assert_eq!(acc.status(), AccountStatus::Closed);
        assert_eq!(acc.log().len(), 1);
        assert_eq!(acc.log()[0].kind, LogKind::Closure);
        assert!(acc.log()[0].message.contains("100"));

        assert_eq!(
            resume(acc.clone(), &[deposit(1)]),
            Err(AccountError::AccountClosed)
        );
        assert_eq!(resume(acc, &[withdrawal(1)]), Err(AccountError::AccountClosed));
    }

    #[test]
    fn every_event_before_creation_is_rejected() {
        let events = [
            deposit(1),
            withdrawal(1),
            deactivation("x"),
            AccountEvent::Activation { timestamp: at(1) },
            closure("x"),
            AccountEvent::CurrencyChange {
                currency: Currency::Eur,
                timestamp: at(1),
            },
        ];
        for event in events {
            assert_eq!(
                reconstruct(&[event.clone()]),
                Err(AccountError::AccountNotCreated),
                "{}",
                event.event_type()
            );
        }
    }

    #[test]
    fn second_creation_is_rejected() {
        assert_eq!(
            reconstruct(&[created(100, 500), created(0, 10)]),
            Err(AccountError::AccountAlreadyCreated)
        );
    }

    #[test]
    fn currency_change_is_never_applied() {
        let err = reconstruct(&[
            created(100, 500),
            AccountEvent::CurrencyChange {
                currency: Currency::Eur,
                timestamp: at(1),
            },
        ])
        .unwrap_err();

        assert_eq!(err, AccountError::UnimplementedTransition("CURRENCY_CHANGE"));
    }

    #[test]
    fn first_failure_wins_and_later_events_are_not_examined() {
        // both the withdrawal and the second creation are invalid
        let err = reconstruct(&[created(10, 50), withdrawal(20), created(0, 1)]).unwrap_err();
        assert_eq!(err, AccountError::InsufficientFunds);
    }

    #[test]
    fn processor_steps_match_full_replay() {
        let events = [created(100, 500), deposit(25), withdrawal(5), deactivation("hold")];

        let mut processor = Processor::new();
        for event in &events {
            processor = processor.process(event).unwrap();
        }

        assert_eq!(processor.into_aggregate(), reconstruct(&events).unwrap());
    }
}
