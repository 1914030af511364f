use chrono::{DateTime, Utc};

use crate::common::{currency::Currency, money::Money};

/// A fact recorded in one account's history.
///
/// Streams are replayed in the order the store committed them; an
/// `AccountCreated` must come first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountEvent {
    AccountCreated {
        account_id: String,
        initial_balance: Money,
        max_balance: Money,
        currency: Currency,
        customer_id: String,
    },
    Deposit {
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    Withdrawal {
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    Deactivation {
        reason: String,
        timestamp: DateTime<Utc>,
    },
    Activation {
        timestamp: DateTime<Utc>,
    },
    Closure {
        reason: String,
        timestamp: DateTime<Utc>,
    },
    /// Recorded by older writers; replaying it always fails.
    CurrencyChange {
        currency: Currency,
        timestamp: DateTime<Utc>,
    },
}

impl AccountEvent {
    /// Stable name of the event type, used in logs and error messages.
    pub fn event_type(&self) -> &'static str {
        match self {
            AccountEvent::AccountCreated { .. } => "ACCOUNT_CREATED",
            AccountEvent::Deposit { .. } => "DEPOSIT",
            AccountEvent::Withdrawal { .. } => "WITHDRAWAL",
            AccountEvent::Deactivation { .. } => "DEACTIVATION",
            AccountEvent::Activation { .. } => "ACTIVATION",
            AccountEvent::Closure { .. } => "CLOSURE",
            AccountEvent::CurrencyChange { .. } => "CURRENCY_CHANGE",
        }
    }
}
