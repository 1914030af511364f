use chrono::{DateTime, Utc};

use crate::common::{currency::Currency, money::Money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountStatus {
    Enabled,
    Disabled,
    /// Terminal; nothing reopens a closed account.
    Closed,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Enabled => "ENABLED",
            AccountStatus::Disabled => "DISABLED",
            AccountStatus::Closed => "CLOSED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogKind {
    Deactivate,
    Activate,
    Closure,
}

impl LogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogKind::Deactivate => "DEACTIVATE",
            LogKind::Activate => "ACTIVATE",
            LogKind::Closure => "CLOSURE",
        }
    }
}

/// Audit trail entry written by status changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogMessage {
    pub kind: LogKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Current state of one account, rebuilt from its events.
///
/// Only the replay in `worker` mutates it; callers get a read-only snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountAggregate {
    pub(crate) account_id: String,
    pub(crate) customer_id: String,
    pub(crate) currency: Currency,
    pub(crate) balance: Money,
    pub(crate) max_balance: Money,
    pub(crate) status: AccountStatus,
    pub(crate) log: Vec<LogMessage>,
}

impl AccountAggregate {
    pub(crate) fn open(
        account_id: String,
        customer_id: String,
        currency: Currency,
        balance: Money,
        max_balance: Money,
    ) -> Self {
        Self {
            account_id,
            customer_id,
            currency,
            balance,
            max_balance,
            status: AccountStatus::Enabled,
            log: Vec::new(),
        }
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn max_balance(&self) -> Money {
        self.max_balance
    }

    pub fn status(&self) -> AccountStatus {
        self.status
    }

    pub fn log(&self) -> &[LogMessage] {
        &self.log
    }

    pub fn is_enabled(&self) -> bool {
        self.status == AccountStatus::Enabled
    }

    pub fn is_closed(&self) -> bool {
        self.status == AccountStatus::Closed
    }

    pub(crate) fn record(&mut self, kind: LogKind, message: String, timestamp: DateTime<Utc>) {
        self.log.push(LogMessage {
            kind,
            message,
            timestamp,
        });
    }
}
