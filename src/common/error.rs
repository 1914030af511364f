/// Reasons an event cannot be applied to an account.
///
/// A failure aborts the whole replay: the history after a rejected event is
/// not trusted.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("account has not been created")]
    AccountNotCreated,
    #[error("account has already been created")]
    AccountAlreadyCreated,
    #[error("account is closed")]
    AccountClosed,
    #[error("account is disabled")]
    AccountDisabled,
    #[error("maximum balance exceeded")]
    MaxBalanceExceeded,
    #[error("insufficient funds")]
    InsufficientFunds,
    #[error("amount must not be negative")]
    InvalidAmount,
    #[error("event type not supported: {0}")]
    UnsupportedEventType(String),
    #[error("transition not implemented: {0}")]
    UnimplementedTransition(&'static str),
}

impl AccountError {
    /// Diagnostic code reported by the legacy ledger for the same failure.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            AccountError::AccountNotCreated => Some("128*"),
            AccountError::AccountClosed => Some("502*"),
            AccountError::AccountDisabled => Some("344"),
            AccountError::MaxBalanceExceeded => Some("281*"),
            AccountError::InsufficientFunds => Some("285*"),
            AccountError::UnsupportedEventType(_) => Some("162"),
            AccountError::AccountAlreadyCreated
            | AccountError::InvalidAmount
            | AccountError::UnimplementedTransition(_) => None,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("missing input csv path. usage: account_replay <events.csv>")]
    MissingArg,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("replay error: {0}")]
    Account(#[from] AccountError),
}
