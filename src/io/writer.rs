use std::io::Write;

use chrono::SecondsFormat;

use crate::domain::account::{AccountAggregate, LogMessage};

#[derive(serde::Serialize)]
/// Internal CSV output row for the account snapshot.
///
/// Headers written (in this order):
/// `account_id,customer_id,currency,balance,max_balance,status`.
/// Monetary fields are formatted to 4 decimal places as strings.
struct SnapshotRow<'a> {
    account_id: &'a str,
    customer_id: &'a str,
    currency: &'static str,
    balance: String,
    max_balance: String,
    status: &'static str,
}

#[derive(serde::Serialize)]
/// Internal CSV output row for one audit log entry.
struct LogRow<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    message: &'a str,
    timestamp: String,
}

/// Writes the replayed account snapshot as a header plus a single row.
///
/// # Errors
///
/// Returns a `csv::Error` if writing/serializing the row fails.
///
/// # Examples
///
/// ```
/// use account_replay::io::writer::write_account;
/// use account_replay::worker::processor::reconstruct;
/// use account_replay::common::{currency::Currency, event::AccountEvent, money::Money};
///
/// let account = reconstruct(&[AccountEvent::AccountCreated {
///     account_id: "acc-1".into(),
///     initial_balance: Money::new(1_000_000),
///     max_balance: Money::new(5_000_000),
///     currency: Currency::Usd,
///     customer_id: "cust-1".into(),
/// }])
/// .unwrap()
/// .unwrap();
///
/// let mut out = Vec::new();
/// write_account(&mut out, &account).unwrap();
///
/// let s = String::from_utf8(out).unwrap();
/// assert_eq!(
///     s,
///     "account_id,customer_id,currency,balance,max_balance,status\n\
///      acc-1,cust-1,USD,100.0000,500.0000,ENABLED\n"
/// );
/// ```
pub fn write_account<W: Write>(writer: W, account: &AccountAggregate) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    wtr.serialize(SnapshotRow {
        account_id: account.account_id(),
        customer_id: account.customer_id(),
        currency: account.currency().code(),
        balance: account.balance().to_string_4dp(),
        max_balance: account.max_balance().to_string_4dp(),
        status: account.status().as_str(),
    })?;

    wtr.flush()?;
    Ok(())
}

/// Writes the audit log in replay order with header `type,message,timestamp`.
///
/// Timestamps are RFC 3339 in UTC. An empty log writes nothing, not even
/// the header.
pub fn write_log<W: Write>(writer: W, log: &[LogMessage]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for entry in log {
        wtr.serialize(LogRow {
            kind: entry.kind.as_str(),
            message: &entry.message,
            timestamp: entry.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        })?;
    }

    wtr.flush()?;
    Ok(())
}
