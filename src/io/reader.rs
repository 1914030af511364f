use crate::common::{
    currency::Currency,
    error::{AccountError, AppError},
    event::AccountEvent,
    money::Money,
};
use chrono::{DateTime, Utc};
use std::{io::Read, str::FromStr};

#[derive(serde::Deserialize)]
/// Internal CSV row representation matching the input headers. Columns a
/// given event type does not use stay blank (or are missing altogether).
struct CsvRow {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    amount: Option<String>,
    #[serde(default)]
    max_balance: Option<String>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    account_id: Option<String>,
    #[serde(default)]
    customer_id: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

impl CsvRow {
    fn required<'a>(
        &self,
        field: &'a Option<String>,
        name: &str,
        row: usize,
    ) -> Result<&'a str, AppError> {
        field
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Parse(format!("{} missing {name} at row {row}", self.kind())))
    }

    fn kind(&self) -> String {
        self.event_type.trim().to_ascii_lowercase()
    }

    fn amount(&self, name: &str, field: &Option<String>, row: usize) -> Result<Money, AppError> {
        let raw = self.required(field, name, row)?;
        Money::from_str(raw).map_err(|e| AppError::Parse(format!("{name} at row {row}: {e}")))
    }

    fn timestamp(&self, row: usize) -> Result<DateTime<Utc>, AppError> {
        let raw = self.required(&self.timestamp, "timestamp", row)?;
        DateTime::<Utc>::from_str(raw)
            .map_err(|e| AppError::Parse(format!("timestamp at row {row}: {e}")))
    }

    fn currency(&self, row: usize) -> Result<Currency, AppError> {
        let raw = self.required(&self.currency, "currency", row)?;
        Currency::from_str(raw).map_err(|e| AppError::Parse(format!("{e} at row {row}")))
    }

    fn reason(&self, row: usize) -> Result<String, AppError> {
        Ok(self.required(&self.reason, "reason", row)?.to_string())
    }

    fn into_event(self, row: usize) -> Result<AccountEvent, AppError> {
        match self.kind().as_str() {
            "created" | "account_created" => Ok(AccountEvent::AccountCreated {
                account_id: self.required(&self.account_id, "account_id", row)?.to_string(),
                initial_balance: self.amount("amount", &self.amount, row)?,
                max_balance: self.amount("max_balance", &self.max_balance, row)?,
                currency: self.currency(row)?,
                customer_id: self.required(&self.customer_id, "customer_id", row)?.to_string(),
            }),
            "deposit" => Ok(AccountEvent::Deposit {
                amount: self.amount("amount", &self.amount, row)?,
                timestamp: self.timestamp(row)?,
            }),
            "withdrawal" => Ok(AccountEvent::Withdrawal {
                amount: self.amount("amount", &self.amount, row)?,
                timestamp: self.timestamp(row)?,
            }),
            "deactivation" => Ok(AccountEvent::Deactivation {
                reason: self.reason(row)?,
                timestamp: self.timestamp(row)?,
            }),
            "activation" => Ok(AccountEvent::Activation {
                timestamp: self.timestamp(row)?,
            }),
            "closure" => Ok(AccountEvent::Closure {
                reason: self.reason(row)?,
                timestamp: self.timestamp(row)?,
            }),
            "currency_change" => Ok(AccountEvent::CurrencyChange {
                currency: self.currency(row)?,
                timestamp: self.timestamp(row)?,
            }),
            other => Err(AccountError::UnsupportedEventType(other.to_string()).into()),
        }
    }
}

/// Reads one account's event stream from a CSV reader, in file order.
///
/// Supported headers: `type,timestamp,amount,max_balance,currency,account_id,customer_id,reason`.
/// The `type` field is matched case-insensitively. For `created` rows the
/// `amount` column carries the opening balance. An unknown `type` surfaces
/// as [`AccountError::UnsupportedEventType`]; other problems are parse
/// errors naming the data row (1-based, header excluded).
///
/// # Examples
///
/// ```
/// use account_replay::io::reader::read_events;
/// use account_replay::common::event::AccountEvent;
/// use csv::ReaderBuilder;
///
/// let data = "type,timestamp,amount,max_balance,currency,account_id,customer_id,reason\n\
/// created,,100,500,USD,acc-1,cust-1,\n\
/// deposit,2024-03-01T12:00:00Z,50,,,,,\n";
/// let mut rdr = ReaderBuilder::new().from_reader(data.as_bytes());
/// let events: Vec<_> = read_events(&mut rdr).collect();
///
/// assert!(matches!(events[0], Ok(AccountEvent::AccountCreated { .. })));
/// assert!(matches!(events[1], Ok(AccountEvent::Deposit { .. })));
/// ```
pub fn read_events<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> impl Iterator<Item = Result<AccountEvent, AppError>> + '_ {
    rdr.deserialize::<CsvRow>()
        .enumerate()
        .map(|(index, res)| -> Result<AccountEvent, AppError> {
            res?.into_event(index + 1)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const HEADER: &str = "type,timestamp,amount,max_balance,currency,account_id,customer_id,reason\n";

    // Helper: parse CSV input into collected events for assertions.
    fn collect_events(body: &str) -> Vec<Result<AccountEvent, AppError>> {
        let input = format!("{HEADER}{body}");
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(input.as_bytes());
        read_events(&mut reader).collect()
    }

    #[test]
    fn parses_all_supported_event_types() {
        let events = collect_events(
            "created,,100.25,500,usd,acc-1,cust-1,\n\
             deposit,2024-03-01T12:00:00Z,50,,,,,\n\
             withdrawal,2024-03-01T12:01:00Z,10,,,,,\n\
             Deactivation,2024-03-01T12:02:00Z,,,,,,fraud check\n\
             activation,2024-03-01T12:03:00Z,,,,,,\n\
             closure,2024-03-01T12:04:00Z,,,,,,user request\n\
             currency_change,2024-03-01T12:05:00Z,,,EUR,,,\n",
        );
        let events: Vec<AccountEvent> = events.into_iter().map(|e| e.unwrap()).collect();

        assert_eq!(
            events[0],
            AccountEvent::AccountCreated {
                account_id: "acc-1".to_string(),
                initial_balance: Money::from_str("100.25").unwrap(),
                max_balance: Money::units(500),
                currency: Currency::Usd,
                customer_id: "cust-1".to_string(),
            }
        );
        assert_eq!(
            events[1],
            AccountEvent::Deposit {
                amount: Money::units(50),
                timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            }
        );
        assert!(matches!(events[2], AccountEvent::Withdrawal { .. }));
        match &events[3] {
            AccountEvent::Deactivation { reason, .. } => assert_eq!(reason, "fraud check"),
            other => panic!("unexpected deactivation event: {other:?}"),
        }
        assert!(matches!(events[4], AccountEvent::Activation { .. }));
        assert!(matches!(events[5], AccountEvent::Closure { .. }));
        assert!(matches!(
            events[6],
            AccountEvent::CurrencyChange {
                currency: Currency::Eur,
                ..
            }
        ));
    }

    #[test]
    fn short_rows_are_accepted() {
        let events = collect_events("activation,2024-03-01T12:03:00Z\n");
        assert!(matches!(events[0], Ok(AccountEvent::Activation { .. })));
    }

    #[test]
    fn reports_missing_amount_error() {
        let events = collect_events("deposit,2024-03-01T12:00:00Z,,,,,,\n");

        assert_eq!(events.len(), 1);
        match &events[0] {
            Err(AppError::Parse(msg)) => assert_eq!(msg, "deposit missing amount at row 1"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn reports_bad_timestamp_error() {
        let events = collect_events("created,,1,2,USD,a,c,\nwithdrawal,yesterday,1,,,,,\n");

        assert!(events[0].is_ok());
        assert!(matches!(&events[1], Err(AppError::Parse(msg)) if msg.starts_with("timestamp at row 2")));
    }

    #[test]
    fn unknown_type_is_unsupported_event() {
        let events = collect_events("refund,2024-03-01T12:00:00Z,10,,,,,\n");

        assert_eq!(events.len(), 1);
        match &events[0] {
            Err(AppError::Account(err)) => {
                assert_eq!(err, &AccountError::UnsupportedEventType("refund".to_string()));
                assert_eq!(err.code(), Some("162"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
