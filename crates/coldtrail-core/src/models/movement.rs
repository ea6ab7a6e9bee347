//! Drug-movement ledger models.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Direction of a storage transaction.
///
/// `Out` marks removal from temperature-controlled storage and always carries
/// zero exposure; `In` marks return to storage and carries the minutes elapsed
/// since the nearest preceding `Out`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionType {
    In,
    Out,
}

impl TransactionType {
    /// The other direction. New rows default to alternating In/Out.
    pub fn opposite(&self) -> Self {
        match self {
            TransactionType::In => TransactionType::Out,
            TransactionType::Out => TransactionType::In,
        }
    }

    /// Parse the form value ("In"/"Out", case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "in" => Some(TransactionType::In),
            "out" => Some(TransactionType::Out),
            _ => None,
        }
    }
}

/// One entry in the drug-movement table of a 519A form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovementRow {
    /// Destination or free-text comments
    pub destination: String,
    /// Movement date; the row is excluded from computation until set
    pub date: Option<NaiveDate>,
    /// Movement time-of-day; the row is excluded from computation until set
    pub time: Option<NaiveTime>,
    /// Transaction direction. Row 0 is permanently `Out`.
    pub transaction_type: TransactionType,
    /// Minutes outside controlled storage. `None` is a blank cell awaiting
    /// derivation; `Out` rows always hold `Some(0)`.
    pub exposure_minutes: Option<i64>,
    /// Running exposure total through this row (blank cells sum as zero)
    pub cumulative_minutes: i64,
    /// Initials of the person recording the movement
    pub completed_by: String,
    /// Initials of the verifier
    pub verified_by: String,
}

impl MovementRow {
    /// The permanent first row: an `Out` transaction with zero exposure.
    pub fn initial() -> Self {
        Self {
            destination: String::new(),
            date: None,
            time: None,
            transaction_type: TransactionType::Out,
            exposure_minutes: Some(0),
            cumulative_minutes: 0,
            completed_by: String::new(),
            verified_by: String::new(),
        }
    }

    /// Combined date + time, when both halves are present.
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        match (self.date, self.time) {
            (Some(date), Some(time)) => Some(date.and_time(time)),
            _ => None,
        }
    }

    /// Whether both date and time are filled in.
    pub fn is_complete(&self) -> bool {
        self.date.is_some() && self.time.is_some()
    }
}

/// Caller-supplied defaults for the permanent first row of a new ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RowSeed {
    pub destination: String,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub completed_by: String,
    pub verified_by: String,
}

/// One edit to a single movement-row field.
///
/// Each editable field is its own variant with a typed payload, dispatched by
/// exhaustive match inside the ledger. `cumulative_minutes` is derived and has
/// no edit variant.
#[derive(Debug, Clone, PartialEq)]
pub enum RowEdit {
    Destination(String),
    Date(Option<NaiveDate>),
    Time(Option<NaiveTime>),
    TransactionType(TransactionType),
    ExposureMinutes(Option<i64>),
    CompletedBy(String),
    VerifiedBy(String),
}

/// Item-derived time limits governing a movement ledger. All values are
/// minutes; zero means the limit is not configured.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerLimits {
    /// In-row exposures below this draw a temper-time warning
    pub temper_minutes: i64,
    /// In-row exposures above this draw a working-exposure warning
    pub working_minutes: i64,
    /// Running totals above this draw a maximum-exposure warning
    pub max_minutes: i64,
}

/// How serious a validation finding is.
///
/// Warnings are informational; Errors mark internally inconsistent data the
/// enclosing form should treat as blocking before submission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// One validation finding, keyed by row index and rule name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Diagnostic {
    /// Index of the movement row the finding concerns
    pub row_index: usize,
    /// Stable rule identifier, one per check
    pub rule: String,
    pub severity: Severity,
    /// Human-readable explanation including the compared quantities
    pub message: String,
}

impl Diagnostic {
    /// Create a finding for a row.
    pub fn new(row_index: usize, rule: &str, severity: Severity, message: String) -> Self {
        Self {
            row_index,
            rule: rule.to_string(),
            severity,
            message,
        }
    }

    /// The (row, rule) key callers use to place the finding beside its field.
    pub fn key(&self) -> (usize, &str) {
        (self.row_index, &self.rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_opposite() {
        assert_eq!(TransactionType::In.opposite(), TransactionType::Out);
        assert_eq!(TransactionType::Out.opposite(), TransactionType::In);
    }

    #[test]
    fn test_transaction_type_parse() {
        assert_eq!(TransactionType::parse("In"), Some(TransactionType::In));
        assert_eq!(TransactionType::parse("out"), Some(TransactionType::Out));
        assert_eq!(TransactionType::parse(" OUT "), Some(TransactionType::Out));
        assert_eq!(TransactionType::parse("inn"), None);
        assert_eq!(TransactionType::parse(""), None);
    }

    #[test]
    fn test_initial_row_shape() {
        let row = MovementRow::initial();
        assert_eq!(row.transaction_type, TransactionType::Out);
        assert_eq!(row.exposure_minutes, Some(0));
        assert_eq!(row.cumulative_minutes, 0);
        assert!(!row.is_complete());
    }

    #[test]
    fn test_datetime_requires_both_halves() {
        let mut row = MovementRow::initial();
        assert_eq!(row.datetime(), None);

        row.date = NaiveDate::from_ymd_opt(2025, 3, 24);
        assert_eq!(row.datetime(), None);

        row.time = NaiveTime::from_hms_opt(8, 0, 0);
        let dt = row.datetime().unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2025-03-24 08:00");
    }
}
