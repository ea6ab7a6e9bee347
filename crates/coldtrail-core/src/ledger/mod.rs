//! Exposure-time movement ledger.
//!
//! Ordered In/Out transaction rows with three derived properties kept
//! consistent after every edit: each In row's exposure time (when not
//! manually overridden), every row's cumulative exposure time, and the full
//! diagnostic set.

mod rules;

pub use rules::*;

use serde::Serialize;
use thiserror::Error;

use crate::models::{
    Diagnostic, LedgerLimits, MovementRow, RowEdit, RowSeed, TransactionType,
};

/// Structural rejections. These never mutate ledger state; rule findings go
/// through [`Diagnostic`] instead and never block an edit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("The initial Out row is permanent and cannot be removed")]
    InitialRowPermanent,

    #[error("A ledger must keep at least one row")]
    LastRowPermanent,

    #[error("No movement row at index {0}")]
    RowOutOfRange(usize),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// The movement ledger for one 519A form session.
///
/// Row 0 is created at construction as a permanent `Out` row with zero
/// exposure. Every mutation ends with a full recomputation pass: cumulative
/// sums first, then diagnostics, over the whole sequence.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExposureLedger {
    rows: Vec<MovementRow>,
    limits: LedgerLimits,
    diagnostics: Vec<Diagnostic>,
}

impl ExposureLedger {
    /// Create a ledger with a blank initial row.
    ///
    /// Limits may be all zero; the ledger works before an item is resolved.
    pub fn new(limits: LedgerLimits) -> Self {
        let mut ledger = Self {
            rows: vec![MovementRow::initial()],
            limits,
            diagnostics: Vec::new(),
        };
        ledger.recompute();
        ledger
    }

    /// Create a ledger whose initial row starts from caller defaults.
    /// Type and exposure of row 0 are fixed regardless of the seed.
    pub fn with_first_row(limits: LedgerLimits, seed: RowSeed) -> Self {
        let mut ledger = Self::new(limits);
        {
            let first = &mut ledger.rows[0];
            first.destination = seed.destination;
            first.date = seed.date;
            first.time = seed.time;
            first.completed_by = seed.completed_by;
            first.verified_by = seed.verified_by;
        }
        ledger.recompute();
        ledger
    }

    /// Current limits.
    pub fn limits(&self) -> LedgerLimits {
        self.limits
    }

    /// Replace the limits (item re-selection) and re-run diagnostics.
    pub fn set_limits(&mut self, limits: LedgerLimits) {
        self.limits = limits;
        self.recompute();
    }

    /// The full row sequence, in order.
    pub fn rows(&self) -> &[MovementRow] {
        &self.rows
    }

    /// Findings from the last recomputation pass.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Append a new row after the last one.
    ///
    /// Defaults: type alternates from the last row (convention only, the
    /// caller may override), date carries forward, time stays blank, and
    /// exposure is zero for `Out` rows or blank pending derivation for `In`.
    pub fn add_row(&mut self) {
        let (transaction_type, date) = match self.rows.last() {
            Some(last) => (last.transaction_type.opposite(), last.date),
            None => (TransactionType::Out, None),
        };
        let exposure_minutes = match transaction_type {
            TransactionType::Out => Some(0),
            TransactionType::In => None,
        };
        self.rows.push(MovementRow {
            destination: String::new(),
            date,
            time: None,
            transaction_type,
            exposure_minutes,
            cumulative_minutes: 0,
            completed_by: String::new(),
            verified_by: String::new(),
        });
        self.recompute();
    }

    /// Apply one field edit to the row at `index`.
    ///
    /// Out-of-range values never reject the edit; they surface as
    /// diagnostics. The only failure is an index with no row behind it.
    pub fn update_row(&mut self, index: usize, edit: RowEdit) -> LedgerResult<()> {
        if index >= self.rows.len() {
            return Err(LedgerError::RowOutOfRange(index));
        }
        match edit {
            RowEdit::Destination(value) => self.rows[index].destination = value,
            RowEdit::Date(value) => {
                self.rows[index].date = value;
                if self.rows[index].transaction_type == TransactionType::In {
                    self.derive_exposure(index);
                }
            }
            RowEdit::Time(value) => {
                self.rows[index].time = value;
                if self.rows[index].transaction_type == TransactionType::In {
                    self.derive_exposure(index);
                }
            }
            RowEdit::TransactionType(value) => {
                // Row 0 is permanently Out; the edit is silently dropped.
                if index > 0 {
                    self.rows[index].transaction_type = value;
                    match value {
                        TransactionType::Out => {
                            self.rows[index].exposure_minutes = Some(0);
                        }
                        TransactionType::In => {
                            self.rows[index].exposure_minutes = None;
                            self.derive_exposure(index);
                        }
                    }
                }
            }
            RowEdit::ExposureMinutes(value) => {
                // Manual override for In rows; Out rows clamp straight back.
                let row = &mut self.rows[index];
                match row.transaction_type {
                    TransactionType::In => row.exposure_minutes = value,
                    TransactionType::Out => row.exposure_minutes = Some(0),
                }
            }
            RowEdit::CompletedBy(value) => self.rows[index].completed_by = value,
            RowEdit::VerifiedBy(value) => self.rows[index].verified_by = value,
        }
        self.recompute();
        Ok(())
    }

    /// Remove the row at `index`.
    ///
    /// Row 0 and the last remaining row are permanent; the initial-row
    /// reason wins when both apply.
    pub fn remove_row(&mut self, index: usize) -> LedgerResult<()> {
        if index == 0 {
            return Err(LedgerError::InitialRowPermanent);
        }
        if self.rows.len() == 1 {
            return Err(LedgerError::LastRowPermanent);
        }
        if index >= self.rows.len() {
            return Err(LedgerError::RowOutOfRange(index));
        }
        self.rows.remove(index);
        self.recompute();
        Ok(())
    }

    /// Derive exposure for the In row at `index` from the nearest preceding
    /// Out row. Leaves the stored value untouched when either endpoint is
    /// missing its date or time, so a manual override survives until this
    /// row's own type/date/time change again.
    fn derive_exposure(&mut self, index: usize) {
        let out_index = match self.nearest_out_before(index) {
            Some(i) => i,
            None => return,
        };
        let start = self.rows[out_index].datetime();
        let end = self.rows[index].datetime();
        if let (Some(start), Some(end)) = (start, end) {
            // Whole minutes, clamped at zero. Backwards timestamps are a
            // chronology finding, never a negative exposure.
            let minutes = end.signed_duration_since(start).num_minutes().max(0);
            self.rows[index].exposure_minutes = Some(minutes);
        }
    }

    /// Index of the nearest Out row strictly before `index`.
    fn nearest_out_before(&self, index: usize) -> Option<usize> {
        self.rows[..index]
            .iter()
            .rposition(|row| row.transaction_type == TransactionType::Out)
    }

    /// Full recomputation: cumulative sums, then diagnostics.
    /// Runs over the whole sequence after every mutation, never incrementally.
    fn recompute(&mut self) {
        let mut running = 0i64;
        for row in &mut self.rows {
            running += row.exposure_minutes.unwrap_or(0);
            row.cumulative_minutes = running;
        }
        self.diagnostics = rules::evaluate(&self.rows, self.limits);
    }
}
