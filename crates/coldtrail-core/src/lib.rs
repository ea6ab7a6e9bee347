//! Coldtrail Core Library
//!
//! Exposure-time tracking and accountability-form core for
//! investigational-drug inventory.
//!
//! # Architecture
//!
//! ```text
//! Item / Receiving entry → validation → Directory (in-memory registry)
//!                                            │
//!                              select item + receiving pair
//!                                            │
//!                            ┌───────────────▼───────────────┐
//!                            │        519A form draft        │
//!                            │  header seeded from the pair  │
//!                            │  ExposureLedger: In/Out rows, │
//!                            │  derived exposure + findings  │
//!                            └───────────────┬───────────────┘
//!                                            │
//!                    ┌───────────────────────┼───────────────────────┐
//!                    │                       │                       │
//!                    ▼                       ▼                       ▼
//!                519A payload          501A payload            520B payload
//!                              (PDF generation, external)
//! ```
//!
//! # Core Principle
//!
//! **Rule findings never block an edit.** Structural rejections (removing
//! the permanent first row, editing a missing row) are explicit `Result`s;
//! everything else surfaces as warnings and errors for the caller to render.
//!
//! # Modules
//!
//! - [`models`]: Domain types (MovementRow, ItemRecord, ReceivingRecord, etc.)
//! - [`ledger`]: Exposure-time movement ledger and its validation rules
//! - [`validate`]: Field-level item/receiving record validation
//! - [`directory`]: In-memory item/receiving registry with fuzzy search
//! - [`forms`]: 519A/501A/520B drafts and their PDF payloads

pub mod directory;
pub mod forms;
pub mod ledger;
pub mod models;
pub mod validate;

// Re-export commonly used types
pub use directory::{Directory, DirectoryError, SearchHit};
pub use forms::{Form501aDraft, Form519aDraft, Form520bDraft};
pub use ledger::{ExposureLedger, LedgerError};
pub use models::{
    Diagnostic, ItemRecord, LedgerLimits, MovementRow, ReceivingRecord, RowEdit, Severity,
    TransactionType,
};
pub use validate::FieldIssue;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveTime};
use tracing::info;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum CoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Ledger violation: {0}")]
    LedgerViolation(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<DirectoryError> for CoreError {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::NotFound(_) => CoreError::NotFound(e.to_string()),
            _ => CoreError::InvalidInput(e.to_string()),
        }
    }
}

impl From<LedgerError> for CoreError {
    fn from(e: LedgerError) -> Self {
        CoreError::LedgerViolation(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for CoreError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        CoreError::InvalidInput(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create an empty directory.
#[uniffi::export]
pub fn open_directory() -> Arc<CoreHandle> {
    Arc::new(CoreHandle {
        directory: Arc::new(Mutex::new(Directory::new())),
    })
}

/// Create a directory seeded with the demo data set.
#[uniffi::export]
pub fn open_demo_directory() -> Arc<CoreHandle> {
    Arc::new(CoreHandle {
        directory: Arc::new(Mutex::new(Directory::demo())),
    })
}

/// The fixed select options of the entry forms.
#[uniffi::export]
pub fn form_options() -> FfiFormOptions {
    let to_vec = |options: &[&str]| options.iter().map(|s| s.to_string()).collect();
    FfiFormOptions {
        controlled: to_vec(models::options::CONTROLLED_OPTIONS),
        study_types: to_vec(models::options::STUDY_TYPE_OPTIONS),
        uom: to_vec(models::options::UOM_OPTIONS),
        temp_conditions: to_vec(models::options::TEMP_CONDITIONS_OPTIONS),
        ncmr: to_vec(models::options::NCMR_OPTIONS),
        yes_no: to_vec(models::options::YES_NO_OPTIONS),
    }
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe directory wrapper for FFI.
#[derive(uniffi::Object)]
pub struct CoreHandle {
    directory: Arc<Mutex<Directory>>,
}

#[uniffi::export]
impl CoreHandle {
    // =========================================================================
    // Item Operations
    // =========================================================================

    /// Add an item record. Validation issues reject the insert.
    pub fn add_item(&self, item: FfiItemRecord) -> Result<(), CoreError> {
        let mut dir = self.directory.lock()?;
        dir.add_item(item.into())?;
        Ok(())
    }

    /// Get an item by number.
    pub fn get_item(&self, item_number: String) -> Result<FfiItemRecord, CoreError> {
        let dir = self.directory.lock()?;
        Ok(dir.item(&item_number)?.clone().into())
    }

    /// List all items.
    pub fn list_items(&self) -> Result<Vec<FfiItemRecord>, CoreError> {
        let dir = self.directory.lock()?;
        Ok(dir.items().iter().cloned().map(|i| i.into()).collect())
    }

    /// Fuzzy-search items by number/description.
    pub fn search_items(&self, query: String, limit: u32) -> Result<Vec<FfiSearchHit>, CoreError> {
        let dir = self.directory.lock()?;
        Ok(dir
            .search_items(&query, limit as usize)
            .into_iter()
            .map(|h| h.into())
            .collect())
    }

    // =========================================================================
    // Receiving Operations
    // =========================================================================

    /// Add a receiving record. Validation issues reject the insert.
    pub fn add_receiving(&self, receiving: FfiReceivingRecord) -> Result<(), CoreError> {
        let mut dir = self.directory.lock()?;
        dir.add_receiving(receiving.into())?;
        Ok(())
    }

    /// Get a receiving record by number.
    pub fn get_receiving(&self, receiving_no: String) -> Result<FfiReceivingRecord, CoreError> {
        let dir = self.directory.lock()?;
        Ok(dir.receiving(&receiving_no)?.clone().into())
    }

    /// List all receiving records.
    pub fn list_receivings(&self) -> Result<Vec<FfiReceivingRecord>, CoreError> {
        let dir = self.directory.lock()?;
        Ok(dir.receivings().iter().cloned().map(|r| r.into()).collect())
    }

    /// List receiving records for one item.
    pub fn receivings_for_item(
        &self,
        item_number: String,
    ) -> Result<Vec<FfiReceivingRecord>, CoreError> {
        let dir = self.directory.lock()?;
        Ok(dir
            .receivings_for_item(&item_number)
            .into_iter()
            .cloned()
            .map(|r| r.into())
            .collect())
    }

    // =========================================================================
    // Session Operations
    // =========================================================================

    /// Start a 519A movement session for an item/receiving pair.
    pub fn start_movement_session(
        &self,
        item_number: String,
        receiving_no: String,
    ) -> Result<Arc<MovementSession>, CoreError> {
        let dir = self.directory.lock()?;
        let item = dir.item(&item_number)?;
        let receiving = dir.receiving(&receiving_no)?;

        let draft = Form519aDraft::new(item, receiving);
        info!(item_number = %item_number, receiving_no = %receiving_no,
              draft_id = %draft.draft_id, "movement session started");
        Ok(Arc::new(MovementSession {
            draft: Mutex::new(draft),
        }))
    }
}

// =========================================================================
// Movement Session Object
// =========================================================================

/// A live 519A draft driven over FFI, one row edit at a time.
#[derive(uniffi::Object)]
pub struct MovementSession {
    draft: Mutex<Form519aDraft>,
}

#[uniffi::export]
impl MovementSession {
    // =========================================================================
    // Row Operations
    // =========================================================================

    /// Append a movement row.
    pub fn add_row(&self) -> Result<(), CoreError> {
        let mut draft = self.draft.lock()?;
        draft.add_row();
        Ok(())
    }

    /// Remove a movement row.
    pub fn remove_row(&self, index: u32) -> Result<(), CoreError> {
        let mut draft = self.draft.lock()?;
        draft.remove_row(index as usize)?;
        Ok(())
    }

    /// Set a row's destination text.
    pub fn set_destination(&self, index: u32, value: String) -> Result<(), CoreError> {
        self.edit(index, RowEdit::Destination(value))
    }

    /// Set a row's date ("YYYY-MM-DD"; empty clears).
    pub fn set_date(&self, index: u32, value: String) -> Result<(), CoreError> {
        self.edit(index, RowEdit::Date(parse_date(&value)?))
    }

    /// Set a row's time ("HH:MM" or "HH:MM:SS"; empty clears).
    pub fn set_time(&self, index: u32, value: String) -> Result<(), CoreError> {
        self.edit(index, RowEdit::Time(parse_time(&value)?))
    }

    /// Set a row's transaction type ("In"/"Out").
    pub fn set_transaction_type(&self, index: u32, value: String) -> Result<(), CoreError> {
        let transaction_type = TransactionType::parse(&value)
            .ok_or_else(|| CoreError::InvalidInput(format!("Not a transaction type: {}", value)))?;
        self.edit(index, RowEdit::TransactionType(transaction_type))
    }

    /// Override a row's exposure minutes; `None` blanks the cell.
    pub fn set_exposure_minutes(&self, index: u32, value: Option<i64>) -> Result<(), CoreError> {
        self.edit(index, RowEdit::ExposureMinutes(value))
    }

    /// Set a row's completed-by initials.
    pub fn set_completed_by(&self, index: u32, value: String) -> Result<(), CoreError> {
        self.edit(index, RowEdit::CompletedBy(value))
    }

    /// Set a row's verified-by initials.
    pub fn set_verified_by(&self, index: u32, value: String) -> Result<(), CoreError> {
        self.edit(index, RowEdit::VerifiedBy(value))
    }

    // =========================================================================
    // Header Operations
    // =========================================================================

    /// Set the date/time-received header field.
    pub fn set_date_time_received(&self, value: String) -> Result<(), CoreError> {
        let mut draft = self.draft.lock()?;
        draft.date_time_received = value;
        Ok(())
    }

    /// Set the container-number header field.
    pub fn set_container_no(&self, value: String) -> Result<(), CoreError> {
        let mut draft = self.draft.lock()?;
        draft.container_no = value;
        Ok(())
    }

    /// Set the record-created-by header field.
    pub fn set_record_created_by(&self, value: String) -> Result<(), CoreError> {
        let mut draft = self.draft.lock()?;
        draft.record_created_by = value;
        Ok(())
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Current rows, in order.
    pub fn rows(&self) -> Result<Vec<FfiMovementRow>, CoreError> {
        let draft = self.draft.lock()?;
        Ok(draft
            .ledger()
            .rows()
            .iter()
            .enumerate()
            .map(|(index, row)| FfiMovementRow::from_row(index, row))
            .collect())
    }

    /// Current findings from the last recomputation.
    pub fn diagnostics(&self) -> Result<Vec<FfiDiagnostic>, CoreError> {
        let draft = self.draft.lock()?;
        Ok(draft
            .diagnostics()
            .iter()
            .cloned()
            .map(|d| d.into())
            .collect())
    }

    /// Number of Error-severity findings the caller must surface before
    /// generating the PDF.
    pub fn blocking_error_count(&self) -> Result<u32, CoreError> {
        let draft = self.draft.lock()?;
        Ok(draft.blocking_errors().len() as u32)
    }

    /// The 519A PDF payload, pretty-printed.
    pub fn payload_json(&self) -> Result<String, CoreError> {
        let draft = self.draft.lock()?;
        let json = draft.to_json()?;
        info!(draft_id = %draft.draft_id, "519A payload built");
        Ok(json)
    }
}

impl MovementSession {
    fn edit(&self, index: u32, edit: RowEdit) -> Result<(), CoreError> {
        let mut draft = self.draft.lock()?;
        draft.update_row(index as usize, edit)?;
        Ok(())
    }
}

fn parse_date(value: &str) -> Result<Option<NaiveDate>, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| CoreError::InvalidInput(format!("Not a date: {}", value)))
}

fn parse_time(value: &str) -> Result<Option<NaiveTime>, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map(Some)
        .map_err(|_| CoreError::InvalidInput(format!("Not a time: {}", value)))
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe item record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiItemRecord {
    pub item_number: String,
    pub description: String,
    pub client: String,
    pub protocol_number: String,
    pub vendor: String,
    pub uom: String,
    pub controlled: String,
    pub temp_storage_conditions: String,
    pub other_storage_conditions: Option<String>,
    pub max_exposure_time: Option<i64>,
    pub temper_time: Option<i64>,
    pub working_exposure_time: Option<i64>,
    pub vendor_code_rev: String,
    pub randomized: String,
    pub sequential_numbers: String,
    pub study_type: String,
}

impl From<ItemRecord> for FfiItemRecord {
    fn from(item: ItemRecord) -> Self {
        Self {
            item_number: item.item_number,
            description: item.description,
            client: item.client,
            protocol_number: item.protocol_number,
            vendor: item.vendor,
            uom: item.uom,
            controlled: item.controlled,
            temp_storage_conditions: item.temp_storage_conditions,
            other_storage_conditions: item.other_storage_conditions,
            max_exposure_time: item.max_exposure_time,
            temper_time: item.temper_time,
            working_exposure_time: item.working_exposure_time,
            vendor_code_rev: item.vendor_code_rev,
            randomized: item.randomized,
            sequential_numbers: item.sequential_numbers,
            study_type: item.study_type,
        }
    }
}

impl From<FfiItemRecord> for ItemRecord {
    fn from(item: FfiItemRecord) -> Self {
        ItemRecord {
            item_number: item.item_number,
            description: item.description,
            client: item.client,
            protocol_number: item.protocol_number,
            vendor: item.vendor,
            uom: item.uom,
            controlled: item.controlled,
            temp_storage_conditions: item.temp_storage_conditions,
            other_storage_conditions: item.other_storage_conditions,
            max_exposure_time: item.max_exposure_time,
            temper_time: item.temper_time,
            working_exposure_time: item.working_exposure_time,
            vendor_code_rev: item.vendor_code_rev,
            randomized: item.randomized,
            sequential_numbers: item.sequential_numbers,
            study_type: item.study_type,
        }
    }
}

/// FFI-safe receiving record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiReceivingRecord {
    pub receiving_no: String,
    pub item_number: String,
    pub tracking_number: String,
    pub lot_no: String,
    pub po_no: Option<String>,
    pub total_units_vendor: Option<i64>,
    pub total_storage_containers: Option<i64>,
    pub exp_date: Option<String>,
    pub ncmr: String,
    pub temp_device_in_alarm: String,
    pub temp_device_deactivated: String,
    pub temp_device_returned_to_courier: String,
    pub total_units_received: Option<i64>,
    pub comments_for_520b: String,
}

impl From<ReceivingRecord> for FfiReceivingRecord {
    fn from(receiving: ReceivingRecord) -> Self {
        Self {
            receiving_no: receiving.receiving_no,
            item_number: receiving.item_number,
            tracking_number: receiving.tracking_number,
            lot_no: receiving.lot_no,
            po_no: receiving.po_no,
            total_units_vendor: receiving.total_units_vendor,
            total_storage_containers: receiving.total_storage_containers,
            exp_date: receiving.exp_date,
            ncmr: receiving.ncmr,
            temp_device_in_alarm: receiving.temp_device_in_alarm,
            temp_device_deactivated: receiving.temp_device_deactivated,
            temp_device_returned_to_courier: receiving.temp_device_returned_to_courier,
            total_units_received: receiving.total_units_received,
            comments_for_520b: receiving.comments_for_520b,
        }
    }
}

impl From<FfiReceivingRecord> for ReceivingRecord {
    fn from(receiving: FfiReceivingRecord) -> Self {
        ReceivingRecord {
            receiving_no: receiving.receiving_no,
            item_number: receiving.item_number,
            tracking_number: receiving.tracking_number,
            lot_no: receiving.lot_no,
            po_no: receiving.po_no,
            total_units_vendor: receiving.total_units_vendor,
            total_storage_containers: receiving.total_storage_containers,
            exp_date: receiving.exp_date,
            ncmr: receiving.ncmr,
            temp_device_in_alarm: receiving.temp_device_in_alarm,
            temp_device_deactivated: receiving.temp_device_deactivated,
            temp_device_returned_to_courier: receiving.temp_device_returned_to_courier,
            total_units_received: receiving.total_units_received,
            comments_for_520b: receiving.comments_for_520b,
        }
    }
}

/// FFI-safe movement row snapshot. Dates/times are the same strings the
/// row setters accept.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMovementRow {
    pub index: u32,
    pub destination: String,
    pub date: String,
    pub time: String,
    pub transaction_type: String,
    pub exposure_minutes: Option<i64>,
    pub cumulative_minutes: i64,
    pub completed_by: String,
    pub verified_by: String,
}

impl FfiMovementRow {
    fn from_row(index: usize, row: &MovementRow) -> Self {
        Self {
            index: index as u32,
            destination: row.destination.clone(),
            date: row
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            time: row
                .time
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default(),
            transaction_type: format!("{:?}", row.transaction_type),
            exposure_minutes: row.exposure_minutes,
            cumulative_minutes: row.cumulative_minutes,
            completed_by: row.completed_by.clone(),
            verified_by: row.verified_by.clone(),
        }
    }
}

/// FFI-safe diagnostic.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDiagnostic {
    pub row_index: u32,
    pub rule: String,
    pub severity: String,
    pub message: String,
}

impl From<Diagnostic> for FfiDiagnostic {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            row_index: diagnostic.row_index as u32,
            rule: diagnostic.rule,
            severity: format!("{:?}", diagnostic.severity),
            message: diagnostic.message,
        }
    }
}

/// FFI-safe bundle of the fixed form select options.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFormOptions {
    pub controlled: Vec<String>,
    pub study_types: Vec<String>,
    pub uom: Vec<String>,
    pub temp_conditions: Vec<String>,
    pub ncmr: Vec<String>,
    pub yes_no: Vec<String>,
}

/// FFI-safe search hit.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSearchHit {
    pub item: FfiItemRecord,
    pub score: f64,
}

impl From<SearchHit> for FfiSearchHit {
    fn from(hit: SearchHit) -> Self {
        Self {
            item: hit.item.into(),
            score: hit.score,
        }
    }
}
