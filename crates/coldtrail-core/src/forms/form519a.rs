//! 519A drug-movement form draft.
//!
//! Header fields seeded from an item/receiving pair plus an embedded
//! [`ExposureLedger`] for the movement table. `payload()` produces the
//! exact template data the 519A PDF generator consumes.

use serde::Serialize;
use serde_json::{json, Value};

use crate::ledger::{ExposureLedger, LedgerResult};
use crate::models::{
    Diagnostic, ItemRecord, MovementRow, ReceivingRecord, RowEdit, Severity, TransactionType,
};

/// A live 519A form session.
#[derive(Debug, Clone, Serialize)]
pub struct Form519aDraft {
    /// Session id, fresh per draft
    pub draft_id: String,
    pub item_no: String,
    pub receiving_no: String,
    pub item_description: String,
    pub storage_conditions: String,
    pub other_storage_conditions: String,
    pub lot_no: String,
    /// Free text, entered by the operator (e.g. "03/24/2025 08:00")
    pub date_time_received: String,
    pub temp_device_alarm: String,
    pub temp_device_deactivated: String,
    pub temp_device_returned: String,
    pub container_no: String,
    pub total_units_per_container: String,
    pub record_created_by: String,
    /// RFC 3339 creation stamp
    pub date_created: String,
    ledger: ExposureLedger,
}

impl Form519aDraft {
    /// Seed a draft from a selected item/receiving pair.
    ///
    /// Pulls the fields an item/receiving selection fills in:
    /// description, storage conditions and limits from the item; lot number,
    /// temp-device flags and vendor unit count from the receiving record.
    pub fn new(item: &ItemRecord, receiving: &ReceivingRecord) -> Self {
        Self {
            draft_id: uuid::Uuid::new_v4().to_string(),
            item_no: item.item_number.clone(),
            receiving_no: receiving.receiving_no.clone(),
            item_description: item.description.clone(),
            storage_conditions: item.temp_storage_conditions.clone(),
            other_storage_conditions: item
                .other_storage_conditions
                .clone()
                .unwrap_or_default(),
            lot_no: receiving.lot_no.clone(),
            date_time_received: String::new(),
            temp_device_alarm: receiving.temp_device_in_alarm.clone(),
            temp_device_deactivated: receiving.temp_device_deactivated.clone(),
            temp_device_returned: receiving.temp_device_returned_to_courier.clone(),
            container_no: String::new(),
            total_units_per_container: receiving
                .total_units_vendor
                .map(|n| n.to_string())
                .unwrap_or_default(),
            record_created_by: String::new(),
            date_created: chrono::Utc::now().to_rfc3339(),
            ledger: ExposureLedger::new(item.limits()),
        }
    }

    /// The embedded movement ledger.
    pub fn ledger(&self) -> &ExposureLedger {
        &self.ledger
    }

    /// Append a movement row.
    pub fn add_row(&mut self) {
        self.ledger.add_row();
    }

    /// Apply one field edit to a movement row.
    pub fn update_row(&mut self, index: usize, edit: RowEdit) -> LedgerResult<()> {
        self.ledger.update_row(index, edit)
    }

    /// Remove a movement row.
    pub fn remove_row(&mut self, index: usize) -> LedgerResult<()> {
        self.ledger.remove_row(index)
    }

    /// Current findings for the movement table.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.ledger.diagnostics()
    }

    /// Error-severity findings. Submission gating policy belongs to the
    /// caller; this is the list it must surface before generating the PDF.
    pub fn blocking_errors(&self) -> Vec<&Diagnostic> {
        self.ledger
            .diagnostics()
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .collect()
    }

    /// The 519A PDF template data.
    ///
    /// Movement rows missing a date or time are left off the printed table.
    pub fn payload(&self) -> Value {
        let drug_movements: Vec<Value> = self
            .ledger
            .rows()
            .iter()
            .filter(|row| row.is_complete())
            .map(movement_payload)
            .collect();

        json!({
            "receiving_no": self.receiving_no,
            "item_no": self.item_no,
            "item_description": self.item_description,
            "lot_no": self.lot_no,
            "storage_conditions": self.storage_conditions,
            "date_time_received": self.date_time_received,
            "other_storage_conditions": self.other_storage_conditions,
            "temp_device_alarm": self.temp_device_alarm,
            "temp_device_deactivated": self.temp_device_deactivated,
            "temp_device_returned": self.temp_device_returned,
            "max_exposure_time": self.ledger.limits().max_minutes,
            "temper_time": self.ledger.limits().temper_minutes,
            "working_exposure_time": self.ledger.limits().working_minutes,
            "container_no": self.container_no,
            "total_units_per_container": self.total_units_per_container,
            "record_created_by": self.record_created_by,
            "date_created": self.date_created,
            "drug_movements": drug_movements,
        })
    }

    /// Pretty-printed payload JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.payload())
    }
}

fn movement_payload(row: &MovementRow) -> Value {
    json!({
        "destination": row.destination,
        "date": row.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
        "time": row.time.map(|t| t.format("%H:%M").to_string()).unwrap_or_default(),
        "transaction_type": match row.transaction_type {
            TransactionType::In => "In",
            TransactionType::Out => "Out",
        },
        "exposure_time": row.exposure_minutes,
        "cumulative_et": row.cumulative_minutes,
        "completed_by": row.completed_by,
        "verified_by": row.verified_by,
    })
}
