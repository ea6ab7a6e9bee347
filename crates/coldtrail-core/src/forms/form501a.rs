//! 501A disposition form draft.

use serde::Serialize;
use serde_json::{json, Value};

use super::DateKind;
use crate::models::{ItemRecord, ReceivingRecord};

/// Disposition checkboxes. The form allows any combination.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct LocationStatus {
    pub quarantine: bool,
    pub rejected: bool,
    pub released: bool,
}

/// A live 501A form session.
#[derive(Debug, Clone, Serialize)]
pub struct Form501aDraft {
    pub receiving_no: String,
    pub item_no: String,
    pub item_description: String,
    pub client_name: String,
    pub vendor_name: String,
    pub lot_no: String,
    pub storage_conditions: String,
    pub other_storage_conditions: String,
    pub total_units_received: String,
    pub controlled_substance: String,
    pub location_status: LocationStatus,
    /// Which date the form records, if any
    pub date_kind: Option<DateKind>,
    /// Date value as entered (MM/DD/YYYY)
    pub date_value: String,
    pub completed_by: String,
    pub comments: String,
}

impl Form501aDraft {
    /// Seed a draft from a selected item/receiving pair.
    pub fn new(item: &ItemRecord, receiving: &ReceivingRecord) -> Self {
        Self {
            receiving_no: receiving.receiving_no.clone(),
            item_no: item.item_number.clone(),
            item_description: item.description.clone(),
            client_name: item.client.clone(),
            vendor_name: item.vendor.clone(),
            lot_no: receiving.lot_no.clone(),
            storage_conditions: item.temp_storage_conditions.clone(),
            other_storage_conditions: item
                .other_storage_conditions
                .clone()
                .unwrap_or_default(),
            total_units_received: receiving
                .total_units_received
                .map(|n| n.to_string())
                .unwrap_or_default(),
            controlled_substance: item.controlled.clone(),
            location_status: LocationStatus::default(),
            date_kind: None,
            date_value: String::new(),
            completed_by: String::new(),
            comments: String::new(),
        }
    }

    /// Select a date kind; re-selecting the active one clears it together
    /// with its value, the same toggle behavior as the form checkbox.
    pub fn toggle_date_kind(&mut self, kind: DateKind) {
        if self.date_kind == Some(kind) {
            self.date_kind = None;
            self.date_value.clear();
        } else {
            self.date_kind = Some(kind);
        }
    }

    /// The 501A PDF template data.
    pub fn payload(&self) -> Value {
        json!({
            "receiving_no": self.receiving_no,
            "item_no": self.item_no,
            "item_description": self.item_description,
            "client_name": self.client_name,
            "vendor_name": self.vendor_name,
            "lot_no": self.lot_no,
            "storage_conditions": self.storage_conditions,
            "other_storage_conditions": self.other_storage_conditions,
            "total_units_received": self.total_units_received,
            "controlled_substance": self.controlled_substance,
            "locationStatus": {
                "quarantine": self.location_status.quarantine,
                "rejected": self.location_status.rejected,
                "released": self.location_status.released,
            },
            "dateType": self.date_kind.map(|k| k.label_501a()).unwrap_or(""),
            "dateValue": self.date_value,
            "completedBy": self.completed_by,
            // The printed transaction table starts empty on a fresh 501A
            "transactions": [],
            "comments": self.comments,
        })
    }

    /// Pretty-printed payload JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.payload())
    }
}
