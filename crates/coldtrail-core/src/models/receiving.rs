//! Receiving (inbound shipment) models.

use serde::{Deserialize, Serialize};

/// A receiving record: one inbound shipment of an inventory item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceivingRecord {
    /// Unique receiving number (e.g. "L111122001")
    pub receiving_no: String,
    /// Item number this shipment belongs to
    pub item_number: String,
    /// Courier tracking number
    pub tracking_number: String,
    /// Vendor lot number
    pub lot_no: String,
    /// Purchase order number
    pub po_no: Option<String>,
    /// Unit count stated by the vendor
    pub total_units_vendor: Option<i64>,
    /// Number of storage containers
    pub total_storage_containers: Option<i64>,
    /// Expiration date as entered; may also hold "TBD" or "N/A"
    pub exp_date: Option<String>,
    /// NCMR raised for this shipment ("Yes"/"No"/"N/A")
    pub ncmr: String,
    /// Temperature device alarm state on arrival
    pub temp_device_in_alarm: String,
    /// Whether the temperature device was deactivated
    pub temp_device_deactivated: String,
    /// Whether the temperature device went back with the courier
    pub temp_device_returned_to_courier: String,
    /// Unit count verified on receipt
    pub total_units_received: Option<i64>,
    /// Comments carried onto the 520B form
    pub comments_for_520b: String,
}

impl ReceivingRecord {
    /// Create a receiving record with required identifiers; everything else blank.
    pub fn new(receiving_no: String, item_number: String) -> Self {
        Self {
            receiving_no,
            item_number,
            tracking_number: String::new(),
            lot_no: String::new(),
            po_no: None,
            total_units_vendor: None,
            total_storage_containers: None,
            exp_date: None,
            ncmr: String::new(),
            temp_device_in_alarm: String::new(),
            temp_device_deactivated: String::new(),
            temp_device_returned_to_courier: String::new(),
            total_units_received: None,
            comments_for_520b: String::new(),
        }
    }
}
