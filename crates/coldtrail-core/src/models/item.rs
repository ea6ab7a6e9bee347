//! Inventory item models.

use serde::{Deserialize, Serialize};

use crate::models::LedgerLimits;

/// A single item number in the investigational-drug inventory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemRecord {
    /// Unique item number (e.g. "D200001", "NP200002")
    pub item_number: String,
    /// Item description
    pub description: String,
    /// Sponsor/client name
    pub client: String,
    /// Study protocol number
    pub protocol_number: String,
    /// Supplying vendor
    pub vendor: String,
    /// Unit of measure (e.g. "kg", "tablets")
    pub uom: String,
    /// Controlled-substance status (one of the controlled options)
    pub controlled: String,
    /// Temperature storage condition (one of the temp-condition options)
    pub temp_storage_conditions: String,
    /// Additional storage conditions, free text
    pub other_storage_conditions: Option<String>,
    /// Maximum cumulative exposure time, minutes
    pub max_exposure_time: Option<i64>,
    /// Temper time, minutes
    pub temper_time: Option<i64>,
    /// Working exposure time, minutes
    pub working_exposure_time: Option<i64>,
    /// Vendor code revision
    pub vendor_code_rev: String,
    /// Whether the item is randomized ("Yes"/"No")
    pub randomized: String,
    /// Whether units carry sequential numbers ("Yes"/"No")
    pub sequential_numbers: String,
    /// Study blinding type (one of the study-type options)
    pub study_type: String,
}

impl ItemRecord {
    /// Create an item with required identifiers; everything else blank.
    pub fn new(item_number: String, description: String) -> Self {
        Self {
            item_number,
            description,
            client: String::new(),
            protocol_number: String::new(),
            vendor: String::new(),
            uom: String::new(),
            controlled: String::new(),
            temp_storage_conditions: String::new(),
            other_storage_conditions: None,
            max_exposure_time: None,
            temper_time: None,
            working_exposure_time: None,
            vendor_code_rev: String::new(),
            randomized: String::new(),
            sequential_numbers: String::new(),
            study_type: String::new(),
        }
    }

    /// Project the three exposure fields into ledger limits.
    /// Unconfigured limits come through as zero.
    pub fn limits(&self) -> LedgerLimits {
        LedgerLimits {
            temper_minutes: self.temper_time.unwrap_or(0),
            working_minutes: self.working_exposure_time.unwrap_or(0),
            max_minutes: self.max_exposure_time.unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_projection() {
        let mut item = ItemRecord::new("D200001".into(), "Test Item A".into());
        item.temper_time = Some(24);
        item.working_exposure_time = Some(48);
        item.max_exposure_time = Some(72);

        let limits = item.limits();
        assert_eq!(limits.temper_minutes, 24);
        assert_eq!(limits.working_minutes, 48);
        assert_eq!(limits.max_minutes, 72);
    }

    #[test]
    fn test_limits_default_to_zero() {
        let item = ItemRecord::new("D200001".into(), "Test Item A".into());
        assert_eq!(item.limits(), LedgerLimits::default());
    }
}
