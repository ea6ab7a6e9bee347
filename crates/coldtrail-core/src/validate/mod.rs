//! Field-level validation for item and receiving records.
//!
//! Collects every finding for a record rather than stopping at the first,
//! so an entry form can mark all offending fields at once.

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{ItemRecord, ReceivingRecord};

static ITEM_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{1,2}\d{6}$").unwrap());
static RECEIVING_NO_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^L\d{9}$").unwrap());
static MMDDYYYY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0[1-9]|1[0-2])/(0[1-9]|[12][0-9]|3[01])/\d{4}$").unwrap());

/// One finding against a single record field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldIssue {
    /// Record field the finding concerns (snake_case field name)
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Whether `value` matches the strict MM/DD/YYYY form shape.
pub fn is_mmddyyyy(value: &str) -> bool {
    MMDDYYYY_RE.is_match(value)
}

/// Parse a strict MM/DD/YYYY date.
pub fn parse_mmddyyyy(value: &str) -> Option<NaiveDate> {
    if !is_mmddyyyy(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%m/%d/%Y").ok()
}

/// Format a date as MM/DD/YYYY.
pub fn format_mmddyyyy(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

fn require(field: &str, value: &str, label: &str, issues: &mut Vec<FieldIssue>) -> bool {
    if value.is_empty() {
        issues.push(FieldIssue::new(field, format!("{} is required", label)));
        return false;
    }
    true
}

fn cap_length(field: &str, value: &str, max: usize, label: &str, issues: &mut Vec<FieldIssue>) {
    if value.trim().chars().count() > max {
        issues.push(FieldIssue::new(
            field,
            format!("{} must be {} characters or less", label, max),
        ));
    }
}

fn require_count(field: &str, value: Option<i64>, label: &str, issues: &mut Vec<FieldIssue>) {
    match value {
        None => issues.push(FieldIssue::new(field, format!("{} is required", label))),
        Some(n) if n < 0 => issues.push(FieldIssue::new(
            field,
            format!("{} must be a positive number", label),
        )),
        Some(_) => {}
    }
}

/// Validate an item record. Empty vec means the record is acceptable.
pub fn validate_item(item: &ItemRecord) -> Vec<FieldIssue> {
    let mut issues = Vec::new();

    if require("item_number", &item.item_number, "Item number", &mut issues)
        && !ITEM_NUMBER_RE.is_match(&item.item_number)
    {
        issues.push(FieldIssue::new(
            "item_number",
            "Item number format should be like D200001 or NP200002",
        ));
    }

    if require("description", &item.description, "Description", &mut issues) {
        let len = item.description.trim().chars().count();
        if len < 3 {
            issues.push(FieldIssue::new(
                "description",
                "Description must be at least 3 characters long",
            ));
        } else if len > 200 {
            issues.push(FieldIssue::new(
                "description",
                "Description must be 200 characters or less",
            ));
        }
    }

    if require("client", &item.client, "Client", &mut issues) {
        cap_length("client", &item.client, 100, "Client name", &mut issues);
    }
    if require(
        "protocol_number",
        &item.protocol_number,
        "Protocol number",
        &mut issues,
    ) {
        cap_length(
            "protocol_number",
            &item.protocol_number,
            50,
            "Protocol number",
            &mut issues,
        );
    }
    if require("vendor", &item.vendor, "Vendor", &mut issues) {
        cap_length("vendor", &item.vendor, 100, "Vendor name", &mut issues);
    }
    if require("uom", &item.uom, "UOM", &mut issues) {
        cap_length("uom", &item.uom, 50, "UOM", &mut issues);
    }
    if require("controlled", &item.controlled, "Controlled status", &mut issues) {
        cap_length(
            "controlled",
            &item.controlled,
            50,
            "Controlled status",
            &mut issues,
        );
    }
    if require(
        "temp_storage_conditions",
        &item.temp_storage_conditions,
        "Temperature storage conditions",
        &mut issues,
    ) {
        cap_length(
            "temp_storage_conditions",
            &item.temp_storage_conditions,
            50,
            "Temperature storage conditions",
            &mut issues,
        );
    } else if let Some(last) = issues.last_mut() {
        // This one field's required message reads as plural on the form
        last.message = "Temperature storage conditions are required".to_string();
    }

    if let Some(other) = &item.other_storage_conditions {
        cap_length(
            "other_storage_conditions",
            other,
            50,
            "Other storage conditions",
            &mut issues,
        );
    }

    require_count(
        "max_exposure_time",
        item.max_exposure_time,
        "Max exposure time",
        &mut issues,
    );
    require_count("temper_time", item.temper_time, "Temper time", &mut issues);
    require_count(
        "working_exposure_time",
        item.working_exposure_time,
        "Working exposure time",
        &mut issues,
    );

    if require(
        "vendor_code_rev",
        &item.vendor_code_rev,
        "Vendor code revision",
        &mut issues,
    ) {
        cap_length(
            "vendor_code_rev",
            &item.vendor_code_rev,
            50,
            "Vendor code revision",
            &mut issues,
        );
    }
    if require("study_type", &item.study_type, "Study type", &mut issues) {
        cap_length("study_type", &item.study_type, 50, "Study type", &mut issues);
    }

    issues
}

/// Validate a receiving record. Empty vec means the record is acceptable.
pub fn validate_receiving(receiving: &ReceivingRecord) -> Vec<FieldIssue> {
    let mut issues = Vec::new();

    if require(
        "receiving_no",
        &receiving.receiving_no,
        "Receiving number",
        &mut issues,
    ) && !RECEIVING_NO_RE.is_match(&receiving.receiving_no)
    {
        issues.push(FieldIssue::new(
            "receiving_no",
            "Receiving number must start with L followed by 9 digits",
        ));
    }

    if receiving.item_number.is_empty() {
        issues.push(FieldIssue::new("item_number", "Item number is required"));
    }

    if require(
        "tracking_number",
        &receiving.tracking_number,
        "Tracking number",
        &mut issues,
    ) {
        cap_length(
            "tracking_number",
            &receiving.tracking_number,
            50,
            "Tracking number",
            &mut issues,
        );
    }
    if require("lot_no", &receiving.lot_no, "Lot number", &mut issues) {
        cap_length("lot_no", &receiving.lot_no, 50, "Lot number", &mut issues);
    }
    if let Some(po_no) = &receiving.po_no {
        cap_length("po_no", po_no, 50, "PO number", &mut issues);
    }

    require_count(
        "total_units_vendor",
        receiving.total_units_vendor,
        "Total units",
        &mut issues,
    );
    require_count(
        "total_storage_containers",
        receiving.total_storage_containers,
        "Total storage containers",
        &mut issues,
    );
    match receiving.total_units_received {
        None => issues.push(FieldIssue::new(
            "total_units_received",
            "Total units received is required",
        )),
        Some(n) if n < 0 => issues.push(FieldIssue::new(
            "total_units_received",
            "Total units received must be a positive number",
        )),
        Some(received) => {
            if let Some(vendor_count) = receiving.total_units_vendor {
                if received > vendor_count {
                    issues.push(FieldIssue::new(
                        "total_units_received",
                        "Total units received cannot exceed total units from vendor",
                    ));
                }
            }
        }
    }

    if let Some(exp_date) = &receiving.exp_date {
        match parse_mmddyyyy(exp_date) {
            None => issues.push(FieldIssue::new("exp_date", "Invalid date format")),
            Some(date) => {
                if date < Utc::now().date_naive() {
                    issues.push(FieldIssue::new(
                        "exp_date",
                        "Expiration date cannot be in the past",
                    ));
                }
            }
        }
    }

    cap_length(
        "comments_for_520b",
        &receiving.comments_for_520b,
        200,
        "Comments",
        &mut issues,
    );

    issues
}
