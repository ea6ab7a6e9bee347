//! Fixed option sets for form select fields.
//!
//! These values land on printed forms verbatim, so spelling (including the
//! degree signs) matters.

/// Controlled-substance statuses.
pub const CONTROLLED_OPTIONS: &[&str] = &[
    "No",
    "Yes - CII Narc",
    "Yes - CII Non",
    "Yes - CIII Narc",
    "Yes - CIII Non",
];

/// Study blinding types.
pub const STUDY_TYPE_OPTIONS: &[&str] = &["Blind", "Single Blind", "Double Blind", "Open", "N/A"];

/// Units of measure.
pub const UOM_OPTIONS: &[&str] = &["kg", "L", "mg", "mL", "units", "tablets", "capsules"];

/// Temperature storage conditions.
pub const TEMP_CONDITIONS_OPTIONS: &[&str] = &[
    "Room Temp",
    "Cool",
    "Refrigerated (2-8°C)",
    "Frozen (-20°C)",
    "Ultra Low (-80°C)",
];

/// NCMR states.
pub const NCMR_OPTIONS: &[&str] = &["Yes", "No", "N/A"];

/// Plain yes/no selects.
pub const YES_NO_OPTIONS: &[&str] = &["Yes", "No"];
