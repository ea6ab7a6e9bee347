//! Validation rules for the movement ledger.
//!
//! One pass over the full row sequence producing the complete diagnostic
//! set. The pass is pure: same rows + limits in, same findings out, so
//! running it twice cannot change the result.

use crate::models::{Diagnostic, LedgerLimits, MovementRow, Severity, TransactionType};

/// Rule key: In-row exposure below the temper time.
pub const RULE_TEMPER_TIME: &str = "temper-time";
/// Rule key: In-row exposure above the working exposure time.
pub const RULE_WORKING_EXPOSURE: &str = "working-exposure";
/// Rule key: Out row carrying a non-zero exposure.
pub const RULE_OUT_NONZERO: &str = "out-nonzero";
/// Rule key: running total above the maximum exposure time.
pub const RULE_CUMULATIVE_MAX: &str = "cumulative-max";
/// Rule key: row timestamp earlier than the previous row's.
pub const RULE_CHRONOLOGY: &str = "chronology";

/// Run every rule over the row sequence.
///
/// Rows missing a date or time emit no findings, but their exposure still
/// feeds the running total exactly as the cumulative pass counts it.
pub fn evaluate(rows: &[MovementRow], limits: LedgerLimits) -> Vec<Diagnostic> {
    let mut findings = Vec::new();
    let mut running = 0i64;

    for (index, row) in rows.iter().enumerate() {
        let exposure = row.exposure_minutes.unwrap_or(0);
        running += exposure;

        if !row.is_complete() {
            continue;
        }

        match row.transaction_type {
            TransactionType::In => {
                if exposure > 0 && exposure < limits.temper_minutes {
                    findings.push(Diagnostic::new(
                        index,
                        RULE_TEMPER_TIME,
                        Severity::Warning,
                        format!(
                            "Exposure time ({} min) is less than temper time ({} min)",
                            exposure, limits.temper_minutes
                        ),
                    ));
                }
                if exposure > limits.working_minutes {
                    findings.push(Diagnostic::new(
                        index,
                        RULE_WORKING_EXPOSURE,
                        Severity::Warning,
                        format!(
                            "Exposure time ({} min) exceeds working exposure time ({} min)",
                            exposure, limits.working_minutes
                        ),
                    ));
                }
            }
            TransactionType::Out => {
                // Structurally unreachable through the mutation rules,
                // checked anyway as a hard invariant.
                if exposure != 0 {
                    findings.push(Diagnostic::new(
                        index,
                        RULE_OUT_NONZERO,
                        Severity::Error,
                        "Exposure time for Out transactions must be 0".to_string(),
                    ));
                }
            }
        }

        if running > limits.max_minutes {
            findings.push(Diagnostic::new(
                index,
                RULE_CUMULATIVE_MAX,
                Severity::Warning,
                format!(
                    "Cumulative exposure time ({} min) exceeds maximum exposure time ({} min)",
                    running, limits.max_minutes
                ),
            ));
        }

        if index > 0 {
            let previous = rows[index - 1].datetime();
            let current = row.datetime();
            if let (Some(previous), Some(current)) = (previous, current) {
                if current < previous {
                    findings.push(Diagnostic::new(
                        index,
                        RULE_CHRONOLOGY,
                        Severity::Error,
                        "Date/time must be after the previous entry".to_string(),
                    ));
                }
            }
        }
    }

    findings
}
