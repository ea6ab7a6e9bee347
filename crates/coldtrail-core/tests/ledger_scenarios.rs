//! Golden scenarios for the exposure-time movement ledger.
//!
//! Each case builds a ledger through the public edit operations and checks
//! the derived exposure, the running totals, and the findings.

use chrono::{NaiveDate, NaiveTime};

use coldtrail_core::ledger::{
    ExposureLedger, LedgerError, RULE_CHRONOLOGY, RULE_CUMULATIVE_MAX, RULE_TEMPER_TIME,
    RULE_WORKING_EXPOSURE,
};
use coldtrail_core::models::{LedgerLimits, RowEdit, Severity, TransactionType};

fn date(d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2025, 3, d)
}

fn time(h: u32, m: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, 0)
}

fn standard_limits() -> LedgerLimits {
    LedgerLimits {
        temper_minutes: 30,
        working_minutes: 120,
        max_minutes: 480,
    }
}

/// Ledger with a completed first row: Out, 2025-03-24 08:00.
fn make_ledger() -> ExposureLedger {
    let mut ledger = ExposureLedger::new(standard_limits());
    ledger.update_row(0, RowEdit::Date(date(24))).unwrap();
    ledger.update_row(0, RowEdit::Time(time(8, 0))).unwrap();
    ledger
}

/// One two-row golden case: row 1 goes In at the given time.
struct GoldenCase {
    id: &'static str,
    row1_time: (u32, u32),
    expected_exposure: Option<i64>,
    expected_cumulative: i64,
    expected_rules: &'static [&'static str],
}

fn golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "working-exposure-exceeded",
            row1_time: (10, 30),
            expected_exposure: Some(150),
            expected_cumulative: 150,
            expected_rules: &[RULE_WORKING_EXPOSURE],
        },
        GoldenCase {
            id: "below-temper-time",
            row1_time: (8, 15),
            expected_exposure: Some(15),
            expected_cumulative: 15,
            expected_rules: &[RULE_TEMPER_TIME],
        },
        GoldenCase {
            id: "within-band",
            row1_time: (9, 0),
            expected_exposure: Some(60),
            expected_cumulative: 60,
            expected_rules: &[],
        },
        GoldenCase {
            id: "backwards-timestamp",
            row1_time: (7, 0),
            expected_exposure: Some(0),
            expected_cumulative: 0,
            expected_rules: &[RULE_CHRONOLOGY],
        },
        GoldenCase {
            id: "exactly-at-working-limit",
            row1_time: (10, 0),
            expected_exposure: Some(120),
            expected_cumulative: 120,
            expected_rules: &[],
        },
        GoldenCase {
            id: "exactly-at-temper-time",
            row1_time: (8, 30),
            expected_exposure: Some(30),
            expected_cumulative: 30,
            expected_rules: &[],
        },
    ]
}

#[test]
fn test_golden_cases() {
    for case in golden_cases() {
        let mut ledger = make_ledger();
        ledger.add_row();
        let (h, m) = case.row1_time;
        ledger.update_row(1, RowEdit::Time(time(h, m))).unwrap();

        let row1 = &ledger.rows()[1];
        assert_eq!(
            row1.exposure_minutes, case.expected_exposure,
            "{}: exposure",
            case.id
        );
        assert_eq!(
            row1.cumulative_minutes, case.expected_cumulative,
            "{}: cumulative",
            case.id
        );

        let rules: Vec<&str> = ledger.diagnostics().iter().map(|d| d.rule.as_str()).collect();
        assert_eq!(rules, case.expected_rules, "{}: rules", case.id);
    }
}

// Scenario A: 150-minute In exposure against limits {30, 120, 480}.
#[test]
fn test_scenario_working_exposure_warning() {
    let mut ledger = make_ledger();
    ledger.add_row();
    ledger.update_row(1, RowEdit::Time(time(10, 30))).unwrap();

    assert_eq!(ledger.rows()[1].exposure_minutes, Some(150));
    assert_eq!(ledger.rows()[1].cumulative_minutes, 150);

    let findings = ledger.diagnostics();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].rule, RULE_WORKING_EXPOSURE);
    assert_eq!(findings[0].severity, Severity::Warning);
    assert_eq!(
        findings[0].message,
        "Exposure time (150 min) exceeds working exposure time (120 min)"
    );
}

// Scenario B: 15-minute In exposure draws only the temper warning.
#[test]
fn test_scenario_temper_time_warning() {
    let mut ledger = make_ledger();
    ledger.add_row();
    ledger.update_row(1, RowEdit::Time(time(8, 15))).unwrap();

    assert_eq!(ledger.rows()[1].exposure_minutes, Some(15));
    assert_eq!(ledger.rows()[1].cumulative_minutes, 15);

    let findings = ledger.diagnostics();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].rule, RULE_TEMPER_TIME);
    assert_eq!(
        findings[0].message,
        "Exposure time (15 min) is less than temper time (30 min)"
    );
}

// Scenario C: manual override survives unrelated edits, dies on a time edit.
#[test]
fn test_scenario_override_then_rederive() {
    let mut ledger = make_ledger();
    ledger.add_row();
    ledger.update_row(1, RowEdit::Time(time(10, 30))).unwrap();
    assert_eq!(ledger.rows()[1].exposure_minutes, Some(150));

    ledger
        .update_row(1, RowEdit::ExposureMinutes(Some(999)))
        .unwrap();
    assert_eq!(ledger.rows()[1].exposure_minutes, Some(999));
    assert_eq!(ledger.rows()[1].cumulative_minutes, 999);

    ledger.update_row(1, RowEdit::Time(time(9, 0))).unwrap();
    assert_eq!(ledger.rows()[1].exposure_minutes, Some(60));
    assert_eq!(ledger.rows()[1].cumulative_minutes, 60);
}

// Scenario D: earlier timestamp than the previous row — chronology error
// plus exposure clamped to zero, both signals at once.
#[test]
fn test_scenario_chronology_error_with_clamped_exposure() {
    let mut ledger = make_ledger();
    ledger.add_row();
    ledger.update_row(1, RowEdit::Date(date(23))).unwrap();
    ledger.update_row(1, RowEdit::Time(time(9, 0))).unwrap();

    assert_eq!(ledger.rows()[1].exposure_minutes, Some(0));

    let findings = ledger.diagnostics();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].rule, RULE_CHRONOLOGY);
    assert_eq!(findings[0].severity, Severity::Error);
    assert_eq!(findings[0].message, "Date/time must be after the previous entry");
}

// Scenario E: Out(08:00), In(09:00), Out(09:30) — cumulative [0, 60, 60].
#[test]
fn test_scenario_three_row_cumulative() {
    let mut ledger = make_ledger();
    ledger.add_row(); // In
    ledger.update_row(1, RowEdit::Time(time(9, 0))).unwrap();
    ledger.add_row(); // Out
    ledger.update_row(2, RowEdit::Time(time(9, 30))).unwrap();

    let cumulative: Vec<i64> = ledger.rows().iter().map(|r| r.cumulative_minutes).collect();
    assert_eq!(cumulative, vec![0, 60, 60]);
    assert_eq!(ledger.rows()[2].exposure_minutes, Some(0));
    assert!(!ledger
        .diagnostics()
        .iter()
        .any(|d| d.rule == RULE_CUMULATIVE_MAX));
}

// Scenario F: removing row 0 from a 3-row ledger is rejected untouched.
#[test]
fn test_scenario_remove_initial_row_rejected() {
    let mut ledger = make_ledger();
    ledger.add_row();
    ledger.update_row(1, RowEdit::Time(time(9, 0))).unwrap();
    ledger.add_row();
    let before = ledger.clone();

    assert_eq!(ledger.remove_row(0), Err(LedgerError::InitialRowPermanent));
    assert_eq!(ledger, before);
    assert_eq!(ledger.rows().len(), 3);
}

#[test]
fn test_cumulative_max_warning_across_days() {
    let mut ledger = make_ledger();
    ledger.add_row();
    ledger.update_row(1, RowEdit::Date(date(25))).unwrap();
    ledger.update_row(1, RowEdit::Time(time(8, 0))).unwrap();

    // A full day out of storage: 1440 minutes, past working and max
    assert_eq!(ledger.rows()[1].exposure_minutes, Some(1440));
    let rules: Vec<&str> = ledger.diagnostics().iter().map(|d| d.rule.as_str()).collect();
    assert_eq!(rules, vec![RULE_WORKING_EXPOSURE, RULE_CUMULATIVE_MAX]);
}

#[test]
fn test_type_flip_keeps_first_row_out() {
    let mut ledger = make_ledger();
    ledger
        .update_row(0, RowEdit::TransactionType(TransactionType::In))
        .unwrap();

    assert_eq!(ledger.rows()[0].transaction_type, TransactionType::Out);
    assert_eq!(ledger.rows()[0].exposure_minutes, Some(0));
    assert!(ledger.diagnostics().is_empty());
}

#[test]
fn test_remove_middle_row_rederives_nothing_but_recomputes_sums() {
    let mut ledger = make_ledger();
    ledger.add_row(); // In
    ledger.update_row(1, RowEdit::Time(time(9, 0))).unwrap(); // 60
    ledger.add_row(); // Out
    ledger.update_row(2, RowEdit::Time(time(9, 30))).unwrap();
    ledger.add_row(); // In
    ledger.update_row(3, RowEdit::Time(time(10, 0))).unwrap(); // 30

    ledger.remove_row(1).unwrap();

    // Row 3's stored derivation is untouched by the removal (its own
    // fields did not change), but the running totals shift.
    let cumulative: Vec<i64> = ledger.rows().iter().map(|r| r.cumulative_minutes).collect();
    assert_eq!(cumulative, vec![0, 0, 30]);
}
