//! In-memory registry of item and receiving records.
//!
//! Holds the records for the duration of a session: validated inserts,
//! lookups by number, the item/receiving join,
//! and fuzzy search over item numbers and descriptions.

use strsim::{jaro_winkler, normalized_levenshtein};
use thiserror::Error;
use tracing::debug;

use crate::models::{ItemRecord, ReceivingRecord};
use crate::validate::{validate_item, validate_receiving, FieldIssue};

/// Minimum fuzzy score for a search hit to be returned.
const MIN_SEARCH_SCORE: f64 = 0.4;

/// Registry errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DirectoryError {
    #[error("Record failed validation: {}", format_issues(.0))]
    Invalid(Vec<FieldIssue>),

    #[error("A record numbered {0} already exists")]
    Duplicate(String),

    #[error("No item numbered {0}")]
    UnknownItem(String),

    #[error("Record not found: {0}")]
    NotFound(String),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

fn format_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// One fuzzy-search result.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub item: ItemRecord,
    pub score: f64,
}

/// Item and receiving records for one session, insertion order preserved.
#[derive(Debug, Default)]
pub struct Directory {
    items: Vec<ItemRecord>,
    receivings: Vec<ReceivingRecord>,
}

impl Directory {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with the demo data set.
    pub fn demo() -> Self {
        let mut dir = Self::new();
        for item in demo_items() {
            // Demo records are known-valid
            dir.add_item(item).expect("demo item");
        }
        for receiving in demo_receivings() {
            dir.add_receiving(receiving).expect("demo receiving");
        }
        dir
    }

    /// Add a validated item record.
    pub fn add_item(&mut self, item: ItemRecord) -> DirectoryResult<()> {
        let issues = validate_item(&item);
        if !issues.is_empty() {
            return Err(DirectoryError::Invalid(issues));
        }
        if self.items.iter().any(|i| i.item_number == item.item_number) {
            return Err(DirectoryError::Duplicate(item.item_number));
        }
        debug!(item_number = %item.item_number, "item added");
        self.items.push(item);
        Ok(())
    }

    /// Add a validated receiving record. The referenced item must exist.
    pub fn add_receiving(&mut self, receiving: ReceivingRecord) -> DirectoryResult<()> {
        let issues = validate_receiving(&receiving);
        if !issues.is_empty() {
            return Err(DirectoryError::Invalid(issues));
        }
        if !self.items.iter().any(|i| i.item_number == receiving.item_number) {
            return Err(DirectoryError::UnknownItem(receiving.item_number));
        }
        if self
            .receivings
            .iter()
            .any(|r| r.receiving_no == receiving.receiving_no)
        {
            return Err(DirectoryError::Duplicate(receiving.receiving_no));
        }
        debug!(receiving_no = %receiving.receiving_no, "receiving added");
        self.receivings.push(receiving);
        Ok(())
    }

    /// Look up an item by number.
    pub fn item(&self, item_number: &str) -> DirectoryResult<&ItemRecord> {
        self.items
            .iter()
            .find(|i| i.item_number == item_number)
            .ok_or_else(|| DirectoryError::NotFound(item_number.to_string()))
    }

    /// Look up a receiving record by number.
    pub fn receiving(&self, receiving_no: &str) -> DirectoryResult<&ReceivingRecord> {
        self.receivings
            .iter()
            .find(|r| r.receiving_no == receiving_no)
            .ok_or_else(|| DirectoryError::NotFound(receiving_no.to_string()))
    }

    /// All items, in insertion order.
    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    /// All receiving records, in insertion order.
    pub fn receivings(&self) -> &[ReceivingRecord] {
        &self.receivings
    }

    /// Receiving records for one item, in insertion order.
    pub fn receivings_for_item(&self, item_number: &str) -> Vec<&ReceivingRecord> {
        self.receivings
            .iter()
            .filter(|r| r.item_number == item_number)
            .collect()
    }

    /// Fuzzy search over item numbers and descriptions.
    ///
    /// A case-insensitive substring hit scores 1.0; otherwise the better of
    /// the two fields' fuzzy scores. Hits below the floor are dropped;
    /// results are sorted by score descending, ties by item number.
    pub fn search_items(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        let query_lower = query.trim().to_lowercase();
        if query_lower.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit> = self
            .items
            .iter()
            .filter_map(|item| {
                let score = score_item(item, &query_lower);
                (score >= MIN_SEARCH_SCORE).then(|| SearchHit {
                    item: item.clone(),
                    score,
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.item.item_number.cmp(&b.item.item_number))
        });
        hits.truncate(limit);
        debug!(query = %query, hits = hits.len(), "item search");
        hits
    }
}

/// Score one item against a lowercased query (0.0 - 1.0).
fn score_item(item: &ItemRecord, query_lower: &str) -> f64 {
    let number_lower = item.item_number.to_lowercase();
    let description_lower = item.description.to_lowercase();

    if number_lower.contains(query_lower) || description_lower.contains(query_lower) {
        return 1.0;
    }

    fuzzy_match(query_lower, &number_lower).max(fuzzy_match(query_lower, &description_lower))
}

/// Combined string similarity (0.0 - 1.0).
fn fuzzy_match(a: &str, b: &str) -> f64 {
    let jw = jaro_winkler(a, b);
    let lev = normalized_levenshtein(a, b);

    jw * 0.6 + lev * 0.4
}

/// The two demo items.
fn demo_items() -> Vec<ItemRecord> {
    let mut a = ItemRecord::new("D200001".into(), "Test Item A".into());
    a.client = "AdiraMedica".into();
    a.protocol_number = "P001".into();
    a.vendor = "Vendor X".into();
    a.uom = "kg".into();
    a.controlled = "No".into();
    a.temp_storage_conditions = "Room Temp".into();
    a.other_storage_conditions = Some("N/A".into());
    a.max_exposure_time = Some(72);
    a.temper_time = Some(24);
    a.working_exposure_time = Some(48);
    a.vendor_code_rev = "V1".into();
    a.randomized = "Yes".into();
    a.sequential_numbers = "No".into();
    a.study_type = "Double Blind".into();

    let mut b = ItemRecord::new("NP200002".into(), "Test Item B".into());
    b.client = "Client B".into();
    b.protocol_number = "P002".into();
    b.vendor = "Vendor Y".into();
    b.uom = "L".into();
    b.controlled = "Yes - CII Non".into();
    b.temp_storage_conditions = "Cool".into();
    b.other_storage_conditions = Some("Dry".into());
    b.max_exposure_time = Some(36);
    b.temper_time = Some(12);
    b.working_exposure_time = Some(24);
    b.vendor_code_rev = "V2".into();
    b.randomized = "No".into();
    b.sequential_numbers = "Yes".into();
    b.study_type = "Single Blind".into();

    vec![a, b]
}

/// The two demo receiving records.
///
/// Demo expiration dates like "12/31/2023" or "TBD" would fail
/// validation today, so the demo leaves exp_date unset.
fn demo_receivings() -> Vec<ReceivingRecord> {
    let mut a = ReceivingRecord::new("L111122001".into(), "D200001".into());
    a.tracking_number = "15646W15039413".into();
    a.lot_no = "AM22004".into();
    a.po_no = Some("1234".into());
    a.total_units_vendor = Some(100);
    a.total_storage_containers = Some(10);
    a.ncmr = "No".into();
    a.temp_device_in_alarm = "No".into();
    a.temp_device_deactivated = "Yes".into();
    a.temp_device_returned_to_courier = "No".into();
    a.total_units_received = Some(100);
    a.comments_for_520b = "N/A".into();

    let mut b = ReceivingRecord::new("L102522001".into(), "NP200002".into());
    b.tracking_number = "6418467".into();
    b.lot_no = "NR-02-178".into();
    b.po_no = Some("N/A".into());
    b.total_units_vendor = Some(50);
    b.total_storage_containers = Some(5);
    b.ncmr = "Yes".into();
    b.temp_device_in_alarm = "Yes - NCMR".into();
    b.temp_device_deactivated = "No".into();
    b.temp_device_returned_to_courier = "Yes".into();
    b.total_units_received = Some(50);
    b.comments_for_520b = "Test 1".into();

    vec![a, b]
}
