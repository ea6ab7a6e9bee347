//! 520B receipt-inspection form draft.

use serde::Serialize;
use serde_json::{json, Value};

use super::DateKind;
use crate::models::{ItemRecord, ReceivingRecord};

/// Answer to one delivery-acceptance line.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Acceptance {
    Yes,
    No,
    NotApplicable,
}

impl Acceptance {
    fn as_str(&self) -> &'static str {
        match self {
            Acceptance::Yes => "yes",
            Acceptance::No => "no",
            Acceptance::NotApplicable => "na",
        }
    }
}

/// The four delivery-acceptance lines. `None` is an unanswered line.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct DeliveryAcceptance {
    pub material_placed: Option<Acceptance>,
    pub discrepancies: Option<Acceptance>,
    pub supporting_docs: Option<Acceptance>,
    pub shipment_rejected: Option<Acceptance>,
}

/// Receiving-document checklist.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct DocumentVerification {
    pub purchase_order: bool,
    pub packing_slip: bool,
    pub bill_of_lading: bool,
    pub coc_coa: bool,
    pub sds: bool,
    pub invoice: bool,
    pub other: bool,
}

/// Issues checklist; anything checked here is explained in the comments.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct IssuesChecklist {
    pub quantity_discrepancies: bool,
    pub shipping_container_damage: bool,
    pub product_damage: bool,
    pub temperature_excursion: bool,
}

/// A live 520B form session.
#[derive(Debug, Clone, Serialize)]
pub struct Form520bDraft {
    pub item_no: String,
    pub receiving_no: String,
    pub tracking_no: String,
    pub client_name: String,
    pub item_description: String,
    pub storage_conditions_temp: String,
    pub storage_conditions_other: String,
    pub lot_no: String,
    pub po_no: String,
    pub protocol_no: String,
    pub vendor: String,
    pub uom: String,
    pub total_units_vendor: String,
    pub total_storage_containers: String,
    pub delivery_acceptance: DeliveryAcceptance,
    pub document_verification: DocumentVerification,
    pub issues: IssuesChecklist,
    pub date_kind: Option<DateKind>,
    /// Date value as entered (MM/DD/YYYY)
    pub date_value: String,
    pub delivery_completed_by: String,
    pub received_by: String,
    pub ncmr: String,
    pub comments: String,
}

impl Form520bDraft {
    /// Seed a draft from a selected item/receiving pair.
    pub fn new(item: &ItemRecord, receiving: &ReceivingRecord) -> Self {
        Self {
            item_no: item.item_number.clone(),
            receiving_no: receiving.receiving_no.clone(),
            tracking_no: receiving.tracking_number.clone(),
            client_name: item.client.clone(),
            item_description: item.description.clone(),
            storage_conditions_temp: item.temp_storage_conditions.clone(),
            storage_conditions_other: item
                .other_storage_conditions
                .clone()
                .unwrap_or_default(),
            lot_no: receiving.lot_no.clone(),
            po_no: receiving.po_no.clone().unwrap_or_default(),
            protocol_no: item.protocol_number.clone(),
            vendor: item.vendor.clone(),
            uom: item.uom.clone(),
            total_units_vendor: receiving
                .total_units_vendor
                .map(|n| n.to_string())
                .unwrap_or_default(),
            total_storage_containers: receiving
                .total_storage_containers
                .map(|n| n.to_string())
                .unwrap_or_default(),
            delivery_acceptance: DeliveryAcceptance::default(),
            document_verification: DocumentVerification::default(),
            issues: IssuesChecklist::default(),
            date_kind: None,
            date_value: String::new(),
            delivery_completed_by: String::new(),
            received_by: String::new(),
            ncmr: receiving.ncmr.clone(),
            comments: receiving.comments_for_520b.clone(),
        }
    }

    /// The 520B PDF template data.
    ///
    /// Delivery-acceptance answers are flattened to the generator's
    /// "yes"/"no"/"na" strings; checklists become `{name, checked}` lists.
    pub fn payload(&self) -> Value {
        let acceptance = |answer: Option<Acceptance>| {
            answer.map(|a| a.as_str()).unwrap_or("")
        };

        json!({
            "Item No": self.item_no,
            "Tracking No": self.tracking_no,
            "Client Name": self.client_name,
            "Item Description": self.item_description,
            "Storage Conditions:Temperature": self.storage_conditions_temp,
            "Other": self.storage_conditions_other,
            "RN": self.receiving_no,
            "Lot No": self.lot_no,
            "PO No": self.po_no,
            "Protocol No": self.protocol_no,
            "Vendor": self.vendor,
            "UoM": self.uom,
            "Total Units (vendor count)": self.total_units_vendor,
            "Total Storage Containers": self.total_storage_containers,
            "deliveryAcceptance": {
                "material_placed": acceptance(self.delivery_acceptance.material_placed),
                "discrepancies": acceptance(self.delivery_acceptance.discrepancies),
                "supporting_docs": acceptance(self.delivery_acceptance.supporting_docs),
                "shipment_rejected": acceptance(self.delivery_acceptance.shipment_rejected),
            },
            "selectedDateType": self.date_kind.map(|k| k.label_520b()).unwrap_or(""),
            "dateValue": self.date_value,
            "deliveryCompletedBy": self.delivery_completed_by,
            "receivedBy": self.received_by,
            "documentVerification": {
                "Purchase Order": self.document_verification.purchase_order,
                "Packing Slip": self.document_verification.packing_slip,
                "Bill of Lading": self.document_verification.bill_of_lading,
                "CoC/CoA": self.document_verification.coc_coa,
                "SDS #": self.document_verification.sds,
                "Invoice": self.document_verification.invoice,
                "Other (Specify)": self.document_verification.other,
            },
            "issuesSection": {
                "Quantity discrepancies found": self.issues.quantity_discrepancies,
                "Damage to shipping container(s)": self.issues.shipping_container_damage,
                "Damage to product within shipping container": self.issues.product_damage,
                "Temperature excursion": self.issues.temperature_excursion,
            },
            "NCMR": self.ncmr,
            "Comments": self.comments,
        })
    }

    /// Pretty-printed payload JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.payload())
    }
}
