use crate::api::{Attachment, Payload};
use crate::editor::{DraftRecord, Resource};
use crate::models::{leading_date, Donor};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Online,
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Online => "Online",
            PaymentMethod::Cash => "Cash",
        }
    }
}

/// A donor as referenced from a donation: embedded in list responses, a bare
/// id in create/update responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DonorRef {
    Expanded(Box<Donor>),
    Id(i64),
}

impl DonorRef {
    pub fn id(&self) -> i64 {
        match self {
            DonorRef::Expanded(donor) => donor.id,
            DonorRef::Id(id) => *id,
        }
    }

    pub fn donor(&self) -> Option<&Donor> {
        match self {
            DonorRef::Expanded(donor) => Some(donor),
            DonorRef::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub id: i64,
    pub donor: DonorRef,
    pub amount: Decimal,
    /// Kept as sent; the backend uses a date or a full timestamp.
    pub date: String,
    pub method: PaymentMethod,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub voucher: Option<String>,
    #[serde(default)]
    pub receipt_number: Option<String>,
    #[serde(default)]
    pub receipt_generated: bool,
}

impl Donation {
    /// Empty when the donor is only known by id.
    pub fn donor_name(&self) -> &str {
        self.donor.donor().map(|d| d.name.as_str()).unwrap_or("")
    }

    /// Expand a bare donor id against the already loaded donors.
    pub fn attach_donor(&mut self, donors: &[Donor]) {
        if let DonorRef::Id(id) = self.donor {
            if let Some(donor) = donors.iter().find(|d| d.id == id) {
                self.donor = DonorRef::Expanded(Box::new(donor.clone()));
            }
        }
    }

    /// `dd/mm/yyyy`, or the raw value when it is not a recognisable date.
    pub fn display_date(&self) -> String {
        leading_date(&self.date)
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| self.date.clone())
    }
}

impl Resource for Donation {
    const COLLECTION: &'static str = "donations";
    const NOUN: &'static str = "donation";
    type Draft = DonationDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.donor_name()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct DonationDraft {
    #[validate(length(min = 1, message = "Donor is required"))]
    pub donor: String,
    #[validate(length(min = 1, message = "Amount is required"))]
    pub amount: String,
    #[validate(length(min = 1, message = "Date is required"))]
    pub date: String,
    #[validate(length(min = 1, message = "Payment method is required"))]
    pub method: String,
    pub description: String,
    pub voucher: Option<Attachment>,
}

impl DraftRecord<Donation> for DonationDraft {
    fn from_record(donation: &Donation) -> Self {
        Self {
            donor: donation.donor.id().to_string(),
            amount: donation.amount.to_string(),
            date: leading_date(&donation.date)
                .map(|d| d.to_string())
                .unwrap_or_else(|| donation.date.clone()),
            method: donation.method.as_str().to_string(),
            description: donation.description.clone().unwrap_or_default(),
            voucher: None,
        }
    }

    fn to_payload(&self) -> Payload {
        Payload::new()
            .reference("donor", &self.donor)
            .text("amount", self.amount.trim())
            .text("date", &self.date)
            .text("method", &self.method)
            .optional_text("description", &self.description)
            .file("voucher", self.voucher.as_ref())
    }
}
