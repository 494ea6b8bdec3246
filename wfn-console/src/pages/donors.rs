use askama::Template;
use wfn_core::models::{Donor, DonorDraft, DonorType};
use wfn_core::EditMode;

use crate::handlers::forms::FormFields;
use crate::pages::{Cell, EntityPage, FormChrome};

#[derive(Template)]
#[template(path = "forms/donor.html")]
pub struct DonorFormTemplate<'a> {
    pub chrome: FormChrome,
    pub draft: &'a DonorDraft,
    pub corporate: bool,
}

impl EntityPage for Donor {
    const TITLE: &'static str = "Donors";
    const SEARCH_PLACEHOLDER: &'static str = "Search by name, email or phone";

    type Lookups = ();

    fn columns() -> &'static [&'static str] {
        &["Name", "Email", "Phone", "Type", "Donations", "Total Donated"]
    }

    fn cells(&self, _lookups: &()) -> Vec<Cell> {
        vec![
            Cell::text(self.name.as_str()),
            Cell::text(self.email.as_str()),
            Cell::text(self.phone.as_str()),
            Cell::text(self.donor_type.as_str()),
            Cell::count(self.donation_count),
            Cell::optional_money(self.total_donations),
        ]
    }

    fn render_form(draft: &DonorDraft, mode: EditMode, _lookups: &()) -> Result<String, askama::Error> {
        DonorFormTemplate {
            chrome: FormChrome::new::<Donor>(mode),
            draft,
            corporate: draft.donor_type == DonorType::Corporate,
        }
        .render()
    }

    fn draft_from_form(form: FormFields) -> DonorDraft {
        DonorDraft {
            name: form.text("name"),
            email: form.text("email"),
            phone: form.text("phone"),
            address: form.text("address"),
            pan_no: form.text("pan_no"),
            donor_type: match form.text("donor_type").as_str() {
                "Corporate" => DonorType::Corporate,
                _ => DonorType::Individual,
            },
        }
    }
}
