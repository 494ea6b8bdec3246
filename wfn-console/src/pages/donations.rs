use askama::Template;
use async_trait::async_trait;
use wfn_core::models::{Donation, DonationDraft, Donor, Organization};
use wfn_core::{Authorized, EditMode};

use crate::handlers::forms::FormFields;
use crate::pages::{Cell, EntityPage, FormChrome, RowAction, SelectOption};

/// Donors for the select box, and the organization printed on receipts.
#[derive(Debug, Default)]
pub struct DonationLookups {
    pub donors: Vec<Donor>,
    pub organization: Option<Organization>,
}

#[derive(Template)]
#[template(path = "forms/donation.html")]
pub struct DonationFormTemplate<'a> {
    pub chrome: FormChrome,
    pub draft: &'a DonationDraft,
    pub donors: Vec<SelectOption>,
    pub methods: Vec<SelectOption>,
}

#[async_trait]
impl EntityPage for Donation {
    const TITLE: &'static str = "Donations";
    const SEARCH_PLACEHOLDER: &'static str = "Search by donor name";

    type Lookups = DonationLookups;

    async fn load_lookups(api: &Authorized<'_>) -> DonationLookups {
        let (donors, organization) = tokio::join!(api.list::<Donor>(), api.organization());

        DonationLookups {
            donors: donors.unwrap_or_else(|e| {
                tracing::error!(error = %e, "Failed to load donors");
                Vec::new()
            }),
            organization: organization.unwrap_or_else(|e| {
                tracing::error!(error = %e, "Failed to load organization");
                None
            }),
        }
    }

    fn link_lookups(items: &mut [Donation], lookups: &DonationLookups) {
        for donation in items {
            donation.attach_donor(&lookups.donors);
        }
    }

    fn columns() -> &'static [&'static str] {
        &["Donor", "Amount", "Date", "Method", "Receipt No."]
    }

    fn cells(&self, _lookups: &DonationLookups) -> Vec<Cell> {
        let date = wfn_core::models::leading_date(&self.date);
        vec![
            Cell::text(self.donor_name()),
            Cell::money(self.amount),
            match date {
                Some(date) => Cell::date(date),
                None => Cell::text(self.display_date()),
            },
            Cell::text(self.method.as_str()),
            Cell::optional_text(self.receipt_number.as_deref()),
        ]
    }

    fn actions(&self) -> Vec<RowAction> {
        vec![RowAction {
            label: "Receipt",
            href: format!("/donations/{}/receipt", self.id),
            new_window: true,
        }]
    }

    fn render_form(
        draft: &DonationDraft,
        mode: EditMode,
        lookups: &DonationLookups,
    ) -> Result<String, askama::Error> {
        DonationFormTemplate {
            chrome: FormChrome::new::<Donation>(mode),
            draft,
            donors: SelectOption::list(
                lookups.donors.iter().map(|d| (d.id.to_string(), d.name.as_str())),
                &draft.donor,
            ),
            methods: SelectOption::list(
                [("Online".to_string(), "Online"), ("Cash".to_string(), "Cash")],
                &draft.method,
            ),
        }
        .render()
    }

    fn draft_from_form(mut form: FormFields) -> DonationDraft {
        DonationDraft {
            donor: form.text("donor"),
            amount: form.text("amount"),
            date: form.text("date"),
            method: form.text("method"),
            description: form.text("description"),
            voucher: form.file("voucher"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lookups() -> DonationLookups {
        DonationLookups {
            donors: serde_json::from_value(json!([
                {"id": 2, "name": "Meera", "email": "meera@example.org", "phone": "1"},
                {"id": 3, "name": "Ravi", "email": "ravi@example.org", "phone": "2"}
            ]))
            .unwrap(),
            organization: None,
        }
    }

    #[test]
    fn rows_show_the_linked_donor_and_receipt_link() {
        let mut donations: Vec<Donation> = serde_json::from_value(json!([
            {"id": 7, "donor": 3, "amount": "2500", "date": "2024-03-09", "method": "Cash"}
        ]))
        .unwrap();
        let lookups = lookups();

        Donation::link_lookups(&mut donations, &lookups);
        let cells = donations[0].cells(&lookups);

        assert_eq!(cells[0].display, "Ravi");
        assert_eq!(cells[1].display, "2500.00");
        assert_eq!(cells[2].display, "09/03/2024");
        let action = &donations[0].actions()[0];
        assert_eq!(action.href, "/donations/7/receipt");
        assert!(action.new_window);
    }

    #[test]
    fn add_form_lists_donors_and_methods() {
        let draft = DonationDraft {
            donor: "2".into(),
            method: "Cash".into(),
            ..Default::default()
        };

        let html = Donation::render_form(&draft, EditMode::Create, &lookups()).unwrap();

        assert!(html.contains("Add Donation"));
        assert!(html.contains(r#"<option value="2" selected>Meera</option>"#));
        assert!(html.contains(r#"<option value="3">Ravi</option>"#));
        assert!(html.contains(r#"<option value="Cash" selected>Cash</option>"#));
    }
}
