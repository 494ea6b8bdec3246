use askama::Template;
use async_trait::async_trait;
use wfn_core::models::{Expense, ExpenseDraft, Program};
use wfn_core::{Authorized, EditMode};

use crate::handlers::forms::FormFields;
use crate::pages::subprograms::{load_programs, program_options};
use crate::pages::{Cell, EntityPage, FormChrome, RowAction, SelectOption};

#[derive(Template)]
#[template(path = "forms/expense.html")]
pub struct ExpenseFormTemplate<'a> {
    pub chrome: FormChrome,
    pub draft: &'a ExpenseDraft,
    pub programs: Vec<SelectOption>,
}

#[async_trait]
impl EntityPage for Expense {
    const TITLE: &'static str = "Expenses";
    const SEARCH_PLACEHOLDER: &'static str = "Search by title";

    type Lookups = Vec<Program>;

    async fn load_lookups(api: &Authorized<'_>) -> Vec<Program> {
        load_programs(api).await
    }

    fn link_lookups(items: &mut [Expense], programs: &Vec<Program>) {
        for expense in items {
            expense.program.expand(programs);
        }
    }

    fn columns() -> &'static [&'static str] {
        &["Title", "Program", "Amount", "Date", "Reversed"]
    }

    fn cells(&self, _programs: &Vec<Program>) -> Vec<Cell> {
        vec![
            Cell::text(self.title.as_str()),
            Cell::optional_text(self.program.name()),
            Cell::money(self.amount),
            Cell::date(self.date),
            Cell::text(if self.reversed { "Yes" } else { "No" }),
        ]
    }

    /// Report of the program this expense is booked against.
    fn actions(&self) -> Vec<RowAction> {
        vec![RowAction {
            label: "Report",
            href: format!("/programs/{}/report", self.program.id()),
            new_window: false,
        }]
    }

    fn render_form(
        draft: &ExpenseDraft,
        mode: EditMode,
        programs: &Vec<Program>,
    ) -> Result<String, askama::Error> {
        ExpenseFormTemplate {
            chrome: FormChrome::new::<Expense>(mode),
            draft,
            programs: program_options(programs, &draft.program),
        }
        .render()
    }

    fn draft_from_form(mut form: FormFields) -> ExpenseDraft {
        ExpenseDraft {
            title: form.text("title"),
            amount: form.text("amount"),
            date: form.text("date"),
            description: form.text("description"),
            reversed: form.checked("reversed"),
            program: form.text("program"),
            bill: form.file("bill"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wfn_core::Attachment;

    fn programs() -> Vec<Program> {
        serde_json::from_value(serde_json::json!([
            {"id": 1, "name": "Relief Camp", "start_date": "2024-01-01", "total_budget": "5000"},
            {"id": 2, "name": "School Kits", "start_date": "2024-02-01", "total_budget": "800"}
        ]))
        .unwrap()
    }

    #[test]
    fn form_values_become_a_draft() {
        let bill = Attachment {
            file_name: "bill.pdf".into(),
            content_type: "application/pdf".into(),
            bytes: b"%PDF-1.4".to_vec(),
        };
        let form = FormFields::default()
            .with_text("title", "Rice")
            .with_text("amount", "1200")
            .with_text("date", "2024-02-10")
            .with_text("program", "2")
            .with_text("reversed", "on")
            .with_file("bill", bill.clone());

        let draft = Expense::draft_from_form(form);

        assert_eq!(draft.program, "2");
        assert!(draft.reversed);
        assert_eq!(draft.bill, Some(bill));
    }

    #[test]
    fn edit_form_selects_the_booked_program() {
        let draft = ExpenseDraft {
            title: "Rice".into(),
            program: "2".into(),
            reversed: true,
            ..Default::default()
        };

        let html = Expense::render_form(&draft, EditMode::Update(4), &programs()).unwrap();

        assert!(html.contains("Edit Expense"));
        assert!(html.contains(r#"<option value="2" selected>School Kits</option>"#));
        assert!(html.contains("checked"));
    }

    #[test]
    fn rows_name_their_program_once_linked() {
        let mut expenses: Vec<Expense> = serde_json::from_value(serde_json::json!([
            {"id": 4, "title": "Rice", "amount": "1200", "date": "2024-02-10", "program": 1}
        ]))
        .unwrap();

        Expense::link_lookups(&mut expenses, &programs());
        let cells = expenses[0].cells(&programs());

        assert_eq!(cells[1].display, "Relief Camp");
        assert_eq!(cells[3].key, crate::pages::SortKey::Date(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()));
        assert_eq!(expenses[0].actions()[0].href, "/programs/1/report");
    }
}
