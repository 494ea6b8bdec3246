use crate::api::{Attachment, Payload};
use crate::editor::{DraftRecord, Resource};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub total_budget: Decimal,
    #[serde(default)]
    pub expenses_incurred: Option<Decimal>,
    /// URL of the uploaded agreement. Older backends spell the key `aggrement`.
    #[serde(default, alias = "aggrement")]
    pub agreement: Option<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramStatus {
    Completed,
    Ongoing,
}

impl fmt::Display for ProgramStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramStatus::Completed => f.write_str("Completed"),
            ProgramStatus::Ongoing => f.write_str("Ongoing"),
        }
    }
}

impl Program {
    /// A program without an end date is still running.
    pub fn status_on(&self, today: NaiveDate) -> ProgramStatus {
        match self.end_date {
            Some(end) if end < today => ProgramStatus::Completed,
            _ => ProgramStatus::Ongoing,
        }
    }
}

impl Resource for Program {
    const COLLECTION: &'static str = "programs";
    const NOUN: &'static str = "program";
    type Draft = ProgramDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

/// A program as referenced from an expense or sub-program: embedded in list
/// responses, a bare id in create/update responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProgramRef {
    Expanded(Box<Program>),
    Id(i64),
}

impl ProgramRef {
    pub fn id(&self) -> i64 {
        match self {
            ProgramRef::Expanded(program) => program.id,
            ProgramRef::Id(id) => *id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ProgramRef::Expanded(program) => Some(&program.name),
            ProgramRef::Id(_) => None,
        }
    }

    /// Swap a bare id for the matching program, if it is known.
    pub fn expand(&mut self, programs: &[Program]) {
        if let ProgramRef::Id(id) = *self {
            if let Some(program) = programs.iter().find(|p| p.id == id) {
                *self = ProgramRef::Expanded(Box::new(program.clone()));
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ProgramDraft {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: String,
    #[validate(length(min = 1, message = "Start date is required"))]
    pub start_date: String,
    #[validate(length(min = 1, message = "End date is required"))]
    pub end_date: String,
    #[validate(length(min = 1, message = "Total budget is required"))]
    pub total_budget: String,
    pub agreement: Option<Attachment>,
}

impl DraftRecord<Program> for ProgramDraft {
    fn from_record(program: &Program) -> Self {
        Self {
            name: program.name.clone(),
            description: program.description.clone().unwrap_or_default(),
            start_date: program.start_date.to_string(),
            end_date: program.end_date.map(|d| d.to_string()).unwrap_or_default(),
            total_budget: program.total_budget.to_string(),
            agreement: None,
        }
    }

    fn to_payload(&self) -> Payload {
        Payload::new()
            .text("name", self.name.trim())
            .optional_text("description", &self.description)
            .text("start_date", &self.start_date)
            .text("end_date", &self.end_date)
            .text("total_budget", self.total_budget.trim())
            .file("agreement", self.agreement.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn program(end_date: Option<NaiveDate>) -> Program {
        Program {
            id: 1,
            name: "Relief".into(),
            description: None,
            start_date: date(2024, 1, 1),
            end_date,
            total_budget: Decimal::new(10_000, 0),
            expenses_incurred: None,
            agreement: None,
            is_active: true,
        }
    }

    #[test]
    fn status_follows_end_date() {
        let today = date(2024, 6, 1);
        assert_eq!(program(Some(date(2024, 5, 31))).status_on(today), ProgramStatus::Completed);
        assert_eq!(program(Some(today)).status_on(today), ProgramStatus::Ongoing);
        assert_eq!(program(None).status_on(today), ProgramStatus::Ongoing);
    }

    #[test]
    fn accepts_misspelt_agreement_key() {
        let program: Program = serde_json::from_value(json!({
            "id": 3,
            "name": "School kits",
            "start_date": "2024-01-01",
            "end_date": null,
            "total_budget": 2500,
            "aggrement": "/media/agreements/kits.pdf"
        }))
        .unwrap();

        assert_eq!(program.agreement.as_deref(), Some("/media/agreements/kits.pdf"));
        assert!(program.is_active);
    }

    #[test]
    fn program_ref_accepts_id_or_object() {
        let bare: ProgramRef = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(bare, ProgramRef::Id(3));

        let expanded: ProgramRef = serde_json::from_value(json!({
            "id": 3,
            "name": "School kits",
            "start_date": "2024-01-01",
            "total_budget": "2500.00"
        }))
        .unwrap();
        assert_eq!(expanded.id(), 3);
        assert_eq!(expanded.name(), Some("School kits"));
    }

    #[test]
    fn edit_draft_drops_file_fields() {
        let mut record = program(Some(date(2024, 12, 31)));
        record.agreement = Some("/media/a.pdf".into());
        let draft = ProgramDraft::from_record(&record);
        assert_eq!(draft.end_date, "2024-12-31");
        assert_eq!(draft.total_budget, "10000");
        assert!(draft.agreement.is_none());
    }
}
