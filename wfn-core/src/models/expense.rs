use crate::api::{Attachment, Payload};
use crate::editor::{DraftRecord, Resource};
use crate::models::ProgramRef;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub title: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reversed: bool,
    #[serde(default)]
    pub bill: Option<String>,
    pub program: ProgramRef,
}

impl Resource for Expense {
    const COLLECTION: &'static str = "expenses";
    const NOUN: &'static str = "expense";
    type Draft = ExpenseDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ExpenseDraft {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Amount is required"))]
    pub amount: String,
    #[validate(length(min = 1, message = "Date is required"))]
    pub date: String,
    pub description: String,
    pub reversed: bool,
    #[validate(length(min = 1, message = "Program is required"))]
    pub program: String,
    pub bill: Option<Attachment>,
}

impl DraftRecord<Expense> for ExpenseDraft {
    fn from_record(expense: &Expense) -> Self {
        Self {
            title: expense.title.clone(),
            amount: expense.amount.to_string(),
            date: expense.date.to_string(),
            description: expense.description.clone().unwrap_or_default(),
            reversed: expense.reversed,
            program: expense.program.id().to_string(),
            bill: None,
        }
    }

    fn to_payload(&self) -> Payload {
        Payload::new()
            .text("title", self.title.trim())
            .text("amount", self.amount.trim())
            .text("date", &self.date)
            .optional_text("description", &self.description)
            .flag("reversed", self.reversed)
            .reference("program", &self.program)
            .file("bill", self.bill.as_ref())
    }
}
