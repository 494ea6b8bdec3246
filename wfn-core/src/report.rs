use crate::models::{Expense, Program, ProgramStatus};
use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub date: NaiveDate,
    pub title: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub reversed: bool,
}

/// Everything printed on a program's expense report.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramReport {
    pub program_name: String,
    pub description: Option<String>,
    pub total_budget: Decimal,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: ProgramStatus,
    pub total_expenses: Decimal,
    pub lines: Vec<ReportLine>,
}

impl ProgramReport {
    /// Reversed expenses are listed and counted like any other.
    pub fn build(program: &Program, expenses: &[Expense], today: NaiveDate) -> Self {
        let mut lines: Vec<ReportLine> = expenses
            .iter()
            .filter(|e| e.program.id() == program.id)
            .map(|e| ReportLine {
                date: e.date,
                title: e.title.clone(),
                amount: e.amount,
                description: e.description.clone(),
                reversed: e.reversed,
            })
            .collect();
        lines.sort_by_key(|line| line.date);

        Self {
            program_name: program.name.clone(),
            description: program.description.clone(),
            total_budget: program.total_budget,
            start_date: program.start_date,
            end_date: program.end_date,
            status: program.status_on(today),
            total_expenses: lines.iter().map(|l| l.amount).sum(),
            lines,
        }
    }

    pub fn remaining_budget(&self) -> Decimal {
        self.total_budget - self.total_expenses
    }

    pub fn file_name(&self) -> String {
        let name: String = self
            .program_name
            .chars()
            .map(|c| if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' { c } else { '_' })
            .collect();
        format!("{}_report.pdf", name.trim())
    }
}
