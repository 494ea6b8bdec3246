use askama::Template;
use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Response},
};
use wfn_core::models::{Donation, Expense, Program};
use wfn_core::report::ProgramReport;
use wfn_core::Resource;

use crate::documents::{render_report_pdf, ReceiptTemplate};
use crate::error::ConsoleError;
use crate::handlers::entity::mounted_page;
use crate::models::AuthUser;
use crate::pages::today;
use crate::AppState;

/// Printable receipt, opened in its own window from a donation row.
pub async fn donation_receipt(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Response, ConsoleError> {
    let shared = mounted_page::<Donation>(&state, &user).await;
    let page = shared.lock().await;

    let donation = page.editor.find(id).ok_or(ConsoleError::NotFound {
        noun: Donation::NOUN,
        id,
    })?;
    let template = ReceiptTemplate::new(page.lookups.organization.as_ref(), donation);

    tracing::info!(id, receipt_number = %template.receipt_number, "Receipt rendered");
    Ok(Html(template.render()?).into_response())
}

/// Program report PDF, downloaded as `{name}_report.pdf`.
///
/// Expenses are fetched at download time so the report matches the backend
/// after edits on the Expenses page.
pub async fn program_report(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Response, ConsoleError> {
    let shared = mounted_page::<Program>(&state, &user).await;
    let page = shared.lock().await;

    let program = page.editor.find(id).ok_or(ConsoleError::NotFound {
        noun: Program::NOUN,
        id,
    })?;
    let expenses = state
        .api
        .with_bearer(&user.access_token)
        .list::<Expense>()
        .await?;
    let report = ProgramReport::build(program, &expenses, today());
    let bytes = render_report_pdf(&report)?;

    tracing::info!(id, lines = report.lines.len(), "Program report generated");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, attachment(&report.file_name())),
        ],
        bytes,
    )
        .into_response())
}

/// `Content-Disposition` with an ASCII `filename` and the exact name in
/// `filename*`.
fn attachment(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| if c.is_ascii() && c != '"' && c != '\\' { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(file_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_names_pass_through() {
        assert_eq!(
            attachment("Relief Camp_report.pdf"),
            "attachment; filename=\"Relief Camp_report.pdf\"; filename*=UTF-8''Relief%20Camp_report.pdf"
        );
    }

    #[test]
    fn non_ascii_names_are_encoded() {
        let value = attachment("Shiksha अभियान_report.pdf");
        assert!(value.starts_with("attachment; filename=\"Shiksha _______report.pdf\";"));
        assert!(value.ends_with("filename*=UTF-8''Shiksha%20%E0%A4%85%E0%A4%AD%E0%A4%BF%E0%A4%AF%E0%A4%BE%E0%A4%A8_report.pdf"));
    }
}
