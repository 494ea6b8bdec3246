//! Records served by the REST backend and the draft records bound to the
//! console's add/edit forms.

pub mod donation;
pub mod donor;
pub mod expense;
pub mod organization;
pub mod program;
pub mod subprogram;
pub mod token;

pub use donation::{Donation, DonationDraft, DonorRef, PaymentMethod};
pub use donor::{Donor, DonorDraft, DonorType};
pub use expense::{Expense, ExpenseDraft};
pub use organization::{Organization, OrganizationDraft};
pub use program::{Program, ProgramDraft, ProgramRef, ProgramStatus};
pub use subprogram::{SubProgram, SubProgramDraft};
pub use token::{Credentials, TokenPair};

use chrono::NaiveDate;

/// Date part of a backend date or timestamp string (`2024-05-01T10:20:30Z`).
pub fn leading_date(raw: &str) -> Option<NaiveDate> {
    let date = raw.get(..10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_date_accepts_dates_and_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1);
        assert_eq!(leading_date("2024-05-01"), expected);
        assert_eq!(leading_date("2024-05-01T10:20:30.123456Z"), expected);
        assert_eq!(leading_date("yesterday"), None);
        assert_eq!(leading_date(""), None);
    }
}
