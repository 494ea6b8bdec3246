//! Printable donation receipts and downloadable program reports.

pub mod receipt;
pub mod report;

pub use receipt::ReceiptTemplate;
pub use report::render_report_pdf;
