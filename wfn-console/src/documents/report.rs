use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use wfn_core::report::ProgramReport;

use crate::pages::{format_date, format_money};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const LINE_HEIGHT: f32 = 7.0;

/// Table columns: x offset (mm) and the widest text that fits.
const COLUMNS: [(f32, &str, usize); 4] = [
    (MARGIN, "Date", 12),
    (45.0, "Title", 28),
    (105.0, "Description", 30),
    (165.0, "Amount", 16),
];

struct ReportWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl ReportWriter {
    fn new(title: &str) -> Result<Self, printpdf::Error> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT - MARGIN,
        })
    }

    /// Start a new page when the next line would cross the bottom margin.
    fn ensure_room(&mut self) -> bool {
        if self.y >= MARGIN {
            return false;
        }
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
        true
    }

    fn text(&mut self, text: &str, size: f32, bold: bool) {
        self.ensure_room();
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(text, size, Mm(MARGIN), Mm(self.y), font);
        self.y -= LINE_HEIGHT;
    }

    fn gap(&mut self) {
        self.y -= LINE_HEIGHT / 2.0;
    }

    fn table_header(&mut self) {
        for (x, label, _) in COLUMNS {
            self.layer.use_text(label, 10.0, Mm(x), Mm(self.y), &self.bold);
        }
        self.y -= LINE_HEIGHT;
    }

    fn table_row(&mut self, cells: [String; 4]) {
        if self.ensure_room() {
            self.table_header();
        }
        for ((x, _, width), cell) in COLUMNS.iter().zip(cells.iter()) {
            self.layer
                .use_text(truncate(cell, *width), 10.0, Mm(*x), Mm(self.y), &self.regular);
        }
        self.y -= LINE_HEIGHT;
    }

    fn finish(self) -> Result<Vec<u8>, printpdf::Error> {
        self.doc.save_to_bytes()
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    short.push_str("...");
    short
}

/// Render a program report as an A4 PDF, paginating the expense table.
pub fn render_report_pdf(report: &ProgramReport) -> Result<Vec<u8>, printpdf::Error> {
    let title = format!("Program Report: {}", report.program_name);
    let mut writer = ReportWriter::new(&title)?;

    writer.text(&title, 18.0, true);
    writer.gap();
    if let Some(description) = report.description.as_deref().filter(|d| !d.is_empty()) {
        writer.text(&truncate(description, 90), 11.0, false);
    }
    writer.text(&format!("Total Budget: Rs. {}", format_money(report.total_budget)), 11.0, false);
    writer.text(&format!("Start Date: {}", format_date(report.start_date)), 11.0, false);
    writer.text(
        &format!(
            "End Date: {}",
            report.end_date.map(format_date).unwrap_or_else(|| "-".to_string())
        ),
        11.0,
        false,
    );
    writer.text(&format!("Project Status: {}", report.status), 11.0, false);
    writer.text(
        &format!("Total Expenses: Rs. {}", format_money(report.total_expenses)),
        11.0,
        false,
    );
    writer.text(
        &format!("Remaining Budget: Rs. {}", format_money(report.remaining_budget())),
        11.0,
        false,
    );

    writer.gap();
    writer.text("Expenses", 14.0, true);

    if report.lines.is_empty() {
        writer.text("No expenses recorded for this program.", 11.0, false);
    } else {
        writer.ensure_room();
        writer.table_header();
        for line in &report.lines {
            let title = if line.reversed {
                format!("{} (reversed)", line.title)
            } else {
                line.title.clone()
            };
            writer.table_row([
                format_date(line.date),
                title,
                line.description.clone().unwrap_or_default(),
                format!("Rs. {}", format_money(line.amount)),
            ]);
        }
    }

    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use wfn_core::models::ProgramStatus;
    use wfn_core::report::ReportLine;

    fn report(lines: usize) -> ProgramReport {
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        ProgramReport {
            program_name: "School kits".into(),
            description: Some("Bags and books for the new term".into()),
            total_budget: Decimal::new(50_000, 0),
            start_date: date,
            end_date: None,
            status: ProgramStatus::Ongoing,
            total_expenses: Decimal::new(100 * lines as i64, 0),
            lines: (0..lines)
                .map(|i| ReportLine {
                    date,
                    title: format!("Item {i}"),
                    amount: Decimal::new(100, 0),
                    description: None,
                    reversed: i % 10 == 0,
                })
                .collect(),
        }
    }

    #[test]
    fn renders_a_pdf() {
        let bytes = render_report_pdf(&report(3)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn long_expense_lists_span_pages() {
        let short = render_report_pdf(&report(1)).unwrap();
        let long = render_report_pdf(&report(120)).unwrap();
        assert!(long.starts_with(b"%PDF"));
        assert!(long.len() > short.len());
    }

    #[test]
    fn truncates_long_cells() {
        assert_eq!(truncate("Rice", 10), "Rice");
        assert_eq!(truncate("Rice bags for the shelter", 10), "Rice ba...");
    }
}
