//! PDF report rendering of an [`ExportRecord`].

pub mod document;
pub mod metrics;

use tracing::debug;

use self::document::{Document, Font, Rgb, PAGE_HEIGHT, PAGE_WIDTH};
use self::metrics::wrap_text;
use super::record::{format_decimal, format_percentage, ExportRecord};
use crate::error::Result;

pub const REPORT_TITLE: &str = "Investment Scorecard Report";

const MARGIN: f64 = 50.0;
const TOP: f64 = PAGE_HEIGHT - MARGIN;
const BOTTOM: f64 = MARGIN;

const TITLE_SIZE: f64 = 16.0;
const HEADING_SIZE: f64 = 14.0;
const BODY_SIZE: f64 = 12.0;
const TABLE_SIZE: f64 = 10.0;
const LINE_GAP: f64 = 2.0;
// Header text, the rule under it, and the gap before the first row.
const TABLE_HEADER_HEIGHT: f64 = TABLE_SIZE + 4.0 + LINE_GAP * 2.0;

// Table column x positions: Factor, Subfactor, Score, Weight, Comment.
const COLUMNS: [f64; 5] = [50.0, 115.0, 210.0, 255.0, 310.0];
const COMMENT_WIDTH: f64 = PAGE_WIDTH - MARGIN - 310.0;

const RULE_COLOR: Rgb = Rgb(0.6, 0.6, 0.6);
const HIGHLIGHT_COLOR: Rgb = Rgb(0.86, 0.92, 1.0);

/// Render the record as a PDF document.
pub fn to_pdf(record: &ExportRecord) -> Result<Vec<u8>> {
    record.validate()?;

    let mut report = ReportWriter::new();
    report.line(Font::Bold, TITLE_SIZE, MARGIN, REPORT_TITLE);
    report.space(20.0);

    report.table(record);
    report.space(20.0);

    report.line(Font::Bold, HEADING_SIZE, MARGIN, "Factor Scores");
    report.space(6.0);
    for fs in &record.factor_scores {
        report.line(Font::Regular, BODY_SIZE, MARGIN, &factor_score_line(fs.name.label(), fs.score, fs.weight));
    }
    report.space(20.0);

    report.line(Font::Bold, HEADING_SIZE, MARGIN, "Summary");
    report.space(6.0);
    report.highlighted(&total_score_line(record));
    report.space(4.0);
    report.line(
        Font::Regular,
        BODY_SIZE,
        MARGIN,
        &format!("Percentage of Max Score: {}", format_percentage(record.percentage())),
    );
    report.line(
        Font::Regular,
        BODY_SIZE,
        MARGIN,
        &format!(
            "Overall Rating: {} - {}",
            record.overall_rating(),
            record.overall_description()
        ),
    );

    let pages = report.doc.page_count();
    let bytes = report.doc.to_bytes();
    debug!(pages, bytes = bytes.len(), "rendered pdf export");
    Ok(bytes)
}

pub fn factor_score_line(label: &str, score: f64, weight: f64) -> String {
    format!(
        "{}: Average Score {}, Weight {}",
        label,
        format_decimal(score),
        format_decimal(weight)
    )
}

pub fn total_score_line(record: &ExportRecord) -> String {
    format!(
        "Total Score: {} / {}",
        format_decimal(record.overall),
        format_decimal(record.max_possible())
    )
}

/// Top-down cursor over a document that starts a new page when content
/// would cross the bottom margin.
struct ReportWriter {
    doc: Document,
    y: f64,
}

impl ReportWriter {
    fn new() -> Self {
        Self {
            doc: Document::new(REPORT_TITLE),
            y: TOP,
        }
    }

    fn ensure_room(&mut self, height: f64) {
        if self.y - height < BOTTOM {
            self.doc.new_page();
            self.y = TOP;
        }
    }

    fn space(&mut self, amount: f64) {
        self.y -= amount;
    }

    fn line(&mut self, font: Font, size: f64, x: f64, text: &str) {
        self.ensure_room(size);
        let y = self.y - size;
        self.doc.current_page().text(font, size, x, y, text);
        self.y = y - LINE_GAP;
    }

    fn highlighted(&mut self, text: &str) {
        let band = HEADING_SIZE + 8.0;
        self.ensure_room(band);
        let top = self.y;
        let page = self.doc.current_page();
        page.fill_rect(MARGIN - 5.0, top - band, PAGE_WIDTH - 2.0 * MARGIN + 10.0, band, HIGHLIGHT_COLOR);
        page.text(Font::Bold, HEADING_SIZE, MARGIN, top - HEADING_SIZE - 2.0, text);
        self.y = top - band - LINE_GAP;
    }

    fn table_header(&mut self) {
        let labels = ["Factor", "Subfactor", "Score", "Weight", "Comment"];
        self.ensure_room(TABLE_HEADER_HEIGHT);
        let y = self.y - TABLE_SIZE;
        let page = self.doc.current_page();
        for (x, label) in COLUMNS.iter().zip(labels) {
            page.text(Font::Bold, TABLE_SIZE, *x, y, label);
        }
        page.fill_rect(MARGIN, y - 4.0, PAGE_WIDTH - 2.0 * MARGIN, 0.5, RULE_COLOR);
        self.y -= TABLE_HEADER_HEIGHT;
    }

    fn table_page_break(&mut self) {
        self.doc.new_page();
        self.y = TOP;
        self.table_header();
    }

    fn table(&mut self, record: &ExportRecord) {
        self.table_header();
        let line_height = TABLE_SIZE + LINE_GAP;
        let page_room = TOP - BOTTOM - TABLE_HEADER_HEIGHT;

        for row in &record.rows {
            let comment_lines = wrap_text(&row.comment, Font::Regular, TABLE_SIZE, COMMENT_WIDTH);
            let height = line_height * comment_lines.len() as f64;
            // Rows that fit on one page are kept together; taller ones split
            // between comment lines.
            let fits_here = self.y - height >= BOTTOM;
            if (!fits_here && height <= page_room) || self.y - line_height < BOTTOM {
                self.table_page_break();
            }

            let cells = [
                row.factor.label().to_string(),
                row.subfactor.label().to_string(),
                row.rating.to_string(),
                format_decimal(row.weight),
            ];
            let first_baseline = self.y - TABLE_SIZE;
            let page = self.doc.current_page();
            for (x, cell) in COLUMNS.iter().zip(cells.iter()) {
                page.text(Font::Regular, TABLE_SIZE, *x, first_baseline, cell);
            }

            for line in &comment_lines {
                if self.y - line_height < BOTTOM {
                    self.table_page_break();
                }
                if !line.is_empty() {
                    let baseline = self.y - TABLE_SIZE;
                    self.doc
                        .current_page()
                        .text(Font::Regular, TABLE_SIZE, COLUMNS[4], baseline, line);
                }
                self.y -= line_height;
            }
            self.y -= LINE_GAP;
        }
    }
}
