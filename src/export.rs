//! Spreadsheet export.
//!
//! Writes one `.xlsx` per run under the output directory, named by keyword
//! and unix timestamp, and prints a small preview of the saved table.

use std::path::{Path, PathBuf};

use chrono::Utc;
use rust_xlsxwriter::Workbook;
use tracing::{error, info, warn};

use crate::error::ScraperError;
use crate::fiverr::GigRecord;

/// Column order of the exported sheet.
pub const EXPORT_HEADERS: [&str; 7] = [
    "RANK",
    "NAME",
    "LEVEL",
    "RATING",
    "REVIEWS_COUNT",
    "PRICE_STARTING_FROM",
    "GIG_LINKS",
];

const PREVIEW_ROWS: usize = 5;

/// Save records to an xlsx file under `output_dir`.
///
/// An empty record list writes nothing. Directory or write failures are
/// logged and swallowed here; the run ends without an output file but does
/// not crash.
pub fn save_results(records: &[GigRecord], keyword: &str, output_dir: &Path) -> Option<PathBuf> {
    if records.is_empty() {
        warn!("No data to save!");
        return None;
    }

    match write_workbook(records, keyword, output_dir) {
        Ok(path) => {
            info!("Saved {} results to {}", records.len(), path.display());
            print_preview(records);
            Some(path)
        }
        Err(e) => {
            error!("Error saving results: {}", e);
            None
        }
    }
}

fn write_workbook(
    records: &[GigRecord],
    keyword: &str,
    output_dir: &Path,
) -> Result<PathBuf, ScraperError> {
    std::fs::create_dir_all(output_dir)?;

    let filename = format!(
        "fiverr_{}_{}.xlsx",
        keyword.replace(' ', "_"),
        Utc::now().timestamp()
    );
    let path = output_dir.join(filename);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_number(row, 0, record.rank as f64)?;
        worksheet.write_string(row, 1, record.name.as_str())?;
        worksheet.write_string(row, 2, record.level.as_str())?;
        worksheet.write_string(row, 3, record.rating.as_str())?;
        worksheet.write_string(row, 4, record.reviews_count.as_str())?;
        worksheet.write_string(row, 5, record.price.as_str())?;
        if let Some(link) = &record.gig_link {
            worksheet.write_string(row, 6, link.as_str())?;
        }
    }

    workbook.save(&path)?;
    Ok(path)
}

fn print_preview(records: &[GigRecord]) {
    println!("\nSample data:");
    println!(
        "{:<5} {:<28} {:<18} {:<7} {:<9} {}",
        "RANK", "NAME", "LEVEL", "RATING", "REVIEWS", "PRICE"
    );
    for record in records.iter().take(PREVIEW_ROWS) {
        println!(
            "{:<5} {:<28} {:<18} {:<7} {:<9} {}",
            record.rank,
            clip(&record.name, 26),
            clip(&record.level, 16),
            record.rating,
            record.reviews_count,
            record.price
        );
    }
}

fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let clipped: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", clipped)
    }
}
