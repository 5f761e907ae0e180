//! CSV and Excel export of table views.

use std::path::{Path, PathBuf};

use chrono::Utc;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, XlsxError};

use crate::config::ExportConfig;
use crate::error::Result;
use crate::table::csv;
use crate::table::{CellValue, Column, Record, TableState};

/// Supported export file types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Excel,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "xlsx",
        }
    }

    fn filter_name(self) -> &'static str {
        match self {
            Self::Csv => "CSV Files",
            Self::Excel => "Excel Files",
        }
    }
}

/// Generate default filename for export: `{title}-{epoch millis}.{ext}`.
pub fn generate_export_filename(title: &str, format: ExportFormat) -> String {
    csv::export_filename(title, Utc::now().timestamp_millis(), format.extension())
}

/// Open save file dialog and return selected path.
pub fn show_save_dialog(default_name: &str, format: ExportFormat) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(default_name)
        .add_filter(format.filter_name(), &[format.extension()])
        .save_file()
}

/// Where an export named `filename` should be written.
///
/// Returns `None` when the user cancels the save dialog.
pub fn resolve_destination(config: &ExportConfig, filename: &str, format: ExportFormat) -> Option<PathBuf> {
    if config.ask_location {
        show_save_dialog(filename, format)
    } else {
        Some(config.resolved_directory().join(filename))
    }
}

/// Write the visible rows of `table` to `path`.
pub fn export_table<R: Record>(table: &TableState<R>, title: &str, format: ExportFormat, path: &Path) -> Result<()> {
    match format {
        ExportFormat::Csv => std::fs::write(path, table.to_csv())?,
        ExportFormat::Excel => export_rows_to_excel(title, table.columns(), &table.visible_rows(), path)?,
    }
    tracing::info!(
        "Exported {} {} row(s) to {}",
        table.visible_len(),
        format.extension(),
        path.display()
    );
    Ok(())
}

/// Export rows over the data-mapped columns to an Excel file.
pub fn export_rows_to_excel<R: Record>(
    title: &str,
    columns: &[Column<R>],
    rows: &[&R],
    path: &Path,
) -> std::result::Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name(sheet_name(title))?;

    // Header format
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);

    let data_columns: Vec<&Column<R>> = columns.iter().filter(|c| c.is_data()).collect();

    for (col, column) in data_columns.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, &column.title, &header_format)?;
        let width = column.width.map_or(15.0, |w| (f64::from(w) / 7.0).round().max(8.0));
        worksheet.set_column_width(col, width)?;
    }

    // Data rows
    for (idx, record) in rows.iter().enumerate() {
        let row = (idx + 1) as u32;
        for (col, column) in data_columns.iter().enumerate() {
            let col = col as u16;
            let Some(key) = column.data_index else { continue };
            match record.field(key) {
                CellValue::Integer(n) => {
                    worksheet.write_number(row, col, n as f64)?;
                }
                CellValue::Decimal(v) => {
                    worksheet.write_number(row, col, v)?;
                }
                other => {
                    worksheet.write_string(row, col, other.to_string())?;
                }
            }
        }
    }

    // Autofilter
    if !rows.is_empty() && !data_columns.is_empty() {
        let last_row = rows.len() as u32;
        worksheet.autofilter(0, 0, last_row, (data_columns.len() - 1) as u16)?;
    }

    // Freeze top row
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    Ok(())
}

/// Excel sheet names: at most 31 characters, none of `[]:*?/\`.
fn sheet_name(title: &str) -> String {
    let name: String = title
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(31)
        .collect();
    let name = name.trim().to_string();
    if name.is_empty() { "Sheet1".to_string() } else { name }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::testing::{Row, sample};

    fn table() -> TableState<Row> {
        TableState::new(
            vec![
                Column::field("Name", "name"),
                Column::field("Amount", "amount").width(120.0),
                Column::computed("Tag", |r: &Row| format!("#{}", r.id)),
            ],
            sample(),
        )
    }

    #[test]
    fn test_filename_pattern() {
        let name = generate_export_filename("Products", ExportFormat::Csv);
        let millis = name
            .strip_prefix("Products-")
            .and_then(|rest| rest.strip_suffix(".csv"))
            .unwrap();
        assert!(millis.parse::<i64>().unwrap() > 0);
    }

    #[test]
    fn test_csv_written_for_visible_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut state = table();
        state.set_query("an");
        export_table(&state, "Fruit", ExportFormat::Csv, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Name,Amount\nBanana,20");
    }

    #[test]
    fn test_excel_file_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        export_table(&table(), "Fruit: all/some", ExportFormat::Excel, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_excel_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        let state = TableState::new(vec![Column::field("Name", "name")], Vec::<Row>::new());
        export_table(&state, "", ExportFormat::Excel, &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_sheet_name_sanitized() {
        assert_eq!(sheet_name("Fruit: all/some"), "Fruit allsome");
        assert_eq!(sheet_name(""), "Sheet1");
        assert_eq!(sheet_name(&"x".repeat(40)).len(), 31);
    }

    #[test]
    fn test_destination_without_dialog() {
        let config = ExportConfig {
            directory: Some(PathBuf::from("/data/exports")),
            ask_location: false,
        };
        assert_eq!(
            resolve_destination(&config, "a-1.csv", ExportFormat::Csv),
            Some(PathBuf::from("/data/exports/a-1.csv"))
        );
    }
}
