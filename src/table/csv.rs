//! Plain CSV serialization of table rows.

use super::column::Column;
use super::record::Record;

/// Serialize `rows` over the data-mapped columns of `columns`.
///
/// The header holds the column titles. Fields are joined with commas and rows
/// with newlines; values are written as-is, so embedded commas, quotes, or
/// newlines are not escaped.
pub fn to_csv<R: Record>(columns: &[Column<R>], rows: &[&R]) -> String {
    let data_columns: Vec<&Column<R>> = columns.iter().filter(|c| c.is_data()).collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        data_columns
            .iter()
            .map(|c| c.title.as_str())
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        lines.push(
            data_columns
                .iter()
                .map(|c| c.raw_text(row))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\n")
}

/// Export filename: `{title}-{epoch millis}.{extension}`, `table` when untitled.
pub fn export_filename(title: &str, epoch_millis: i64, extension: &str) -> String {
    let title = title.trim();
    let stem = if title.is_empty() { "table" } else { title };
    format!("{stem}-{epoch_millis}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::testing::Row;

    fn columns() -> Vec<Column<Row>> {
        vec![
            Column::field("Name", "name"),
            Column::computed("Label", |r: &Row| format!("#{}", r.id)),
            Column::field("Amount", "amount"),
        ]
    }

    #[test]
    fn test_header_and_rows() {
        let a = Row::new(1, "A", 10);
        let b = Row::new(2, "B", 20);
        let csv = to_csv(&columns(), &[&a, &b]);
        assert_eq!(csv, "Name,Amount\nA,10\nB,20");
    }

    #[test]
    fn test_no_rows_is_header_only() {
        assert_eq!(to_csv(&columns(), &[]), "Name,Amount");
    }

    #[test]
    fn test_values_not_escaped() {
        let row = Row::new(1, "Smith, John", 5);
        let csv = to_csv(&columns(), &[&row]);
        assert_eq!(csv.lines().nth(1), Some("Smith, John,5"));
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(
            export_filename("Bank Accounts", 1_700_000_000_000, "csv"),
            "Bank Accounts-1700000000000.csv"
        );
        assert_eq!(export_filename("  ", 42, "xlsx"), "table-42.xlsx");
    }
}
