//! Renderers for the merged metrics table
//!
//! Two renderings of the same rows exist: an aligned plain-text table for
//! operators and a CSV block for log aggregators.

use crate::{
    error::{AppError, Result},
    models::{Cell, MergedMetrics},
};

/// Common interface of the metrics renderers
pub trait MetricsRenderer {
    /// Render the rows, header included
    fn render(&self, rows: &[MergedMetrics]) -> Result<String>;
}

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

/// Table formatting configuration
#[derive(Debug, Clone)]
pub struct TableFormat {
    /// Alignment of every cell, header included
    pub alignment: Alignment,
    /// Spaces between adjacent columns
    pub column_gap: usize,
    /// Show header row
    pub show_header: bool,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            alignment: Alignment::Right,
            column_gap: 2,
            show_header: true,
        }
    }
}

/// Aligned plain-text table without a row-index column
pub struct TableRenderer {
    format: TableFormat,
}

impl TableRenderer {
    pub fn new(format: TableFormat) -> Self {
        Self { format }
    }

    /// Calculate column widths over header and data
    fn calculate_column_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
        headers.iter().enumerate()
            .map(|(col_idx, header)| {
                rows.iter()
                    .filter_map(|row| row.get(col_idx))
                    .map(|cell| cell.chars().count())
                    .fold(header.len(), usize::max)
            })
            .collect()
    }

    /// Create a table row
    fn create_row<S: AsRef<str>>(&self, data: &[S], widths: &[usize]) -> String {
        let gap = " ".repeat(self.format.column_gap);
        let cells: Vec<String> = data.iter()
            .zip(widths.iter())
            .map(|(cell, &width)| align_text(cell.as_ref(), width, self.format.alignment))
            .collect();

        cells.join(&gap).trim_end().to_string()
    }
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new(TableFormat::default())
    }
}

impl MetricsRenderer for TableRenderer {
    fn render(&self, rows: &[MergedMetrics]) -> Result<String> {
        let headers = MergedMetrics::COLUMNS;
        let data: Vec<Vec<String>> = rows.iter()
            .map(|row| row.cells().iter().map(format_table_cell).collect())
            .collect();

        let widths = self.calculate_column_widths(&headers, &data);
        let mut lines = Vec::with_capacity(data.len() + 1);

        if self.format.show_header {
            lines.push(self.create_row(&headers, &widths));
        }
        for row in &data {
            lines.push(self.create_row(row, &widths));
        }

        Ok(lines.join("\n"))
    }
}

/// CSV rendering with a header row and a leading unnamed row-index column;
/// missing values are empty cells
#[derive(Default)]
pub struct CsvRenderer;

impl MetricsRenderer for CsvRenderer {
    fn render(&self, rows: &[MergedMetrics]) -> Result<String> {
        let mut wtr = csv::WriterBuilder::new().from_writer(Vec::new());

        let header = std::iter::once("").chain(MergedMetrics::COLUMNS);
        wtr.write_record(header)?;
        for (index, row) in rows.iter().enumerate() {
            let record: Vec<String> = std::iter::once(index.to_string())
                .chain(row.cells().iter().map(format_csv_cell))
                .collect();
            wtr.write_record(&record)?;
        }

        let bytes = wtr.into_inner()
            .map_err(|e| AppError::output(format!("Failed to flush CSV writer: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::output(format!("CSV output is not valid UTF-8: {}", e)))
    }
}

/// Align text within specified width
fn align_text(text: &str, width: usize, alignment: Alignment) -> String {
    match alignment {
        Alignment::Left => format!("{:<width$}", text, width = width),
        Alignment::Right => format!("{:>width$}", text, width = width),
    }
}

/// Render a float the way the table shows it: `NaN` when missing, at most six decimals
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }

    let fixed = format!("{:.6}", value);
    let trimmed = fixed.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}

fn format_table_cell(cell: &Cell) -> String {
    match cell {
        Cell::Integer(v) => v.to_string(),
        Cell::Float(v) => format_float(*v),
    }
}

fn format_csv_cell(cell: &Cell) -> String {
    match cell {
        Cell::Integer(v) => v.to_string(),
        Cell::Float(v) if v.is_nan() => String::new(),
        Cell::Float(v) if v.fract() == 0.0 && v.is_finite() => format!("{:.1}", v),
        Cell::Float(v) => v.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EndpointMetrics, WorkerMetrics};
    use crate::stats::Summary;

    fn sample_rows() -> Vec<MergedMetrics> {
        let worker = WorkerMetrics::new(0).with_ticks(Summary::from_values(&[10.0, 20.0]));
        let endpoint = EndpointMetrics::from_summaries(
            Summary::from_values(&[5.0, 15.0]),
            Summary::from_values(&[10.0]),
        );
        vec![MergedMetrics::new(worker, endpoint)]
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(15.0), "15.0");
        assert_eq!(format_float(50f64.sqrt()), "7.071068");
        assert_eq!(format_float(0.5), "0.5");
        assert_eq!(format_float(f64::NAN), "NaN");
        assert_eq!(format_float(f64::INFINITY), "inf");
    }

    #[test]
    fn test_table_has_header_and_no_index() {
        let table = TableRenderer::default().render(&sample_rows()).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].trim_start().starts_with("worker_id"));
        assert!(lines[0].ends_with("response_time_place_stdev"));
        assert!(lines[1].trim_start().starts_with('0'));
        assert!(lines[1].contains("7.071068"));
        assert!(lines[1].ends_with("NaN"));
    }

    #[test]
    fn test_table_columns_are_right_aligned() {
        let table = TableRenderer::default().render(&sample_rows()).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0].len(), lines[1].len());
        let header_end = lines[0].find("worker_id").unwrap() + "worker_id".len();
        assert_eq!(&lines[1][header_end - 1..header_end], "0");
    }

    #[test]
    fn test_empty_table_is_header_only() {
        let table = TableRenderer::default().render(&[]).unwrap();
        assert_eq!(table.lines().count(), 1);
    }

    #[test]
    fn test_csv_rendering() {
        let csv = CsvRenderer.render(&sample_rows()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], format!(",{}", MergedMetrics::COLUMNS.join(",")));
        let fields: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(fields.len(), MergedMetrics::COLUMNS.len() + 1);
        assert_eq!(fields[0], "0");
        assert_eq!(fields[1], "0");
        assert_eq!(fields[2], "15.0");
        assert!(fields[3].starts_with("7.0710678"));
        assert_eq!(fields[10], "");
    }

    #[test]
    fn test_csv_index_counts_rows() {
        let worker = WorkerMetrics::new(7);
        let rows = vec![
            MergedMetrics::new(worker, EndpointMetrics::default()),
            MergedMetrics::new(worker, EndpointMetrics::default()),
        ];
        let csv = CsvRenderer.render(&rows).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("0,7,"));
        assert!(lines[2].starts_with("1,7,"));
    }

    #[test]
    fn test_empty_csv_is_header_only() {
        let csv = CsvRenderer.render(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with(",worker_id,"));
    }

    #[test]
    fn test_align_text() {
        assert_eq!(align_text("ab", 4, Alignment::Right), "  ab");
        assert_eq!(align_text("ab", 4, Alignment::Left), "ab  ");
        assert_eq!(align_text("abcdef", 4, Alignment::Right), "abcdef");
    }
}
