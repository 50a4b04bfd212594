use anyhow::Result;
use colored::*;
use prettytable::{Cell, Row, Table};
use firestore_perf::BenchmarkReport;
use crate::formatters::Formatter;

/// Formateur au format tableau
pub struct TableFormatter {
    /// Indique si les couleurs sont activées
    colored: bool,
}

impl TableFormatter {
    /// Crée un nouveau formateur tableau
    pub fn new() -> Self {
        TableFormatter {
            colored: true,
        }
    }

    /// Désactive les couleurs
    pub fn without_colors() -> Self {
        TableFormatter {
            colored: false,
        }
    }

    fn header(&self, title: &str) -> Cell {
        if self.colored {
            Cell::new(&title.bold().to_string())
        } else {
            Cell::new(title)
        }
    }
}

impl Formatter for TableFormatter {
    fn format_report(&self, report: &BenchmarkReport) -> Result<String> {
        let mut table = Table::new();

        table.add_row(Row::new(vec![
            self.header("Metric"),
            self.header("Value"),
        ]));

        let rows = [
            ("project", report.project_id.clone()),
            ("collection", report.collection.clone()),
            ("query", report.query.clone()),
            ("inserted", report.inserted.to_string()),
            ("failed inserts", report.failed_inserts.to_string()),
            ("documents found", report.result_count.to_string()),
            ("elapsed (s)", format!("{:.6}", report.elapsed_secs)),
        ];

        for (metric, value) in &rows {
            table.add_row(Row::new(vec![
                Cell::new(metric),
                Cell::new(value),
            ]));
        }

        Ok(table.to_string())
    }

    fn format_error(&self, error: &str) -> String {
        if self.colored {
            format!("{}", error.red().bold())
        } else {
            format!("Error: {}", error)
        }
    }

    fn format_info(&self, info: &str) -> String {
        if self.colored {
            format!("{}", info.blue())
        } else {
            format!("Info: {}", info)
        }
    }
}
