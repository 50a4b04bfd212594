use anyhow::Result;
use serde_json::json;
use firestore_perf::BenchmarkReport;
use crate::formatters::Formatter;

/// Formateur au format JSON
pub struct JsonFormatter;

impl JsonFormatter {
    /// Crée un nouveau formateur JSON
    pub fn new() -> Self {
        JsonFormatter
    }

    fn render(&self, value: &serde_json::Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    }
}

impl Formatter for JsonFormatter {
    fn format_report(&self, report: &BenchmarkReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    fn format_error(&self, error: &str) -> String {
        self.render(&json!({ "error": error }))
    }

    fn format_info(&self, info: &str) -> String {
        self.render(&json!({ "info": info }))
    }
}
