use anyhow::Result;
use colored::*;
use firestore_perf::BenchmarkReport;
use crate::formatters::Formatter;

/// Formateur au format texte
pub struct TextFormatter {
    /// Indique si les couleurs sont activées
    colored: bool,
}

impl TextFormatter {
    /// Crée un nouveau formateur texte
    pub fn new() -> Self {
        TextFormatter {
            colored: true,
        }
    }

    /// Désactive les couleurs
    pub fn without_colors() -> Self {
        TextFormatter {
            colored: false,
        }
    }
}

impl Formatter for TextFormatter {
    fn format_report(&self, report: &BenchmarkReport) -> Result<String> {
        let mut lines = vec![
            format!("Project:    {}", report.project_id),
            format!("Collection: {}", report.collection),
            format!("Query:      {}", report.query),
            format!("Inserted:   {}", report.inserted),
        ];
        if report.failed_inserts > 0 {
            let failed = format!("Failed:     {}", report.failed_inserts);
            lines.push(if self.colored { failed.yellow().to_string() } else { failed });
        }
        lines.push(format!("Found:      {}", report.result_count));

        let elapsed = format!("Elapsed:    {:.6}s", report.elapsed_secs);
        lines.push(if self.colored { elapsed.green().bold().to_string() } else { elapsed });

        Ok(lines.join("\n"))
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
