pub mod formatter;
pub mod text;
pub mod json;
pub mod table;

pub use formatter::Formatter;
use clap::ValueEnum;

/// Formats de sortie disponibles pour le résumé final
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Format texte
    Text,

    /// Format JSON
    Json,

    /// Format tableau
    Table,
}

impl OutputFormat {
    /// Construit le formateur correspondant
    pub fn formatter(&self, colored: bool) -> Box<dyn Formatter> {
        match self {
            OutputFormat::Text if colored => Box::new(text::TextFormatter::new()),
            OutputFormat::Text => Box::new(text::TextFormatter::without_colors()),
            OutputFormat::Json => Box::new(json::JsonFormatter::new()),
            OutputFormat::Table if colored => Box::new(table::TableFormatter::new()),
            OutputFormat::Table => Box::new(table::TableFormatter::without_colors()),
        }
    }
}
