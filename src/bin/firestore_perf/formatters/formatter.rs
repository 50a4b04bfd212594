use anyhow::Result;
use firestore_perf::BenchmarkReport;

/// Trait commun à tous les formateurs de sortie
pub trait Formatter {
    /// Formate le rapport final
    fn format_report(&self, report: &BenchmarkReport) -> Result<String>;

    /// Formate un message d'erreur
    fn format_error(&self, error: &str) -> String;

    /// Formate un message d'information
    fn format_info(&self, info: &str) -> String;
}
