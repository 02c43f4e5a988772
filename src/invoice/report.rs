use std::path::PathBuf;

use crate::error::InvoiceError;

/// A record that failed to load or render during a batch
#[derive(Debug)]
pub struct BatchFailure {
    pub name: String,
    pub error: InvoiceError,
}

/// Outcome of rendering every stored record
#[derive(Debug, Default)]
pub struct BatchReport {
    pub rendered: Vec<PathBuf>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn summary(&self) -> String {
        format!(
            "Rendered {} invoice(s), {} failed",
            self.rendered.len(),
            self.failures.len()
        )
    }

    /// Per-record outcome followed by the summary line
    pub fn print(&self) {
        for path in &self.rendered {
            println!("Invoice generated: {}", path.display());
        }
        for failure in &self.failures {
            eprintln!("Failed {}: {}", failure.name, failure.error);
        }
        println!("{}", self.summary());
    }
}
