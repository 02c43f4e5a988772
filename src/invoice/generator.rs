use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::{resolve_dir, Config};
use crate::error::Result;
use crate::invoice::report::{BatchFailure, BatchReport};
use crate::pdf::Renderer;
use crate::record::{ensure_dir, plain_file_name, InvoiceRecord, NewInvoice, RecordStore};

/// Ties the record store to a renderer and the output directory
pub struct Invoicer<R> {
    config: Config,
    store: RecordStore,
    output_dir: PathBuf,
    renderer: R,
}

impl<R: Renderer> Invoicer<R> {
    /// Open both working directories under `root`, creating them if needed
    pub fn open(root: &Path, config: Config, renderer: R) -> Result<Self> {
        let output_dir = resolve_dir(root, &config.paths.output_dir);
        ensure_dir(&output_dir)?;
        let store = RecordStore::open(resolve_dir(root, &config.paths.records_dir))?;

        debug!(
            "records in {}, output in {}",
            store.dir().display(),
            output_dir.display()
        );

        Ok(Self {
            config,
            store,
            output_dir,
            renderer,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Where the record's PDF goes; a `fileName` that points outside the
    /// output directory is refused
    pub fn output_path(&self, record: &InvoiceRecord) -> Result<PathBuf> {
        let file = record.document_file_name();
        Ok(self.output_dir.join(plain_file_name(&file)?))
    }

    /// Build a record from collected answers and persist it
    pub fn create(
        &self,
        invoice: NewInvoice,
        issued: NaiveDate,
    ) -> Result<(InvoiceRecord, PathBuf)> {
        let record = invoice.into_record(&self.config, issued)?;
        let path = self.store.save(&record)?;
        info!("saved {}", path.display());
        Ok((record, path))
    }

    /// Render one record into the output directory
    pub fn render(&self, record: &InvoiceRecord) -> Result<PathBuf> {
        let output = self.output_path(record)?;
        ensure_dir(&self.output_dir)?;
        self.renderer.render(record.document(), &output)?;
        info!("rendered {}", output.display());
        Ok(output)
    }

    /// Load a stored record by file name or stem and render it
    pub fn render_one(&self, name: &str) -> Result<PathBuf> {
        let record = self.store.load(name)?;
        self.render(&record)
    }

    /// Render every stored record. A record that fails to load or render is
    /// reported and the batch moves on.
    pub fn render_all(&self) -> Result<BatchReport> {
        let mut report = BatchReport::default();
        for name in self.store.list()? {
            match self.render_one(&name) {
                Ok(path) => report.rendered.push(path),
                Err(error) => {
                    warn!("failed to render {}: {}", name, error);
                    report.failures.push(BatchFailure { name, error });
                }
            }
        }
        info!("{}", report.summary());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvoiceError;
    use crate::record::{CellValue, Customer, InvoiceDocument, LineItem};
    use rust_decimal::Decimal;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    /// Writes the invoice title to the output path and remembers each call
    #[derive(Default)]
    struct FakeRenderer {
        calls: RefCell<Vec<PathBuf>>,
    }

    impl Renderer for FakeRenderer {
        fn render(&self, document: &InvoiceDocument, output: &Path) -> Result<()> {
            self.calls.borrow_mut().push(output.to_path_buf());
            fs::write(output, &document.name)?;
            Ok(())
        }
    }

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn render(&self, _: &InvoiceDocument, _: &Path) -> Result<()> {
            Err(InvoiceError::Render("boom".to_string()))
        }
    }

    fn issued() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn new_invoice(company: &str) -> NewInvoice {
        NewInvoice {
            company_name: company.to_string(),
            customer: Customer::default(),
            items: Vec::new(),
        }
    }

    #[test]
    fn open_creates_working_dirs() {
        let temp = TempDir::new().unwrap();
        let invoicer = Invoicer::open(temp.path(), Config::default(), FakeRenderer::default())
            .unwrap();
        assert!(temp.path().join("invoices").is_dir());
        assert!(temp.path().join("generated_invoices").is_dir());
        assert_eq!(invoicer.output_dir(), temp.path().join("generated_invoices"));
    }

    #[test]
    fn create_then_render() {
        let temp = TempDir::new().unwrap();
        let invoicer = Invoicer::open(temp.path(), Config::default(), FakeRenderer::default())
            .unwrap();

        let (record, json) = invoicer.create(new_invoice("Acme Corp"), issued()).unwrap();
        assert_eq!(json, temp.path().join("invoices/acme-corp-invoice.json"));

        let pdf = invoicer.render(&record).unwrap();
        assert_eq!(pdf, temp.path().join("generated_invoices/acme-corp-invoice.pdf"));
        assert_eq!(fs::read_to_string(&pdf).unwrap(), "INVOICE");
        assert_eq!(*invoicer.renderer.calls.borrow(), vec![pdf]);
    }

    #[test]
    fn render_one_accepts_stem() {
        let temp = TempDir::new().unwrap();
        let invoicer = Invoicer::open(temp.path(), Config::default(), FakeRenderer::default())
            .unwrap();
        invoicer.create(new_invoice("Acme"), issued()).unwrap();

        let pdf = invoicer.render_one("acme-invoice").unwrap();
        assert!(pdf.ends_with("acme-invoice.pdf"));
    }

    #[test]
    fn render_one_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let invoicer = Invoicer::open(temp.path(), Config::default(), FakeRenderer::default())
            .unwrap();
        assert!(matches!(
            invoicer.render_one("nobody-invoice.json"),
            Err(InvoiceError::RecordNotFound(_))
        ));
    }

    #[test]
    fn render_failure_keeps_saved_record() {
        let temp = TempDir::new().unwrap();
        let invoicer = Invoicer::open(temp.path(), Config::default(), FailingRenderer).unwrap();
        let (record, json) = invoicer.create(new_invoice("Acme"), issued()).unwrap();

        assert!(matches!(
            invoicer.render(&record),
            Err(InvoiceError::Render(_))
        ));
        assert!(json.exists());
        assert_eq!(invoicer.store().load("acme-invoice").unwrap(), record);
    }

    #[test]
    fn render_all_continues_past_failures() {
        let temp = TempDir::new().unwrap();
        let invoicer = Invoicer::open(temp.path(), Config::default(), FailingRenderer).unwrap();
        invoicer.create(new_invoice("One"), issued()).unwrap();
        invoicer.create(new_invoice("Two"), issued()).unwrap();

        let report = invoicer.render_all().unwrap();
        assert!(report.rendered.is_empty());
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.summary(), "Rendered 0 invoice(s), 2 failed");
    }

    #[test]
    fn create_reports_total_overflow() {
        let temp = TempDir::new().unwrap();
        let invoicer = Invoicer::open(temp.path(), Config::default(), FakeRenderer::default())
            .unwrap();
        let huge = LineItem {
            description: "Everything".to_string(),
            quantity: CellValue::Integer(1),
            total: Decimal::MAX,
        };
        let invoice = NewInvoice {
            items: vec![huge.clone(), huge],
            ..new_invoice("Acme")
        };

        assert!(matches!(
            invoicer.create(invoice, issued()),
            Err(InvoiceError::TotalOverflow)
        ));
        assert!(invoicer.store().list().unwrap().is_empty());
    }

    #[test]
    fn separators_in_company_name_stay_in_working_dirs() {
        let temp = TempDir::new().unwrap();
        let invoicer = Invoicer::open(temp.path(), Config::default(), FakeRenderer::default())
            .unwrap();

        let (record, json) = invoicer.create(new_invoice("AC/DC"), issued()).unwrap();
        assert_eq!(json, temp.path().join("invoices/ac-dc-invoice.json"));
        let pdf = invoicer.render(&record).unwrap();
        assert_eq!(pdf, temp.path().join("generated_invoices/ac-dc-invoice.pdf"));

        let (record, json) = invoicer.create(new_invoice("../../escape"), issued()).unwrap();
        assert_eq!(json, temp.path().join("invoices/escape-invoice.json"));
        let pdf = invoicer.render(&record).unwrap();
        assert_eq!(pdf, temp.path().join("generated_invoices/escape-invoice.pdf"));
    }

    #[test]
    fn hostile_file_name_is_not_rendered() {
        let temp = TempDir::new().unwrap();
        let invoicer = Invoicer::open(temp.path(), Config::default(), FakeRenderer::default())
            .unwrap();
        let (mut record, _) = invoicer.create(new_invoice("Acme"), issued()).unwrap();
        record.file_name = "../../escape-invoice.pdf".to_string();
        fs::write(
            temp.path().join("invoices/acme-invoice.json"),
            serde_json::to_string_pretty(&record).unwrap(),
        )
        .unwrap();

        assert!(matches!(
            invoicer.render(&record),
            Err(InvoiceError::InvalidFileName(_))
        ));
        assert!(matches!(
            invoicer.render_one("acme-invoice"),
            Err(InvoiceError::InvalidFileName(_))
        ));
        assert!(invoicer.renderer.calls.borrow().is_empty());
    }
}
