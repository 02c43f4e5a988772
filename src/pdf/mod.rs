mod typst;

pub use typst::TypstRenderer;

use std::path::Path;

use crate::error::Result;
use crate::record::InvoiceDocument;

/// Lays out an invoice document into a paginated file at `output`.
///
/// Pagination, typography and currency placement belong to the backend.
pub trait Renderer {
    fn render(&self, document: &InvoiceDocument, output: &Path) -> Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for &R {
    fn render(&self, document: &InvoiceDocument, output: &Path) -> Result<()> {
        (**self).render(document, output)
    }
}
