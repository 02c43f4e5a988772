pub mod config;
pub mod error;
pub mod invoice;
pub mod pdf;
pub mod prompt;
pub mod record;

pub use config::{load_config, Config, InvoiceSettings, PathSettings, Seller};
pub use error::{InvoiceError, Result};
pub use invoice::{BatchReport, Invoicer};
pub use pdf::{Renderer, TypstRenderer};
pub use record::{InvoiceDocument, InvoiceRecord, NewInvoice, RecordStore};
