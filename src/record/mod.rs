mod builder;
mod schema;
mod store;

pub use builder::{
    build_details, file_stem, format_price, invoice_number, items_total, parse_quantity, slugify,
    Customer, LineItem, NewInvoice,
};
pub use schema::{
    Cell, CellValue, Details, Field, FieldValue, InvoiceData, InvoiceDocument, InvoiceRecord,
    TotalCell, DOCUMENT_EXTENSION, RECORD_EXTENSION,
};
pub use store::{ensure_dir, plain_file_name, RecordStore};
