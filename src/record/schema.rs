//! On-disk shape of an invoice record.
//!
//! Field names follow the JSON layout of previously generated record files,
//! so existing `invoices/*.json` load without migration.

use serde::{Deserialize, Serialize};

/// Extension of the rendered document named by `fileName`
pub const DOCUMENT_EXTENSION: &str = "pdf";

/// Extension of a persisted record
pub const RECORD_EXTENSION: &str = "json";

/// One invoice as persisted in the records directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub data: InvoiceData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceData {
    pub invoice: InvoiceDocument,
}

/// Everything the renderer lays out on the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDocument {
    pub name: String,
    pub header: Vec<Field>,
    pub currency: String,
    pub customer: Vec<Field>,
    pub seller: Vec<Field>,
    pub details: Details,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub label: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new(label: &str, value: FieldValue) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// A single line, or several lines such as a name and address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Lines(Vec<String>),
}

/// The line item table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Details {
    pub header: [Cell; 3],
    pub parts: Vec<[Cell; 3]>,
    pub total: Vec<TotalCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub value: CellValue,
    #[serde(default, skip_serializing_if = "is_false")]
    pub price: bool,
}

impl Cell {
    pub fn text(value: &str) -> Self {
        Self {
            value: CellValue::Text(value.to_string()),
            price: false,
        }
    }

    pub fn price(value: String) -> Self {
        Self {
            value: CellValue::Text(value),
            price: true,
        }
    }
}

/// Cell content. `Empty` (JSON `null`) marks a quantity that did not parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Integer(i64),
    Text(String),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalCell {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub price: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl InvoiceRecord {
    /// Record identity shared by the JSON file and the rendered document
    pub fn stem(&self) -> &str {
        self.file_name
            .strip_suffix(&format!(".{DOCUMENT_EXTENSION}"))
            .unwrap_or(&self.file_name)
    }

    pub fn document(&self) -> &InvoiceDocument {
        &self.data.invoice
    }

    pub fn record_file_name(&self) -> String {
        format!("{}.{RECORD_EXTENSION}", self.stem())
    }

    pub fn document_file_name(&self) -> String {
        format!("{}.{DOCUMENT_EXTENSION}", self.stem())
    }
}

impl InvoiceDocument {
    /// Value of the first header field with the given label
    pub fn header_value(&self, label: &str) -> Option<&FieldValue> {
        self.header
            .iter()
            .find(|f| f.label == label)
            .map(|f| &f.value)
    }

    /// First line of the first customer field (the customer's name)
    pub fn customer_name(&self) -> Option<&str> {
        self.customer.first().and_then(|f| match &f.value {
            FieldValue::Text(s) => Some(s.as_str()),
            FieldValue::Lines(lines) => lines.first().map(String::as_str),
        })
    }

    pub fn total(&self) -> Option<&str> {
        self.details.total.first().map(|t| t.value.as_str())
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Lines(lines) => write!(f, "{}", lines.join(", ")),
        }
    }
}
