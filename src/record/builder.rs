use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::Config;
use crate::error::{InvoiceError, Result};
use crate::record::schema::{
    Cell, CellValue, Details, Field, FieldValue, InvoiceData, InvoiceDocument, InvoiceRecord,
    TotalCell, DOCUMENT_EXTENSION,
};

/// Customer block as entered by the user
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Customer {
    pub name: String,
    pub address: String,
    pub id: String,
}

/// One row of the item table before it is laid out as cells
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub description: String,
    pub quantity: CellValue,
    pub total: Decimal,
}

/// Answers collected for a new invoice
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewInvoice {
    pub company_name: String,
    pub customer: Customer,
    pub items: Vec<LineItem>,
}

/// Lowercase, trimmed, whitespace runs joined by a single hyphen.
///
/// Path separators count as whitespace and leading dots are dropped, so the
/// slug is always a plain file name.
pub fn slugify(name: &str) -> String {
    let spaced: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let slug = spaced
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    slug.trim_start_matches(|c: char| c == '.' || c == '-').to_string()
}

/// Record stem for a company name, e.g. `acme-corp-invoice`
pub fn file_stem(company_name: &str) -> String {
    format!("{}-invoice", slugify(company_name))
}

/// Invoice number derived from the issue date.
///
/// Two invoices created inside the same date granularity share a number.
pub fn invoice_number(date: NaiveDate, format: &str) -> String {
    date.format(format).to_string()
}

/// Leading-integer parse of a quantity answer.
///
/// `"12 boxes"` gives 12; text with no leading digits gives `CellValue::Empty`.
pub fn parse_quantity(input: &str) -> CellValue {
    let trimmed = input.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    match digits[..end].parse::<i64>() {
        Ok(n) => CellValue::Integer(sign * n),
        Err(_) => CellValue::Empty,
    }
}

/// Two fraction digits, as stored in `price` cells
pub fn format_price(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// Sum of the row totals as they appear in the table
pub fn items_total(items: &[LineItem]) -> Result<Decimal> {
    items.iter().try_fold(Decimal::ZERO, |sum, item| {
        sum.checked_add(item.total.round_dp(2)).ok_or(InvoiceError::TotalOverflow)
    })
}

/// Lay out line items as the three-column table with its total row
pub fn build_details(items: &[LineItem]) -> Result<Details> {
    let parts = items
        .iter()
        .map(|item| {
            [
                Cell::text(&item.description),
                Cell {
                    value: item.quantity.clone(),
                    price: false,
                },
                Cell::price(format_price(item.total)),
            ]
        })
        .collect();

    Ok(Details {
        header: [
            Cell::text("Description"),
            Cell::text("Quantity"),
            Cell::text("Total"),
        ],
        parts,
        total: vec![TotalCell {
            label: "Total".to_string(),
            value: format_price(items_total(items)?),
            price: true,
        }],
    })
}

impl NewInvoice {
    /// Build the full record, issued on `issued`
    pub fn into_record(self, config: &Config, issued: NaiveDate) -> Result<InvoiceRecord> {
        let details = build_details(&self.items)?;
        let settings = &config.invoice;
        let header = vec![
            Field::new(
                "number",
                FieldValue::Text(invoice_number(issued, &settings.number_format)),
            ),
            Field::new(
                "issue date",
                FieldValue::Text(issued.format(&settings.date_format).to_string()),
            ),
        ];
        let customer = vec![
            Field::new(
                "To",
                FieldValue::Lines(vec![self.customer.name, self.customer.address]),
            ),
            Field::new("Customer ID", FieldValue::Text(self.customer.id)),
        ];

        Ok(InvoiceRecord {
            file_name: format!(
                "{}.{DOCUMENT_EXTENSION}",
                file_stem(&self.company_name)
            ),
            data: InvoiceData {
                invoice: InvoiceDocument {
                    name: settings.title.clone(),
                    header,
                    currency: settings.currency_symbol.clone(),
                    customer,
                    seller: config.seller.fields(),
                    details,
                },
            },
        })
    }
}
