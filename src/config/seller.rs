use serde::{Deserialize, Serialize};

use crate::record::{Field, FieldValue};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub seller: Seller,
    #[serde(default)]
    pub invoice: InvoiceSettings,
    #[serde(default)]
    pub paths: PathSettings,
}

/// Operator identity printed on every invoice
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct Seller {
    pub name: String,
    pub address: String,
    pub registration_label: String,
    pub registration_number: String,
    pub bank_account: String,
}

impl Default for Seller {
    fn default() -> Self {
        Self {
            name: "YOUR NAME".to_string(),
            address: "YOUR ADDRESS".to_string(),
            registration_label: "RELEVANT REGISTRATION NUMBER".to_string(),
            registration_number: "YOUR REGISTRATION NUMBER".to_string(),
            bank_account: "YOUR BANK ACCOUNT".to_string(),
        }
    }
}

impl Seller {
    /// Label/value block stored in each record's `seller` list
    pub fn fields(&self) -> Vec<Field> {
        vec![
            Field::new(
                "From",
                FieldValue::Lines(vec![self.name.clone(), self.address.clone()]),
            ),
            Field::new(
                &self.registration_label,
                FieldValue::Text(self.registration_number.clone()),
            ),
            Field::new("Bank Account", FieldValue::Text(self.bank_account.clone())),
        ]
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct InvoiceSettings {
    pub title: String,
    pub currency_symbol: String,
    /// strftime pattern applied to the creation date
    pub number_format: String,
    pub date_format: String,
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        Self {
            title: "INVOICE".to_string(),
            currency_symbol: "$".to_string(),
            number_format: "INV-%Y%m%d".to_string(),
            date_format: "%B %d, %Y".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PathSettings {
    pub records_dir: String,
    pub output_dir: String,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            records_dir: "invoices".to_string(),
            output_dir: "generated_invoices".to_string(),
        }
    }
}
