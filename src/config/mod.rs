mod seller;

pub use seller::{Config, InvoiceSettings, PathSettings, Seller};

use crate::error::{InvoiceError, Result};
use chrono::format::{Item, StrftimeItems};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE: &str = "config.toml";

/// Per-user config file, consulted when the root has none
pub fn user_config_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", "invoicer").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve a configured directory against the root
pub fn resolve_dir(root: &Path, setting: &str) -> PathBuf {
    let path = expand_path(setting);
    if path.is_absolute() {
        path
    } else {
        root.join(path)
    }
}

/// Load the config for a root directory.
///
/// `<root>/config.toml` wins over the per-user file; with neither present the
/// built-in defaults apply.
pub fn load_config(root: &Path) -> Result<Config> {
    let local = root.join(CONFIG_FILE);
    let candidate = if local.exists() {
        Some(local)
    } else {
        user_config_file().filter(|p| p.exists())
    };

    let config = match candidate {
        Some(path) => {
            debug!("loading config from {}", path.display());
            parse_config(&path)?
        }
        None => {
            debug!("no config file found, using defaults");
            Config::default()
        }
    };

    check_date_format("invoice.number_format", &config.invoice.number_format)?;
    check_date_format("invoice.date_format", &config.invoice.date_format)?;
    Ok(config)
}

fn parse_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| InvoiceError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

fn check_date_format(key: &str, format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(InvoiceError::ConfigInvalid(format!(
            "{key} = '{format}' is not a valid date format"
        )));
    }
    Ok(())
}

/// Write the config template into the root
pub fn write_template(root: &Path) -> Result<PathBuf> {
    let path = root.join(CONFIG_FILE);
    if path.exists() {
        return Err(InvoiceError::AlreadyInitialized(path));
    }
    fs::create_dir_all(root)?;
    fs::write(&path, CONFIG_TEMPLATE)?;
    Ok(path)
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"# Seller details printed on every invoice
[seller]
name = "YOUR NAME"
address = "YOUR ADDRESS"
registration_label = "RELEVANT REGISTRATION NUMBER"
registration_number = "YOUR REGISTRATION NUMBER"
bank_account = "YOUR BANK ACCOUNT"

[invoice]
title = "INVOICE"
currency_symbol = "$"
number_format = "INV-%Y%m%d"   # strftime pattern, e.g., INV-20260115
date_format = "%B %d, %Y"      # e.g., January 15, 2026

[paths]
records_dir = "invoices"             # JSON records, relative to the root
output_dir = "generated_invoices"    # rendered PDFs
"#;
