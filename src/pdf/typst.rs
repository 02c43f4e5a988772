use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{InvoiceError, Result};
use crate::pdf::Renderer;
use crate::record::InvoiceDocument;

/// Embedded Typst template for invoice generation
/// Uses a placeholder that gets replaced with the actual JSON file path
const INVOICE_TEMPLATE: &str = r##"// Invoice Template
// Data is loaded from JSON file

#let doc = json("DATA_JSON_PATH")

#set page(
  paper: "us-letter",
  margin: (top: 1in, bottom: 1in, left: 1in, right: 1in),
  numbering: "1 / 1",
)

#set text(font: "Helvetica", size: 10pt)

// A field value is a single string or a list of lines
#let lines(value) = {
  if type(value) == array {
    value.map(line => [#line]).join(linebreak())
  } else if value == none {
    []
  } else {
    [#str(value)]
  }
}

#let cell-text(cell) = {
  let body = lines(cell.value)
  if cell.at("price", default: false) [#doc.currency#body] else { body }
}

#let party(fields) = stack(
  spacing: 0.8em,
  ..fields.map(f => [
    #text(weight: "bold")[#f.label] \
    #lines(f.value)
  ]),
)

// Title and invoice details
#grid(
  columns: (1fr, 1fr),
  align: (left, right),
  [#text(size: 24pt, weight: "bold")[#doc.name]],
  table(
    columns: (auto, auto),
    stroke: none,
    align: (right, left),
    inset: 2pt,
    ..doc.header.map(f => ([*#upper(f.label):*], lines(f.value))).flatten(),
  ),
)

#v(1em)
#line(length: 100%, stroke: 0.5pt + gray)
#v(1em)

// Customer and seller blocks
#grid(
  columns: (1fr, 1fr),
  gutter: 2em,
  party(doc.customer),
  party(doc.seller),
)

#v(1.5em)

// Line items; the header row repeats on every page
#table(
  columns: (1fr, auto, auto),
  align: (left, right, right),
  stroke: (x, y) => if y == 0 { (bottom: 1pt + black) } else { (bottom: 0.5pt + gray) },
  inset: 8pt,
  fill: (x, y) => if y == 0 { luma(240) } else { none },
  table.header(..doc.details.header.map(c => [*#cell-text(c)*])),
  ..doc.details.parts.map(row => row.map(cell-text)).flatten(),
)

#v(1em)

// Totals
#align(right)[
  #table(
    columns: (auto, auto),
    stroke: none,
    align: (right, right),
    inset: 6pt,
    table.hline(stroke: 1pt),
    ..doc.details.total.map(t => ([*#t.label:*], [*#cell-text(t)*])).flatten(),
  )
]
"##;

/// Renders invoices with the Typst CLI
#[derive(Debug, Clone)]
pub struct TypstRenderer {
    scratch_dir: PathBuf,
}

impl Default for TypstRenderer {
    fn default() -> Self {
        Self::with_scratch_dir(std::env::temp_dir().join("invoicer"))
    }
}

impl TypstRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory holding the per-render template and data files
    pub fn with_scratch_dir(scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
        }
    }
}

/// File-name-safe base for the scratch files of one render
fn scratch_name(output: &Path) -> String {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("invoice");
    stem.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn template_for(json_name: &str) -> String {
    INVOICE_TEMPLATE.replace("DATA_JSON_PATH", json_name)
}

impl Renderer for TypstRenderer {
    fn render(&self, document: &InvoiceDocument, output: &Path) -> Result<()> {
        // Check if typst is available
        if Command::new("typst").arg("--version").output().is_err() {
            return Err(InvoiceError::TypstNotFound);
        }

        fs::create_dir_all(&self.scratch_dir)?;

        let base = scratch_name(output);
        let json_name = format!("{base}.json");
        let json_data =
            serde_json::to_string(document).map_err(|e| InvoiceError::Render(e.to_string()))?;
        let json_path = self.scratch_dir.join(&json_name);
        fs::write(&json_path, &json_data)?;

        let template_path = self.scratch_dir.join(format!("{base}.typ"));
        fs::write(&template_path, template_for(&json_name))?;

        debug!(
            "compiling {} -> {}",
            template_path.display(),
            output.display()
        );
        let result = Command::new("typst")
            .arg("compile")
            .arg("--root")
            .arg(&self.scratch_dir)
            .arg(&template_path)
            .arg(output)
            .output();

        let _ = fs::remove_file(&template_path);
        let _ = fs::remove_file(&json_path);

        let result = result?;
        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(InvoiceError::Render(stderr.trim().to_string()));
        }

        Ok(())
    }
}
