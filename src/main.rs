use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing_subscriber::EnvFilter;

use invoicer::config::{self, load_config, resolve_dir};
use invoicer::error::Result;
use invoicer::prompt::run_session;
use invoicer::record::ensure_dir;
use invoicer::{Invoicer, TypstRenderer};

#[derive(Parser)]
#[command(name = "invoicer")]
#[command(version, about = "Collect, store and render invoices", long_about = None)]
struct Cli {
    /// Directory holding config.toml and the invoice folders (default: current directory)
    #[arg(short = 'C', long, global = true)]
    root: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Without a subcommand an interactive menu is started
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config.toml template and create the invoice folders
    Init,

    /// List stored invoice records
    List,

    /// Render the PDF for a single stored invoice
    Render {
        /// Record file name or stem (e.g., acme-corp-invoice)
        invoice: String,
    },

    /// Render PDFs for every stored invoice
    RenderAll,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set up logging: {e}");
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = match cli.root {
        Some(p) => p,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Some(Commands::Init) => cmd_init(&root),
        None => run_session(&open(&root)?),
        Some(Commands::List) => cmd_list(&open(&root)?),
        Some(Commands::Render { invoice }) => cmd_render(&open(&root)?, &invoice),
        Some(Commands::RenderAll) => cmd_render_all(&open(&root)?),
    }
}

/// Load the config and create the working directories
fn open(root: &Path) -> Result<Invoicer<TypstRenderer>> {
    let config = load_config(root)?;
    Invoicer::open(root, config, TypstRenderer::new())
}

/// Initialize the root with a config template and working directories
fn cmd_init(root: &Path) -> Result<()> {
    let path = config::write_template(root)?;
    let config = load_config(root)?;

    ensure_dir(&resolve_dir(root, &config.paths.records_dir))?;
    ensure_dir(&resolve_dir(root, &config.paths.output_dir))?;

    println!("Initialized invoicer at: {}", root.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit your seller details:  $EDITOR {}", path.display());
    println!("  2. Run 'invoicer' to create your first invoice");

    Ok(())
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "FILE")]
    file: String,
    #[tabled(rename = "NUMBER")]
    number: String,
    #[tabled(rename = "CUSTOMER")]
    customer: String,
    #[tabled(rename = "TOTAL")]
    total: String,
}

/// List stored records; malformed ones are flagged, not fatal
fn cmd_list(invoicer: &Invoicer<TypstRenderer>) -> Result<()> {
    let mut names = invoicer.store().list()?;
    if names.is_empty() {
        println!("No existing invoices found.");
        return Ok(());
    }
    names.sort();

    let rows: Vec<RecordRow> = names
        .iter()
        .map(|name| match invoicer.store().load(name) {
            Ok(record) => {
                let doc = record.document();
                RecordRow {
                    file: name.clone(),
                    number: doc
                        .header_value("number")
                        .map(ToString::to_string)
                        .unwrap_or_default(),
                    customer: doc.customer_name().unwrap_or_default().to_string(),
                    total: doc
                        .total()
                        .map(|t| format!("{}{}", doc.currency, t))
                        .unwrap_or_default(),
                }
            }
            Err(e) => {
                tracing::warn!("{e}");
                RecordRow {
                    file: name.clone(),
                    number: "(malformed)".to_string(),
                    customer: String::new(),
                    total: String::new(),
                }
            }
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!();
    println!("Total: {} invoices", names.len());

    Ok(())
}

fn cmd_render(invoicer: &Invoicer<TypstRenderer>, name: &str) -> Result<()> {
    let pdf_path = invoicer.render_one(name)?;
    println!("Invoice generated: {}", pdf_path.display());
    Ok(())
}

fn cmd_render_all(invoicer: &Invoicer<TypstRenderer>) -> Result<()> {
    let report = invoicer.render_all()?;
    report.print();
    Ok(())
}
