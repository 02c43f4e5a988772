use std::fmt;

use chrono::Local;
use inquire::{Confirm, CustomType, InquireError, Select, Text};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{InvoiceError, Result};
use crate::invoice::Invoicer;
use crate::pdf::Renderer;
use crate::prompt::collector::{Answer, Collector, Question};
use crate::record::NewInvoice;

/// Menu entries of the interactive session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    RenderOne,
    RenderAll,
    Exit,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::Create,
        Action::RenderOne,
        Action::RenderAll,
        Action::Exit,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::Create => "Create a new invoice",
            Action::RenderOne => "Generate PDF for a single invoice",
            Action::RenderAll => "Generate PDFs for all existing invoices",
            Action::Exit => "Exit",
        };
        f.write_str(label)
    }
}

fn ask(question: Question, currency: &str) -> Result<Answer> {
    let answer = match question {
        Question::Text(message) => Answer::Text(Text::new(message).prompt()?),
        Question::Price(message) => {
            let help = format!("Amount in {currency}");
            Answer::Price(
                CustomType::<Decimal>::new(message)
                    .with_help_message(&help)
                    .with_error_message("Please type a valid amount, e.g. 120.50")
                    .prompt()?,
            )
        }
        Question::Confirm(message) => {
            Answer::Confirm(Confirm::new(message).with_default(true).prompt()?)
        }
    };
    Ok(answer)
}

/// Ask every question of a new invoice
pub fn collect_invoice(currency: &str) -> Result<NewInvoice> {
    let mut collector = Collector::new();
    while let Some(question) = collector.question() {
        collector.answer(ask(question, currency)?)?;
    }
    collector.finish().ok_or(InvoiceError::UnexpectedAnswer)
}

fn create_invoice<R: Renderer>(invoicer: &Invoicer<R>) -> Result<()> {
    let invoice = collect_invoice(&invoicer.config().invoice.currency_symbol)?;
    let (record, json_path) = invoicer.create(invoice, Local::now().date_naive())?;
    println!("JSON data saved: {}", json_path.display());

    match invoicer.render(&record) {
        Ok(pdf_path) => println!("Invoice generated: {}", pdf_path.display()),
        Err(e) => {
            warn!("failed to render {}: {}", record.file_name, e);
            eprintln!("Error generating PDF for {}: {e}", record.file_name);
        }
    }
    Ok(())
}

fn render_selected<R: Renderer>(invoicer: &Invoicer<R>) -> Result<()> {
    let mut names = invoicer.store().list()?;
    if names.is_empty() {
        println!("No existing invoices found.");
        return Ok(());
    }
    names.sort();

    let selected = Select::new("Select an invoice to generate:", names).prompt()?;
    let pdf_path = invoicer.render_one(&selected)?;
    println!("Invoice generated: {}", pdf_path.display());
    Ok(())
}

fn render_all<R: Renderer>(invoicer: &Invoicer<R>) -> Result<()> {
    let report = invoicer.render_all()?;
    report.print();
    Ok(())
}

/// Menu loop; returns when the user picks Exit or interrupts a prompt
pub fn run_session<R: Renderer>(invoicer: &Invoicer<R>) -> Result<()> {
    loop {
        let action = match Select::new("What would you like to do?", Action::ALL.to_vec()).prompt()
        {
            Ok(action) => action,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                Action::Exit
            }
            Err(e) => return Err(e.into()),
        };

        let outcome = match action {
            Action::Create => create_invoice(invoicer),
            Action::RenderOne => render_selected(invoicer),
            Action::RenderAll => render_all(invoicer),
            Action::Exit => break,
        };

        match outcome {
            Ok(()) => {}
            Err(InvoiceError::Prompt(InquireError::OperationInterrupted)) => break,
            Err(InvoiceError::Prompt(InquireError::OperationCanceled)) => println!("Cancelled."),
            Err(e @ InvoiceError::DirectoryCreation { .. }) => return Err(e),
            Err(e) => {
                debug!("{action:?} failed: {e:?}");
                eprintln!("Error: {e}");
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}
