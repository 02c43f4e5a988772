use rust_decimal::Decimal;

use crate::error::{InvoiceError, Result};
use crate::record::{parse_quantity, LineItem, NewInvoice};

/// What the user is asked next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question {
    Text(&'static str),
    Price(&'static str),
    Confirm(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Text(String),
    Price(Decimal),
    Confirm(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    CompanyName,
    CustomerName,
    CustomerAddress,
    CustomerId,
    AddItem,
    ItemDescription,
    ItemQuantity,
    ItemTotal,
    Complete,
}

/// Linear question sequence for a new invoice, with a repeatable item loop
#[derive(Debug, Clone)]
pub struct Collector {
    step: Step,
    invoice: NewInvoice,
    description: String,
    quantity: String,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    pub fn new() -> Self {
        Self {
            step: Step::CompanyName,
            invoice: NewInvoice::default(),
            description: String::new(),
            quantity: String::new(),
        }
    }

    /// The current question, or `None` once every answer is in
    pub fn question(&self) -> Option<Question> {
        let question = match self.step {
            Step::CompanyName => Question::Text("Enter the company name:"),
            Step::CustomerName => Question::Text("Enter customer name:"),
            Step::CustomerAddress => Question::Text("Enter customer address:"),
            Step::CustomerId => Question::Text("Enter customer ID:"),
            Step::AddItem => Question::Confirm("Add an invoice item?"),
            Step::ItemDescription => Question::Text("Enter item description:"),
            Step::ItemQuantity => Question::Text("Enter quantity:"),
            Step::ItemTotal => Question::Price("Enter total price:"),
            Step::Complete => return None,
        };
        Some(question)
    }

    pub fn is_complete(&self) -> bool {
        self.step == Step::Complete
    }

    /// Record the answer to the current question and advance
    pub fn answer(&mut self, answer: Answer) -> Result<()> {
        self.step = match (self.step, answer) {
            (Step::CompanyName, Answer::Text(s)) => {
                self.invoice.company_name = s;
                Step::CustomerName
            }
            (Step::CustomerName, Answer::Text(s)) => {
                self.invoice.customer.name = s;
                Step::CustomerAddress
            }
            (Step::CustomerAddress, Answer::Text(s)) => {
                self.invoice.customer.address = s;
                Step::CustomerId
            }
            (Step::CustomerId, Answer::Text(s)) => {
                self.invoice.customer.id = s;
                Step::AddItem
            }
            (Step::AddItem, Answer::Confirm(true)) => Step::ItemDescription,
            (Step::AddItem, Answer::Confirm(false)) => Step::Complete,
            (Step::ItemDescription, Answer::Text(s)) => {
                self.description = s;
                Step::ItemQuantity
            }
            (Step::ItemQuantity, Answer::Text(s)) => {
                self.quantity = s;
                Step::ItemTotal
            }
            (Step::ItemTotal, Answer::Price(total)) => {
                self.invoice.items.push(LineItem {
                    description: std::mem::take(&mut self.description),
                    quantity: parse_quantity(&std::mem::take(&mut self.quantity)),
                    total,
                });
                Step::AddItem
            }
            _ => return Err(InvoiceError::UnexpectedAnswer),
        };
        Ok(())
    }

    /// The collected invoice; `None` until the sequence is complete
    pub fn finish(self) -> Option<NewInvoice> {
        self.is_complete().then_some(self.invoice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CellValue;
    use rust_decimal_macros::dec;

    fn text(s: &str) -> Answer {
        Answer::Text(s.to_string())
    }

    fn customer_answers(collector: &mut Collector) {
        for answer in ["Acme Corp", "Wile E. Coyote", "1 Desert Rd", "C-42"] {
            collector.answer(text(answer)).unwrap();
        }
    }

    #[test]
    fn asks_customer_questions_in_order() {
        let mut collector = Collector::new();
        let mut asked = Vec::new();
        for answer in ["Acme", "Name", "Address", "ID"] {
            asked.push(collector.question().unwrap());
            collector.answer(text(answer)).unwrap();
        }
        assert_eq!(
            asked,
            vec![
                Question::Text("Enter the company name:"),
                Question::Text("Enter customer name:"),
                Question::Text("Enter customer address:"),
                Question::Text("Enter customer ID:"),
            ]
        );
        assert_eq!(
            collector.question(),
            Some(Question::Confirm("Add an invoice item?"))
        );
    }

    #[test]
    fn collects_items_until_declined() {
        let mut collector = Collector::new();
        customer_answers(&mut collector);

        for (description, quantity, total) in
            [("Anvil", "2", dec!(100)), ("Rope", "lots", dec!(4.5))]
        {
            collector.answer(Answer::Confirm(true)).unwrap();
            collector.answer(text(description)).unwrap();
            collector.answer(text(quantity)).unwrap();
            assert_eq!(
                collector.question(),
                Some(Question::Price("Enter total price:"))
            );
            collector.answer(Answer::Price(total)).unwrap();
        }
        collector.answer(Answer::Confirm(false)).unwrap();

        assert!(collector.question().is_none());
        let invoice = collector.finish().unwrap();
        assert_eq!(invoice.company_name, "Acme Corp");
        assert_eq!(invoice.customer.id, "C-42");
        assert_eq!(invoice.items.len(), 2);
        assert_eq!(invoice.items[0].quantity, CellValue::Integer(2));
        assert_eq!(invoice.items[1].quantity, CellValue::Empty);
        assert_eq!(invoice.items[1].total, dec!(4.5));
    }

    #[test]
    fn declining_first_item_gives_empty_invoice() {
        let mut collector = Collector::new();
        customer_answers(&mut collector);
        collector.answer(Answer::Confirm(false)).unwrap();

        let invoice = collector.finish().unwrap();
        assert!(invoice.items.is_empty());
    }

    #[test]
    fn wrong_answer_kind_does_not_advance() {
        let mut collector = Collector::new();
        assert!(matches!(
            collector.answer(Answer::Confirm(true)),
            Err(InvoiceError::UnexpectedAnswer)
        ));
        assert_eq!(
            collector.question(),
            Some(Question::Text("Enter the company name:"))
        );
    }

    #[test]
    fn unfinished_collector_yields_nothing() {
        let mut collector = Collector::new();
        collector.answer(text("Acme")).unwrap();
        assert!(collector.finish().is_none());
    }
}
