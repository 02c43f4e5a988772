mod collector;
mod menu;

pub use collector::{Answer, Collector, Question};
pub use menu::{collect_invoice, run_session, Action};
