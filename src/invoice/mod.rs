mod generator;
mod report;

pub use generator::Invoicer;
pub use report::{BatchFailure, BatchReport};
