//! Pending-reminder scan pipeline

pub mod owner;
pub mod scanner;
pub mod template;

pub use scanner::{ReminderScanner, ScanSummary};
