//! Call history use cases

pub mod list;

pub use list::{CallHistoryItem, ListHistoryInput, ListHistoryOutput, ListHistoryUseCase};
