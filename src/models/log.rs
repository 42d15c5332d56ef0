use chrono::Local;

use crate::models::{ScriptStep, Severity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Unique for the lifetime of the driver, increasing in emission order.
    pub id: u64,
    pub timestamp: String,
    pub message: String,
    pub severity: Severity,
}

impl LogEntry {
    pub fn emit(id: u64, step: &ScriptStep) -> Self {
        Self {
            id,
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            message: step.message.clone(),
            severity: step.severity,
        }
    }
}
