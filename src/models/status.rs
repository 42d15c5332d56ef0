use std::fmt;

use crate::models::LogEntry;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Status {
    #[default]
    Idle,
    Running,
    Completed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Idle => "idle",
            Status::Running => "running",
            Status::Completed => "completed",
        };
        f.write_str(label)
    }
}

/// Consistent view of the driver state at one moment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub status: Status,
    pub progress: u8,
    pub log: Vec<LogEntry>,
}

impl Snapshot {
    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }
}
