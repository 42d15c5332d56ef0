use std::time::Duration;

use crate::models::{LogEntry, Severity, Snapshot, Status};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub status: Status,
    pub progress: u8,
    pub entries: Vec<LogEntry>,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn new(snapshot: Snapshot, elapsed: Duration) -> Self {
        Self {
            status: snapshot.status,
            progress: snapshot.progress,
            entries: snapshot.log,
            elapsed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Completed
            && self.progress == 100
            && self.count(Severity::Error) == 0
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.severity == severity)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Script, ScriptStep};

    fn completed_snapshot(steps: &[ScriptStep]) -> Snapshot {
        Snapshot {
            status: Status::Completed,
            progress: 100,
            log: steps
                .iter()
                .enumerate()
                .map(|(id, step)| LogEntry::emit(id as u64, step))
                .collect(),
        }
    }

    #[test]
    fn counts_entries_by_severity() {
        let script = Script::default();
        let report = RunReport::new(
            completed_snapshot(script.steps()),
            Duration::from_secs(5),
        );

        assert_eq!(report.count(Severity::Info), 6);
        assert_eq!(report.count(Severity::Success), 4);
        assert_eq!(report.count(Severity::Error), 0);
        assert!(report.is_success());
    }

    #[test]
    fn error_entry_marks_run_unsuccessful() {
        let step = ScriptStep {
            message: "Connection refused".to_string(),
            severity: Severity::Error,
            delay: Duration::from_millis(10),
            progress: 100,
        };
        let report = RunReport::new(completed_snapshot(&[step]), Duration::from_millis(10));

        assert!(!report.is_success());
    }

    #[test]
    fn unfinished_run_is_not_success() {
        let report = RunReport::new(Snapshot::default(), Duration::ZERO);
        assert!(!report.is_success());
    }
}
