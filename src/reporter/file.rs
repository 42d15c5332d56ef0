use std::path::Path;

use tokio::{fs::OpenOptions, io::AsyncWriteExt};

use crate::models::{RunReport, Severity};

pub struct FileReporter;

impl FileReporter {
    /// Appends the run summary below the transcript lines already in `path`.
    pub async fn append(report: &RunReport, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;

        file.write_all(Self::render(report).as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    fn render(report: &RunReport) -> String {
        let mut buffer = String::new();

        buffer.push_str("\n--- Ingestion Report ---\n");
        buffer.push_str(&format!(
            "Status: {} | Progress: {}% | Duration {:.2}s\n",
            report.status,
            report.progress,
            report.elapsed.as_secs_f64()
        ));

        for severity in [Severity::Info, Severity::Success, Severity::Error] {
            buffer.push_str(&format!(
                "{}: {}\n",
                severity.label(),
                report.count(severity)
            ));
        }

        buffer.push_str(if report.is_success() {
            "Result: SUCCESS\n"
        } else {
            "Result: INCOMPLETE\n"
        });

        buffer
    }
}
