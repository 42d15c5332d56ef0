use std::path::{Path, PathBuf};

use chrono::Local;
use colored::{ColoredString, Colorize};
use tokio::{
    fs::{File, OpenOptions, create_dir_all},
    io::AsyncWriteExt,
    sync::mpsc,
    task::JoinHandle,
};

use crate::models::{LogEntry, Severity};

/// Collects emitted log entries on a background task and writes them to a
/// per-run transcript file as they arrive.
pub struct Transcript {
    tx: mpsc::Sender<LogEntry>,
    handle: JoinHandle<anyhow::Result<Vec<String>>>,
    path: PathBuf,
}

impl Transcript {
    pub async fn create(dir: impl AsRef<Path>, buffer: usize) -> anyhow::Result<Self> {
        let dir = dir.as_ref();
        create_dir_all(dir).await?;

        let stamp = Local::now().format("%Y-%m-%d_%H-%M-%S%.3f").to_string();
        let (path, mut file) = Self::open_unique(dir, &stamp).await?;

        let (tx, mut rx) = mpsc::channel::<LogEntry>(buffer.max(1));
        let handle = tokio::spawn(async move {
            let mut lines = Vec::new();
            while let Some(entry) = rx.recv().await {
                let line = entry.plain_format();
                file.write_all(format!("{line}\n").as_bytes()).await?;
                lines.push(line);
            }
            file.flush().await?;
            Ok(lines)
        });

        Ok(Self { tx, handle, path })
    }

    /// Never reuses an existing file; a clash gets a numeric suffix.
    async fn open_unique(dir: &Path, stamp: &str) -> anyhow::Result<(PathBuf, File)> {
        for attempt in 0u32.. {
            let name = match attempt {
                0 => format!("ingest_{stamp}.log"),
                n => format!("ingest_{stamp}-{n}.log"),
            };
            let path = dir.join(name);

            match OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(file) => return Ok((path, file)),
                Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(err) => return Err(err.into()),
            }
        }

        anyhow::bail!("No free transcript name left in '{}'", dir.display())
    }

    pub fn tx(&self) -> mpsc::Sender<LogEntry> {
        self.tx.clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Closes the channel and waits for every queued entry to hit the file.
    pub async fn finish(self) -> anyhow::Result<(PathBuf, Vec<String>)> {
        drop(self.tx);
        let lines = self
            .handle
            .await
            .map_err(|err| anyhow::anyhow!("Transcript task failed: {err}"))??;
        Ok((self.path, lines))
    }
}

impl LogEntry {
    pub fn terminal_format(&self) -> String {
        let stamp = format!("[{}]", self.timestamp).bright_black();
        format!("{stamp} {}", self.styled_message())
    }

    fn styled_message(&self) -> ColoredString {
        match self.severity {
            Severity::Info => self.message.as_str().dimmed(),
            Severity::Success => self.message.as_str().green(),
            Severity::Error => self.message.as_str().red().bold(),
        }
    }

    pub fn plain_format(&self) -> String {
        format!(
            "[{}] [{}] {}",
            self.timestamp,
            self.severity.label(),
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tempfile::tempdir;

    use super::*;
    use crate::models::ScriptStep;

    fn entry(id: u64, message: &str, severity: Severity) -> LogEntry {
        let step = ScriptStep {
            message: message.to_string(),
            severity,
            delay: Duration::ZERO,
            progress: 0,
        };
        LogEntry::emit(id, &step)
    }

    #[test]
    fn plain_format_tags_severity() {
        let line = entry(1, "Reading dbo.DailyOutput...", Severity::Info).plain_format();

        assert!(line.ends_with("[INFO] Reading dbo.DailyOutput..."));
        assert!(line.starts_with('['));
    }

    #[test]
    fn terminal_format_keeps_message() {
        colored::control::set_override(false);
        let line = entry(1, "Connection refused", Severity::Error).terminal_format();

        assert!(line.ends_with("Connection refused"));
    }

    #[test]
    fn info_is_dimmed_and_outcomes_are_colored() {
        assert_eq!(
            entry(1, "Reading dbo.DailyOutput...", Severity::Info).styled_message(),
            "Reading dbo.DailyOutput...".dimmed()
        );
        assert_eq!(
            entry(2, "Loaded", Severity::Success).styled_message(),
            "Loaded".green()
        );
        assert_eq!(
            entry(3, "Refused", Severity::Error).styled_message(),
            "Refused".red().bold()
        );
    }

    #[tokio::test]
    async fn transcript_writes_every_entry_in_order() {
        let dir = tempdir().unwrap();
        let transcript = Transcript::create(dir.path(), 4).await.unwrap();
        let tx = transcript.tx();

        for (id, message) in ["one", "two", "three"].into_iter().enumerate() {
            tx.send(entry(id as u64, message, Severity::Success))
                .await
                .unwrap();
        }
        drop(tx);

        let (path, lines) = transcript.finish().await.unwrap();
        let written = tokio::fs::read_to_string(&path).await.unwrap();

        assert_eq!(lines.len(), 3);
        assert_eq!(written.lines().collect::<Vec<_>>(), lines);
        assert!(lines[2].ends_with("[SUCCESS] three"));
    }

    #[tokio::test]
    async fn transcripts_in_the_same_instant_do_not_overwrite() {
        let dir = tempdir().unwrap();
        let first = Transcript::create(dir.path(), 1).await.unwrap();
        let second = Transcript::create(dir.path(), 1).await.unwrap();
        let third = Transcript::open_unique(dir.path(), "fixed").await.unwrap().0;
        let fourth = Transcript::open_unique(dir.path(), "fixed").await.unwrap().0;

        assert_ne!(first.path(), second.path());
        assert_ne!(third, fourth);
        assert!(fourth.ends_with("ingest_fixed-1.log"));

        first.tx().send(entry(1, "kept", Severity::Info)).await.unwrap();
        let (first_path, _) = first.finish().await.unwrap();
        second.finish().await.unwrap();

        let written = tokio::fs::read_to_string(&first_path).await.unwrap();
        assert!(written.contains("[INFO] kept"));
    }
}
