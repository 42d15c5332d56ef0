use indicatif::{ProgressBar, ProgressStyle};

use crate::models::{LogEntry, Snapshot, Status};

pub struct IngestionUI {
    bar: ProgressBar,
}

impl IngestionUI {
    pub fn new() -> anyhow::Result<Self> {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::with_template("  {elapsed_precise} {bar:40.white/black} {pos:>3}% {msg}")?
                .progress_chars("·  "),
        );
        bar.set_message("Run ETL Pipeline");

        Ok(Self { bar })
    }

    pub fn log(&self, entry: &LogEntry) {
        self.bar.println(entry.terminal_format());
    }

    pub fn update(&self, snapshot: &Snapshot) -> anyhow::Result<()> {
        self.bar.set_position(u64::from(snapshot.progress));

        match snapshot.status {
            Status::Idle => {}
            Status::Running => {
                self.bar.set_style(
                    ProgressStyle::with_template(
                        "  {elapsed_precise} {bar:40.cyan/blue} {pos:>3}% {msg}",
                    )?
                    .progress_chars("#> "),
                );
                self.bar.set_message("Running...");
            }
            Status::Completed => self.succeed()?,
        }

        Ok(())
    }

    fn succeed(&self) -> anyhow::Result<()> {
        self.bar.set_position(100);
        self.bar.set_style(
            ProgressStyle::with_template("  {elapsed_precise} {bar:40.green/green} DONE {msg}")?
                .progress_chars("##"),
        );
        self.bar.finish_with_message("Done!");
        Ok(())
    }
}
