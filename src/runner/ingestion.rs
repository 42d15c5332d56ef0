use std::{path::PathBuf, time::Instant};

use tracing::debug;

use crate::{
    driver::SimulationDriver,
    logger::Transcript,
    models::{RunReport, Status},
    reporter::FileReporter,
    ui::IngestionUI,
};

/// Drives one ingestion run end to end: starts the simulation, mirrors its
/// log onto the terminal and the transcript, and reports once it completes.
pub struct IngestionRunner {
    driver: SimulationDriver,
    transcript_dir: PathBuf,
}

impl IngestionRunner {
    pub fn new(driver: SimulationDriver, transcript_dir: impl Into<PathBuf>) -> Self {
        Self {
            driver,
            transcript_dir: transcript_dir.into(),
        }
    }

    pub async fn run(&self) -> anyhow::Result<(RunReport, PathBuf)> {
        if self.driver.status() == Status::Completed {
            self.driver.reset().await?;
        }

        let transcript = Transcript::create(&self.transcript_dir, 100).await?;
        let log_tx = transcript.tx();
        let ui = IngestionUI::new()?;
        let mut updates = self.driver.subscribe();
        let timer = Instant::now();

        let status = self.driver.start().await?;
        if status != Status::Running {
            anyhow::bail!("Ingestion could not be started (driver is {status})");
        }
        debug!(path = %transcript.path().display(), "streaming run into transcript");

        let mut seen = 0;
        let snapshot = loop {
            let snapshot = updates.borrow_and_update().clone();

            for entry in snapshot.log.iter().skip(seen) {
                ui.log(entry);
                log_tx
                    .send(entry.clone())
                    .await
                    .map_err(|_| anyhow::anyhow!("Transcript writer stopped"))?;
            }
            seen = snapshot.log.len();
            ui.update(&snapshot)?;

            if snapshot.is_completed() {
                break snapshot;
            }

            updates
                .changed()
                .await
                .map_err(|_| anyhow::anyhow!("Simulation driver stopped mid-run"))?;
        };

        drop(log_tx);
        let (path, _) = transcript.finish().await?;

        let report = RunReport::new(snapshot, timer.elapsed());
        FileReporter::append(&report, &path).await?;

        Ok((report, path))
    }

    pub fn driver(&self) -> &SimulationDriver {
        &self.driver
    }
}
