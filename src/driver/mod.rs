mod scheduler;

use std::sync::Arc;

use tokio::{
    sync::{mpsc, oneshot, watch},
    time::Instant,
};
use tracing::{debug, info, warn};

use crate::models::{LogEntry, Script, Snapshot, Status};

pub(crate) enum Message {
    Start { reply: oneshot::Sender<Status> },
    Reset { reply: oneshot::Sender<Status> },
    StepFired { run: u64, index: usize },
}

/// Handle to the simulated ingestion run.
///
/// All state lives in a single driver task; commands and timer firings are
/// queued on one channel and applied one at a time. Readers see the last
/// published [`Snapshot`].
#[derive(Clone)]
pub struct SimulationDriver {
    tx: mpsc::Sender<Message>,
    state_rx: watch::Receiver<Snapshot>,
    script: Arc<Script>,
}

impl SimulationDriver {
    /// Spawns the driver task. Must be called from within a tokio runtime.
    pub fn new(script: Script, buffer: usize) -> Self {
        let script = Arc::new(script);
        let (tx, rx) = mpsc::channel::<Message>(buffer.max(1));
        let (state_tx, state_rx) = watch::channel(Snapshot::default());

        let state = DriverState {
            script: script.clone(),
            tx: tx.downgrade(),
            state_tx,
            status: Status::Idle,
            progress: 0,
            log: Vec::new(),
            run: 0,
            next_id: 0,
        };
        tokio::spawn(state.serve(rx));

        Self {
            tx,
            state_rx,
            script,
        }
    }

    /// Idle starts a run, running is ignored, completed resets to idle.
    pub async fn start(&self) -> anyhow::Result<Status> {
        self.request(|reply| Message::Start { reply }).await
    }

    /// Clears a finished run back to idle. A run in flight is left alone.
    pub async fn reset(&self) -> anyhow::Result<Status> {
        self.request(|reply| Message::Reset { reply }).await
    }

    pub fn status(&self) -> Status {
        self.state_rx.borrow().status
    }

    pub fn progress(&self) -> u8 {
        self.state_rx.borrow().progress
    }

    pub fn log(&self) -> Vec<LogEntry> {
        self.state_rx.borrow().log.clone()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.state_rx.clone()
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    /// Waits until the current run has completed and returns its final state.
    pub async fn completed(&self) -> anyhow::Result<Snapshot> {
        let mut rx = self.subscribe();
        let snapshot = rx
            .wait_for(Snapshot::is_completed)
            .await
            .map_err(|_| anyhow::anyhow!("Simulation driver stopped before completing"))?;
        Ok(snapshot.clone())
    }

    async fn request(
        &self,
        message: impl FnOnce(oneshot::Sender<Status>) -> Message,
    ) -> anyhow::Result<Status> {
        let (reply, response) = oneshot::channel();

        self.tx
            .send(message(reply))
            .await
            .map_err(|_| anyhow::anyhow!("Simulation driver has stopped"))?;

        response
            .await
            .map_err(|err| anyhow::anyhow!("Simulation driver dropped the request: {err}"))
    }
}

struct DriverState {
    script: Arc<Script>,
    tx: mpsc::WeakSender<Message>,
    state_tx: watch::Sender<Snapshot>,
    status: Status,
    progress: u8,
    log: Vec<LogEntry>,
    run: u64,
    next_id: u64,
}

impl DriverState {
    async fn serve(mut self, mut rx: mpsc::Receiver<Message>) {
        while let Some(message) = rx.recv().await {
            match message {
                Message::Start { reply } => {
                    let status = self.start();
                    reply.send(status).ok();
                }
                Message::Reset { reply } => {
                    let status = self.reset();
                    reply.send(status).ok();
                }
                Message::StepFired { run, index } => self.fire(run, index),
            }
        }
        debug!("simulation driver stopped");
    }

    fn start(&mut self) -> Status {
        match self.status {
            Status::Completed => {
                debug!(run = self.run, "start on a completed run, resetting");
                self.clear();
            }
            Status::Running => {
                debug!(run = self.run, "start ignored, run already in flight");
                return self.status;
            }
            Status::Idle => {
                let Some(tx) = self.tx.upgrade() else {
                    warn!("no handle left to arm the run with");
                    return self.status;
                };

                self.run += 1;
                self.status = Status::Running;
                self.progress = 0;
                self.log.clear();

                info!(run = self.run, steps = self.script.len(), "ingestion run started");
                scheduler::arm(self.script.clone(), self.run, Instant::now(), tx);
            }
        }

        self.publish();
        self.status
    }

    fn reset(&mut self) -> Status {
        if self.status == Status::Running {
            debug!(run = self.run, "reset ignored, run already in flight");
            return self.status;
        }

        self.clear();
        self.publish();
        self.status
    }

    fn fire(&mut self, run: u64, index: usize) {
        if run != self.run || self.status != Status::Running {
            debug!(run, index, current = self.run, "stale step ignored");
            return;
        }

        let Some(step) = self.script.steps().get(index) else {
            warn!(run, index, "step index out of range");
            return;
        };

        self.next_id += 1;
        self.log.push(LogEntry::emit(self.next_id, step));
        self.progress = step.progress;

        if index + 1 == self.script.len() {
            self.status = Status::Completed;
            info!(run, entries = self.log.len(), "ingestion run completed");
        }

        self.publish();
    }

    fn clear(&mut self) {
        self.status = Status::Idle;
        self.progress = 0;
        self.log.clear();
    }

    fn publish(&self) {
        self.state_tx.send_replace(Snapshot {
            status: self.status,
            progress: self.progress,
            log: self.log.clone(),
        });
    }
}
