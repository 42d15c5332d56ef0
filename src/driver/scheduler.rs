use std::sync::Arc;

use tokio::{
    sync::mpsc,
    time::{Instant, sleep_until},
};
use tracing::trace;

use crate::{driver::Message, models::Script};

/// Fires every step of one run at `origin + step.delay`, in script order.
///
/// One task per run keeps firing order equal to script order even when two
/// steps share a delay. There is no way to stop it once armed.
pub(super) fn arm(
    script: Arc<Script>,
    run: u64,
    origin: Instant,
    tx: mpsc::Sender<Message>,
) {
    tokio::spawn(async move {
        for (index, step) in script.steps().iter().enumerate() {
            sleep_until(origin + step.delay).await;
            trace!(run, index, "step timer elapsed");

            if tx.send(Message::StepFired { run, index }).await.is_err() {
                trace!(run, index, "driver is gone, dropping step");
            }
        }
    });
}
