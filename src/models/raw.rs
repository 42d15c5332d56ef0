use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::models::{Script, ScriptStep, Severity};

/// Script file layout as written by hand:
///
/// ```toml
/// [[steps]]
/// message = "Connecting to SQL Server (MES)..."
/// severity = "info"
/// delay_ms = 1500
/// progress = 30
/// ```
#[derive(Debug, Deserialize)]
pub struct RawScript {
    #[serde(default)]
    pub steps: Vec<RawStep>,
}

impl RawScript {
    pub fn compile(self) -> anyhow::Result<Script> {
        if self.steps.is_empty() {
            anyhow::bail!("No steps found in script.");
        }

        let mut resolved_steps = Vec::with_capacity(self.steps.len());

        for (index, raw_step) in self.steps.into_iter().enumerate() {
            let progress = u8::try_from(raw_step.progress)
                .ok()
                .filter(|progress| *progress <= 100)
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "Invalid progress {} on step {}. Use a value between 0 and 100",
                        raw_step.progress,
                        index + 1
                    )
                })?;

            let severity = match raw_step.severity {
                Some(severity) => severity,
                None => {
                    warn!(step = index + 1, "step has no severity, defaulting to info");
                    Severity::Info
                }
            };

            resolved_steps.push(ScriptStep {
                message: raw_step.message,
                severity,
                delay: Duration::from_millis(raw_step.delay_ms),
                progress,
            });
        }

        Script::new(resolved_steps)
    }
}

#[derive(Debug, Deserialize)]
pub struct RawStep {
    pub message: String,
    pub severity: Option<Severity>,
    pub delay_ms: u64,
    pub progress: u32,
}
