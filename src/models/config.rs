use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use tokio::fs::read_to_string;
use tracing::debug;

use crate::models::RawScript;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Success => "SUCCESS",
            Severity::Error => "ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStep {
    pub message: String,
    pub severity: Severity,
    /// Offset from the instant the run was started.
    pub delay: Duration,
    pub progress: u8,
}

impl ScriptStep {
    fn new(message: &str, severity: Severity, delay_ms: u64, progress: u8) -> Self {
        Self {
            message: message.to_string(),
            severity,
            delay: Duration::from_millis(delay_ms),
            progress,
        }
    }
}

/// A validated, immutable ingestion script.
///
/// Steps are ordered by delay, progress never goes backwards and the last
/// step always lands on 100.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    steps: Vec<ScriptStep>,
}

impl Script {
    pub fn new(steps: Vec<ScriptStep>) -> anyhow::Result<Self> {
        let Some(last) = steps.last() else {
            anyhow::bail!("Script has no steps.");
        };

        if last.progress != 100 {
            anyhow::bail!(
                "Final step must reach 100% progress (found {}%: '{}')",
                last.progress,
                last.message
            );
        }

        for (index, step) in steps.iter().enumerate() {
            if step.message.trim().is_empty() {
                anyhow::bail!("Step {} has an empty message", index + 1);
            }

            if step.progress > 100 {
                anyhow::bail!(
                    "Step {} progress {}% is out of range (0-100)",
                    index + 1,
                    step.progress
                );
            }
        }

        for (index, pair) in steps.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);

            if next.progress < prev.progress {
                anyhow::bail!(
                    "Step {} progress goes backwards ({}% after {}%)",
                    index + 2,
                    next.progress,
                    prev.progress
                );
            }

            if next.delay < prev.delay {
                anyhow::bail!(
                    "Step {} fires before the step preceding it ({}ms after {}ms)",
                    index + 2,
                    next.delay.as_millis(),
                    prev.delay.as_millis()
                );
            }
        }

        Ok(Self { steps })
    }

    pub async fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = read_to_string(path).await.map_err(|err| {
            anyhow::anyhow!("Failed to read script '{}': {err}", path.display())
        })?;
        let raw: RawScript = toml::from_str(&content)?;
        let script = raw.compile()?;

        debug!(path = %path.display(), steps = script.len(), "loaded ingestion script");
        Ok(script)
    }

    /// The built-in run: MES over SQL Server, the Excel inventory sheet and
    /// the CSV downtime export, loaded into the central PostgreSQL database.
    pub fn default_ingestion() -> Self {
        use Severity::{Info, Success};

        Self {
            steps: vec![
                ScriptStep::new("Initializing Python ETL script...", Info, 500, 10),
                ScriptStep::new("Connecting to local PostgreSQL database...", Info, 1000, 20),
                ScriptStep::new("Connecting to SQL Server (MES)...", Info, 1500, 30),
                ScriptStep::new("Reading dbo.DailyOutput...", Info, 2000, 40),
                ScriptStep::new(
                    "✔ Loaded 500 records from SQL Server into [production_daily]",
                    Success,
                    2500,
                    50,
                ),
                ScriptStep::new("Reading \"Inventory_Tracking.xlsx\"...", Info, 3000, 60),
                ScriptStep::new(
                    "✔ Loaded 1,200 records from Excel into [inventory_status]",
                    Success,
                    3500,
                    75,
                ),
                ScriptStep::new("Reading \"downtime_export_2023.csv\"...", Info, 4000, 85),
                ScriptStep::new(
                    "✔ Loaded 45 records from CSV into [issues_log]",
                    Success,
                    4500,
                    95,
                ),
                ScriptStep::new(
                    "ETL Pipeline execution finished successfully.",
                    Success,
                    5000,
                    100,
                ),
            ],
        }
    }

    /// Speeds the script up (or slows it down) by `speed`. A speed of 2.0
    /// halves every delay.
    pub fn scaled(&self, speed: f64) -> anyhow::Result<Self> {
        if !speed.is_finite() || speed <= 0.0 {
            anyhow::bail!("Invalid speed: {speed}. Use a positive number such as 1.0 or 2.5");
        }

        let steps = self
            .steps
            .iter()
            .map(|step| -> anyhow::Result<ScriptStep> {
                let delay = Duration::try_from_secs_f64(step.delay.as_secs_f64() / speed)
                    .map_err(|err| anyhow::anyhow!("Speed {speed} is out of range: {err}"))?;
                Ok(ScriptStep {
                    delay,
                    ..step.clone()
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn duration(&self) -> Duration {
        self.steps.last().map(|step| step.delay).unwrap_or_default()
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::default_ingestion()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(message: &str, delay_ms: u64, progress: u8) -> ScriptStep {
        ScriptStep::new(message, Severity::Info, delay_ms, progress)
    }

    #[test]
    fn default_script_is_valid() {
        let script = Script::default();

        assert_eq!(script.len(), 10);
        assert!(Script::new(script.steps().to_vec()).is_ok());
        assert_eq!(script.duration(), Duration::from_millis(5000));
        assert_eq!(
            script.steps().last().map(|s| s.message.as_str()),
            Some("ETL Pipeline execution finished successfully.")
        );
    }

    #[test]
    fn default_script_never_uses_error_severity() {
        assert!(
            Script::default()
                .steps()
                .iter()
                .all(|s| s.severity != Severity::Error)
        );
    }

    #[tokio::test]
    async fn bundled_demo_script_matches_default() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/ingestion.toml");
        let script = Script::load(path).await.unwrap();

        assert_eq!(script, Script::default());
    }

    #[tokio::test]
    async fn load_reports_missing_file() {
        let err = Script::load("does/not/exist.toml").await.unwrap_err();
        assert!(err.to_string().contains("does/not/exist.toml"));
    }

    #[test]
    fn rejects_empty_script() {
        assert!(Script::new(vec![]).is_err());
    }

    #[test]
    fn rejects_unfinished_script() {
        let err = Script::new(vec![step("a", 100, 50)]).unwrap_err();
        assert!(err.to_string().contains("100%"));
    }

    #[test]
    fn rejects_backwards_progress() {
        let steps = vec![step("a", 100, 60), step("b", 200, 40), step("c", 300, 100)];
        assert!(Script::new(steps).is_err());
    }

    #[test]
    fn rejects_out_of_order_delays() {
        let steps = vec![step("a", 300, 50), step("b", 200, 100)];
        assert!(Script::new(steps).is_err());
    }

    #[test]
    fn rejects_blank_message() {
        let steps = vec![step("  ", 100, 100)];
        assert!(Script::new(steps).is_err());
    }

    #[test]
    fn accepts_equal_delays_and_progress() {
        let steps = vec![step("a", 100, 50), step("b", 100, 50), step("c", 100, 100)];
        assert!(Script::new(steps).is_ok());
    }

    #[test]
    fn scaled_divides_delays() {
        let script = Script::default().scaled(2.0).unwrap();

        assert_eq!(script.steps()[0].delay, Duration::from_millis(250));
        assert_eq!(script.duration(), Duration::from_millis(2500));
        assert_eq!(script.steps()[9].progress, 100);
    }

    #[test]
    fn scaled_rejects_non_positive_speed() {
        let script = Script::default();

        assert!(script.scaled(0.0).is_err());
        assert!(script.scaled(-1.0).is_err());
        assert!(script.scaled(f64::NAN).is_err());
        assert!(script.scaled(f64::INFINITY).is_err());
    }
}
