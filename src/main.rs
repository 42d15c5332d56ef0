use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use factorysim::{
    dashboard::DashboardView,
    driver::SimulationDriver,
    models::{Script, Status},
    reporter::ConsoleReporter,
    runner::IngestionRunner,
};

#[derive(Parser)]
#[command(name = "factorysim")]
#[command(about = "Walkthrough of a simulated multi-source factory data ingestion")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// TOML file with a custom ingestion script
    #[arg(long, global = true)]
    script: Option<PathBuf>,

    /// Playback speed of the ingestion script (2.0 runs twice as fast)
    #[arg(long, global = true, default_value = "1.0")]
    speed: f64,

    /// Directory that receives the per-run transcript files
    #[arg(long, global = true, default_value = "logs")]
    transcript_dir: PathBuf,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Project objective: the problem, the solution, the result
    Intro,
    /// Central database schema
    Design,
    /// Sample records from the three source systems
    Sources,
    /// Run the simulated ETL pipeline
    Ingest,
    /// Manager dashboard; empty until the pipeline has run
    Dashboard {
        /// Run the pipeline first so the dashboard has data
        #[arg(long)]
        run: bool,
    },
    /// Every view in order
    Walkthrough,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Walkthrough) {
        Commands::Intro => ConsoleReporter::intro(),
        Commands::Design => ConsoleReporter::design(),
        Commands::Sources => ConsoleReporter::sources(),
        Commands::Ingest => {
            ingest(&cli).await?;
        }
        Commands::Dashboard { run: false } => {
            ConsoleReporter::dashboard(&DashboardView::for_status(Status::Idle));
        }
        Commands::Dashboard { run: true } => {
            let runner = ingest(&cli).await?;
            ConsoleReporter::dashboard(&DashboardView::for_status(runner.driver().status()));
        }
        Commands::Walkthrough => {
            ConsoleReporter::intro();
            ConsoleReporter::design();
            ConsoleReporter::sources();
            let runner = ingest(&cli).await?;
            ConsoleReporter::dashboard(&DashboardView::for_status(runner.driver().status()));
        }
    }

    Ok(())
}

async fn ingest(cli: &Cli) -> anyhow::Result<IngestionRunner> {
    let script = match &cli.script {
        Some(path) => Script::load(path).await?,
        None => Script::default(),
    }
    .scaled(cli.speed)?;

    ConsoleReporter::ingestion_header();

    let runner = IngestionRunner::new(SimulationDriver::new(script, 100), &cli.transcript_dir);
    let (report, path) = runner.run().await?;

    ConsoleReporter::summary(&report);
    println!("📄 Transcript saved to {}", path.display());

    Ok(runner)
}
