use colored::Colorize;

use crate::{
    catalog::{ETL_LISTING, INVENTORY, ISSUES, Listing, PRODUCTION, SCHEMA_LISTING},
    dashboard::{Dashboard, DashboardView, Totals},
    models::{RunReport, Severity, SourceSystem},
};

const BAR_WIDTH: usize = 40;

pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn intro() {
        println!("\n{}", "FactoryData Central POC".bold().blue());
        println!("{}", "Micro-POC: Multi-source Data Ingestion".bright_black());
        println!(
            "\nMove a factory away from fragmented data silos (isolated Excel sheets, \
             legacy SQL databases and loose CSV logs) into one central database."
        );

        let cards = [
            (
                "The Problem",
                "Production data is in SQL Server, Inventory is in Excel, Downtime is in CSVs. \
                 Managers spend 4 hours/day manually merging reports.",
            ),
            (
                "The Solution",
                "A centralized PostgreSQL database that acts as a \"Single Source of Truth\", \
                 automatically fed by Python scripts.",
            ),
            (
                "The Result",
                "Real-time visibility into efficiency and inventory. Ready for cloud migration later.",
            ),
        ];

        for (title, body) in cards {
            println!("\n  {}", title.bold());
            println!("  {body}");
        }
    }

    pub fn design() {
        println!("\n{}", "1. Database Design (PostgreSQL)".bold());
        println!("Three tables, one per source system.");
        Self::listing(&SCHEMA_LISTING);
    }

    pub fn sources() {
        println!("\n{}", "2. Mock Source Data".bold());

        println!("\n--- {} ---", SourceSystem::SqlServerMes.title().cyan());
        println!("{:<12} {:<8} {:>7}", "Date", "Machine", "Output");
        for record in PRODUCTION.iter().take(3) {
            println!(
                "{:<12} {:<8} {:>7}",
                record.date, record.machine_id, record.output_count
            );
        }

        println!("\n--- {} ---", SourceSystem::ExcelManual.title().green());
        println!("{:<8} {:<6} {:>6}", "Part ID", "Loc", "Qty");
        for item in INVENTORY.iter().take(3) {
            println!(
                "{:<8} {:<6} {:>6}",
                item.part_id, item.warehouse_location, item.quantity_on_hand
            );
        }

        println!("\n--- {} ---", SourceSystem::CsvLogs.title().yellow());
        println!("{}", "log_id,date,mins,reason".bold());
        for issue in ISSUES.iter() {
            println!("{}", issue.csv_line());
        }
    }

    pub fn ingestion_header() {
        println!("\n{}", "3. Data Ingestion Logic (Python)".bold());
        println!("Reads the three sources and normalizes them into PostgreSQL.");
        Self::listing(&ETL_LISTING);
    }

    pub fn summary(report: &RunReport) {
        for line in summary_lines(report) {
            println!("{line}");
        }
    }

    pub fn dashboard(view: &DashboardView) {
        println!("\n{}", "Factory Manager Dashboard".bold());
        println!("Unified view of Production, Inventory, and Maintenance.");

        match view {
            DashboardView::Waiting => {
                println!(
                    "\n{}",
                    "Data is waiting for ingestion. Run the pipeline first.".yellow()
                );
                println!("No Data loaded in Central Database");
            }
            DashboardView::Ready(dashboard) => Self::charts(dashboard),
        }
    }

    fn charts(dashboard: &Dashboard) {
        println!("\n{}", headline(&dashboard.totals));

        println!("\n{}", "Daily Production Output".bold());
        let max_output = dashboard.production.iter().map(|b| b.output).max().unwrap_or(0);
        for bar in dashboard.production.iter() {
            println!(
                "  {:<15} {} {} ({:.1}%)",
                bar.label,
                render_bar(bar.output, max_output).blue(),
                bar.output,
                bar.efficiency
            );
        }

        println!("\n{}", "Inventory By Item".bold());
        for slice in dashboard.inventory.iter() {
            println!(
                "  {:<22} {:>6} units {:>5.1}%",
                slice.part_name, slice.quantity, slice.share
            );
        }

        println!("\n{}", "Downtime Events".bold());
        let max_minutes = dashboard.downtime.iter().map(|b| b.minutes).max().unwrap_or(0);
        for bar in dashboard.downtime.iter() {
            println!(
                "  {:<15} {} {} min [{}]",
                bar.reason,
                render_bar(bar.minutes, max_minutes).red(),
                bar.minutes,
                bar.severity
            );
        }
    }

    fn listing(listing: &Listing) {
        println!(
            "\n{} {}",
            listing.language.to_uppercase().bright_black(),
            listing.title.bold()
        );
        for line in listing.body().lines() {
            println!("  {line}");
        }
    }
}

fn summary_lines(report: &RunReport) -> Vec<String> {
    let verdict = if report.is_success() {
        "✅ Data loaded into the central database.".green()
    } else {
        "❌ Ingestion did not finish cleanly.".red()
    };

    vec![
        "\n--- Ingestion Summary ---".to_string(),
        format!(
            "Status: {} | Progress: {}% | Duration: {:.2}s",
            report.status,
            report.progress,
            report.elapsed.as_secs_f64()
        ),
        format!(
            "Entries: {} ({} info, {} success, {} error)",
            report.entries.len(),
            report.count(Severity::Info),
            report.count(Severity::Success),
            report.count(Severity::Error)
        ),
        verdict.to_string(),
    ]
}

fn headline(totals: &Totals) -> String {
    format!(
        "Output: {} units | Avg efficiency: {:.1}% | Stock: {} units | Downtime: {} min | High severity: {}",
        totals.output,
        totals.average_efficiency,
        totals.inventory_units,
        totals.downtime_minutes,
        totals.high_severity_incidents
    )
}

fn render_bar(value: u32, max: u32) -> String {
    if max == 0 {
        return String::new();
    }
    let filled = (value as usize * BAR_WIDTH).div_ceil(max as usize);
    "█".repeat(filled.min(BAR_WIDTH))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::models::{LogEntry, Script, Snapshot, Status};

    #[test]
    fn bars_scale_to_largest_value() {
        assert_eq!(render_bar(120, 120).chars().count(), BAR_WIDTH);
        assert_eq!(render_bar(60, 120).chars().count(), BAR_WIDTH / 2);
        assert_eq!(render_bar(0, 120), "");
        assert_eq!(render_bar(5, 0), "");
    }

    #[test]
    fn summary_counts_entries_under_plain_header() {
        colored::control::set_override(false);
        let log = Script::default()
            .steps()
            .iter()
            .enumerate()
            .map(|(id, step)| LogEntry::emit(id as u64, step))
            .collect();
        let report = RunReport::new(
            Snapshot {
                status: Status::Completed,
                progress: 100,
                log,
            },
            Duration::from_millis(5000),
        );

        let lines = summary_lines(&report);

        assert_eq!(lines[0], "\n--- Ingestion Summary ---");
        assert_eq!(lines[1], "Status: completed | Progress: 100% | Duration: 5.00s");
        assert_eq!(lines[2], "Entries: 10 (6 info, 4 success, 0 error)");
        assert!(lines[3].contains("Data loaded"));
    }

    #[test]
    fn headline_reports_every_total() {
        let line = headline(&Dashboard::build().totals);

        assert_eq!(
            line,
            "Output: 5910 units | Avg efficiency: 89.6% | Stock: 5635 units | Downtime: 180 min | High severity: 1"
        );
    }

    #[test]
    fn tiny_values_still_show() {
        assert_eq!(render_bar(1, 1300).chars().count(), 1);
    }
}
