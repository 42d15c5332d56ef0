//! Figures for the manager dashboard, computed from the static catalog.
//!
//! The dashboard only has data once an ingestion run has completed; before
//! that it reports that the central database is still empty.

use crate::{
    catalog::{INVENTORY, ISSUES, PRODUCTION},
    models::{IssueSeverity, Status},
};

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    Waiting,
    Ready(Dashboard),
}

impl DashboardView {
    pub fn for_status(status: Status) -> Self {
        match status {
            Status::Completed => DashboardView::Ready(Dashboard::build()),
            Status::Idle | Status::Running => DashboardView::Waiting,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductionBar {
    pub label: String,
    pub output: u32,
    pub efficiency: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventorySlice {
    pub part_name: &'static str,
    pub quantity: u32,
    /// Percentage of all units on hand, 0.0-100.0.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DowntimeBar {
    pub reason: &'static str,
    pub minutes: u32,
    pub severity: IssueSeverity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    pub output: u32,
    pub average_efficiency: f64,
    pub inventory_units: u32,
    pub downtime_minutes: u32,
    pub high_severity_incidents: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub production: Vec<ProductionBar>,
    pub inventory: Vec<InventorySlice>,
    pub downtime: Vec<DowntimeBar>,
    pub totals: Totals,
}

impl Dashboard {
    pub fn build() -> Self {
        let production = PRODUCTION
            .iter()
            .map(|record| ProductionBar {
                label: format!(
                    "{} ({})",
                    record.machine_id,
                    record.date.get(5..).unwrap_or(record.date)
                ),
                output: record.output_count,
                efficiency: record.efficiency_rate,
            })
            .collect::<Vec<_>>();

        let inventory_units: u32 = INVENTORY.iter().map(|item| item.quantity_on_hand).sum();
        let inventory = INVENTORY
            .iter()
            .map(|item| InventorySlice {
                part_name: item.part_name,
                quantity: item.quantity_on_hand,
                share: if inventory_units == 0 {
                    0.0
                } else {
                    f64::from(item.quantity_on_hand) * 100.0 / f64::from(inventory_units)
                },
            })
            .collect();

        let downtime = ISSUES
            .iter()
            .map(|issue| DowntimeBar {
                reason: issue.reason,
                minutes: issue.downtime_minutes,
                severity: issue.severity,
            })
            .collect::<Vec<_>>();

        let average_efficiency = if production.is_empty() {
            0.0
        } else {
            production.iter().map(|bar| bar.efficiency).sum::<f64>() / production.len() as f64
        };

        let totals = Totals {
            output: production.iter().map(|bar| bar.output).sum(),
            average_efficiency,
            inventory_units,
            downtime_minutes: downtime.iter().map(|bar| bar.minutes).sum(),
            high_severity_incidents: downtime
                .iter()
                .filter(|bar| bar.severity == IssueSeverity::High)
                .count(),
        };

        Self {
            production,
            inventory,
            downtime,
            totals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waits_until_ingestion_completes() {
        assert_eq!(DashboardView::for_status(Status::Idle), DashboardView::Waiting);
        assert_eq!(DashboardView::for_status(Status::Running), DashboardView::Waiting);
        assert!(matches!(
            DashboardView::for_status(Status::Completed),
            DashboardView::Ready(_)
        ));
    }

    #[test]
    fn production_bars_are_labelled_by_machine_and_day() {
        let dashboard = Dashboard::build();
        let labels: Vec<_> = dashboard.production.iter().map(|b| b.label.as_str()).collect();

        assert_eq!(
            labels,
            [
                "M-101 (10-24)",
                "M-102 (10-24)",
                "M-101 (10-25)",
                "M-102 (10-25)",
                "M-101 (10-26)"
            ]
        );
    }

    #[test]
    fn totals_cover_every_source() {
        let totals = Dashboard::build().totals;

        assert_eq!(totals.output, 5910);
        assert!((totals.average_efficiency - 89.64).abs() < 1e-9);
        assert_eq!(totals.inventory_units, 5635);
        assert_eq!(totals.downtime_minutes, 180);
        assert_eq!(totals.high_severity_incidents, 1);
    }

    #[test]
    fn inventory_shares_add_up_to_whole() {
        let dashboard = Dashboard::build();
        let total: f64 = dashboard.inventory.iter().map(|slice| slice.share).sum();

        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(dashboard.inventory[0].part_name, "Steel Bearing 5mm");
    }
}
