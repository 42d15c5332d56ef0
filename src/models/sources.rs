use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceSystem {
    SqlServerMes,
    ExcelManual,
    CsvLogs,
}

impl SourceSystem {
    pub fn label(&self) -> &'static str {
        match self {
            SourceSystem::SqlServerMes => "SQL_Server_MES",
            SourceSystem::ExcelManual => "Excel_Manual",
            SourceSystem::CsvLogs => "CSV_Logs",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SourceSystem::SqlServerMes => "Legacy MES (SQL Server)",
            SourceSystem::ExcelManual => "Inventory (Excel)",
            SourceSystem::CsvLogs => "Logs (CSV)",
        }
    }
}

impl fmt::Display for SourceSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductionRecord {
    pub date: &'static str,
    pub machine_id: &'static str,
    pub output_count: u32,
    pub efficiency_rate: f64,
    pub source_system: SourceSystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryItem {
    pub part_id: &'static str,
    pub part_name: &'static str,
    pub quantity_on_hand: u32,
    pub warehouse_location: &'static str,
    pub last_updated: &'static str,
    pub source_system: SourceSystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IssueSeverity {
    Low,
    Medium,
    High,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IssueSeverity::Low => "Low",
            IssueSeverity::Medium => "Medium",
            IssueSeverity::High => "High",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueLog {
    pub log_id: &'static str,
    pub incident_date: &'static str,
    pub downtime_minutes: u32,
    pub reason: &'static str,
    pub severity: IssueSeverity,
    pub source_system: SourceSystem,
}

impl IssueLog {
    /// Row as it appears in the downtime CSV export: `log_id,date,mins,reason`.
    pub fn csv_line(&self) -> String {
        let date = self
            .incident_date
            .split(' ')
            .next()
            .unwrap_or(self.incident_date);
        format!(
            "{},{},{},{}",
            self.log_id, date, self.downtime_minutes, self.reason
        )
    }
}
