use crate::models::{
    InventoryItem, IssueLog, IssueSeverity, ProductionRecord, SourceSystem,
};

pub const PRODUCTION: [ProductionRecord; 5] = [
    production("2023-10-24", "M-101", 1250, 92.5),
    production("2023-10-24", "M-102", 980, 78.4),
    production("2023-10-25", "M-101", 1300, 95.0),
    production("2023-10-25", "M-102", 1100, 88.2),
    production("2023-10-26", "M-101", 1280, 94.1),
];

pub const INVENTORY: [InventoryItem; 4] = [
    inventory("P-500", "Steel Bearing 5mm", 4500, "A-12", "2023-10-26 08:00"),
    inventory("P-501", "Alum. Housing Case", 230, "B-04", "2023-10-25 14:30"),
    inventory("P-502", "Copper Wiring (Roll)", 15, "C-01", "2023-10-26 09:15"),
    inventory("P-503", "Plastic Sealant", 890, "A-10", "2023-10-24 16:00"),
];

pub const ISSUES: [IssueLog; 3] = [
    issue("LOG-001", "2023-10-24 10:30", 45, "Sensor Failure", IssueSeverity::Medium),
    issue("LOG-002", "2023-10-25 14:15", 120, "Motor Overheat", IssueSeverity::High),
    issue("LOG-003", "2023-10-26 09:00", 15, "Material Jam", IssueSeverity::Low),
];

const fn production(
    date: &'static str,
    machine_id: &'static str,
    output_count: u32,
    efficiency_rate: f64,
) -> ProductionRecord {
    ProductionRecord {
        date,
        machine_id,
        output_count,
        efficiency_rate,
        source_system: SourceSystem::SqlServerMes,
    }
}

const fn inventory(
    part_id: &'static str,
    part_name: &'static str,
    quantity_on_hand: u32,
    warehouse_location: &'static str,
    last_updated: &'static str,
) -> InventoryItem {
    InventoryItem {
        part_id,
        part_name,
        quantity_on_hand,
        warehouse_location,
        last_updated,
        source_system: SourceSystem::ExcelManual,
    }
}

const fn issue(
    log_id: &'static str,
    incident_date: &'static str,
    downtime_minutes: u32,
    reason: &'static str,
    severity: IssueSeverity,
) -> IssueLog {
    IssueLog {
        log_id,
        incident_date,
        downtime_minutes,
        reason,
        severity,
        source_system: SourceSystem::CsvLogs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_source_is_tagged_with_its_system() {
        assert!(
            PRODUCTION
                .iter()
                .all(|r| r.source_system == SourceSystem::SqlServerMes)
        );
        assert!(
            INVENTORY
                .iter()
                .all(|r| r.source_system == SourceSystem::ExcelManual)
        );
        assert!(ISSUES.iter().all(|r| r.source_system == SourceSystem::CsvLogs));
    }

    #[test]
    fn inventory_part_ids_are_unique() {
        let mut ids: Vec<_> = INVENTORY.iter().map(|item| item.part_id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), INVENTORY.len());
    }
}
