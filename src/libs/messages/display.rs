//! Text of every [`Message`] variant.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigCurrent(json) => format!("Current configuration:\n{}", json),
            Message::ConfigModuleEngine => "Time bank engine settings".to_string(),
            Message::PromptPolicy => "Compensation policy".to_string(),
            Message::PromptZeroAtMonthEnd => "Zero the balance when a period is closed?".to_string(),
            Message::PromptReferenceHours => "Default monthly reference hours".to_string(),
            Message::PromptActor => "Name recorded on period changes".to_string(),

            // === REGISTRY MESSAGES ===
            Message::ScheduleCreated(name, id) => format!("Schedule '{}' created with id {}", name, id),
            Message::SchedulesHeader => "Work schedules:".to_string(),
            Message::NoSchedulesFound => "No schedules registered".to_string(),
            Message::EmployeeCreated(name, id) => format!("Employee '{}' registered with id {}", name, id),
            Message::EmployeeDeactivated(name) => format!("Employee '{}' deactivated", name),
            Message::EmployeesHeader => "Employees:".to_string(),
            Message::NoEmployeesFound => "No employees found".to_string(),
            Message::HolidayAdded(date) => format!("Holiday {} registered", date),
            Message::HolidayDeleted(date) => format!("Holiday {} removed", date),
            Message::HolidaysHeader(year) => format!("Holidays of {}:", year),
            Message::NoHolidaysFound(year) => format!("No holidays registered for {}", year),
            Message::ConfirmDeleteHoliday(date) => format!("Remove the holiday on {}?", date),
            Message::ReasonCreated(description, id) => format!("Reason '{}' created with id {}", description, id),
            Message::ReasonsHeader => "Justification reasons:".to_string(),
            Message::NoReasonsFound => "No justification reasons registered".to_string(),

            // === PUNCH MESSAGES ===
            Message::DaySaved(employee, date) => format!("Punches of employee {} saved for {}", employee, date),
            Message::PunchesImported(rows, employee, month) => {
                format!("Imported {} day records of employee {} for {}", rows, employee, month)
            }
            Message::ImportMonthMismatch(requested, found) => {
                format!("The file covers {} but {} was requested", found, requested)
            }

            // === TIME BANK MESSAGES ===
            Message::SummaryHeader(name, month) => format!("Time bank of {} for {}", name, month),
            Message::DaysHeader(name, month) => format!("Days of {} in {}", name, month),
            Message::FleetHeader(month) => format!("Time bank roll-up for {}", month),
            Message::AdjustmentAdded(id, month) => format!("Adjustment {} posted to {}", id, month),
            Message::AdjustmentRemoved(id, month) => format!("Adjustment {} removed from {}", id, month),
            Message::ConfirmRemoveAdjustment(id) => format!("Delete adjustment {}?", id),
            Message::LedgerHeader(employee) => format!("Ledger of employee {}:", employee),
            Message::NoLedgerEntries => "No ledger entries found".to_string(),
            Message::PeriodClosed(employee, month) => format!("Period {} of employee {} closed", month, employee),
            Message::PeriodReopened(employee, month) => format!("Period {} of employee {} reopened", month, employee),
            Message::ReopenKeepsPostings => {
                "Postings made when the period was closed stay in the ledger; closing again posts only the difference".to_string()
            }
            Message::PeriodsHeader(employee, year) => format!("Periods of employee {} in {}:", employee, year),
            Message::NoPeriodsFound(employee, year) => format!("No periods opened for employee {} in {}", employee, year),

            // === EXPORT MESSAGES ===
            Message::ExportCompleted(path) => format!("Export completed: {}", path),
            Message::ExportEmployeeRequired => "Exporting a summary requires --employee".to_string(),

            // === GENERAL ===
            Message::OperationCancelled => "Operation cancelled".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("✓ Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::NothingToRollback => "Nothing to rollback".to_string(),
            Message::RollingBack(from, to) => format!("Rolling back from v{} to v{}", from, to),
            Message::RollbackCompleted(version) => format!("Rollback to v{} completed", version),
        };
        write!(f, "{}", text)
    }
}
