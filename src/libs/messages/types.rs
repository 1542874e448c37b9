/// Every user-facing text of the application.
///
/// Text lives in the `Display` impl (`display.rs`); callers only pick a
/// variant and its parameters.
#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigCurrent(String), // pretty JSON
    ConfigModuleEngine,
    PromptPolicy,
    PromptZeroAtMonthEnd,
    PromptReferenceHours,
    PromptActor,

    // === REGISTRY MESSAGES ===
    ScheduleCreated(String, i64), // name, id
    SchedulesHeader,
    NoSchedulesFound,
    EmployeeCreated(String, i64), // name, id
    EmployeeDeactivated(String),
    EmployeesHeader,
    NoEmployeesFound,
    HolidayAdded(String),   // date
    HolidayDeleted(String), // date
    HolidaysHeader(i32),
    NoHolidaysFound(i32),
    ConfirmDeleteHoliday(String),
    ReasonCreated(String, i64), // description, id
    ReasonsHeader,
    NoReasonsFound,

    // === PUNCH MESSAGES ===
    DaySaved(i64, String),                // employee, date
    PunchesImported(usize, i64, String),  // rows, employee, month
    ImportMonthMismatch(String, String),  // requested, found

    // === TIME BANK MESSAGES ===
    SummaryHeader(String, String), // employee name, month
    DaysHeader(String, String),    // employee name, month
    FleetHeader(String),           // month
    AdjustmentAdded(i64, String),  // entry id, month
    AdjustmentRemoved(i64, String),
    ConfirmRemoveAdjustment(i64),
    LedgerHeader(i64),
    NoLedgerEntries,
    PeriodClosed(i64, String), // employee, month
    PeriodReopened(i64, String),
    ReopenKeepsPostings,
    PeriodsHeader(i64, i32), // employee, year
    NoPeriodsFound(i64, i32),

    // === EXPORT MESSAGES ===
    ExportCompleted(String), // path
    ExportEmployeeRequired,

    // === GENERAL ===
    OperationCancelled,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    NothingToRollback,
    RollingBack(u32, u32),  // from, to
    RollbackCompleted(u32), // version
}
