#[cfg(test)]
mod tests {
    use hourbank::db::db::Db;
    use hourbank::db::employees::{Employee, Employees, DEFAULT_REFERENCE_HOURS};
    use hourbank::db::schedules::{Schedules, WorkSchedule};
    use hourbank::libs::error::TimeBankError;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ScheduleTestContext {
        _temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for ScheduleTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("hourbank.db")).unwrap();
            ScheduleTestContext { _temp_dir: temp_dir, db }
        }
    }

    #[test]
    fn test_expected_day_subtracts_break_overlap() {
        let schedule = WorkSchedule::new("long", "08:00", "13:00")
            .with_afternoon("13:00", "18:00")
            .with_break("12:00", "13:00")
            .with_tolerance(10);
        let expected = schedule.expected_day().unwrap();
        assert_eq!(expected.minutes, 540);
        assert_eq!(expected.tolerance, 10);
    }

    #[test]
    fn test_break_outside_blocks_costs_nothing() {
        let schedule = WorkSchedule::new("split", "08:00", "12:00")
            .with_afternoon("13:00", "17:00")
            .with_break("12:00", "13:00");
        assert_eq!(schedule.expected_day().unwrap().minutes, 480);
    }

    #[test]
    fn test_morning_only_schedule() {
        let schedule = WorkSchedule::new("half", "07:30", "13:30");
        assert_eq!(schedule.expected_day().unwrap().minutes, 360);
    }

    #[test]
    fn test_malformed_schedules_are_rejected() {
        let inverted = WorkSchedule::new("bad", "12:00", "08:00");
        assert!(matches!(inverted.expected_day(), Err(TimeBankError::InvalidTimeFormat { .. })));

        let mut half_afternoon = WorkSchedule::new("bad", "08:00", "12:00");
        half_afternoon.afternoon_in = Some("13:00".to_string());
        assert!(matches!(half_afternoon.expected_day(), Err(TimeBankError::InvalidTimeFormat { .. })));

        let overlapping = WorkSchedule::new("bad", "08:00", "12:00").with_afternoon("11:00", "15:00");
        match overlapping.expected_day() {
            Err(TimeBankError::InvalidTimeFormat { field, value }) => {
                assert_eq!(field, "afternoon_in");
                assert_eq!(value, "11:00");
            }
            other => panic!("expected InvalidTimeFormat, got {:?}", other),
        }

        let back_to_back = WorkSchedule::new("ok", "08:00", "12:00").with_afternoon("12:00", "15:00");
        assert_eq!(back_to_back.expected_day().unwrap().minutes, 420);

        let negative = WorkSchedule::new("bad", "08:00", "12:00").with_tolerance(-5);
        assert!(matches!(negative.expected_day(), Err(TimeBankError::InvalidInput(_))));
    }

    #[test_context(ScheduleTestContext)]
    #[test]
    fn test_schedule_round_trip(ctx: &mut ScheduleTestContext) {
        let schedules = Schedules::new(&ctx.db.conn);
        let schedule = WorkSchedule::new("office", "08:00", "12:00")
            .with_afternoon("13:00", "17:00")
            .with_tolerance(10);
        let id = schedules.insert(&schedule).unwrap();

        let stored = schedules.get(id).unwrap().unwrap();
        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.afternoon_out.as_deref(), Some("17:00"));
        assert_eq!(stored.expected_day().unwrap().minutes, 480);
        assert_eq!(schedules.list().unwrap().len(), 1);
        assert!(schedules.get(id + 1).unwrap().is_none());
    }

    #[test_context(ScheduleTestContext)]
    #[test]
    fn test_schedule_update_changes_expected_load(ctx: &mut ScheduleTestContext) {
        let schedules = Schedules::new(&ctx.db.conn);
        let id = schedules.insert(&WorkSchedule::new("office", "08:00", "12:00")).unwrap();

        let mut schedule = schedules.get(id).unwrap().unwrap();
        schedule.morning_out = "14:00".to_string();
        schedules.update(&schedule).unwrap();
        assert_eq!(schedules.get(id).unwrap().unwrap().expected_day().unwrap().minutes, 360);
    }

    #[test_context(ScheduleTestContext)]
    #[test]
    fn test_employee_registry(ctx: &mut ScheduleTestContext) {
        let schedule_id = Schedules::new(&ctx.db.conn)
            .insert(&WorkSchedule::new("office", "08:00", "12:00"))
            .unwrap();
        let employees = Employees::new(&ctx.db.conn);
        let id = employees.insert(&Employee::new("Ana Souza", schedule_id, 2200.0)).unwrap();

        let mut employee = employees.require(id).unwrap();
        assert_eq!(employee.reference_hours, DEFAULT_REFERENCE_HOURS);
        assert!((employee.hourly_rate() - 10.0).abs() < 1e-9);

        employee.active = false;
        employees.update(&employee).unwrap();
        assert!(employees.list(true).unwrap().is_empty());
        assert_eq!(employees.list(false).unwrap().len(), 1);

        assert!(matches!(employees.require(99), Err(TimeBankError::EmployeeNotFound(99))));
        assert!(matches!(
            employees.insert(&Employee::new(" ", schedule_id, 100.0)),
            Err(TimeBankError::InvalidInput(_))
        ));
        assert_eq!(Employee::new("Zero", schedule_id, 100.0).with_reference_hours(0).hourly_rate(), 0.0);
    }
}
