#[cfg(test)]
mod tests {
    use chrono::{Datelike, NaiveDate, Weekday};
    use hourbank::db::db::Db;
    use hourbank::db::employees::{Employee, Employees};
    use hourbank::db::holidays::{Holiday, Holidays};
    use hourbank::db::ledger::EntryKind;
    use hourbank::db::punches::{DailyPunchRecord, Occurrence, Punches};
    use hourbank::db::reasons::Reasons;
    use hourbank::db::schedules::{Schedules, WorkSchedule};
    use hourbank::libs::aggregator::CompensationPolicy;
    use hourbank::libs::classifier::Category;
    use hourbank::libs::config::EngineConfig;
    use hourbank::libs::error::TimeBankError;
    use hourbank::libs::period::PeriodStatus;
    use hourbank::libs::time_units::YearMonth;
    use hourbank::libs::timebank::TimeBank;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    const OFFSET: CompensationPolicy = CompensationPolicy::OffsetAgainstOvertime;

    struct TimeBankTestContext {
        temp_dir: TempDir,
        timebank: TimeBank,
        employee_id: i64,
    }

    impl TestContext for TimeBankTestContext {
        fn setup() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let db = Db::open(temp_dir.path().join("hourbank.db")).expect("Failed to open database");

            let schedule = WorkSchedule::new("office", "08:00", "12:00")
                .with_afternoon("13:00", "17:00")
                .with_tolerance(10);
            let schedule_id = Schedules::new(&db.conn).insert(&schedule).expect("Failed to insert schedule");
            let employee_id = Employees::new(&db.conn)
                .insert(&Employee::new("Ana Souza", schedule_id, 2200.0))
                .expect("Failed to insert employee");

            TimeBankTestContext {
                temp_dir,
                timebank: TimeBank::new(db, "tester"),
                employee_id,
            }
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn march() -> YearMonth {
        YearMonth::new(2025, 3).unwrap()
    }

    /// A weekday worked 08:00 until `morning_out` and 13:00-17:00.
    fn worked_day(employee_id: i64, day: NaiveDate, morning_out: &str) -> DailyPunchRecord {
        DailyPunchRecord::new(employee_id, day)
            .with_morning("08:00", morning_out)
            .with_afternoon("13:00", "17:00")
    }

    /// Every weekday of March 2025 worked exactly to schedule.
    fn full_march(employee_id: i64) -> Vec<DailyPunchRecord> {
        march()
            .days()
            .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .map(|d| worked_day(employee_id, d, "12:00"))
            .collect()
    }

    fn replace_day(records: &mut [DailyPunchRecord], record: DailyPunchRecord) {
        if let Some(slot) = records.iter_mut().find(|r| r.date == record.date) {
            *slot = record;
        }
    }

    #[test_context(TimeBankTestContext)]
    #[test]
    fn test_month_worked_to_schedule_balances_to_zero(ctx: &mut TimeBankTestContext) {
        let id = ctx.employee_id;
        ctx.timebank.save_day_records(id, 2025, 3, &full_march(id)).unwrap();

        let summary = ctx.timebank.monthly_summary(id, 2025, 3, OFFSET, false).unwrap();
        assert_eq!(summary.days.len(), 31);
        assert_eq!(summary.worked_min, 21 * 480);
        assert_eq!(summary.expected_min, 21 * 480);
        assert_eq!(summary.ordinary_overtime_min, 0);
        assert_eq!(summary.deficit_min, 0);
        assert_eq!(summary.technical_balance_min, 0);
        assert_eq!(summary.status, PeriodStatus::Open);
        assert_eq!(summary.employee_name, "Ana Souza");
    }

    #[test_context(TimeBankTestContext)]
    #[test]
    fn test_recomputation_is_idempotent(ctx: &mut TimeBankTestContext) {
        let id = ctx.employee_id;
        let mut records = full_march(id);
        replace_day(&mut records, worked_day(id, date(2025, 3, 3), "12:15"));
        ctx.timebank.save_day_records(id, 2025, 3, &records).unwrap();
        ctx.timebank.add_manual_adjustment(id, date(2025, 3, 20), 30, Some("training")).unwrap();

        let first = ctx.timebank.monthly_summary(id, 2025, 3, OFFSET, false).unwrap();
        let second = ctx.timebank.monthly_summary(id, 2025, 3, OFFSET, false).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.ordinary_overtime_min, 15);
        assert_eq!(first.manual_entries_min, 30);
        assert_eq!(first.technical_balance_min, 45);
    }

    #[test_context(TimeBankTestContext)]
    #[test]
    fn test_summary_reconciles_with_its_days(ctx: &mut TimeBankTestContext) {
        let id = ctx.employee_id;
        let mut records = full_march(id);
        replace_day(&mut records, worked_day(id, date(2025, 3, 3), "12:15"));
        replace_day(&mut records, worked_day(id, date(2025, 3, 5), "11:20"));
        records.push(DailyPunchRecord::new(id, date(2025, 3, 8)).with_morning("09:00", "11:00"));
        ctx.timebank.save_day_records(id, 2025, 3, &records).unwrap();

        let summary = ctx.timebank.monthly_summary(id, 2025, 3, OFFSET, false).unwrap();
        let impacts: i64 = summary.days.iter().map(|d| d.impact).sum();
        assert_eq!(summary.ordinary_overtime_min, 15);
        assert_eq!(summary.deficit_min, -40);
        assert_eq!(summary.premium_overtime_min, 120);
        assert_eq!(impacts, summary.day_impact_min());
        assert_eq!(
            summary.technical_balance_min,
            summary.carry_over_min + summary.day_impact_min() + summary.manual_entries_min + summary.closure_entries_min
        );
        assert_eq!(summary.days.iter().find(|d| d.date == date(2025, 3, 8)).unwrap().category, Category::PremiumOvertime);
    }

    #[test_context(TimeBankTestContext)]
    #[test]
    fn test_compensation_policies(ctx: &mut TimeBankTestContext) {
        let id = ctx.employee_id;
        let mut records = full_march(id);
        replace_day(&mut records, worked_day(id, date(2025, 3, 3), "12:15"));
        replace_day(&mut records, worked_day(id, date(2025, 3, 5), "11:20"));
        ctx.timebank.save_day_records(id, 2025, 3, &records).unwrap();

        let offset = ctx.timebank.monthly_summary(id, 2025, 3, OFFSET, false).unwrap();
        assert_eq!(offset.payout.payable_ordinary_min, 0);
        assert_eq!(offset.payout.deductible_min, 25);
        assert!((offset.hourly_rate - 10.0).abs() < 1e-9);
        assert!((offset.deductible_value - 25.0 * 10.0 / 60.0).abs() < 1e-9);

        let deduct = ctx
            .timebank
            .monthly_summary(id, 2025, 3, CompensationPolicy::AlwaysDeduct, false)
            .unwrap();
        assert_eq!(deduct.payout.payable_ordinary_min, 15);
        assert_eq!(deduct.payout.deductible_min, 40);
        assert_eq!(deduct.technical_balance_min, offset.technical_balance_min);
    }

    #[test_context(TimeBankTestContext)]
    #[test]
    fn test_zero_at_month_end_is_reported_without_posting(ctx: &mut TimeBankTestContext) {
        let id = ctx.employee_id;
        let mut records = full_march(id);
        replace_day(&mut records, worked_day(id, date(2025, 3, 3), "12:15"));
        ctx.timebank.save_day_records(id, 2025, 3, &records).unwrap();

        let summary = ctx.timebank.monthly_summary(id, 2025, 3, OFFSET, true).unwrap();
        assert_eq!(summary.technical_balance_min, 15);
        assert_eq!(summary.closing_adjustment_min, -15);
        assert_eq!(summary.final_balance_min, 0);
        assert!(ctx.timebank.ledger_entries(id, Some(march())).unwrap().is_empty());
    }

    #[test_context(TimeBankTestContext)]
    #[test]
    fn test_invalid_record_leaves_batch_unsaved(ctx: &mut TimeBankTestContext) {
        let id = ctx.employee_id;
        let mut records = full_march(id);
        records.push(DailyPunchRecord::new(id, date(2025, 3, 1)).with_morning("09:00", "25:00"));

        let result = ctx.timebank.save_day_records(id, 2025, 3, &records);
        assert!(matches!(result, Err(TimeBankError::InvalidTimeFormat { .. })));

        let stored = Punches::new(ctx.timebank.conn()).fetch_month(id, march()).unwrap();
        assert!(stored.is_empty());
        assert!(ctx.timebank.list_available_periods(id, 2025).unwrap().is_empty());
    }

    #[test_context(TimeBankTestContext)]
    #[test]
    fn test_batch_rejects_foreign_and_duplicate_days(ctx: &mut TimeBankTestContext) {
        let id = ctx.employee_id;
        let outside = vec![worked_day(id, date(2025, 4, 1), "12:00")];
        assert!(matches!(
            ctx.timebank.save_day_records(id, 2025, 3, &outside),
            Err(TimeBankError::InvalidInput(_))
        ));

        let duplicated = vec![worked_day(id, date(2025, 3, 3), "12:00"), worked_day(id, date(2025, 3, 3), "12:15")];
        assert!(matches!(
            ctx.timebank.save_day_records(id, 2025, 3, &duplicated),
            Err(TimeBankError::InvalidInput(_))
        ));

        let unknown_reason = vec![DailyPunchRecord {
            reason_id: Some(99),
            ..DailyPunchRecord::new(id, date(2025, 3, 3)).with_occurrence(Occurrence::JustifiedAbsence)
        }];
        assert!(matches!(
            ctx.timebank.save_day_records(id, 2025, 3, &unknown_reason),
            Err(TimeBankError::InvalidInput(_))
        ));

        assert!(matches!(
            ctx.timebank.save_day_records(404, 2025, 3, &[]),
            Err(TimeBankError::EmployeeNotFound(404))
        ));
    }

    #[test_context(TimeBankTestContext)]
    #[test]
    fn test_saving_again_replaces_the_day(ctx: &mut TimeBankTestContext) {
        let id = ctx.employee_id;
        ctx.timebank.save_day_records(id, 2025, 3, &full_march(id)).unwrap();
        ctx.timebank
            .save_day_records(id, 2025, 3, &[worked_day(id, date(2025, 3, 3), "12:30")])
            .unwrap();

        let stored = Punches::new(ctx.timebank.conn()).fetch_month(id, march()).unwrap();
        assert_eq!(stored.len(), 21);
        let summary = ctx.timebank.monthly_summary(id, 2025, 3, OFFSET, false).unwrap();
        assert_eq!(summary.ordinary_overtime_min, 30);
    }

    #[test_context(TimeBankTestContext)]
    #[test]
    fn test_justified_absence_with_reason(ctx: &mut TimeBankTestContext) {
        let id = ctx.employee_id;
        let reason_id = Reasons::new(ctx.timebank.conn()).insert("Medical certificate").unwrap();
        let mut records = full_march(id);
        replace_day(
            &mut records,
            DailyPunchRecord {
                reason_id: Some(reason_id),
                ..DailyPunchRecord::new(id, date(2025, 3, 3)).with_occurrence(Occurrence::JustifiedAbsence)
            },
        );
        ctx.timebank.save_day_records(id, 2025, 3, &records).unwrap();

        let summary = ctx.timebank.monthly_summary(id, 2025, 3, OFFSET, false).unwrap();
        assert_eq!(summary.justified_absence_days, 1);
        assert_eq!(summary.unjustified_absence_days, 0);
        assert_eq!(summary.deficit_min, -480);
        assert_eq!(summary.technical_balance_min, -480);
    }

    #[test_context(TimeBankTestContext)]
    #[test]
    fn test_registered_holiday_turns_work_into_premium(ctx: &mut TimeBankTestContext) {
        let id = ctx.employee_id;
        Holidays::new(ctx.timebank.conn())
            .insert(&Holiday::new(date(2025, 3, 4), Some("Carnival")))
            .unwrap();
        ctx.timebank.save_day_records(id, 2025, 3, &full_march(id)).unwrap();

        let summary = ctx.timebank.monthly_summary(id, 2025, 3, OFFSET, false).unwrap();
        assert_eq!(summary.expected_min, 20 * 480);
        assert_eq!(summary.premium_overtime_min, 480);
        assert_eq!(summary.ordinary_overtime_min, 0);
        assert_eq!(summary.technical_balance_min, 480);
    }

    #[test_context(TimeBankTestContext)]
    #[test]
    fn test_closed_month_carries_forward(ctx: &mut TimeBankTestContext) {
        let id = ctx.employee_id;
        let mut records = full_march(id);
        replace_day(&mut records, worked_day(id, date(2025, 3, 3), "12:15"));
        ctx.timebank.save_day_records(id, 2025, 3, &records).unwrap();
        ctx.timebank.add_manual_adjustment(id, date(2025, 3, 20), 30, None).unwrap();

        let closed = ctx.timebank.close_period(id, 2025, 3).unwrap();
        assert_eq!(closed.status, PeriodStatus::Closed);
        assert_eq!(closed.actor.as_deref(), Some("tester"));

        let entries = ctx.timebank.ledger_entries(id, Some(march())).unwrap();
        let kinds: Vec<EntryKind> = entries.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EntryKind::ManualAdjustment, EntryKind::CarryForward]);
        assert_eq!(entries[1].minutes, 15);

        let march_after = ctx.timebank.monthly_summary(id, 2025, 3, OFFSET, false).unwrap();
        assert_eq!(march_after.technical_balance_min, 45);
        assert_eq!(march_after.status, PeriodStatus::Closed);

        let april = ctx.timebank.monthly_summary(id, 2025, 4, OFFSET, false).unwrap();
        assert_eq!(april.carry_over_min, 45);
        assert_eq!(april.status, PeriodStatus::NotStarted);
    }

    #[test_context(TimeBankTestContext)]
    #[test]
    fn test_closing_with_zero_at_month_end_posts_payout(ctx: &mut TimeBankTestContext) {
        let id = ctx.employee_id;
        let settings = EngineConfig {
            zero_at_month_end: true,
            ..EngineConfig::default()
        };
        let mut records = full_march(id);
        replace_day(&mut records, worked_day(id, date(2025, 3, 3), "12:15"));
        ctx.timebank.save_day_records(id, 2025, 3, &records).unwrap();
        ctx.timebank.add_manual_adjustment(id, date(2025, 3, 20), 30, None).unwrap();

        let db = Db::open(ctx.temp_dir.path().join("hourbank.db")).unwrap();
        let mut timebank = TimeBank::new(db, "tester").with_settings(settings);
        timebank.close_period(id, 2025, 3).unwrap();

        let closure: Vec<_> = timebank
            .ledger_entries(id, Some(march()))
            .unwrap()
            .into_iter()
            .filter(|e| e.kind.is_closure())
            .collect();
        assert_eq!(closure.len(), 1);
        assert_eq!(closure[0].kind, EntryKind::ClosurePayout);
        assert_eq!(closure[0].minutes, -45);

        let march_after = timebank.monthly_summary(id, 2025, 3, OFFSET, false).unwrap();
        assert_eq!(march_after.technical_balance_min, 0);
        let april = timebank.monthly_summary(id, 2025, 4, OFFSET, false).unwrap();
        assert_eq!(april.carry_over_min, 0);
    }

    #[test_context(TimeBankTestContext)]
    #[test]
    fn test_closing_a_negative_month_posts_deduction(ctx: &mut TimeBankTestContext) {
        let id = ctx.employee_id;
        let mut records = full_march(id);
        replace_day(&mut records, worked_day(id, date(2025, 3, 5), "11:20"));
        ctx.timebank.save_day_records(id, 2025, 3, &records).unwrap();

        let db = Db::open(ctx.temp_dir.path().join("hourbank.db")).unwrap();
        let settings = EngineConfig {
            zero_at_month_end: true,
            ..EngineConfig::default()
        };
        let mut timebank = TimeBank::new(db, "tester").with_settings(settings);
        timebank.close_period(id, 2025, 3).unwrap();

        let entries = timebank.ledger_entries(id, Some(march())).unwrap();
        let deduction = entries.iter().find(|e| e.kind == EntryKind::ClosureDeduction).unwrap();
        assert_eq!(deduction.minutes, 40);
        assert_eq!(timebank.monthly_summary(id, 2025, 4, OFFSET, false).unwrap().carry_over_min, 0);
    }

    #[test_context(TimeBankTestContext)]
    #[test]
    fn test_reclosing_posts_only_the_change(ctx: &mut TimeBankTestContext) {
        let id = ctx.employee_id;
        let mut records = full_march(id);
        replace_day(&mut records, worked_day(id, date(2025, 3, 3), "12:15"));
        ctx.timebank.save_day_records(id, 2025, 3, &records).unwrap();
        ctx.timebank.close_period(id, 2025, 3).unwrap();

        let reopened = ctx.timebank.reopen_period(id, 2025, 3).unwrap();
        assert_eq!(reopened.status, PeriodStatus::Open);
        ctx.timebank
            .save_day_records(id, 2025, 3, &[worked_day(id, date(2025, 3, 4), "12:20")])
            .unwrap();
        ctx.timebank.close_period(id, 2025, 3).unwrap();

        let carried: Vec<i64> = ctx
            .timebank
            .ledger_entries(id, Some(march()))
            .unwrap()
            .iter()
            .filter(|e| e.kind == EntryKind::CarryForward)
            .map(|e| e.minutes)
            .collect();
        assert_eq!(carried, vec![15, 20]);
        assert_eq!(ctx.timebank.monthly_summary(id, 2025, 4, OFFSET, false).unwrap().carry_over_min, 35);
    }

    #[test_context(TimeBankTestContext)]
    #[test]
    fn test_closed_month_rejects_writes(ctx: &mut TimeBankTestContext) {
        let id = ctx.employee_id;
        ctx.timebank.save_day_records(id, 2025, 3, &full_march(id)).unwrap();
        let entry = ctx.timebank.add_manual_adjustment(id, date(2025, 3, 10), -20, None).unwrap();
        ctx.timebank.close_period(id, 2025, 3).unwrap();

        assert!(matches!(
            ctx.timebank.save_day_records(id, 2025, 3, &[worked_day(id, date(2025, 3, 3), "12:30")]),
            Err(TimeBankError::LockedPeriod { .. })
        ));
        assert!(matches!(
            ctx.timebank.add_manual_adjustment(id, date(2025, 3, 10), 10, None),
            Err(TimeBankError::LockedPeriod { .. })
        ));
        assert!(matches!(
            ctx.timebank.remove_manual_adjustment(entry.id.unwrap()),
            Err(TimeBankError::LockedPeriod { .. })
        ));
        assert!(matches!(
            ctx.timebank.close_period(id, 2025, 3),
            Err(TimeBankError::InvalidTransition {
                from: PeriodStatus::Closed,
                ..
            })
        ));
    }

    #[test_context(TimeBankTestContext)]
    #[test]
    fn test_illegal_period_transitions(ctx: &mut TimeBankTestContext) {
        let id = ctx.employee_id;
        assert!(matches!(
            ctx.timebank.close_period(id, 2025, 2),
            Err(TimeBankError::InvalidTransition {
                from: PeriodStatus::NotStarted,
                ..
            })
        ));

        ctx.timebank.save_day_records(id, 2025, 3, &[]).unwrap();
        assert!(matches!(
            ctx.timebank.reopen_period(id, 2025, 3),
            Err(TimeBankError::InvalidTransition { from: PeriodStatus::Open, .. })
        ));
        assert!(matches!(
            ctx.timebank.monthly_summary(id, 2025, 13, OFFSET, false),
            Err(TimeBankError::InvalidPeriodToken(_))
        ));
    }

    #[test_context(TimeBankTestContext)]
    #[test]
    fn test_available_periods_are_ordered(ctx: &mut TimeBankTestContext) {
        let id = ctx.employee_id;
        ctx.timebank.add_manual_adjustment(id, date(2025, 5, 2), 10, None).unwrap();
        ctx.timebank.save_day_records(id, 2025, 3, &[]).unwrap();
        ctx.timebank.add_manual_adjustment(id, date(2024, 12, 2), 10, None).unwrap();

        let periods = ctx.timebank.list_available_periods(id, 2025).unwrap();
        let months: Vec<String> = periods.iter().map(|p| p.year_month.to_string()).collect();
        assert_eq!(months, vec!["2025-03", "2025-05"]);
        assert!(periods.iter().all(|p| p.status == PeriodStatus::Open));
    }

    #[test_context(TimeBankTestContext)]
    #[test]
    fn test_manual_adjustment_rules(ctx: &mut TimeBankTestContext) {
        let id = ctx.employee_id;
        assert!(matches!(
            ctx.timebank.add_manual_adjustment(id, date(2025, 3, 10), 0, None),
            Err(TimeBankError::InvalidAdjustment(_))
        ));
        assert!(matches!(
            ctx.timebank.remove_manual_adjustment(12345),
            Err(TimeBankError::EntryNotFound(12345))
        ));

        let entry = ctx.timebank.add_manual_adjustment(id, date(2025, 3, 10), 90, Some("bonus")).unwrap();
        assert_eq!(entry.kind, EntryKind::ManualAdjustment);
        assert_eq!(entry.note.as_deref(), Some("bonus"));
        assert_eq!(entry.year_month, march());

        let removed = ctx.timebank.remove_manual_adjustment(entry.id.unwrap()).unwrap();
        assert_eq!(removed.minutes, 90);
        assert!(ctx.timebank.ledger_entries(id, None).unwrap().is_empty());
    }

    #[test_context(TimeBankTestContext)]
    #[test]
    fn test_system_postings_cannot_be_removed(ctx: &mut TimeBankTestContext) {
        let id = ctx.employee_id;
        let mut records = full_march(id);
        replace_day(&mut records, worked_day(id, date(2025, 3, 3), "12:15"));
        ctx.timebank.save_day_records(id, 2025, 3, &records).unwrap();
        ctx.timebank.close_period(id, 2025, 3).unwrap();
        ctx.timebank.reopen_period(id, 2025, 3).unwrap();

        let carried = ctx.timebank.ledger_entries(id, Some(march())).unwrap();
        assert_eq!(carried.len(), 1);
        assert!(matches!(
            ctx.timebank.remove_manual_adjustment(carried[0].id.unwrap()),
            Err(TimeBankError::InvalidAdjustment(_))
        ));
    }

    #[test_context(TimeBankTestContext)]
    #[test]
    fn test_fleet_summary_covers_active_employees(ctx: &mut TimeBankTestContext) {
        let id = ctx.employee_id;
        let employees = Employees::new(ctx.timebank.conn());
        let schedule_id = employees.require(id).unwrap().schedule_id;
        let second = employees.insert(&Employee::new("Bruno Lima", schedule_id, 3300.0)).unwrap();
        let mut gone = Employee::new("Carla Dias", schedule_id, 1000.0);
        gone.active = false;
        employees.insert(&gone).unwrap();

        let mut records = full_march(id);
        replace_day(&mut records, worked_day(id, date(2025, 3, 3), "12:15"));
        ctx.timebank.save_day_records(id, 2025, 3, &records).unwrap();
        ctx.timebank.save_day_records(second, 2025, 3, &full_march(second)).unwrap();

        let fleet = ctx.timebank.fleet_summary(2025, 3, OFFSET, false).unwrap();
        assert_eq!(fleet.lines.len(), 2);
        assert_eq!(fleet.totals.employees, 2);
        assert_eq!(fleet.totals.worked_min, 2 * 21 * 480 + 15);
        assert_eq!(fleet.totals.ordinary_overtime_min, 15);
        assert_eq!(fleet.totals.final_balance_min, 15);
        assert_eq!(fleet.lines[1].employee_name, "Bruno Lima");
    }
}
