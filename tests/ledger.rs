#[cfg(test)]
mod tests {
    use hourbank::db::db::Db;
    use hourbank::db::employees::{Employee, Employees};
    use hourbank::db::ledger::{EntryKind, LedgerEntry};
    use hourbank::db::schedules::{Schedules, WorkSchedule};
    use hourbank::libs::error::TimeBankError;
    use hourbank::libs::ledger::{AdjustmentLedger, EntryTotals};
    use hourbank::libs::time_units::YearMonth;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct LedgerTestContext {
        _temp_dir: TempDir,
        db: Db,
        employee_id: i64,
    }

    impl TestContext for LedgerTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("hourbank.db")).unwrap();
            let schedule_id = Schedules::new(&db.conn)
                .insert(&WorkSchedule::new("office", "08:00", "12:00"))
                .unwrap();
            let employee_id = Employees::new(&db.conn)
                .insert(&Employee::new("Ana Souza", schedule_id, 2200.0))
                .unwrap();
            LedgerTestContext {
                _temp_dir: temp_dir,
                db,
                employee_id,
            }
        }
    }

    fn ym(token: &str) -> YearMonth {
        token.parse().unwrap()
    }

    #[test_context(LedgerTestContext)]
    #[test]
    fn test_carry_over_sums_only_earlier_months(ctx: &mut LedgerTestContext) {
        let ledger = AdjustmentLedger::new(&ctx.db.conn);
        let id = ctx.employee_id;
        ledger.append(&LedgerEntry::manual(id, ym("2024-12"), 60, None)).unwrap();
        ledger.append(&LedgerEntry::manual(id, ym("2025-01"), -15, None)).unwrap();
        ledger.append(&LedgerEntry::carry_forward(id, ym("2025-01"), 40)).unwrap();
        ledger.append(&LedgerEntry::manual(id, ym("2025-02"), 500, None)).unwrap();

        assert_eq!(ledger.carry_over_balance(id, ym("2024-12")).unwrap(), 0);
        assert_eq!(ledger.carry_over_balance(id, ym("2025-01")).unwrap(), 60);
        assert_eq!(ledger.carry_over_balance(id, ym("2025-02")).unwrap(), 85);
        assert_eq!(ledger.carry_over_balance(id + 1, ym("2025-02")).unwrap(), 0);
    }

    #[test_context(LedgerTestContext)]
    #[test]
    fn test_entries_are_listed_in_insertion_order(ctx: &mut LedgerTestContext) {
        let ledger = AdjustmentLedger::new(&ctx.db.conn);
        let id = ctx.employee_id;
        for minutes in [30, -10, 45] {
            ledger.append(&LedgerEntry::manual(id, ym("2025-03"), minutes, None)).unwrap();
        }
        ledger.append(&LedgerEntry::manual(id, ym("2025-04"), 5, None)).unwrap();

        let minutes: Vec<i64> = ledger.list(id, ym("2025-03")).unwrap().iter().map(|e| e.minutes).collect();
        assert_eq!(minutes, vec![30, -10, 45]);
        assert_eq!(ledger.history(id).unwrap().len(), 4);
    }

    #[test_context(LedgerTestContext)]
    #[test]
    fn test_append_validates_sign_and_amount(ctx: &mut LedgerTestContext) {
        let ledger = AdjustmentLedger::new(&ctx.db.conn);
        let id = ctx.employee_id;
        assert!(matches!(
            ledger.append(&LedgerEntry::manual(id, ym("2025-03"), 0, None)),
            Err(TimeBankError::InvalidAdjustment(_))
        ));

        let mut payout = LedgerEntry::closure(id, ym("2025-03"), 45);
        assert_eq!(payout.kind, EntryKind::ClosurePayout);
        assert_eq!(payout.minutes, -45);
        payout.minutes = 45;
        assert!(matches!(ledger.append(&payout), Err(TimeBankError::InvalidAdjustment(_))));

        let deduction = LedgerEntry::closure(id, ym("2025-03"), -30);
        assert_eq!(deduction.kind, EntryKind::ClosureDeduction);
        let stored = ledger.append(&deduction).unwrap();
        assert_eq!(stored.minutes, 30);
        assert!(stored.id.is_some());
        assert!(stored.created_at.is_some());
    }

    #[test_context(LedgerTestContext)]
    #[test]
    fn test_only_manual_entries_are_removable(ctx: &mut LedgerTestContext) {
        let ledger = AdjustmentLedger::new(&ctx.db.conn);
        let id = ctx.employee_id;
        let manual = ledger.append(&LedgerEntry::manual(id, ym("2025-03"), 20, Some("fix"))).unwrap();
        let closure = ledger.append(&LedgerEntry::closure(id, ym("2025-03"), 20)).unwrap();

        assert!(matches!(
            ledger.remove(closure.id.unwrap()),
            Err(TimeBankError::InvalidAdjustment(_))
        ));
        let removed = ledger.remove(manual.id.unwrap()).unwrap();
        assert_eq!(removed.note.as_deref(), Some("fix"));
        assert!(matches!(ledger.get(manual.id.unwrap()), Err(TimeBankError::EntryNotFound(_))));
        assert_eq!(ledger.list(id, ym("2025-03")).unwrap().len(), 1);
    }

    #[test_context(LedgerTestContext)]
    #[test]
    fn test_month_totals_split_by_kind(ctx: &mut LedgerTestContext) {
        let ledger = AdjustmentLedger::new(&ctx.db.conn);
        let id = ctx.employee_id;
        ledger.append(&LedgerEntry::manual(id, ym("2025-03"), 30, None)).unwrap();
        ledger.append(&LedgerEntry::manual(id, ym("2025-03"), -5, None)).unwrap();
        ledger.append(&LedgerEntry::carry_forward(id, ym("2025-03"), 15)).unwrap();
        ledger.append(&LedgerEntry::closure(id, ym("2025-03"), 40)).unwrap();

        assert_eq!(
            ledger.month_totals(id, ym("2025-03")).unwrap(),
            EntryTotals {
                manual: 25,
                closure: -40,
                carried: 15,
            }
        );
        assert_eq!(ledger.month_totals(id, ym("2025-04")).unwrap(), EntryTotals::default());
    }
}
