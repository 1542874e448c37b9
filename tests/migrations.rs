#[cfg(test)]
mod tests {
    use hourbank::db::db::Db;
    use hourbank::db::migrations::{get_db_version, init_with_migrations, needs_migration, MigrationManager};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct MigrationTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for MigrationTestContext {
        fn setup() -> Self {
            MigrationTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_fresh_database_is_migrated(ctx: &mut MigrationTestContext) {
        let mut conn = Db::open_without_migrations(ctx.temp_dir.path().join("hourbank.db")).unwrap();
        assert_eq!(get_db_version(&conn).unwrap(), 0);
        assert!(needs_migration(&conn).unwrap());

        init_with_migrations(&mut conn).unwrap();
        assert_eq!(get_db_version(&conn).unwrap(), 2);
        assert!(!needs_migration(&conn).unwrap());

        let manager = MigrationManager::new();
        assert!(manager.is_migration_applied(&conn, 1).unwrap());
        assert!(manager.is_migration_applied(&conn, 2).unwrap());
        let history = manager.get_migration_history(&conn).unwrap();
        let names: Vec<&str> = history.iter().map(|(_, name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["create_time_bank_tables", "add_holidays_and_reasons"]);
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migrations_are_idempotent(ctx: &mut MigrationTestContext) {
        let path = ctx.temp_dir.path().join("hourbank.db");
        drop(Db::open(&path).unwrap());
        let mut db = Db::open(&path).unwrap();

        init_with_migrations(&mut db.conn).unwrap();
        let history = MigrationManager::new().get_migration_history(&db.conn).unwrap();
        assert_eq!(history.len(), 2);
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_schema_has_engine_tables(ctx: &mut MigrationTestContext) {
        let db = Db::open(ctx.temp_dir.path().join("hourbank.db")).unwrap();
        for table in ["schedules", "employees", "punches", "ledger", "periods", "holidays", "reasons"] {
            let count: i64 = db
                .conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "missing table {}", table);
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_rollback_then_reapply(ctx: &mut MigrationTestContext) {
        let mut db = Db::open(ctx.temp_dir.path().join("hourbank.db")).unwrap();
        let manager = MigrationManager::new();

        manager.rollback_to(&mut db.conn, 1).unwrap();
        assert_eq!(get_db_version(&db.conn).unwrap(), 1);
        assert!(needs_migration(&db.conn).unwrap());

        init_with_migrations(&mut db.conn).unwrap();
        assert_eq!(get_db_version(&db.conn).unwrap(), 2);
    }
}
