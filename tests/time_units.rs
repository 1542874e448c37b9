#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use hourbank::libs::error::TimeBankError;
    use hourbank::libs::time_units::{format_signed_minutes, overlap_minutes, parse_hhmm, parse_window, span_minutes, DayType, YearMonth};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_hhmm_accepts_strict_tokens() {
        assert_eq!(parse_hhmm("entry", "00:00").unwrap(), 0);
        assert_eq!(parse_hhmm("entry", "08:30").unwrap(), 510);
        assert_eq!(parse_hhmm("entry", "23:59").unwrap(), 1439);
    }

    #[test]
    fn test_parse_hhmm_rejects_malformed_tokens() {
        for value in ["8:30", "24:00", "12:60", "12-30", "ab:cd", "", "12:300"] {
            match parse_hhmm("morning_in", value) {
                Err(TimeBankError::InvalidTimeFormat { field, value: got }) => {
                    assert_eq!(field, "morning_in");
                    assert_eq!(got, value);
                }
                other => panic!("expected InvalidTimeFormat for {:?}, got {:?}", value, other),
            }
        }
    }

    #[test]
    fn test_parse_window_rejects_exit_before_entry() {
        assert_eq!(parse_window("in", "08:00", "out", "12:00").unwrap(), (480, 720));
        match parse_window("in", "12:00", "out", "08:00") {
            Err(TimeBankError::InvalidTimeFormat { field, .. }) => assert_eq!(field, "out"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_signed_minute_formatting() {
        assert_eq!(format_signed_minutes(65), "+01:05");
        assert_eq!(format_signed_minutes(-75), "-01:15");
        assert_eq!(format_signed_minutes(0), "00:00");
        assert_eq!(format_signed_minutes(-1500), "-25:00");
    }

    #[test]
    fn test_spans_and_overlaps() {
        assert_eq!(span_minutes(Some(480), Some(720)), 240);
        assert_eq!(span_minutes(Some(720), Some(480)), 0);
        assert_eq!(span_minutes(Some(480), None), 0);
        assert_eq!(overlap_minutes((480, 720), (690, 780)), 30);
        assert_eq!(overlap_minutes((480, 720), (720, 780)), 0);
    }

    #[test]
    fn test_day_type_resolution() {
        assert_eq!(DayType::of(date(2025, 3, 3), false), DayType::Weekday);
        assert_eq!(DayType::of(date(2025, 3, 1), false), DayType::Saturday);
        assert_eq!(DayType::of(date(2025, 3, 2), false), DayType::Sunday);
        assert_eq!(DayType::of(date(2025, 3, 2), true), DayType::Holiday);
        assert!(!DayType::Weekday.is_rest_day());
        assert!(DayType::Holiday.is_rest_day());
    }

    #[test]
    fn test_year_month_tokens() {
        let ym: YearMonth = "2024-02".parse().unwrap();
        assert_eq!((ym.year(), ym.month()), (2024, 2));
        assert_eq!(ym.to_string(), "2024-02");
        assert_eq!(ym.days().count(), 29);

        for token in ["2024-13", "2024-00", "2024-2", "202402", "2024/02", "24-02-01"] {
            assert!(matches!(token.parse::<YearMonth>(), Err(TimeBankError::InvalidPeriodToken(_))), "{}", token);
        }
    }

    #[test]
    fn test_year_month_ordering() {
        let jan: YearMonth = "2025-01".parse().unwrap();
        let dec: YearMonth = "2024-12".parse().unwrap();
        assert!(dec < jan);
        assert!(jan.contains(date(2025, 1, 31)));
        assert!(!jan.contains(date(2025, 2, 1)));
    }
}
