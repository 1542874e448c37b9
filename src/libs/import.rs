//! Month batches of punch records read from CSV.
//!
//! Expected header (columns other than `date` may be left empty):
//!
//! ```text
//! date,morning,afternoon,extra,occurrence,reason_id,note,holiday
//! 2025-03-03,08:00-12:00,13:00-17:00,,,,,
//! 2025-03-04,,,,JUSTIFIED_ABSENCE,1,medical,
//! ```

use crate::db::punches::{DailyPunchRecord, Occurrence, PunchPair};
use crate::libs::time_units::YearMonth;
use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct PunchRow {
    date: NaiveDate,
    morning: Option<String>,
    afternoon: Option<String>,
    extra: Option<String>,
    occurrence: Option<String>,
    reason_id: Option<i64>,
    note: Option<String>,
    holiday: Option<bool>,
}

impl PunchRow {
    fn into_record(self, employee_id: i64) -> Result<DailyPunchRecord> {
        let pair = |field: &str, value: Option<String>| -> Result<PunchPair> {
            match value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                Some(range) => Ok(PunchPair::parse_range(field, range)?),
                None => Ok(PunchPair::default()),
            }
        };

        let mut record = DailyPunchRecord::new(employee_id, self.date);
        record.morning = pair("morning", self.morning)?;
        record.afternoon = pair("afternoon", self.afternoon)?;
        record.extra = pair("extra", self.extra)?;
        record.occurrence = match self.occurrence {
            Some(occurrence) => occurrence.parse()?,
            None => Occurrence::Normal,
        };
        record.reason_id = self.reason_id;
        record.note = self.note.filter(|n| !n.trim().is_empty());
        record.holiday = self.holiday.unwrap_or(false);
        Ok(record)
    }
}

/// A parsed batch and the month every row belongs to.
#[derive(Debug)]
pub struct PunchBatch {
    pub year_month: YearMonth,
    pub records: Vec<DailyPunchRecord>,
}

/// Reads punch rows for one employee; every row must fall in the same month.
pub fn read_punch_csv<R: Read>(reader: R, employee_id: i64) -> Result<PunchBatch> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();
    for row in rdr.deserialize::<PunchRow>() {
        records.push(row?.into_record(employee_id)?);
    }

    let Some(first) = records.first() else {
        bail!("the CSV file contains no punch rows");
    };
    let year_month = YearMonth::of(first.date);
    if let Some(stray) = records.iter().find(|r| !year_month.contains(r.date)) {
        bail!("row dated {} is outside {}; import one month at a time", stray.date, year_month);
    }

    Ok(PunchBatch { year_month, records })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPLOYEE: i64 = 7;

    #[test]
    fn reads_pairs_and_occurrences() {
        let data = "date,morning,afternoon,extra,occurrence,reason_id,note,holiday\n\
                    2025-03-03,08:00-12:00,13:00-17:00,,,,,\n\
                    2025-03-04,,,,justified_absence,1,medical,\n";
        let batch = read_punch_csv(data.as_bytes(), EMPLOYEE).unwrap();

        assert_eq!(batch.year_month.to_string(), "2025-03");
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.records[0].morning, PunchPair::new("08:00", "12:00"));
        assert_eq!(batch.records[0].afternoon, PunchPair::new("13:00", "17:00"));
        assert!(batch.records[0].extra.is_empty());
        assert_eq!(batch.records[1].occurrence, Occurrence::JustifiedAbsence);
        assert_eq!(batch.records[1].reason_id, Some(1));
        assert_eq!(batch.records[1].note.as_deref(), Some("medical"));
    }

    #[test]
    fn rejects_rows_from_two_months() {
        let data = "date,morning,afternoon,extra,occurrence,reason_id,note,holiday\n\
                    2025-03-31,08:00-12:00,,,,,,\n\
                    2025-04-01,08:00-12:00,,,,,,\n";
        assert!(read_punch_csv(data.as_bytes(), EMPLOYEE).is_err());
    }

    #[test]
    fn rejects_malformed_ranges() {
        let data = "date,morning,afternoon,extra,occurrence,reason_id,note,holiday\n\
                    2025-03-03,8h-12h,,,,,,\n";
        assert!(read_punch_csv(data.as_bytes(), EMPLOYEE).is_err());
    }
}
