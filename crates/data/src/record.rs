use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of a returns file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnRecord {
    /// 1-based line number in the source, header included
    pub line: u64,
    /// Trading date, when the source has a parsable `date` column
    pub date: Option<NaiveDate>,
    /// Realized net return
    pub value: f64,
}

/// Returns true if every dated record is on or after the previous dated one.
///
/// Records without a date are ignored.
#[must_use]
pub fn is_chronological(records: &[ReturnRecord]) -> bool {
    let mut dates = records.iter().filter_map(|r| r.date);
    let Some(mut previous) = dates.next() else {
        return true;
    };
    for date in dates {
        if date < previous {
            return false;
        }
        previous = date;
    }
    true
}
