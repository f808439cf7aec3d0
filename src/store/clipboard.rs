use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::model::*;

use super::AvailabilityStore;

/// Populated days of one month, copied for pasting onto another month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthClipboard {
    pub source: Month,
    /// Chronological; only days that had data.
    pub days: AvailabilityData,
}

impl MonthClipboard {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }
}

impl AvailabilityStore {
    pub fn copy_month(&self, month: Month) -> MonthClipboard {
        let days: AvailabilityData = self
            .month_entries(month)
            .map(|(date, snapshot)| (*date, snapshot.clone()))
            .collect();
        info!(month = %month, days = days.len(), "copied month");
        MonthClipboard {
            source: month,
            days,
        }
    }

    /// Paste copied days onto `month` by position: the n-th copied day lands
    /// on day n of the target month, whatever its original day number was.
    /// Copied days that would fall past the month's end are dropped.
    /// Each written day is a whole-day overwrite. Returns the dates written.
    pub fn paste_month(&mut self, month: Month, clipboard: &MonthClipboard) -> Vec<NaiveDate> {
        let mut written = Vec::with_capacity(clipboard.len());
        for (index, snapshot) in clipboard.days.values().enumerate() {
            let Some(date) = month.day(index as u32 + 1) else {
                break;
            };
            let raw: RawSnapshot = snapshot
                .iter()
                .map(|(t, v)| (*t, i64::from(*v)))
                .collect();
            self.set_day(date, &raw);
            written.push(date);
        }
        metrics::counter!(crate::observability::BULK_EDITS_TOTAL, "mode" => "paste").increment(1);
        metrics::histogram!(crate::observability::BULK_DATES_WRITTEN).record(written.len() as f64);
        info!(
            source = %clipboard.source,
            target = %month,
            written = written.len(),
            dropped = clipboard.len() - written.len(),
            "pasted month"
        );
        written
    }
}
