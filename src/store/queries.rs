use chrono::NaiveDate;

use crate::model::*;

use super::stats::month_stats;
use super::AvailabilityStore;

impl AvailabilityStore {
    /// `None` means no data for that date, which is not the same as zero.
    pub fn get(&self, date: NaiveDate) -> Option<&DaySnapshot> {
        self.data.get(&date)
    }

    /// Current value of one cell, 0 when the day or the type has no entry.
    pub fn cell(&self, date: NaiveDate, room_type: RoomType) -> Units {
        self.get(date)
            .and_then(|day| day.get(&room_type).copied())
            .unwrap_or(0)
    }

    /// Read-only view of the whole mapping, e.g. for JSON export.
    pub fn data(&self) -> &AvailabilityData {
        &self.data
    }

    /// Populated days of a month, chronological.
    pub fn month_entries(&self, month: Month) -> impl Iterator<Item = (&NaiveDate, &DaySnapshot)> {
        self.data.range(month.first_day()..=month.last_day())
    }

    pub fn month_stats(&self, month: Month) -> MonthStats {
        month_stats(&self.data, &self.counts, month)
    }
}
