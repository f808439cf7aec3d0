use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::limits::*;
use crate::model::*;
use crate::store::{occupancy_pct, AvailabilityStore, StoreError};

/// Colour band of a calendar cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupancyTier {
    Low,
    Medium,
    High,
    Full,
    NoData,
}

impl OccupancyTier {
    pub fn classify(available: Option<u64>, total_rooms: u64) -> Self {
        let Some(available) = available else {
            return OccupancyTier::NoData;
        };
        let Some(pct) = occupancy_pct(available, total_rooms) else {
            return OccupancyTier::NoData;
        };
        if pct >= TIER_FULL_PCT {
            OccupancyTier::Full
        } else if pct >= TIER_HIGH_PCT {
            OccupancyTier::High
        } else if pct >= TIER_MEDIUM_PCT {
            OccupancyTier::Medium
        } else {
            OccupancyTier::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// `None` when the day has no data.
    pub total_available: Option<u64>,
    pub total_rooms: u64,
    pub tier: OccupancyTier,
    pub is_today: bool,
    pub is_past: bool,
}

impl DayCell {
    pub fn editable(&self) -> bool {
        !self.is_past
    }
}

/// One month laid out Sunday-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub month: Month,
    /// Empty cells before the 1st (its weekday, Sunday = 0).
    pub leading_blanks: u32,
    pub cells: Vec<DayCell>,
}

impl CalendarMonth {
    /// Blank slots followed by the day cells, ready to wrap every 7.
    pub fn slots(&self) -> impl Iterator<Item = Option<&DayCell>> {
        std::iter::repeat_n(None, self.leading_blanks as usize).chain(self.cells.iter().map(Some))
    }

    pub fn weeks(&self) -> Vec<Vec<Option<&DayCell>>> {
        let slots: Vec<_> = self.slots().collect();
        slots.chunks(7).map(<[_]>::to_vec).collect()
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        if !self.month.contains(date) {
            return None;
        }
        self.cells.get(date.day0() as usize)
    }
}

/// The admin availability calendar: which month is shown, relative to which day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarView {
    pub month: Month,
    pub today: NaiveDate,
}

impl CalendarView {
    pub fn new(month: Month, today: NaiveDate) -> Self {
        Self { month, today }
    }

    /// Opened on the current month.
    pub fn at(today: NaiveDate) -> Self {
        Self::new(Month::of(today), today)
    }

    pub fn prev(&mut self) {
        if let Some(m) = self.month.pred() {
            self.month = m;
        }
    }

    pub fn next(&mut self) {
        if let Some(m) = self.month.succ() {
            self.month = m;
        }
    }

    pub fn go_to_today(&mut self) {
        self.month = Month::of(self.today);
    }

    pub fn render(&self, store: &AvailabilityStore) -> CalendarMonth {
        let total_rooms = store.room_counts().total();
        let cells = self
            .month
            .days()
            .map(|date| {
                let total_available = store.get(date).map(day_total);
                DayCell {
                    date,
                    total_available,
                    total_rooms,
                    tier: OccupancyTier::classify(total_available, total_rooms),
                    is_today: date == self.today,
                    is_past: date < self.today,
                }
            })
            .collect();
        CalendarMonth {
            month: self.month,
            leading_blanks: self.month.first_day().weekday().num_days_from_sunday(),
            cells,
        }
    }

    /// Commit the values typed into an expanded cell: one `set` per room type
    /// touched. Everything is checked first so a bad value writes nothing.
    pub fn commit(
        &self,
        store: &mut AvailabilityStore,
        date: NaiveDate,
        edits: &[(RoomType, i64)],
    ) -> Result<(), StoreError> {
        self.check_editable(date)?;
        for &(room_type, value) in edits {
            store.check_cell(date, room_type, value)?;
        }
        for &(room_type, value) in edits {
            store.set(date, room_type, value)?;
        }
        Ok(())
    }

    /// The +/- buttons: move one cell by `delta`, staying inside
    /// `[0, capacity]`. A missing value counts as 0. Returns the new value.
    pub fn step(
        &self,
        store: &mut AvailabilityStore,
        date: NaiveDate,
        room_type: RoomType,
        delta: i64,
    ) -> Result<Units, StoreError> {
        self.check_editable(date)?;
        let capacity = store
            .room_counts()
            .get(room_type)
            .ok_or(StoreError::UnknownRoomType(room_type))?;
        let current = i64::from(store.cell(date, room_type));
        let next = current.saturating_add(delta).clamp(0, i64::from(capacity));
        if next != current {
            store.set(date, room_type, next)?;
        }
        Ok(next as Units)
    }

    fn check_editable(&self, date: NaiveDate) -> Result<(), StoreError> {
        if date < self.today {
            return Err(StoreError::DateNotEditable(date));
        }
        Ok(())
    }
}
