use chrono::NaiveDate;
use tracing::{debug, info, warn};
use ulid::Ulid;

use crate::model::*;
use crate::observability::{mode_label, BULK_DATES_WRITTEN, BULK_EDITS_TOTAL, CELL_EDITS_TOTAL};

use super::selection::{resolve_targets, BulkEdit, DateRange, WeekdayPattern};
use super::{clamp_snapshot, AvailabilityStore, EmptySelection, StoreError};

impl AvailabilityStore {
    /// Check a single-cell value against the catalog without writing.
    pub fn check_cell(
        &self,
        date: NaiveDate,
        room_type: RoomType,
        value: i64,
    ) -> Result<Units, StoreError> {
        let capacity = self
            .counts
            .get(room_type)
            .ok_or(StoreError::UnknownRoomType(room_type))?;
        if value < 0 || value > i64::from(capacity) {
            return Err(StoreError::OutOfRange {
                date,
                room_type,
                value,
                capacity,
            });
        }
        Ok(value as Units)
    }

    /// Replace one (date, room type) cell. Other room types of that day are
    /// left alone; a day without data gets an entry holding just this type.
    pub fn set(
        &mut self,
        date: NaiveDate,
        room_type: RoomType,
        value: i64,
    ) -> Result<(), StoreError> {
        let value = match self.check_cell(date, room_type, value) {
            Ok(v) => v,
            Err(e) => {
                metrics::counter!(CELL_EDITS_TOTAL, "status" => "rejected").increment(1);
                return Err(e);
            }
        };
        debug!(%date, %room_type, value, "cell set");
        self.record(Event::CellSet {
            id: Ulid::new(),
            date,
            room_type,
            value,
        });
        metrics::counter!(CELL_EDITS_TOTAL, "status" => "ok").increment(1);
        Ok(())
    }

    /// Replace the whole day. Values are clamped, never rejected. Returns what
    /// was stored.
    pub fn set_day(&mut self, date: NaiveDate, snapshot: &RawSnapshot) -> DaySnapshot {
        let snapshot = clamp_snapshot(snapshot, &self.counts);
        debug!(%date, ?snapshot, "day set");
        self.record(Event::DaySet {
            id: Ulid::new(),
            date,
            snapshot: snapshot.clone(),
        });
        snapshot
    }

    /// Resolve the target dates and overwrite each of them with the edit's
    /// snapshot. Returns the dates written, in resolution order.
    pub fn apply_bulk(&mut self, edit: &BulkEdit) -> Result<Vec<NaiveDate>, StoreError> {
        let dates = resolve_targets(edit)?;
        if dates.is_empty() {
            match self.options.empty_selection {
                EmptySelection::Reject => return Err(StoreError::NoTargetDates),
                EmptySelection::Ignore => {
                    warn!(
                        mode = mode_label(edit.mode),
                        "bulk edit matched no dates, nothing written"
                    );
                    return Ok(dates);
                }
            }
        }

        for &date in &dates {
            self.set_day(date, &edit.snapshot);
        }

        metrics::counter!(BULK_EDITS_TOTAL, "mode" => mode_label(edit.mode)).increment(1);
        metrics::histogram!(BULK_DATES_WRITTEN).record(dates.len() as f64);
        info!(
            mode = mode_label(edit.mode),
            dates = dates.len(),
            first = %dates[0],
            last = %dates[dates.len() - 1],
            "bulk edit applied"
        );
        Ok(dates)
    }

    /// Quick action: apply a weekday pattern across every day of one month.
    pub fn apply_month_pattern(
        &mut self,
        month: Month,
        pattern: WeekdayPattern,
        snapshot: RawSnapshot,
    ) -> Result<Vec<NaiveDate>, StoreError> {
        let edit = BulkEdit::pattern(DateRange::month(month), pattern, snapshot);
        self.apply_bulk(&edit)
    }
}
