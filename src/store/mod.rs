mod clipboard;
mod error;
mod mutations;
mod queries;
mod selection;
mod stats;

pub use clipboard::MonthClipboard;
pub use error::StoreError;
pub use selection::{resolve_targets, BulkEdit, DateRange, EditMode, WeekdayPattern};
pub use stats::{month_stats, occupancy_pct};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::*;
use crate::notify::NotifyHub;

/// What a bulk edit does when its selection resolves to no dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptySelection {
    /// Write nothing and report zero dates.
    #[default]
    Ignore,
    /// Fail with `StoreError::NoTargetDates`.
    Reject,
}

/// How accepted mutations are remembered until the next save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalMode {
    /// Keep every event; `mark_saved` hands them over.
    #[default]
    Events,
    /// Keep only a count. Memory stays constant however long the session runs.
    CountOnly,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOptions {
    #[serde(default)]
    pub empty_selection: EmptySelection,
    #[serde(default)]
    pub journal: JournalMode,
}

/// In-memory availability for one session.
///
/// Single writer: every mutation takes `&mut self` and is visible as soon as
/// the call returns. Accepted mutations are journaled as [`Event`]s until
/// [`AvailabilityStore::mark_saved`] and broadcast on the hub channel of the
/// month they touch.
///
/// With [`JournalMode::Events`] the journal holds one event per mutation,
/// whole-day writes included, so it grows until the next save. Sessions that
/// never save should use [`JournalMode::CountOnly`].
pub struct AvailabilityStore {
    data: AvailabilityData,
    counts: RoomCounts,
    options: StoreOptions,
    pending: Vec<Event>,
    unsaved: usize,
    pub notify: Arc<NotifyHub>,
}

/// Apply an event to the raw mapping. Events carry already-validated values.
fn apply_event(data: &mut AvailabilityData, event: &Event) {
    match event {
        Event::CellSet {
            date,
            room_type,
            value,
            ..
        } => {
            data.entry(*date).or_default().insert(*room_type, *value);
        }
        Event::DaySet { date, snapshot, .. } => {
            data.insert(*date, snapshot.clone());
        }
    }
}

/// Clamp every value into `[0, capacity]`. Room types the catalog does not
/// have are dropped.
fn clamp_snapshot(raw: &RawSnapshot, counts: &RoomCounts) -> DaySnapshot {
    raw.iter()
        .filter_map(|(room_type, value)| {
            let cap = counts.get(*room_type)?;
            Some((*room_type, (*value).clamp(0, i64::from(cap)) as Units))
        })
        .collect()
}

impl AvailabilityStore {
    pub fn new(counts: RoomCounts) -> Self {
        Self::with_options(counts, StoreOptions::default())
    }

    pub fn with_options(counts: RoomCounts, options: StoreOptions) -> Self {
        Self {
            data: AvailabilityData::new(),
            counts,
            options,
            pending: Vec::new(),
            unsaved: 0,
            notify: Arc::new(NotifyHub::new()),
        }
    }

    /// Load session-start data. Not journaled and not broadcast. Values are
    /// clamped like `set_day`; returns how many days had to be corrected.
    pub fn seed(&mut self, data: AvailabilityData) -> usize {
        let mut corrected = 0;
        for (date, snapshot) in data {
            let raw: RawSnapshot = snapshot.iter().map(|(t, v)| (*t, i64::from(*v))).collect();
            let clamped = clamp_snapshot(&raw, &self.counts);
            if clamped != snapshot {
                warn!(%date, "seed day out of range, clamped");
                corrected += 1;
            }
            self.data.insert(date, clamped);
        }
        corrected
    }

    pub fn room_counts(&self) -> &RoomCounts {
        &self.counts
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    // ── Change journal ───────────────────────────────────────

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved > 0
    }

    /// Mutations since the last save, in either journal mode.
    pub fn unsaved_count(&self) -> usize {
        self.unsaved
    }

    /// Journaled events. Always empty in [`JournalMode::CountOnly`].
    pub fn pending_changes(&self) -> &[Event] {
        &self.pending
    }

    /// Hand the journal to whoever persists it and start a clean one.
    pub fn mark_saved(&mut self) -> Vec<Event> {
        let saved = std::mem::take(&mut self.pending);
        self.unsaved = 0;
        metrics::gauge!(crate::observability::PENDING_CHANGES).set(0.0);
        saved
    }

    /// Apply + journal + notify in one call.
    fn record(&mut self, event: Event) {
        apply_event(&mut self.data, &event);
        self.notify.send(Month::of(event.date()), &event);
        self.unsaved += 1;
        if self.options.journal == JournalMode::Events {
            self.pending.push(event);
        }
        metrics::gauge!(crate::observability::PENDING_CHANGES).set(self.unsaved as f64);
    }
}
