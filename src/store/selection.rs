use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::limits::*;
use crate::model::*;

use super::StoreError;

// ── Target-date resolution for bulk edits ─────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    Single,
    Range,
    Pattern,
}

/// Day-of-week filter. Custom indices count from Sunday = 0 to Saturday = 6.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekdayPattern {
    All,
    #[default]
    Weekdays,
    Weekends,
    Custom(BTreeSet<u8>),
}

impl WeekdayPattern {
    pub fn custom(days: impl IntoIterator<Item = u8>) -> Result<Self, StoreError> {
        let pattern = WeekdayPattern::Custom(days.into_iter().collect());
        pattern.validate()?;
        Ok(pattern)
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if let WeekdayPattern::Custom(days) = self
            && let Some(&bad) = days.iter().find(|d| **d > 6)
        {
            return Err(StoreError::InvalidWeekday(bad));
        }
        Ok(())
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        let dow = date.weekday().num_days_from_sunday() as u8;
        match self {
            WeekdayPattern::All => true,
            WeekdayPattern::Weekdays => (1..=5).contains(&dow),
            WeekdayPattern::Weekends => dow == 0 || dow == 6,
            WeekdayPattern::Custom(days) => days.contains(&dow),
        }
    }
}

/// Inclusive civil-date range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, StoreError> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    /// The whole of one month.
    pub fn month(month: Month) -> Self {
        Self {
            start: month.first_day(),
            end: month.last_day(),
        }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.end < self.start {
            return Err(StoreError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        if self.len_days() > MAX_RANGE_DAYS {
            return Err(StoreError::LimitExceeded("date range too wide"));
        }
        Ok(())
    }

    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Every day from start to end, one civil day at a time.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// A bulk edit as submitted from the bulk-edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkEdit {
    pub mode: EditMode,
    /// Dates picked on the calendar. Wins over `range` in single/range mode.
    #[serde(default)]
    pub selected: Vec<NaiveDate>,
    #[serde(default)]
    pub range: Option<DateRange>,
    /// Only consulted in pattern mode.
    #[serde(default)]
    pub pattern: WeekdayPattern,
    pub snapshot: RawSnapshot,
}

impl BulkEdit {
    pub fn dates(selected: Vec<NaiveDate>, snapshot: RawSnapshot) -> Self {
        Self {
            mode: EditMode::Single,
            selected,
            range: None,
            pattern: WeekdayPattern::default(),
            snapshot,
        }
    }

    pub fn range(range: DateRange, snapshot: RawSnapshot) -> Self {
        Self {
            mode: EditMode::Range,
            selected: Vec::new(),
            range: Some(range),
            pattern: WeekdayPattern::default(),
            snapshot,
        }
    }

    pub fn pattern(range: DateRange, pattern: WeekdayPattern, snapshot: RawSnapshot) -> Self {
        Self {
            mode: EditMode::Pattern,
            selected: Vec::new(),
            range: Some(range),
            pattern,
            snapshot,
        }
    }
}

/// Resolve the dates a bulk edit writes to.
///
/// Single/range: a non-empty explicit selection is used verbatim, otherwise
/// every day of the range. Pattern: days of the range whose weekday matches;
/// the explicit selection is ignored. No range and no selection → empty.
pub fn resolve_targets(edit: &BulkEdit) -> Result<Vec<NaiveDate>, StoreError> {
    match edit.mode {
        EditMode::Single | EditMode::Range => {
            if !edit.selected.is_empty() {
                if edit.selected.len() > MAX_SELECTED_DATES {
                    return Err(StoreError::LimitExceeded("too many selected dates"));
                }
                return Ok(edit.selected.clone());
            }
            match &edit.range {
                Some(range) => {
                    range.validate()?;
                    Ok(range.days().collect())
                }
                None => Ok(Vec::new()),
            }
        }
        EditMode::Pattern => {
            edit.pattern.validate()?;
            match &edit.range {
                Some(range) => {
                    range.validate()?;
                    Ok(range.days().filter(|d| edit.pattern.matches(*d)).collect())
                }
                None => Ok(Vec::new()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn snap() -> RawSnapshot {
        RawSnapshot::from([(RoomType::Standard, 1)])
    }

    // 2024-02-12 is a Monday.
    fn week() -> DateRange {
        DateRange::new(d(2024, 2, 12), d(2024, 2, 18)).unwrap()
    }

    #[test]
    fn weekdays_over_monday_week() {
        let edit = BulkEdit::pattern(week(), WeekdayPattern::Weekdays, snap());
        let dates = resolve_targets(&edit).unwrap();
        assert_eq!(
            dates,
            vec![d(2024, 2, 12), d(2024, 2, 13), d(2024, 2, 14), d(2024, 2, 15), d(2024, 2, 16)]
        );
    }

    #[test]
    fn weekends_over_monday_week() {
        let edit = BulkEdit::pattern(week(), WeekdayPattern::Weekends, snap());
        let dates = resolve_targets(&edit).unwrap();
        assert_eq!(dates, vec![d(2024, 2, 17), d(2024, 2, 18)]);
    }

    #[test]
    fn all_pattern_is_whole_range() {
        let edit = BulkEdit::pattern(week(), WeekdayPattern::All, snap());
        assert_eq!(resolve_targets(&edit).unwrap().len(), 7);
    }

    #[test]
    fn custom_sat_sun_over_february_2024() {
        let feb = DateRange::new(d(2024, 2, 1), d(2024, 2, 29)).unwrap();
        let pattern = WeekdayPattern::custom([0, 6]).unwrap();
        let dates = resolve_targets(&BulkEdit::pattern(feb, pattern, snap())).unwrap();
        let expected = vec![
            d(2024, 2, 3),
            d(2024, 2, 4),
            d(2024, 2, 10),
            d(2024, 2, 11),
            d(2024, 2, 17),
            d(2024, 2, 18),
            d(2024, 2, 24),
            d(2024, 2, 25),
        ];
        assert_eq!(dates, expected);
        assert!(
            dates
                .iter()
                .all(|d| matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        );
    }

    #[test]
    fn custom_rejects_bad_index() {
        assert_eq!(
            WeekdayPattern::custom([1, 7]),
            Err(StoreError::InvalidWeekday(7))
        );
    }

    #[test]
    fn deserialized_custom_is_validated_on_resolve() {
        let edit = BulkEdit::pattern(week(), WeekdayPattern::Custom(BTreeSet::from([9])), snap());
        assert_eq!(resolve_targets(&edit), Err(StoreError::InvalidWeekday(9)));
    }

    #[test]
    fn range_crosses_month_and_year() {
        let range = DateRange::new(d(2024, 12, 30), d(2025, 1, 2)).unwrap();
        let dates = resolve_targets(&BulkEdit::range(range, snap())).unwrap();
        assert_eq!(
            dates,
            vec![d(2024, 12, 30), d(2024, 12, 31), d(2025, 1, 1), d(2025, 1, 2)]
        );
    }

    #[test]
    fn range_over_leap_day() {
        let range = DateRange::new(d(2024, 2, 28), d(2024, 3, 1)).unwrap();
        assert_eq!(range.len_days(), 3);
        assert_eq!(range.days().nth(1), Some(d(2024, 2, 29)));
    }

    #[test]
    fn single_day_range() {
        let range = DateRange::new(d(2024, 2, 15), d(2024, 2, 15)).unwrap();
        assert_eq!(range.days().collect::<Vec<_>>(), vec![d(2024, 2, 15)]);
    }

    #[test]
    fn reversed_range_rejected() {
        assert_eq!(
            DateRange::new(d(2024, 2, 10), d(2024, 2, 1)),
            Err(StoreError::InvalidRange {
                start: d(2024, 2, 10),
                end: d(2024, 2, 1)
            })
        );
        // Same check when the range bypassed the constructor.
        let edit = BulkEdit::range(
            DateRange {
                start: d(2024, 2, 10),
                end: d(2024, 2, 1),
            },
            snap(),
        );
        assert!(matches!(
            resolve_targets(&edit),
            Err(StoreError::InvalidRange { .. })
        ));
    }

    #[test]
    fn range_too_wide_rejected() {
        let result = DateRange::new(d(2000, 1, 1), d(2030, 1, 1));
        assert_eq!(result, Err(StoreError::LimitExceeded("date range too wide")));
    }

    #[test]
    fn explicit_selection_wins_over_range() {
        let mut edit = BulkEdit::range(week(), snap());
        edit.selected = vec![d(2024, 3, 5), d(2024, 3, 1)];
        // Verbatim: caller order kept.
        assert_eq!(
            resolve_targets(&edit).unwrap(),
            vec![d(2024, 3, 5), d(2024, 3, 1)]
        );
    }

    #[test]
    fn pattern_mode_ignores_selection() {
        let mut edit = BulkEdit::pattern(week(), WeekdayPattern::Weekends, snap());
        edit.selected = vec![d(2024, 3, 5)];
        assert_eq!(
            resolve_targets(&edit).unwrap(),
            vec![d(2024, 2, 17), d(2024, 2, 18)]
        );
    }

    #[test]
    fn nothing_to_resolve_is_empty() {
        let edit = BulkEdit::dates(vec![], snap());
        assert!(resolve_targets(&edit).unwrap().is_empty());

        let mut pattern = BulkEdit::pattern(week(), WeekdayPattern::All, snap());
        pattern.range = None;
        assert!(resolve_targets(&pattern).unwrap().is_empty());
    }

    #[test]
    fn month_range_bounds() {
        let r = DateRange::month(Month::new(2023, 2).unwrap());
        assert_eq!(r.start, d(2023, 2, 1));
        assert_eq!(r.end, d(2023, 2, 28));
    }

    #[test]
    fn bulk_edit_from_json() {
        let json = r#"{
            "mode": "pattern",
            "range": {"start": "2024-02-01", "end": "2024-02-07"},
            "pattern": {"custom": [1, 3]},
            "snapshot": {"standard": 2, "suite": -1}
        }"#;
        let edit: BulkEdit = serde_json::from_str(json).unwrap();
        assert_eq!(edit.mode, EditMode::Pattern);
        assert!(edit.selected.is_empty());
        // Mon 5th, Wed 7th
        assert_eq!(
            resolve_targets(&edit).unwrap(),
            vec![d(2024, 2, 5), d(2024, 2, 7)]
        );
    }
}
