use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::store::StoreError;

/// Units of a room type available on a day. Never negative once stored.
pub type Units = u32;

/// Per-room-type availability for one day.
pub type DaySnapshot = BTreeMap<RoomType, Units>;

/// Caller-supplied per-type values, clamped into `[0, capacity]` before storage.
pub type RawSnapshot = BTreeMap<RoomType, i64>;

/// Date → per-type availability. A missing date means "no data", not zero.
pub type AvailabilityData = BTreeMap<NaiveDate, DaySnapshot>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Standard,
    Deluxe,
    Suite,
    Family,
}

impl RoomType {
    pub const ALL: [RoomType; 4] = [
        RoomType::Standard,
        RoomType::Deluxe,
        RoomType::Suite,
        RoomType::Family,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Standard => "standard",
            RoomType::Deluxe => "deluxe",
            RoomType::Suite => "suite",
            RoomType::Family => "family",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoomType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StoreError::Parse {
                what: "room type",
                input: s.to_string(),
            })
    }
}

/// A bookable room as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    /// Nightly rate.
    pub price: u32,
    /// Max guests.
    pub capacity: u32,
    /// Floor area in square metres.
    pub size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default = "default_true")]
    pub available: bool,
}

fn default_true() -> bool {
    true
}

/// Total inventory per room type. Built once from the catalog and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCounts(BTreeMap<RoomType, Units>);

impl RoomCounts {
    pub fn from_catalog(rooms: &[Room]) -> Self {
        let mut counts = BTreeMap::new();
        for room in rooms {
            *counts.entry(room.room_type).or_insert(0) += 1;
        }
        Self(counts)
    }

    /// Capacity of a room type, `None` if the catalog has no room of that type.
    pub fn get(&self, room_type: RoomType) -> Option<Units> {
        self.0.get(&room_type).copied()
    }

    /// Sum over all room types, widened so large catalogs cannot overflow.
    pub fn total(&self) -> u64 {
        self.0.values().map(|c| u64::from(*c)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RoomType, Units)> + '_ {
        self.0.iter().map(|(t, c)| (*t, *c))
    }

    pub fn room_types(&self) -> impl Iterator<Item = RoomType> + '_ {
        self.0.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(RoomType, Units)> for RoomCounts {
    fn from_iter<I: IntoIterator<Item = (RoomType, Units)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Sum of available units across room types for one day.
pub fn day_total(snapshot: &DaySnapshot) -> u64 {
    snapshot.values().map(|v| u64::from(*v)).sum()
}

/// A calendar month. Always holds a valid (year, month) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)?;
        Some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month {
            4 | 6 | 9 | 11 => 30,
            2 if NaiveDate::from_ymd_opt(self.year, 2, 29).is_some() => 29,
            2 => 28,
            _ => 31,
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("Month holds a valid date")
    }

    pub fn last_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, self.days_in_month())
            .expect("Month holds a valid date")
    }

    /// Every day of the month in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        self.first_day()
            .iter_days()
            .take(self.days_in_month() as usize)
    }

    /// Day `n` of the month (1-based), `None` past the month's end.
    pub fn day(&self, n: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, n)
    }

    pub fn succ(&self) -> Option<Self> {
        if self.month == 12 {
            Self::new(self.year.checked_add(1)?, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    pub fn pred(&self) -> Option<Self> {
        if self.month == 1 {
            Self::new(self.year.checked_sub(1)?, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || StoreError::Parse {
            what: "month",
            input: s.to_string(),
        };
        let (y, m) = s.trim().rsplit_once('-').ok_or_else(err)?;
        let year: i32 = y.parse().map_err(|_| err())?;
        let month: u32 = m.parse().map_err(|_| err())?;
        Month::new(year, month).ok_or_else(err)
    }
}

impl TryFrom<String> for Month {
    type Error = StoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Month> for String {
    fn from(m: Month) -> Self {
        m.to_string()
    }
}

/// A change to the availability data. Every accepted mutation produces one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// One (date, room type) cell replaced; other types of that day untouched.
    CellSet {
        id: Ulid,
        date: NaiveDate,
        room_type: RoomType,
        value: Units,
    },
    /// Whole day replaced by an already-clamped snapshot.
    DaySet {
        id: Ulid,
        date: NaiveDate,
        snapshot: DaySnapshot,
    },
}

impl Event {
    pub fn id(&self) -> Ulid {
        match self {
            Event::CellSet { id, .. } | Event::DaySet { id, .. } => *id,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            Event::CellSet { date, .. } | Event::DaySet { date, .. } => *date,
        }
    }
}

// ── Query result types ───────────────────────────────────────────

/// Occupancy figures for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthStats {
    pub month: Month,
    /// Percent, one decimal. 0 when no day of the month has data.
    pub average_occupancy: f64,
    pub fully_booked_days: u32,
    pub high_demand_days: u32,
    /// Available room-nights over the populated days.
    pub total_available: u64,
    pub total_capacity: u64,
    pub days_with_data: u32,
}
