use chrono::NaiveDate;

use crate::model::{RoomType, Units};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    OutOfRange {
        date: NaiveDate,
        room_type: RoomType,
        value: i64,
        capacity: Units,
    },
    InvalidRange {
        start: NaiveDate,
        end: NaiveDate,
    },
    NoTargetDates,
    UnknownRoomType(RoomType),
    InvalidWeekday(u8),
    DateNotEditable(NaiveDate),
    LimitExceeded(&'static str),
    Parse {
        what: &'static str,
        input: String,
    },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::OutOfRange {
                date,
                room_type,
                value,
                capacity,
            } => write!(
                f,
                "{room_type} on {date}: {value} outside [0, {capacity}]"
            ),
            StoreError::InvalidRange { start, end } => {
                write!(f, "invalid range: end {end} is before start {start}")
            }
            StoreError::NoTargetDates => write!(f, "bulk edit matched no dates"),
            StoreError::UnknownRoomType(t) => write!(f, "no rooms of type {t} in catalog"),
            StoreError::InvalidWeekday(d) => {
                write!(f, "weekday index {d} out of range (0 = Sunday .. 6 = Saturday)")
            }
            StoreError::DateNotEditable(d) => write!(f, "{d} is in the past and cannot be edited"),
            StoreError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
            StoreError::Parse { what, input } => write!(f, "invalid {what}: {input:?}"),
        }
    }
}

impl std::error::Error for StoreError {}
