use serde::{Deserialize, Serialize};

use crate::model::*;

/// Canned snapshots offered next to the bulk-edit and quick-edit forms.
/// Each is a pure function of the room counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    AllAvailable,
    AllBooked,
    HalfAvailable,
    /// 20% of each type left.
    HighSeason,
    LowSeason,
    Holiday,
    WeekendSpecial,
}

impl Preset {
    /// Quick actions of the bulk-edit form.
    pub const BULK_ACTIONS: [Preset; 3] = [
        Preset::AllAvailable,
        Preset::AllBooked,
        Preset::HalfAvailable,
    ];

    /// Presets of the quick-edit panel.
    pub const QUICK_EDIT: [Preset; 4] = [
        Preset::HighSeason,
        Preset::LowSeason,
        Preset::Holiday,
        Preset::WeekendSpecial,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Preset::AllAvailable => "Set All Available",
            Preset::AllBooked => "Set All Booked",
            Preset::HalfAvailable => "Set 50% Available",
            Preset::HighSeason => "High Season",
            Preset::LowSeason => "Low Season",
            Preset::Holiday => "Holiday",
            Preset::WeekendSpecial => "Weekend Special",
        }
    }

    pub fn snapshot(&self, counts: &RoomCounts) -> RawSnapshot {
        counts
            .iter()
            .map(|(room_type, count)| (room_type, i64::from(self.units(count))))
            .collect()
    }

    fn units(&self, count: Units) -> Units {
        match self {
            Preset::AllAvailable | Preset::LowSeason => count,
            Preset::AllBooked | Preset::Holiday => 0,
            Preset::HalfAvailable | Preset::WeekendSpecial => count / 2,
            Preset::HighSeason => count / 5,
        }
    }
}
