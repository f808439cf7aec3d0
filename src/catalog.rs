use chrono::NaiveDate;

use crate::model::*;

/// The demo catalog shipped with the site: one room of each type.
pub fn mock_rooms() -> Vec<Room> {
    vec![
        Room {
            id: 1,
            name: "Deluxe Ocean View".into(),
            room_type: RoomType::Deluxe,
            price: 299,
            capacity: 2,
            size: 45,
            image: None,
            amenities: strings(&["Ocean View", "King Bed", "Mini Bar", "Balcony"]),
            available: true,
        },
        Room {
            id: 2,
            name: "Executive Suite".into(),
            room_type: RoomType::Suite,
            price: 499,
            capacity: 4,
            size: 75,
            image: None,
            amenities: strings(&["City View", "Living Room", "Kitchen", "Work Desk"]),
            available: true,
        },
        Room {
            id: 3,
            name: "Standard Room".into(),
            room_type: RoomType::Standard,
            price: 149,
            capacity: 2,
            size: 30,
            image: None,
            amenities: strings(&["Queen Bed", "City View", "Work Desk"]),
            available: true,
        },
        Room {
            id: 4,
            name: "Family Suite".into(),
            room_type: RoomType::Family,
            price: 399,
            capacity: 6,
            size: 90,
            image: None,
            amenities: strings(&["Two Bedrooms", "Kitchen", "Living Area", "Balcony"]),
            available: true,
        },
    ]
}

/// Availability the admin page starts with when no backing data is loaded.
pub fn mock_availability() -> AvailabilityData {
    let day = |d: u32, standard: Units, deluxe: Units, suite: Units, family: Units| {
        (
            NaiveDate::from_ymd_opt(2024, 2, d).expect("valid February date"),
            DaySnapshot::from([
                (RoomType::Standard, standard),
                (RoomType::Deluxe, deluxe),
                (RoomType::Suite, suite),
                (RoomType::Family, family),
            ]),
        )
    };
    AvailabilityData::from([
        day(15, 2, 1, 0, 1),
        day(16, 0, 2, 1, 1),
        day(17, 3, 0, 2, 0),
    ])
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
