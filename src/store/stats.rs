use crate::limits::HIGH_DEMAND_REMAINING_RATIO;
use crate::model::*;

/// Month occupancy over the days that have data. Days without an entry are
/// left out of both totals, so they do not drag the average towards 0%.
pub fn month_stats(data: &AvailabilityData, counts: &RoomCounts, month: Month) -> MonthStats {
    let total_rooms = counts.total();

    let mut total_available: u64 = 0;
    let mut total_capacity: u64 = 0;
    let mut fully_booked_days = 0;
    let mut high_demand_days = 0;
    let mut days_with_data = 0;

    for day in data.range(month.first_day()..=month.last_day()).map(|(_, d)| d) {
        let available = day_total(day);
        total_available += available;
        total_capacity += total_rooms;
        days_with_data += 1;

        if available == 0 {
            fully_booked_days += 1;
        } else if is_high_demand(available, total_rooms) {
            high_demand_days += 1;
        }
    }

    let average_occupancy = occupancy_pct(total_available, total_capacity)
        .map(round_one_decimal)
        .unwrap_or(0.0);

    MonthStats {
        month,
        average_occupancy,
        fully_booked_days,
        high_demand_days,
        total_available,
        total_capacity,
        days_with_data,
    }
}

/// Sold share of capacity in percent, `None` when there is no capacity.
pub fn occupancy_pct(available: u64, capacity: u64) -> Option<f64> {
    if capacity == 0 {
        return None;
    }
    let (available, capacity) = (available as f64, capacity as f64);
    Some((capacity - available) * 100.0 / capacity)
}

/// At most 20% of all rooms left. The admin page labels this "> 80% occupancy",
/// which is not the same cut-off for partially populated days; kept as is.
fn is_high_demand(available: u64, total_rooms: u64) -> bool {
    available as f64 <= total_rooms as f64 * HIGH_DEMAND_REMAINING_RATIO
}

fn round_one_decimal(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
