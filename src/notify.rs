use dashmap::DashMap;
use tokio::sync::broadcast;

use crate::model::{Event, Month};

const CHANNEL_CAPACITY: usize = 256;

/// Broadcast hub for availability changes, one channel per calendar month.
pub struct NotifyHub {
    channels: DashMap<Month, broadcast::Sender<Event>>,
}

impl Default for NotifyHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifyHub {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Subscribe to changes of dates within `month`. Creates the channel if needed.
    pub fn subscribe(&self, month: Month) -> broadcast::Receiver<Event> {
        let sender = self
            .channels
            .entry(month)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0);
        sender.subscribe()
    }

    /// Send a notification. No-op if nobody is listening.
    pub fn send(&self, month: Month, event: &Event) {
        if let Some(sender) = self.channels.get(&month) {
            let _ = sender.send(event.clone());
        }
    }

    /// Drop a month's channel (e.g. when the view navigates away).
    pub fn remove(&self, month: &Month) {
        self.channels.remove(month);
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RoomType;
    use chrono::NaiveDate;
    use ulid::Ulid;

    fn cell_event(date: NaiveDate) -> Event {
        Event::CellSet {
            id: Ulid::new(),
            date,
            room_type: RoomType::Deluxe,
            value: 1,
        }
    }

    #[tokio::test]
    async fn subscribe_and_receive() {
        let hub = NotifyHub::new();
        let date = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        let mut rx = hub.subscribe(Month::of(date));

        let event = cell_event(date);
        hub.send(Month::of(date), &event);

        let received = rx.recv().await.unwrap();
        assert_eq!(received, event);
    }

    #[tokio::test]
    async fn other_month_not_delivered() {
        let hub = NotifyHub::new();
        let feb = Month::new(2024, 2).unwrap();
        let mut rx = hub.subscribe(feb);

        let march = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        hub.send(Month::of(march), &cell_event(march));

        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn send_without_subscribers_is_noop() {
        let hub = NotifyHub::new();
        let date = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        // No subscriber, must not panic
        hub.send(Month::of(date), &cell_event(date));
        assert_eq!(hub.channel_count(), 0);
    }

    #[test]
    fn remove_drops_channel() {
        let hub = NotifyHub::new();
        let feb = Month::new(2024, 2).unwrap();
        let _rx = hub.subscribe(feb);
        assert_eq!(hub.channel_count(), 1);
        hub.remove(&feb);
        assert_eq!(hub.channel_count(), 0);
    }
}
