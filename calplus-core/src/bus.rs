//! "Date selected" notifications between the month grid and the day panel.

use tokio::sync::broadcast;

use crate::date::CalendarDate;

const BUS_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMessage {
    DateSelected(CalendarDate),
}

/// Single-topic publish/subscribe channel.
#[derive(Debug, Clone)]
pub struct DateBus {
    sender: broadcast::Sender<UiMessage>,
}

impl DateBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BUS_CAPACITY);
        DateBus { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiMessage> {
        self.sender.subscribe()
    }

    /// Broadcast a newly selected date. Returns how many subscribers got it;
    /// having none is fine.
    pub fn publish(&self, date: CalendarDate) -> usize {
        self.sender.send(UiMessage::DateSelected(date)).unwrap_or(0)
    }
}

impl Default for DateBus {
    fn default() -> Self {
        Self::new()
    }
}
