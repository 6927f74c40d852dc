use chrono_tz::Tz;
use tokio::sync::broadcast;

use crate::{api::ReminderScope, models::GuildId};

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    GuildSwitched(GuildId),
    ChannelsLoaded(GuildId),
    RolesLoaded(GuildId),
    RemindersLoaded(ReminderScope),
    TemplatesLoaded(GuildId),
    /// The bot is not a member of the guild, so nothing in it can be managed.
    GuildUnavailable(GuildId),
    TimezoneChanged(Tz),
}

/// Fan-out of [`DashboardEvent`]s to any number of listeners.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DashboardEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: DashboardEvent) {
        log::debug!("Publishing {event:?}");
        // Nobody listening is fine.
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Snowflake;

    #[tokio::test]
    async fn every_subscriber_sees_every_event() {
        let bus = EventBus::new();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.publish(DashboardEvent::GuildSwitched(Snowflake::new(1)));
        bus.publish(DashboardEvent::TimezoneChanged(Tz::UTC));

        for rx in [&mut first, &mut second] {
            assert_eq!(
                rx.recv().await.unwrap(),
                DashboardEvent::GuildSwitched(Snowflake::new(1))
            );
            assert_eq!(
                rx.recv().await.unwrap(),
                DashboardEvent::TimezoneChanged(Tz::UTC)
            );
        }
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let bus = EventBus::new();

        bus.publish(DashboardEvent::RemindersLoaded(ReminderScope::Personal));
    }
}
