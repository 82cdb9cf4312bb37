use dto::live_event::ServerEvent;
use log::debug;
use rocket::tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

pub type SubscriberId = Uuid;

/// Every connection currently listening to member events.
/// Events are queued per subscriber: a slow client never blocks a broadcast.
#[derive(Debug, Default)]
pub struct SubscriberRegistry {
    subscribers: Mutex<HashMap<SubscriberId, UnboundedSender<ServerEvent>>>,
}

impl SubscriberRegistry {
    pub fn subscribe(&self) -> (SubscriberId, UnboundedReceiver<ServerEvent>) {
        let (sender, receiver) = unbounded_channel();
        let id = Uuid::new_v4();
        self.lock().insert(id, sender);
        debug!("Subscriber registered [id: {id}]");

        (id, receiver)
    }

    pub fn unsubscribe(&self, id: &SubscriberId) -> bool {
        let removed = self.lock().remove(id).is_some();
        if removed {
            debug!("Subscriber unregistered [id: {id}]");
        }

        removed
    }

    /// Queue `event` for one subscriber only.
    /// Return `false` if the subscriber is unknown or gone.
    pub fn send_to(&self, id: &SubscriberId, event: ServerEvent) -> bool {
        let sender = self.lock().get(id).cloned();
        match sender {
            Some(sender) if sender.send(event).is_ok() => true,
            Some(_) => {
                self.unsubscribe(id);
                false
            }
            None => false,
        }
    }

    /// Queue `event` for every subscriber known when the broadcast starts.
    /// Subscribers whose connection is gone are dropped along the way.
    /// Return the number of subscribers reached.
    pub fn broadcast(&self, event: ServerEvent) -> usize {
        let snapshot: Vec<(SubscriberId, UnboundedSender<ServerEvent>)> = self
            .lock()
            .iter()
            .map(|(id, sender)| (*id, sender.clone()))
            .collect();

        let mut reached = 0;
        for (id, sender) in snapshot {
            if sender.send(event.clone()).is_ok() {
                reached += 1;
            } else {
                self.unsubscribe(&id);
            }
        }

        reached
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// A panic while holding the lock can't leave the map half-updated: keep using it.
    fn lock(&self) -> MutexGuard<'_, HashMap<SubscriberId, UnboundedSender<ServerEvent>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
