//! Event channel implementation using crossbeam-channel.

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

use super::Event;

/// Sending half handed to the matcher. Cheap to clone.
///
/// A sender may be detached (see [`null_sender`]); it then drops every
/// event without building it.
#[derive(Clone)]
pub struct EventSender {
    inner: Option<Sender<Event>>,
}

impl EventSender {
    /// Send an event. A receiver that has hung up is ignored.
    pub fn send(&self, event: Event) {
        if let Some(sender) = &self.inner {
            let _ = sender.send(event);
        }
    }

    /// Build and send an event only when a channel is attached
    pub fn send_with(&self, make: impl FnOnce() -> Event) {
        if let Some(sender) = &self.inner {
            let _ = sender.send(make());
        }
    }

    /// Whether this sender is attached to a channel
    pub fn is_attached(&self) -> bool {
        self.inner.is_some()
    }
}

/// Receiving half held by the UI layer
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Block until the next event arrives or every sender is gone
    pub fn recv(&self) -> Option<Event> {
        self.inner.recv().ok()
    }

    pub fn try_recv(&self) -> Option<Event> {
        self.inner.try_recv().ok()
    }

    /// Iterate until every sender is dropped
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }
}

/// Constructors for sender/receiver pairs
pub struct EventChannel;

impl EventChannel {
    /// Unbounded channel; a comparison emits only a handful of events.
    pub fn new() -> (EventSender, EventReceiver) {
        Self::attach(unbounded())
    }

    /// Bounded channel for UIs that want backpressure
    pub fn bounded(capacity: usize) -> (EventSender, EventReceiver) {
        Self::attach(bounded(capacity))
    }

    fn attach((sender, receiver): (Sender<Event>, Receiver<Event>)) -> (EventSender, EventReceiver) {
        (
            EventSender {
                inner: Some(sender),
            },
            EventReceiver { inner: receiver },
        )
    }
}

/// A detached sender for headless callers and tests
pub fn null_sender() -> EventSender {
    EventSender { inner: None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{LoadEvent, PipelineEvent};
    use std::path::PathBuf;
    use std::thread;
    use uuid::Uuid;

    #[test]
    fn events_can_be_sent_across_threads() {
        let (sender, receiver) = EventChannel::new();
        let id = Uuid::new_v4();

        let handle = thread::spawn(move || {
            sender.send(Event::Load(LoadEvent::Started {
                comparison_id: id,
                path: PathBuf::from("/sigs/a.png"),
            }));
        });

        handle.join().unwrap();

        match receiver.recv().unwrap() {
            Event::Load(LoadEvent::Started { comparison_id, path }) => {
                assert_eq!(comparison_id, id);
                assert_eq!(path, PathBuf::from("/sigs/a.png"));
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn null_sender_drops_events_without_building_them() {
        let sender = null_sender();
        assert!(!sender.is_attached());

        sender.send(Event::Pipeline(PipelineEvent::Started {
            comparison_id: Uuid::new_v4(),
        }));
        sender.send_with(|| panic!("detached sender must not build events"));
    }

    #[test]
    fn send_with_builds_event_when_attached() {
        let (sender, receiver) = EventChannel::new();
        let id = Uuid::new_v4();
        assert!(sender.is_attached());

        sender.send_with(|| Event::Pipeline(PipelineEvent::Started { comparison_id: id }));

        assert!(matches!(
            receiver.try_recv(),
            Some(Event::Pipeline(PipelineEvent::Started { comparison_id })) if comparison_id == id
        ));
    }

    #[test]
    fn hung_up_receiver_is_ignored() {
        let (sender, receiver) = EventChannel::new();
        drop(receiver);

        sender.send(Event::Pipeline(PipelineEvent::Started {
            comparison_id: Uuid::new_v4(),
        }));
    }

    #[test]
    fn bounded_channel_respects_capacity() {
        let (sender, receiver) = EventChannel::bounded(2);
        let id = Uuid::new_v4();

        sender.send(Event::Pipeline(PipelineEvent::Started { comparison_id: id }));
        sender.send(Event::Pipeline(PipelineEvent::Started { comparison_id: id }));

        assert!(receiver.try_recv().is_some());
        assert!(receiver.try_recv().is_some());
        assert!(receiver.try_recv().is_none());
    }
}
