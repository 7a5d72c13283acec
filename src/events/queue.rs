use crate::core::error::CapacityError;
use crate::core::types::EntityIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventKind {
    #[default]
    None,
    Collision,
    GameOver,
}

/// Something that happened between two entities this tick
///
/// Only valid until drained within the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Event {
    pub kind: EventKind,
    pub sender: EntityIndex,
    pub receiver: EntityIndex,
}

/// Ring buffer of pending events
///
/// Full and empty are told apart by the pending count, not by comparing
/// head and tail. Pushing into a full queue drops the event.
#[derive(Debug, Clone)]
pub struct EventQueue {
    slots: Vec<Event>,
    head: usize,
    tail: usize,
    pending: usize,
}

impl EventQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Event::default(); capacity.max(1)],
            head: 0,
            tail: 0,
            pending: 0,
        }
    }

    pub fn push(
        &mut self,
        kind: EventKind,
        sender: EntityIndex,
        receiver: EntityIndex,
    ) -> Result<(), CapacityError> {
        if self.pending == self.slots.len() {
            return Err(CapacityError::QueueFull {
                capacity: self.slots.len(),
            });
        }

        self.slots[self.tail] = Event {
            kind,
            sender,
            receiver,
        };
        self.tail = (self.tail + 1) % self.slots.len();
        self.pending += 1;
        Ok(())
    }

    /// Oldest pending event, or `None` when empty
    pub fn pop(&mut self) -> Option<Event> {
        if self.pending == 0 {
            return None;
        }

        let event = std::mem::take(&mut self.slots[self.head]);
        self.head = (self.head + 1) % self.slots.len();
        self.pending -= 1;
        Some(event)
    }

    /// Pop every pending event in arrival order
    pub fn drain(&mut self) -> Drain<'_> {
        Drain { queue: self }
    }

    /// Discard all pending events
    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }

    pub fn len(&self) -> usize {
        self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending == 0
    }

    pub fn is_full(&self) -> bool {
        self.pending == self.slots.len()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Draining iterator returned by [`EventQueue::drain`]
pub struct Drain<'a> {
    queue: &'a mut EventQueue,
}

impl Iterator for Drain<'_> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        self.queue.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.pending, Some(self.queue.pending))
    }
}
