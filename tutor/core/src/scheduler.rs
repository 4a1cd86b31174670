//! Timer Queue
//!
//! Delays are entries in a queue keyed by a virtual clock the owner
//! advances. Nothing here sleeps: `pop_due` hands back whatever has come due
//! since the last call, earliest first, ties in scheduling order.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

/// Handle to a scheduled timer, used for cancellation
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<T> {
    due: Duration,
    id: TimerId,
    payload: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.id == other.id
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.due, self.id).cmp(&(other.due, other.id))
    }
}

/// Queue of pending timers on a virtual clock
#[derive(Debug)]
pub struct TimerQueue<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    now: Duration,
    next_id: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            now: Duration::ZERO,
            next_id: 0,
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `payload` to fire `delay` from now
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerId {
        self.schedule_at(self.now + delay, payload)
    }

    /// Schedule `payload` at an absolute virtual time
    pub fn schedule_at(&mut self, due: Duration, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.heap.push(Reverse(Entry { due, id, payload }));
        id
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.heap.len();
        self.heap.retain(|Reverse(entry)| entry.id != id);
        self.heap.len() != before
    }

    /// Drop every pending timer
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Move the clock forward
    pub fn advance(&mut self, delta: Duration) {
        self.now += delta;
    }

    /// Pop the earliest timer due at or before the current time.
    ///
    /// Returns the timer's due time along with its payload; timers scheduled
    /// while draining are picked up in the same pass if already due.
    pub fn pop_due(&mut self) -> Option<(Duration, TimerId, T)> {
        let due = self.heap.peek().is_some_and(|Reverse(e)| e.due <= self.now);
        if !due {
            return None;
        }
        self.heap
            .pop()
            .map(|Reverse(entry)| (entry.due, entry.id, entry.payload))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn drain(queue: &mut TimerQueue<&'static str>) -> Vec<&'static str> {
        std::iter::from_fn(|| queue.pop_due().map(|(_, _, p)| p)).collect()
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(300), "c");
        queue.schedule(ms(100), "a");
        queue.schedule(ms(200), "b");

        queue.advance(ms(250));
        assert_eq!(drain(&mut queue), vec!["a", "b"]);
        queue.advance(ms(50));
        assert_eq!(drain(&mut queue), vec!["c"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_ties_fire_in_scheduling_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(100), "first");
        queue.schedule(ms(100), "second");
        queue.advance(ms(100));
        assert_eq!(drain(&mut queue), vec!["first", "second"]);
    }

    #[test]
    fn test_nothing_due_before_time() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(100), "later");
        queue.advance(ms(99));
        assert!(queue.pop_due().is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_cancel() {
        let mut queue = TimerQueue::new();
        let keep = queue.schedule(ms(10), "keep");
        let drop = queue.schedule(ms(10), "drop");
        assert!(queue.cancel(drop));
        assert!(!queue.cancel(drop));
        queue.advance(ms(10));
        assert_eq!(drain(&mut queue), vec!["keep"]);
        assert!(!queue.cancel(keep));
    }

    #[test]
    fn test_schedule_at_absolute_time() {
        let mut queue = TimerQueue::new();
        queue.advance(ms(500));
        let (due, _, payload) = {
            queue.schedule_at(ms(400), "overdue");
            queue.pop_due().expect("overdue timer fires")
        };
        assert_eq!(due, ms(400));
        assert_eq!(payload, "overdue");
        assert_eq!(queue.now(), ms(500));
    }
}
