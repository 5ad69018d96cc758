//! Deadline queue for delayed continuations.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

use game_core::{Continuation, Scheduled};
use tokio::time::Instant;

struct Entry {
    due: Instant,
    /// Insertion order; breaks ties between equal deadlines.
    seq: u64,
    continuation: Continuation,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// Pending continuations ordered by deadline, then by scheduling order.
#[derive(Default)]
pub(crate) struct TimerQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl TimerQueue {
    pub(crate) fn schedule(&mut self, now: Instant, scheduled: Scheduled) -> Instant {
        let due = now + Duration::from_millis(scheduled.delay_ms);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry {
            due,
            seq,
            continuation: scheduled.continuation,
        }));
        due
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|Reverse(entry)| entry.due)
    }

    /// Removes the earliest continuation if it is due at `now`.
    pub(crate) fn pop_due(&mut self, now: Instant) -> Option<Continuation> {
        if self.next_deadline()? > now {
            return None;
        }
        self.heap.pop().map(|Reverse(entry)| entry.continuation)
    }

    /// Drops every pending continuation. Returns how many were dropped.
    pub(crate) fn clear(&mut self) -> usize {
        let dropped = self.heap.len();
        self.heap.clear();
        dropped
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use game_core::{EncounterId, InteractableId, SkillId};

    use super::*;

    fn enemy_turn(id: u64) -> Scheduled {
        Scheduled::after(
            1000,
            Continuation::EnemyTurn {
                encounter: EncounterId(id),
                enemy: InteractableId::from("e"),
            },
        )
    }

    #[test]
    fn pops_in_deadline_order() {
        let now = Instant::now();
        let mut queue = TimerQueue::default();
        queue.schedule(now, enemy_turn(1));
        queue.schedule(
            now,
            Scheduled::after(
                300,
                Continuation::CastSkill {
                    encounter: EncounterId(1),
                    skill: SkillId::from("s"),
                },
            ),
        );

        assert_eq!(queue.next_deadline(), Some(now + Duration::from_millis(300)));
        assert!(queue.pop_due(now).is_none());

        let later = now + Duration::from_millis(1000);
        assert_eq!(queue.pop_due(later).map(|c| c.as_snake_case()), Some("cast_skill"));
        assert_eq!(queue.pop_due(later).map(|c| c.as_snake_case()), Some("enemy_turn"));
        assert!(queue.pop_due(later).is_none());
    }

    #[test]
    fn equal_deadlines_keep_scheduling_order() {
        let now = Instant::now();
        let mut queue = TimerQueue::default();
        queue.schedule(now, enemy_turn(1));
        queue.schedule(now, enemy_turn(2));

        let later = now + Duration::from_secs(1);
        assert_eq!(
            queue.pop_due(later),
            Some(enemy_turn(1).continuation)
        );
        assert_eq!(
            queue.pop_due(later),
            Some(enemy_turn(2).continuation)
        );
    }

    #[test]
    fn clear_reports_dropped_count() {
        let mut queue = TimerQueue::default();
        queue.schedule(Instant::now(), enemy_turn(1));
        queue.schedule(Instant::now(), enemy_turn(2));

        assert_eq!(queue.clear(), 2);
        assert!(queue.is_empty());
        assert!(queue.next_deadline().is_none());
    }
}
