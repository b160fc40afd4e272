use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::common::{ContactId, MessageId};
use crate::error::{Error, Result};

/// Offsets, measured from the moment a message is sent, at which each
/// transition fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryDelays {
    pub received_ms: u64,
    pub read_ms: u64,
    pub typing_ms: u64,
    pub reply_ms: u64,
}

impl Default for DeliveryDelays {
    fn default() -> Self {
        Self {
            received_ms: 500,
            read_ms: 1000,
            typing_ms: 1500,
            reply_ms: 3000,
        }
    }
}

impl DeliveryDelays {
    /// Received must not come after read, and typing must not come after the
    /// reply. Equal delays are fine: ties fire in arming order.
    pub fn validate(&self) -> Result<()> {
        if self.received_ms > self.read_ms {
            return Err(Error::Config(format!(
                "received_ms ({}) must not exceed read_ms ({})",
                self.received_ms, self.read_ms
            )));
        }
        if self.typing_ms > self.reply_ms {
            return Err(Error::Config(format!(
                "typing_ms ({}) must not exceed reply_ms ({})",
                self.typing_ms, self.reply_ms
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Received,
    Read,
    TypingStarted,
    Reply,
}

/// One pending state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    pub fire_at: Duration,
    pub contact_id: ContactId,
    pub message_id: MessageId,
    pub kind: Transition,
}

#[derive(Debug)]
struct QueuedTask {
    seq: u64,
    task: ScheduledTask,
}

impl QueuedTask {
    fn key(&self) -> (Duration, u64) {
        (self.task.fire_at, self.seq)
    }
}

impl PartialEq for QueuedTask {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for QueuedTask {}

impl PartialOrd for QueuedTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedTask {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Deadline queue for message transitions.
///
/// Time is an offset from an arbitrary origin chosen by the caller, so tests
/// drive it with plain `Duration`s while the engine maps it onto a tokio clock.
/// Tasks are never cancelled; each armed task is handed out exactly once.
#[derive(Debug)]
pub struct LifecycleScheduler {
    delays: DeliveryDelays,
    queue: BinaryHeap<Reverse<QueuedTask>>,
    next_seq: u64,
}

impl LifecycleScheduler {
    pub fn new(delays: DeliveryDelays) -> Self {
        Self {
            delays,
            queue: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Arms every transition for a message sent at `sent_at`. Typing and reply
    /// are only armed for online contacts.
    pub fn arm(
        &mut self,
        contact_id: ContactId,
        message_id: MessageId,
        sent_at: Duration,
        contact_online: bool,
    ) {
        let mut plan = vec![
            (Transition::Received, self.delays.received_ms),
            (Transition::Read, self.delays.read_ms),
        ];
        if contact_online {
            plan.push((Transition::TypingStarted, self.delays.typing_ms));
            plan.push((Transition::Reply, self.delays.reply_ms));
        }

        for (kind, delay_ms) in plan {
            self.push(ScheduledTask {
                fire_at: sent_at + Duration::from_millis(delay_ms),
                contact_id,
                message_id,
                kind,
            });
        }
    }

    fn push(&mut self, task: ScheduledTask) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(QueuedTask { seq, task }));
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.peek().map(|Reverse(queued)| queued.task.fire_at)
    }

    /// Removes and returns the earliest task whose deadline is at or before
    /// `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<ScheduledTask> {
        match self.next_deadline() {
            Some(deadline) if deadline <= now => {
                self.queue.pop().map(|Reverse(queued)| queued.task)
            }
            _ => None,
        }
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn drain(scheduler: &mut LifecycleScheduler, now: Duration) -> Vec<ScheduledTask> {
        std::iter::from_fn(|| scheduler.pop_due(now)).collect()
    }

    #[test]
    fn offline_contact_only_gets_receipts() {
        let mut scheduler = LifecycleScheduler::new(DeliveryDelays::default());
        scheduler.arm(ContactId(1), MessageId::new(), ms(0), false);
        assert_eq!(scheduler.pending(), 2);

        let kinds: Vec<_> = drain(&mut scheduler, ms(10_000))
            .into_iter()
            .map(|task| task.kind)
            .collect();
        assert_eq!(kinds, vec![Transition::Received, Transition::Read]);
    }

    #[test]
    fn online_contact_fires_in_reference_order() {
        let mut scheduler = LifecycleScheduler::new(DeliveryDelays::default());
        scheduler.arm(ContactId(1), MessageId::new(), ms(100), true);

        assert!(scheduler.pop_due(ms(599)).is_none());
        assert_eq!(scheduler.next_deadline(), Some(ms(600)));

        let fired: Vec<_> = drain(&mut scheduler, ms(3100))
            .into_iter()
            .map(|task| (task.kind, task.fire_at))
            .collect();
        assert_eq!(
            fired,
            vec![
                (Transition::Received, ms(600)),
                (Transition::Read, ms(1100)),
                (Transition::TypingStarted, ms(1600)),
                (Transition::Reply, ms(3100)),
            ]
        );
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn equal_delays_fire_in_arming_order() {
        let delays = DeliveryDelays {
            received_ms: 200,
            read_ms: 200,
            typing_ms: 200,
            reply_ms: 200,
        };
        delays.validate().expect("equal delays are valid");

        let mut scheduler = LifecycleScheduler::new(delays);
        scheduler.arm(ContactId(1), MessageId::new(), ms(0), true);
        let kinds: Vec<_> = drain(&mut scheduler, ms(200))
            .into_iter()
            .map(|task| task.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                Transition::Received,
                Transition::Read,
                Transition::TypingStarted,
                Transition::Reply
            ]
        );
    }

    #[test]
    fn tasks_from_different_messages_interleave_by_deadline() {
        let mut scheduler = LifecycleScheduler::new(DeliveryDelays::default());
        let first = MessageId::new();
        let second = MessageId::new();
        scheduler.arm(ContactId(1), first, ms(0), false);
        scheduler.arm(ContactId(2), second, ms(700), false);

        let order: Vec<_> = drain(&mut scheduler, ms(5000))
            .into_iter()
            .map(|task| (task.message_id, task.kind))
            .collect();
        assert_eq!(
            order,
            vec![
                (first, Transition::Received),
                (first, Transition::Read),
                (second, Transition::Received),
                (second, Transition::Read),
            ]
        );
    }

    #[test]
    fn validate_rejects_inverted_orderings() {
        let read_first = DeliveryDelays {
            received_ms: 900,
            read_ms: 400,
            ..DeliveryDelays::default()
        };
        assert!(read_first.validate().is_err());

        let reply_first = DeliveryDelays {
            typing_ms: 4000,
            ..DeliveryDelays::default()
        };
        assert!(reply_first.validate().is_err());

        assert!(DeliveryDelays::default().validate().is_ok());
    }
}
