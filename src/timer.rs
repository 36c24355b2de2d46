//! Epoch-tagged single-shot timers.
//!
//! The game never schedules anything itself. Arming a timer hands out a
//! `TimerTicket`; whoever owns the real clock (the browser shell, or a test)
//! delivers that ticket back when the delay elapses. Only the most recently
//! armed ticket of each kind is live: re-arming or cancelling bumps the epoch,
//! so a callback that was already queued becomes a no-op when it arrives.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TimerKind {
    /// 3 → 2 → 1 countdown tick.
    Countdown,
    /// Per-prompt answer deadline.
    PromptTimeout,
}

impl TimerKind {
    pub const ALL: [TimerKind; 2] = [TimerKind::Countdown, TimerKind::PromptTimeout];

    fn slot(self) -> usize {
        match self {
            TimerKind::Countdown => 0,
            TimerKind::PromptTimeout => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TimerTicket {
    pub kind: TimerKind,
    pub epoch: u64,
}

#[derive(Debug, Default)]
pub struct Timers {
    next_epoch: u64,
    armed: [Option<u64>; 2],
}

impl Timers {
    /// Arm `kind`, superseding any ticket of the same kind.
    pub fn arm(&mut self, kind: TimerKind) -> TimerTicket {
        self.next_epoch += 1;
        self.armed[kind.slot()] = Some(self.next_epoch);
        TimerTicket {
            kind,
            epoch: self.next_epoch,
        }
    }

    /// Returns true if something was armed.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        self.armed[kind.slot()].take().is_some()
    }

    /// Cancel everything; returns the kinds that were armed.
    pub fn cancel_all(&mut self) -> Vec<TimerKind> {
        TimerKind::ALL
            .into_iter()
            .filter(|kind| self.cancel(*kind))
            .collect()
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.armed[kind.slot()].is_some()
    }

    /// Consume a delivered ticket. True only for the live ticket of its kind;
    /// the slot is disarmed so a duplicate delivery is also rejected.
    pub fn fire(&mut self, ticket: TimerTicket) -> bool {
        let slot = &mut self.armed[ticket.kind.slot()];
        if *slot == Some(ticket.epoch) {
            *slot = None;
            true
        } else {
            false
        }
    }
}
