//! Timer collaborator
//!
//! Fulfills the delayed requests the simulation emits (countdown steps,
//! banner expiry) on a clock advanced by frame time.

/// What to do when a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Call `sim::advance_countdown`
    Countdown,
    /// Hide the achievement banner if it is still this generation
    HideBanner { generation: u32 },
}

/// A timer that has come due
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fired {
    pub kind: TimerKind,
    /// When it was due; follow-up timers are scheduled from here so a long
    /// frame does not stretch the countdown
    pub due_ms: f64,
}

#[derive(Debug, Clone)]
struct Timer {
    due_ms: f64,
    seq: u64,
    kind: TimerKind,
}

/// Pending timers on a frame-driven clock
#[derive(Debug, Clone, Default)]
pub struct Timers {
    now_ms: f64,
    next_seq: u64,
    pending: Vec<Timer>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Move the clock forward
    pub fn advance_clock(&mut self, dt_ms: f64) {
        self.now_ms += dt_ms;
    }

    /// Schedule relative to now
    pub fn schedule(&mut self, kind: TimerKind, after_ms: u32) {
        self.schedule_at(self.now_ms + after_ms as f64, kind);
    }

    pub fn schedule_at(&mut self, due_ms: f64, kind: TimerKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Timer { due_ms, seq, kind });
    }

    /// Remove and return the earliest due timer, ties in scheduling order
    pub fn pop_due(&mut self) -> Option<Fired> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= self.now_ms)
            .min_by(|(_, a), (_, b)| {
                a.due_ms
                    .partial_cmp(&b.due_ms)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.seq.cmp(&b.seq))
            })
            .map(|(i, _)| i)?;

        let timer = self.pending.remove(index);
        Some(Fired {
            kind: timer.kind,
            due_ms: timer.due_ms,
        })
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
