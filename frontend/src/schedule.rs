//! Timed transitions as data.
//!
//! Handlers never start timers themselves. They return [`Effect`]s and the
//! browser layer arms a timeout that feeds the [`Task`] back into the
//! controller once it expires.

/// A transition completion to run after a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Opening modal becomes Open. Dropped if `generation` is stale.
    ModalSettled { generation: u64 },
    /// Closing modal becomes Closed. Dropped if `generation` is stale.
    ModalFaded { generation: u64 },
    HideExcuse,
    RestoreForm,
    DismissToast { id: u32 },
    ScrollToCreator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Schedule { delay_ms: u32, task: Task },
    /// POST the contact form and report back with `UiEvent::FormCompleted`.
    SubmitForm,
}

impl Effect {
    pub const fn after(delay_ms: u32, task: Task) -> Self {
        Effect::Schedule { delay_ms, task }
    }
}

#[cfg(test)]
pub mod testing {
    /// Deterministic stand-in for the browser's timer queue.
    #[derive(Debug, Default)]
    pub struct ManualClock {
        now_ms: u64,
        seq: u64,
        pending: Vec<(u64, u64, super::Task)>,
    }

    impl ManualClock {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queues every `Schedule` effect and returns how many `SubmitForm`
        /// effects were seen.
        pub fn absorb(&mut self, effects: Vec<super::Effect>) -> usize {
            let mut submits = 0;
            for effect in effects {
                match effect {
                    super::Effect::Schedule { delay_ms, task } => {
                        self.seq += 1;
                        self.pending
                            .push((self.now_ms + u64::from(delay_ms), self.seq, task));
                    }
                    super::Effect::SubmitForm => submits += 1,
                }
            }
            submits
        }

        /// Moves time forward and returns the tasks that came due, in firing order.
        pub fn advance(&mut self, ms: u64) -> Vec<super::Task> {
            self.now_ms += ms;
            let now = self.now_ms;
            let mut due: Vec<_> = self
                .pending
                .iter()
                .filter(|(at, _, _)| *at <= now)
                .copied()
                .collect();
            self.pending.retain(|(at, _, _)| *at > now);
            due.sort_by_key(|(at, seq, _)| (*at, *seq));
            due.into_iter().map(|(_, _, task)| task).collect()
        }

        pub fn pending(&self) -> usize {
            self.pending.len()
        }
    }
}
