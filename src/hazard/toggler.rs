//! Background hazard toggler.
//!
//! # Responsibilities
//! - Periodically flip one designated member in or out of its category
//! - Alternate add/remove deterministically, independent of readers
//! - Skip ticks while the store is uninitialized, never crash
//!
//! # State Machine
//! ```text
//! next = Add:    insert member (no-op if present), bump version → next = Remove
//! next = Remove: remove member (no-op if absent),  bump version → next = Add
//! store uninitialized: tick skipped, `next` unchanged
//! ```

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::hazard::store::{HazardError, HazardStore};
use crate::hazard::types::HazardCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NextAction {
    Add,
    Remove,
}

/// Outcome of a single toggle tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Whether the member is present after the tick.
    pub present: bool,
    /// Store version after the tick.
    pub version: u64,
}

pub struct HazardToggler {
    store: Arc<HazardStore>,
    category: HazardCategory,
    member: String,
    period: Duration,
    next: NextAction,
}

impl HazardToggler {
    /// Create a toggler for `member` of a named `category`. The first tick adds.
    pub fn new(
        store: Arc<HazardStore>,
        category: HazardCategory,
        member: impl Into<String>,
        period: Duration,
    ) -> Result<Self, HazardError> {
        if !category.is_named() {
            return Err(HazardError::NotNamedCategory(category));
        }
        Ok(Self {
            store,
            category,
            member: member.into(),
            period,
            next: NextAction::Add,
        })
    }

    /// Run one toggle step.
    pub fn tick(&mut self) -> Result<ToggleOutcome, HazardError> {
        let category = self.category;
        let member = self.member.as_str();
        let next = self.next;

        let ((), version) = self.store.mutate(|map| match next {
            NextAction::Add => {
                map.insert(category, member);
            }
            NextAction::Remove => {
                map.remove(category, member);
            }
        })?;

        self.next = match next {
            NextAction::Add => NextAction::Remove,
            NextAction::Remove => NextAction::Add,
        };

        Ok(ToggleOutcome {
            present: next == NextAction::Add,
            version,
        })
    }

    /// Tick every period until shutdown. The first tick fires one period after start.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            category = ?self.category,
            member = %self.member,
            period_secs = self.period.as_secs_f64(),
            "Hazard toggler starting"
        );

        let mut ticker = time::interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.tick() {
                        Ok(outcome) => tracing::debug!(
                            member = %self.member,
                            present = outcome.present,
                            version = outcome.version,
                            "Hazard toggled"
                        ),
                        Err(e) => tracing::warn!(error = %e, "Hazard toggle skipped, retrying next tick"),
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Hazard toggler received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
