//! Auto-Refresh
//!
//! Periodic re-fetch of a list whose contents can change without a local
//! gesture. Every restart bumps a generation; a fetch that resolves under an
//! older generation belongs to a view that is gone and must be discarded.

use gloo_timers::callback::Interval;
use leptos::prelude::*;

/// Generation counter for in-flight fetches
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshGate {
    generation: u64,
}

impl RefreshGate {
    /// Invalidate everything issued so far; returns the new generation
    pub fn bump(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }
}

/// Interval timer bound to the owning component. Dropping the `Interval`
/// cancels it, so replacing or clearing the slot stops the old timer.
#[derive(Clone, Copy)]
pub struct AutoRefresh {
    timer: StoredValue<Option<Interval>, LocalStorage>,
    gate: StoredValue<RefreshGate>,
}

impl AutoRefresh {
    pub fn new() -> Self {
        let refresh = Self {
            timer: StoredValue::new_local(None),
            gate: StoredValue::new(RefreshGate::default()),
        };
        on_cleanup(move || refresh.stop());
        refresh
    }

    /// Start a new generation. With `Some(ms)`, `tick` runs every `ms` with
    /// that generation; any previous timer is cancelled first.
    pub fn restart(&self, every_ms: Option<u32>, tick: impl Fn(u64) + 'static) -> u64 {
        let generation = self.bump();
        let timer = every_ms.map(|ms| {
            tracing::debug!(generation, every_ms = ms, "auto-refresh started");
            Interval::new(ms, move || tick(generation))
        });
        self.timer.try_set_value(timer);
        generation
    }

    pub fn stop(&self) {
        if self.timer.try_set_value(None).is_none() {
            self.bump();
        }
    }

    fn bump(&self) -> u64 {
        self.gate.try_update_value(|g| g.bump()).unwrap_or_default()
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.gate.try_with_value(|g| g.is_current(generation)).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_generation_is_rejected() {
        let mut gate = RefreshGate::default();
        let first = gate.bump();
        assert!(gate.is_current(first));
        let second = gate.bump();
        assert!(!gate.is_current(first));
        assert!(gate.is_current(second));
    }
}
