/// Counter bumped to force a re-fetch without touching any filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RefreshTrigger(u64);

impl RefreshTrigger {
    pub fn value(self) -> u64 {
        self.0
    }

    pub fn bump(&mut self) {
        self.0 += 1;
    }
}

/// Remembers the `(query, trigger)` key of the last fetch issued.
///
/// A fresh gate has no key, so the first poll after a screen mounts always fetches.
#[derive(Debug, Clone)]
pub struct FetchGate<Q> {
    last: Option<(Q, RefreshTrigger)>,
}

impl<Q> Default for FetchGate<Q> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<Q: PartialEq> FetchGate<Q> {
    /// True exactly when the key differs from the last one polled.
    pub fn poll(&mut self, query: Q, trigger: RefreshTrigger) -> bool {
        let changed = self
            .last
            .as_ref()
            .is_none_or(|(q, t)| *q != query || *t != trigger);
        if changed {
            self.last = Some((query, trigger));
        }
        changed
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_poll_fetches() {
        let mut gate = FetchGate::<u8>::default();
        assert!(gate.poll(0, RefreshTrigger::default()));
        assert!(!gate.poll(0, RefreshTrigger::default()));
    }

    #[test]
    fn query_change_fetches_once() {
        let mut gate = FetchGate::default();
        let trigger = RefreshTrigger::default();
        gate.poll("review", trigger);
        assert!(gate.poll("approved", trigger));
        assert!(!gate.poll("approved", trigger));
    }

    #[test]
    fn trigger_bump_fetches_once() {
        let mut gate = FetchGate::default();
        let mut trigger = RefreshTrigger::default();
        gate.poll((), trigger);
        trigger.bump();
        assert!(gate.poll((), trigger));
        assert!(!gate.poll((), trigger));
        assert_eq!(trigger.value(), 1);
    }

    #[test]
    fn bumps_only_climb() {
        let mut trigger = RefreshTrigger::default();
        let mut seen = vec![trigger.value()];
        for _ in 0..5 {
            trigger.bump();
            seen.push(trigger.value());
        }
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(trigger.value(), 5);
    }

    #[test]
    fn reset_forces_a_fetch() {
        let mut gate = FetchGate::default();
        gate.poll((), RefreshTrigger::default());
        gate.reset();
        assert!(gate.poll((), RefreshTrigger::default()));
    }
}
