//! Stamina pool gating sprint and jump.

use serde::{Deserialize, Serialize};

/// A depletable, regenerating resource.
///
/// `current` stays within `[0, max]` after every call. Negative or NaN
/// amounts are ignored rather than corrupting the pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaminaPool {
    current: f32,
    max: f32,
}

impl StaminaPool {
    /// A full pool.
    pub fn new(max: f32) -> Self {
        let max = if max.is_finite() { max.max(0.0) } else { 0.0 };
        Self { current: max, max }
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Fill level in [0, 1].
    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    /// Spend `amount` only if the pool can cover it.
    pub fn consume(&mut self, amount: f32) -> bool {
        if amount.is_nan() || amount < 0.0 || self.current < amount {
            return false;
        }
        self.current = (self.current - amount).max(0.0);
        true
    }

    /// Spend up to `amount`, stopping at empty. Returns what was removed.
    pub fn drain(&mut self, amount: f32) -> f32 {
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        let removed = amount.min(self.current);
        self.current = (self.current - removed).max(0.0);
        removed
    }

    /// Add `rate * dt`, capped at max.
    pub fn regenerate(&mut self, rate: f32, dt: f32) {
        let gain = rate * dt;
        if gain > 0.0 && gain.is_finite() {
            self.current = (self.current + gain).min(self.max);
        }
    }

    /// Refill completely.
    pub fn refill(&mut self) {
        self.current = self.max;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_is_a_gate() {
        let mut pool = StaminaPool::new(15.0);

        assert!(pool.consume(10.0));
        assert_eq!(pool.current(), 5.0);

        // Not enough left: nothing changes
        assert!(!pool.consume(10.0));
        assert_eq!(pool.current(), 5.0);
    }

    #[test]
    fn test_drain_saturates_at_zero() {
        let mut pool = StaminaPool::new(1.0);

        assert_eq!(pool.drain(0.4), 0.4);
        assert!((pool.drain(5.0) - 0.6).abs() < 1e-6);
        assert!(pool.is_empty());
        assert_eq!(pool.drain(1.0), 0.0);
    }

    #[test]
    fn test_regenerate_caps_at_max() {
        let mut pool = StaminaPool::new(100.0);
        pool.drain(10.0);

        pool.regenerate(5.0, 1.0);
        assert_eq!(pool.current(), 95.0);

        pool.regenerate(5.0, 10.0);
        assert_eq!(pool.current(), 100.0);
        assert_eq!(pool.fraction(), 1.0);
    }

    #[test]
    fn test_bad_amounts_are_ignored() {
        let mut pool = StaminaPool::new(10.0);

        assert!(!pool.consume(f32::NAN));
        assert!(!pool.consume(-1.0));
        assert_eq!(pool.drain(f32::NAN), 0.0);
        pool.regenerate(f32::INFINITY, 1.0);
        pool.regenerate(-5.0, 1.0);

        assert_eq!(pool.current(), 10.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Consume(f32),
        Drain(f32),
        Regenerate(f32, f32),
    }

    fn arb_amount() -> impl Strategy<Value = f32> {
        prop_oneof![
            -50.0f32..200.0,
            Just(f32::NAN),
            Just(f32::INFINITY),
            Just(0.0),
        ]
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            arb_amount().prop_map(Op::Consume),
            arb_amount().prop_map(Op::Drain),
            (arb_amount(), 0.0f32..1.0).prop_map(|(rate, dt)| Op::Regenerate(rate, dt)),
        ]
    }

    proptest! {
        #[test]
        fn stamina_stays_within_bounds(
            max in 1.0f32..500.0,
            ops in prop::collection::vec(arb_op(), 0..64),
        ) {
            let mut pool = StaminaPool::new(max);
            for op in ops {
                match op {
                    Op::Consume(amount) => { pool.consume(amount); }
                    Op::Drain(amount) => { pool.drain(amount); }
                    Op::Regenerate(rate, dt) => pool.regenerate(rate, dt),
                }
                prop_assert!(pool.current() >= 0.0, "current={}", pool.current());
                prop_assert!(pool.current() <= pool.max(), "current={} max={}", pool.current(), pool.max());
            }
        }
    }
}
