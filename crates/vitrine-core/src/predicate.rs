//! Runtime switches attached to extensions and their contributions.

use std::fmt;
use std::sync::Arc;

/// A shared, thread-safe boolean predicate.
pub type PredicateFn = Arc<dyn Fn() -> bool + Send + Sync>;

/// Whether an extension participates at all.
///
/// A disabled extension is dropped by the loader before any of its
/// contributions are seen by the composers.
#[derive(Clone, Default)]
pub enum Enabled {
    /// Always enabled (the default).
    #[default]
    Always,
    /// Never enabled.
    Never,
    /// Enabled when the predicate returns `true` at load time.
    Predicate(PredicateFn),
}

impl Enabled {
    /// Builds a predicate variant from a closure.
    pub fn when<F>(f: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }

    /// Evaluates the switch.
    pub fn evaluate(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Predicate(f) => f(),
        }
    }
}

impl From<bool> for Enabled {
    fn from(value: bool) -> Self {
        if value { Self::Always } else { Self::Never }
    }
}

impl fmt::Debug for Enabled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("Always"),
            Self::Never => f.write_str("Never"),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Runtime condition on a single contribution.
///
/// Evaluated by the composers on every call, unlike [`Enabled`] which is
/// evaluated once when the extension is loaded.
#[derive(Clone, Default)]
pub enum Condition {
    /// No condition; the contribution always applies.
    #[default]
    Always,
    /// Applies when the predicate returns `true`.
    When(PredicateFn),
}

impl Condition {
    /// Builds a conditional variant from a closure.
    pub fn when<F>(f: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self::When(Arc::new(f))
    }

    /// Returns `true` when the contribution should be applied.
    pub fn is_satisfied(&self) -> bool {
        match self {
            Self::Always => true,
            Self::When(f) => f(),
        }
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("Always"),
            Self::When(_) => f.write_str("When(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_enabled_variants() {
        assert!(Enabled::Always.evaluate());
        assert!(!Enabled::Never.evaluate());
        assert!(Enabled::from(true).evaluate());
        assert!(!Enabled::from(false).evaluate());
        assert!(!Enabled::when(|| false).evaluate());
    }

    #[test]
    fn test_condition_is_reevaluated() {
        let flag = Arc::new(AtomicBool::new(false));
        let seen = Arc::clone(&flag);
        let condition = Condition::when(move || seen.load(Ordering::SeqCst));

        assert!(!condition.is_satisfied());
        flag.store(true, Ordering::SeqCst);
        assert!(condition.is_satisfied());
    }
}
