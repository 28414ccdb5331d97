//! Configuration values that may be computed at build time

use std::cell::OnceCell;
use std::fmt;

/// A plain value, or a producer evaluated on first use and memoized.
///
/// Once resolved, a lazy value never runs its producer again, so every reader
/// within one pipeline sees the same value.
pub enum Deferred<T> {
    Ready(T),
    Lazy {
        producer: Box<dyn Fn() -> T>,
        value: OnceCell<T>,
    },
}

impl<T> Deferred<T> {
    pub fn ready(value: T) -> Self {
        Deferred::Ready(value)
    }

    pub fn lazy(producer: impl Fn() -> T + 'static) -> Self {
        Deferred::Lazy {
            producer: Box::new(producer),
            value: OnceCell::new(),
        }
    }

    /// The value, running the producer if this is the first access
    pub fn resolve(&self) -> &T {
        match self {
            Deferred::Ready(value) => value,
            Deferred::Lazy { producer, value } => value.get_or_init(|| producer()),
        }
    }

    pub fn is_resolved(&self) -> bool {
        match self {
            Deferred::Ready(_) => true,
            Deferred::Lazy { value, .. } => value.get().is_some(),
        }
    }
}

impl<T: Default> Default for Deferred<T> {
    fn default() -> Self {
        Deferred::Ready(T::default())
    }
}

impl<T> From<T> for Deferred<T> {
    fn from(value: T) -> Self {
        Deferred::Ready(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deferred::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Deferred::Lazy { value, .. } => match value.get() {
                Some(value) => f.debug_tuple("Lazy").field(value).finish(),
                None => f.write_str("Lazy(<pending>)"),
            },
        }
    }
}
