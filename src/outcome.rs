//! Short-circuiting value container
//!
//! An `Outcome` is either a live positive value or a terminated computation.
//! Steps are sequenced with `chain`; once an outcome terminates, every later
//! step is skipped.

use serde::{Deserialize, Serialize};

/// Numeric types that can tell whether they are strictly greater than zero
pub trait Positive: Copy {
    fn is_positive(&self) -> bool;
}

macro_rules! impl_positive_int {
    ($($t:ty),*) => {
        $(impl Positive for $t {
            fn is_positive(&self) -> bool {
                *self > 0
            }
        })*
    };
}

impl_positive_int!(i8, i16, i32, i64, i128, isize);

impl Positive for f32 {
    fn is_positive(&self) -> bool {
        // NaN compares false
        *self > 0.0
    }
}

impl Positive for f64 {
    fn is_positive(&self) -> bool {
        *self > 0.0
    }
}

/// Either a live positive value or a terminated computation
///
/// Deserialization goes through `Outcome::of`, so `{"alive": -5}` reads back
/// as `Terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    rename_all = "snake_case",
    from = "OutcomeRepr<T>",
    bound(deserialize = "T: Positive + Deserialize<'de>")
)]
pub enum Outcome<T> {
    /// Holds a value strictly greater than zero
    Alive(T),
    /// The computation reached a non-positive value
    Terminated,
}

impl<T: Positive> Outcome<T> {
    /// Wrap a raw value. Anything not strictly positive collapses to `Terminated`.
    pub fn of(value: T) -> Self {
        if value.is_positive() {
            Outcome::Alive(value)
        } else {
            Outcome::Terminated
        }
    }

    /// Run `step` on the held value, or skip it entirely when terminated
    ///
    /// This is the only place termination propagates. A terminated receiver is
    /// returned as-is and `step` is never called.
    pub fn chain<U, F>(self, step: F) -> Outcome<U>
    where
        U: Positive,
        F: FnOnce(T) -> Outcome<U>,
    {
        match self {
            Outcome::Alive(value) => step(value),
            Outcome::Terminated => {
                tracing::debug!("chain short-circuited on terminated outcome");
                Outcome::Terminated
            }
        }
    }

    /// The held value, or `None` when terminated
    pub fn extract(&self) -> Option<T> {
        match self {
            Outcome::Alive(value) => Some(*value),
            Outcome::Terminated => None,
        }
    }

    pub fn is_alive(&self) -> bool {
        matches!(self, Outcome::Alive(_))
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self, Outcome::Terminated)
    }
}

/// Wire shape of `Outcome`, before the positivity check
#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum OutcomeRepr<T> {
    Alive(T),
    Terminated,
}

impl<T: Positive> From<OutcomeRepr<T>> for Outcome<T> {
    fn from(repr: OutcomeRepr<T>) -> Self {
        match repr {
            OutcomeRepr::Alive(value) => Outcome::of(value),
            OutcomeRepr::Terminated => Outcome::Terminated,
        }
    }
}
