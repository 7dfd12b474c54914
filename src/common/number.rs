use std::cmp::Ordering;
use std::fmt::Debug;
use std::marker::PhantomData;

/// Arithmetic over the distance type used as path cost.
///
/// Handlers are stateless: every operation is an associated function, so the
/// search engine only carries the handler as a type parameter.
pub trait NumberHandler {
    type Number: Clone + Debug;

    fn zero() -> Self::Number;

    fn add(a: &Self::Number, b: &Self::Number) -> Self::Number;

    fn compare(a: &Self::Number, b: &Self::Number) -> Ordering;

    fn greater_or_equal(a: &Self::Number, b: &Self::Number) -> bool {
        Self::compare(a, b) != Ordering::Less
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FloatHandler;

impl NumberHandler for FloatHandler {
    type Number = f64;

    fn zero() -> f64 {
        0.0
    }

    fn add(a: &f64, b: &f64) -> f64 {
        a + b
    }

    fn compare(a: &f64, b: &f64) -> Ordering {
        a.total_cmp(b)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerHandler;

impl NumberHandler for IntegerHandler {
    type Number = i64;

    fn zero() -> i64 {
        0
    }

    fn add(a: &i64, b: &i64) -> i64 {
        a + b
    }

    fn compare(a: &i64, b: &i64) -> Ordering {
        a.cmp(b)
    }
}

/// Orders a handler's number by `H::compare`, so it can key ordered collections.
pub struct HandlerOrd<H: NumberHandler>(pub H::Number, PhantomData<H>);

impl<H: NumberHandler> HandlerOrd<H> {
    pub fn new(value: H::Number) -> Self {
        HandlerOrd(value, PhantomData)
    }

    pub fn into_inner(self) -> H::Number {
        self.0
    }
}

impl<H: NumberHandler> Clone for HandlerOrd<H> {
    fn clone(&self) -> Self {
        HandlerOrd::new(self.0.clone())
    }
}

impl<H: NumberHandler> Debug for HandlerOrd<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<H: NumberHandler> PartialEq for HandlerOrd<H> {
    fn eq(&self, other: &Self) -> bool {
        H::compare(&self.0, &other.0) == Ordering::Equal
    }
}

impl<H: NumberHandler> Eq for HandlerOrd<H> {}

impl<H: NumberHandler> PartialOrd for HandlerOrd<H> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<H: NumberHandler> Ord for HandlerOrd<H> {
    fn cmp(&self, other: &Self) -> Ordering {
        H::compare(&self.0, &other.0)
    }
}
