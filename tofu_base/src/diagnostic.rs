//! A module for handling diagnostics produced while processing a template.

use std::cell::{Cell, Ref, RefCell};

/// Represents a trait responsible for handling diagnostics.
pub trait Handler<T> {
    /// Receives a diagnostic and handles it.
    fn receive(&self, diagnostic: T);
}

/// Is a struct that implements [`Handler`] trait by storing all diagnostics in a vector.
///
/// The storage is meant for a single reader; it uses no synchronization.
#[derive(Debug)]
pub struct Storage<T> {
    diagnostics: RefCell<Vec<T>>,
}

impl<T> Storage<T> {
    /// Creates a new empty [`Storage`]
    #[must_use]
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Consumes the [`Storage`] and returns the underlying vector of diagnostics.
    pub fn into_vec(self) -> Vec<T> { self.diagnostics.into_inner() }

    /// Returns a reference to the underlying vector of diagnostics.
    pub fn as_vec(&self) -> Ref<Vec<T>> { self.diagnostics.borrow() }

    /// Returns `true` if no diagnostic has been received yet.
    pub fn is_empty(&self) -> bool { self.diagnostics.borrow().is_empty() }
}

impl<T> Default for Storage<T> {
    fn default() -> Self { Self::new() }
}

impl<T, U> Handler<U> for Storage<T>
where
    U: Into<T>,
{
    fn receive(&self, diagnostic: U) { self.diagnostics.borrow_mut().push(diagnostic.into()); }
}

/// Is a struct that implements [`Handler`] trait by doing nothing with the diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Dummy;

impl<T> Handler<T> for Dummy {
    fn receive(&self, _diagnostic: T) {}
}

/// Is a struct that implements [`Handler`] trait by counting the number of diagnostics received.
#[derive(Debug, Default)]
pub struct Counter {
    counter: Cell<usize>,
}

impl Counter {
    /// Returns the number of diagnostics received.
    #[must_use]
    pub fn count(&self) -> usize { self.counter.get() }

    /// Resets the counter to zero.
    pub fn reset(&self) { self.counter.set(0) }
}

impl<T> Handler<T> for Counter {
    fn receive(&self, _diagnostic: T) { self.counter.set(self.counter.get() + 1); }
}
