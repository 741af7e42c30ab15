//! Live data feed subject.
//!
//! [`DataProvider`] holds the most recent value and pushes every new one to its
//! attached observers before [`DataProvider::set_data`] returns. There is no
//! dirty-check: setting the same value twice notifies twice.

use alloc::rc::Rc;
use core::cell::RefCell;

use tracing::trace;

use crate::observer::{Observer, SharedObserver, Subject};

/// Subject producing integer data ticks.
#[derive(Default)]
pub struct DataProvider {
    data: i32,
    subject: Subject,
}

impl DataProvider {
    /// Create a provider holding `0` with no observers.
    pub const fn new() -> Self {
        Self {
            data: 0,
            subject: Subject::new(),
        }
    }

    /// Store `value` and notify every attached observer.
    ///
    /// Returns the number of observers that received the value.
    pub fn set_data(
        &mut self,
        value: i32,
    ) -> usize {
        self.data = value;
        trace!(value, "data provider tick");
        self.subject.notify(value)
    }

    /// Most recently set value.
    #[inline]
    pub const fn data(&self) -> i32 { self.data }

    /// See [`Subject::attach`].
    pub fn attach<O: Observer + 'static>(
        &mut self,
        observer: &Rc<RefCell<O>>,
    ) {
        self.subject.attach(observer);
    }

    /// See [`Subject::attach_shared`].
    pub fn attach_shared(
        &mut self,
        observer: &SharedObserver,
    ) {
        self.subject.attach_shared(observer);
    }

    /// See [`Subject::detach`].
    pub fn detach<O: Observer + ?Sized + 'static>(
        &mut self,
        observer: &Rc<RefCell<O>>,
    ) -> bool {
        self.subject.detach(observer)
    }

    /// Number of live registrations.
    #[inline]
    pub fn observer_count(&self) -> usize { self.subject.observer_count() }
}

// =============================================================================
// Unit Tests
// =============================================================================
