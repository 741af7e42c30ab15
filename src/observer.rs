//! One-to-many notification channel.
//!
//! A [`Subject`] keeps non-owning [`Weak`] registrations of its observers and
//! fans every value out to them synchronously, in registration order, on the
//! caller's stack.
//!
//! # Lifetime Rules
//!
//! Attaching never transfers ownership. An observer that is dropped while still
//! registered is detected on the next [`Subject::notify`]: its registration is
//! pruned and it is never called. There is no way to reach a dead observer.
//!
//! # Duplicates and Re-entrancy
//!
//! - Attaching the same observer twice registers it twice; it then receives
//!   every value twice.
//! - `notify` takes `&mut self`, so an observer cannot attach or detach on the
//!   same subject during a fan-out.
//! - An observer that is already mutably borrowed elsewhere when its turn comes
//!   is skipped (and logged) rather than aborting the whole fan-out.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;

use tracing::{trace, warn};

/// Receiver of data updates.
pub trait Observer {
    /// Called once per delivered value.
    fn on_data_updated(
        &mut self,
        value: i32,
    );
}

/// Shared, dynamically typed observer handle.
pub type SharedObserver = Rc<RefCell<dyn Observer>>;

/// Registry of weakly held observers.
#[derive(Default)]
pub struct Subject {
    observers: Vec<Weak<RefCell<dyn Observer>>>,
}

impl Subject {
    /// Create a subject with no observers.
    pub const fn new() -> Self { Self { observers: Vec::new() } }

    /// Register `observer` at the end of the registry.
    pub fn attach<O: Observer + 'static>(
        &mut self,
        observer: &Rc<RefCell<O>>,
    ) {
        let weak: Weak<RefCell<O>> = Rc::downgrade(observer);
        self.observers.push(weak);
    }

    /// Register an already type-erased observer.
    pub fn attach_shared(
        &mut self,
        observer: &SharedObserver,
    ) {
        self.observers.push(Rc::downgrade(observer));
    }

    /// Remove the first registration of `observer`.
    ///
    /// Works for both attach paths: `O` may be a concrete observer or
    /// `dyn Observer`. Returns `false` if it was not registered.
    pub fn detach<O: Observer + ?Sized + 'static>(
        &mut self,
        observer: &Rc<RefCell<O>>,
    ) -> bool {
        let target = Rc::as_ptr(observer).cast::<()>();
        match self
            .observers
            .iter()
            .position(|weak| Weak::as_ptr(weak).cast::<()>() == target)
        {
            Some(index) => {
                self.observers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Deliver `value` to every live observer in registration order.
    ///
    /// Returns the number of deliveries made.
    pub fn notify(
        &mut self,
        value: i32,
    ) -> usize {
        self.prune();

        // `&mut self` keeps the registry fixed for the whole fan-out
        let mut delivered = 0;
        for index in 0..self.observers.len() {
            let Some(observer) = self.observers[index].upgrade() else { continue };
            match observer.try_borrow_mut() {
                Ok(mut observer) => {
                    observer.on_data_updated(value);
                    delivered += 1;
                }
                Err(_) => warn!(value, "observer busy during notify, skipped"),
            }
        }
        trace!(value, delivered, "notify");
        delivered
    }

    /// Number of registrations whose observer is still alive.
    pub fn observer_count(&self) -> usize { self.observers.iter().filter(|weak| weak.strong_count() > 0).count() }

    /// Drop registrations whose observer no longer exists.
    fn prune(&mut self) {
        let before = self.observers.len();
        self.observers.retain(|weak| weak.strong_count() > 0);
        let pruned = before - self.observers.len();
        if pruned > 0 {
            trace!(pruned, "pruned dropped observers");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
