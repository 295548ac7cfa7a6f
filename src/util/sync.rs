//! Interior mutability for the container reader shared by every content request.

#[cfg(feature = "threadsafe")]
mod inner {
    use std::sync::{Mutex, MutexGuard, PoisonError};

    /// Bound placed on anything an [`Epub`](crate::Epub) owns,
    /// making it `Send + Sync` under the `threadsafe` feature.
    pub trait SendAndSync: Send + Sync {}

    impl<T: Send + Sync> SendAndSync for T {}

    pub(crate) struct Lock<T>(Mutex<T>);

    impl<T> Lock<T> {
        pub(crate) fn new(value: T) -> Self {
            Self(Mutex::new(value))
        }

        /// Exclusive access for the duration of the returned guard.
        ///
        /// A panic while a previous request held the lock does not
        /// fail later requests; the reader seeks anew for every entry.
        pub(crate) fn acquire(&self) -> MutexGuard<'_, T> {
            self.0.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }
}

#[cfg(not(feature = "threadsafe"))]
mod inner {
    use std::cell::{RefCell, RefMut};

    pub trait SendAndSync {}

    impl<T> SendAndSync for T {}

    pub(crate) struct Lock<T>(RefCell<T>);

    impl<T> Lock<T> {
        pub(crate) fn new(value: T) -> Self {
            Self(RefCell::new(value))
        }

        /// Exclusive access for the duration of the returned guard.
        ///
        /// Guards never outlive a single entry read, so borrows do not overlap.
        pub(crate) fn acquire(&self) -> RefMut<'_, T> {
            self.0.borrow_mut()
        }
    }
}

pub(crate) use inner::{Lock, SendAndSync};
