//! Usage: Mutex locking that survives a poisoned lock.

use std::sync::{Mutex, MutexGuard, PoisonError};

pub trait MutexExt<T> {
    /// Locks, recovering the inner value if a previous holder panicked.
    /// Lifecycle state stays usable after a panicked event handler.
    fn lock_or_recover(&self) -> MutexGuard<'_, T>;
}

impl<T> MutexExt<T> for Mutex<T> {
    fn lock_or_recover(&self) -> MutexGuard<'_, T> {
        self.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::MutexExt;
    use std::sync::Mutex;

    #[test]
    fn recovers_after_a_poisoning_panic() {
        let lock = Mutex::new(7);

        let result = std::panic::catch_unwind(|| {
            let _guard = lock.lock().unwrap();
            panic!("poison it");
        });
        assert!(result.is_err());

        assert_eq!(*lock.lock_or_recover(), 7);
    }
}
