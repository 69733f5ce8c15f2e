//! Re-entrancy lock around a pool's mutable state.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use crate::error::{AmmError, Result};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns a pool's state and hands out exclusive access one operation at a
/// time.
///
/// - A call from another thread waits until the current operation ends.
/// - A call from the thread that is already inside an operation (a token
///   callback reaching back into the pool) fails immediately with
///   [`AmmError::ReentrancyBlocked`] instead of deadlocking.
///
/// State is only written after every fallible step of an operation has
/// succeeded, so a poisoned lock still holds consistent state and is
/// recovered rather than propagated.
#[derive(Debug)]
pub(crate) struct ReentrancyGuard<S> {
    state: Mutex<S>,
    holder: Mutex<Option<ThreadId>>,
}

/// Clears the holder when an operation ends, including by unwinding.
struct Release<'a>(&'a Mutex<Option<ThreadId>>);

impl Drop for Release<'_> {
    fn drop(&mut self) {
        *lock(self.0) = None;
    }
}

impl<S> ReentrancyGuard<S> {
    pub(crate) fn new(state: S) -> Self {
        Self {
            state: Mutex::new(state),
            holder: Mutex::new(None),
        }
    }

    /// Runs `op` with exclusive access to the state.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ReentrancyBlocked`] if the current thread is
    /// already inside `enter` on this guard; otherwise whatever `op`
    /// returns.
    pub(crate) fn enter<T>(
        &self,
        operation: &'static str,
        op: impl FnOnce(&mut S) -> Result<T>,
    ) -> Result<T> {
        let me = thread::current().id();
        if *lock(&self.holder) == Some(me) {
            #[cfg(feature = "tracing")]
            tracing::warn!(operation, "re-entrant pool call blocked");
            #[cfg(not(feature = "tracing"))]
            let _ = operation;
            return Err(AmmError::ReentrancyBlocked);
        }

        let mut state = lock(&self.state);
        *lock(&self.holder) = Some(me);
        let _release = Release(&self.holder);
        op(&mut state)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn runs_operation_with_state() {
        let guard = ReentrancyGuard::new(1u32);
        let result = guard.enter("inc", |s| {
            *s += 1;
            Ok(*s)
        });
        assert_eq!(result, Ok(2));
    }

    #[test]
    fn nested_call_is_blocked() {
        let guard = ReentrancyGuard::new(0u32);
        let outer = guard.enter("outer", |_| guard.enter("inner", |_| Ok(())));
        assert_eq!(outer, Err(AmmError::ReentrancyBlocked));
    }

    #[test]
    fn lock_is_released_after_error() {
        let guard = ReentrancyGuard::new(0u32);
        let failed: Result<()> = guard.enter("fail", |_| Err(AmmError::ZeroAmount));
        assert_eq!(failed, Err(AmmError::ZeroAmount));
        assert_eq!(guard.enter("again", |s| Ok(*s)), Ok(0));
    }

    #[test]
    fn other_threads_wait_instead_of_failing() {
        let guard = Arc::new(ReentrancyGuard::new(0u64));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let guard = Arc::clone(&guard);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let r = guard.enter("inc", |s| {
                            *s += 1;
                            Ok(())
                        });
                        assert_eq!(r, Ok(()));
                    }
                })
            })
            .collect();
        for handle in handles {
            let Ok(()) = handle.join() else {
                panic!("worker panicked");
            };
        }
        assert_eq!(guard.enter("read", |s| Ok(*s)), Ok(800));
    }
}
