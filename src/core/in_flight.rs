use std::sync::atomic::{AtomicBool, Ordering};

/// Per-category reentrancy flag.
#[derive(Default)]
pub struct InFlight(AtomicBool);

impl InFlight {
    /// Set the flag, unless it is already set.
    ///
    /// The flag is released when the guard drops, whichever way the fetch settled.
    pub fn try_acquire(&self) -> Option<InFlightGuard<'_>> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(self))
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Force the flag down on shutdown.
    pub fn release(&self) {
        self.0.store(false, Ordering::Release);
    }
}

#[must_use]
pub struct InFlightGuard<'a>(&'a InFlight);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.release();
    }
}
