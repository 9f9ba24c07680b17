// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Single-flight gate: at most one holder, everyone else can wait.
//!
//! Used to serialize token refreshes, but nothing here is refresh-specific.

use tokio::sync::{Mutex, MutexGuard};

/// An async lock with non-blocking acquire and wait-for-release.
#[derive(Debug, Default)]
pub struct SingleFlight {
    lock: Mutex<()>,
}

/// Holding this means the gate is closed. Dropping it opens the gate.
#[derive(Debug)]
pub struct SingleFlightGuard<'a> {
    _guard: MutexGuard<'a, ()>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while someone holds the gate.
    pub fn is_locked(&self) -> bool {
        self.lock.try_lock().is_err()
    }

    /// Take the gate if nobody holds it.
    pub fn try_acquire(&self) -> Option<SingleFlightGuard<'_>> {
        self.lock
            .try_lock()
            .ok()
            .map(|guard| SingleFlightGuard { _guard: guard })
    }

    /// Take the gate, waiting for the current holder if needed.
    pub async fn acquire(&self) -> SingleFlightGuard<'_> {
        SingleFlightGuard {
            _guard: self.lock.lock().await,
        }
    }

    /// Wait until the gate is open, without keeping it.
    pub async fn wait_for_unlock(&self) {
        if self.is_locked() {
            drop(self.lock.lock().await);
        }
    }
}
