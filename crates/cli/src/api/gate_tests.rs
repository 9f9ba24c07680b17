// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the single-flight gate.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::gate::SingleFlight;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_try_acquire_is_exclusive() {
    let gate = SingleFlight::new();
    assert!(!gate.is_locked());

    let guard = gate.try_acquire().unwrap();
    assert!(gate.is_locked());
    assert!(gate.try_acquire().is_none());

    drop(guard);
    assert!(!gate.is_locked());
    assert!(gate.try_acquire().is_some());
}

#[tokio::test]
async fn test_wait_for_unlock_returns_immediately_when_open() {
    let gate = SingleFlight::new();
    gate.wait_for_unlock().await;
    assert!(!gate.is_locked());
}

#[tokio::test]
async fn test_waiters_resume_after_release() {
    let gate = Arc::new(SingleFlight::new());
    let resumed = Arc::new(AtomicUsize::new(0));

    let guard = gate.acquire().await;

    let mut waiters = Vec::new();
    for _ in 0..3 {
        let gate = Arc::clone(&gate);
        let resumed = Arc::clone(&resumed);
        waiters.push(tokio::spawn(async move {
            gate.wait_for_unlock().await;
            resumed.fetch_add(1, Ordering::SeqCst);
        }));
    }

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(resumed.load(Ordering::SeqCst), 0);

    drop(guard);
    for waiter in waiters {
        waiter.await.unwrap();
    }
    assert_eq!(resumed.load(Ordering::SeqCst), 3);
    assert!(!gate.is_locked());
}
