//! Per-connection flow control.
//!
//! Each connection bounds the number of requests sitting between "decoded"
//! and "response written". When the bound is reached the read loop stops
//! pulling frames from the socket until a permit is released, which happens
//! when the write loop finishes writing a response — so ordering pressure
//! and concurrency pressure are bounded by the same mechanism.

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Counting permit gate bounding in-flight requests on one connection.
pub struct FlowController {
    semaphore: Arc<Semaphore>,
    max_in_flight: usize,
}

impl FlowController {
    /// Create a controller admitting at most `max_in_flight` requests.
    pub fn new(max_in_flight: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_in_flight.max(1))),
            max_in_flight: max_in_flight.max(1),
        }
    }

    /// Wait for an admission slot.
    ///
    /// Returns `None` once the controller is closed for drain.
    pub async fn admit(&self) -> Option<FlowPermit> {
        let permit = Arc::clone(&self.semaphore).acquire_owned().await.ok()?;
        Some(FlowPermit { _permit: permit })
    }

    /// Take an admission slot only if one is free right now.
    pub fn try_admit(&self) -> Option<FlowPermit> {
        let permit = Arc::clone(&self.semaphore).try_acquire_owned().ok()?;
        Some(FlowPermit { _permit: permit })
    }

    /// Stop admitting; outstanding permits stay valid until released.
    pub fn close(&self) {
        self.semaphore.close();
    }

    /// Number of requests currently admitted and not yet written out.
    pub fn in_flight(&self) -> usize {
        self.max_in_flight
            .saturating_sub(self.semaphore.available_permits())
    }

    /// The configured admission bound.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }
}

/// An admission slot. Dropping it releases the slot back to the controller;
/// the write loop holds it until the response bytes are out.
pub struct FlowPermit {
    _permit: OwnedSemaphorePermit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_bound_is_enforced() {
        let flow = FlowController::new(2);

        let first = flow.try_admit().expect("slot 1");
        let _second = flow.try_admit().expect("slot 2");
        assert_eq!(flow.in_flight(), 2);
        assert!(flow.try_admit().is_none());

        drop(first);
        assert_eq!(flow.in_flight(), 1);
        assert!(flow.try_admit().is_some());
    }

    #[tokio::test]
    async fn test_admit_waits_for_release() {
        let flow = Arc::new(FlowController::new(1));
        let held = flow.try_admit().expect("slot");

        let waiter = {
            let flow = Arc::clone(&flow);
            tokio::spawn(async move { flow.admit().await.is_some() })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished(), "admit resolved before release");

        drop(held);
        assert!(waiter.await.unwrap());
    }

    #[tokio::test]
    async fn test_close_stops_admission() {
        let flow = FlowController::new(4);
        flow.close();
        assert!(flow.admit().await.is_none());
        assert!(flow.try_admit().is_none());
    }

    #[tokio::test]
    async fn test_zero_bound_is_clamped() {
        let flow = FlowController::new(0);
        assert_eq!(flow.max_in_flight(), 1);
        assert!(flow.try_admit().is_some());
    }
}
