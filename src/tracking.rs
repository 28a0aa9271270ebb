//! Cancellable location subscription.
//!
//! The platform side owns a [`LocationPublisher`] and pushes fixes as they
//! arrive; the navigation store owns the matching [`LocationFeed`]. Dropping
//! or cancelling the feed flips a shared flag so the publisher can stop its
//! platform watcher.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

use lakbay_core::Coordinate;
use log::debug;

pub fn location_channel() -> (LocationPublisher, LocationFeed) {
    let (sender, receiver) = mpsc::channel();
    let cancelled = Arc::new(AtomicBool::new(false));
    (
        LocationPublisher {
            sender,
            cancelled: Arc::clone(&cancelled),
        },
        LocationFeed {
            receiver,
            cancelled,
        },
    )
}

#[derive(Debug, Clone)]
pub struct LocationPublisher {
    sender: Sender<Coordinate>,
    cancelled: Arc<AtomicBool>,
}

impl LocationPublisher {
    /// Returns `false` once the subscriber is gone; further fixes are dropped
    pub fn publish(&self, location: Coordinate) -> bool {
        if self.is_cancelled() {
            return false;
        }
        self.sender.send(location).is_ok()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub struct LocationFeed {
    receiver: Receiver<Coordinate>,
    cancelled: Arc<AtomicBool>,
}

impl LocationFeed {
    /// Fixes published since the last drain, oldest first
    pub fn drain(&self) -> Vec<Coordinate> {
        self.receiver.try_iter().collect()
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for LocationFeed {
    fn drop(&mut self) {
        if !self.cancelled.swap(true, Ordering::AcqRel) {
            debug!("Location feed unsubscribed");
        }
    }
}
