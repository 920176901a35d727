//! Platform abstraction layer
//!
//! The engine never owns a clock. It asks the host for the next animation
//! frame through [`FrameScheduler`] and is called back with the handle it was
//! given. Handles let the engine tell a live request from a stale one.

use std::collections::VecDeque;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Opaque id of one frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host-provided animation callback registration
pub trait FrameScheduler {
    /// Ask for one callback on the next frame
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a request; unknown or already-fired handles are ignored
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler driven by hand: native runs and tests pop due frames themselves
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    queue: VecDeque<FrameHandle>,
    /// Total requests made
    pub requested: u64,
    /// Total requests withdrawn before firing
    pub cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oldest outstanding request, without firing it
    pub fn peek(&self) -> Option<FrameHandle> {
        self.queue.front().copied()
    }

    /// Fire the oldest outstanding request
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.queue.pop_front()
    }

    pub fn outstanding(&self) -> usize {
        self.queue.len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next_id);
        self.queue.push_back(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.queue.len();
        self.queue.retain(|h| *h != handle);
        if self.queue.len() < before {
            self.cancelled += 1;
        }
    }
}
