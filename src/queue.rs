//! Serial command queue for the designated routing context.
//!
//! The routing engine is not thread-safe, so every session mutation is a
//! [`Command`] consumed by a single worker thread. `start`/`stop` use
//! [`CommandQueue::submit_exclusive`]: pending work is cleared and the new
//! command jumps the queue, so a start is never starved behind stale queued
//! stops and races between the two resolve to the last caller's intent.

use std::collections::VecDeque;
use std::sync::mpsc::SyncSender;

use parking_lot::{Condvar, Mutex};

use crate::config::ConfigUpdate;
use crate::DeviceKind;

/// A unit of work for the routing worker.
pub(crate) enum Command {
    /// Create and activate a session if none exists.
    Start,
    /// Deactivate and release the session if one exists.
    Stop,
    /// Select the first available device of the given kind.
    Select(DeviceKind),
    /// Re-apply one mutated setting to the live session.
    Apply(ConfigUpdate),
    /// Barrier: signal the sender once all prior commands are processed.
    ///
    /// If the barrier is cleared by an exclusive submit before the worker
    /// reaches it, the dropped sender unblocks the waiting receiver anyway.
    Flush(SyncSender<()>),
    /// Stop the session and exit the worker loop.
    Shutdown,
}

struct Inner {
    commands: VecDeque<Command>,
    closed: bool,
}

/// Single-consumer FIFO with priority insert and cancel-pending semantics.
pub(crate) struct CommandQueue {
    inner: Mutex<Inner>,
    available: Condvar,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                commands: VecDeque::new(),
                closed: false,
            }),
            available: Condvar::new(),
        }
    }

    /// Appends a command.
    pub fn submit(&self, command: Command) {
        let mut inner = self.inner.lock();
        if inner.closed {
            return;
        }
        inner.commands.push_back(command);
        self.available.notify_one();
    }

    /// Clears all pending work and inserts the command at the front.
    pub fn submit_exclusive(&self, command: Command) {
        let mut inner = self.inner.lock();
        if inner.closed {
            return;
        }
        inner.commands.clear();
        inner.commands.push_front(command);
        self.available.notify_one();
    }

    /// Blocks until a command is available; `None` once the queue is closed
    /// and drained.
    pub fn pop(&self) -> Option<Command> {
        let mut inner = self.inner.lock();
        loop {
            if let Some(command) = inner.commands.pop_front() {
                return Some(command);
            }
            if inner.closed {
                return None;
            }
            self.available.wait(&mut inner);
        }
    }

    /// Closes the queue; subsequent submits are dropped and `pop` returns
    /// `None` once drained.
    pub fn close(&self) {
        let mut inner = self.inner.lock();
        inner.closed = true;
        self.available.notify_all();
    }
}
