//! In-memory handler for tests and debugging.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::context::Context;
use crate::handler::Handler;
use crate::message::Message;

/// Stores every message it receives, unchanged and in arrival order.
///
/// No formatting happens, so tests can inspect levels, tags and nested field
/// values directly. The list grows without bound.
#[derive(Debug, Default)]
pub struct Memory {
    messages: Mutex<Vec<Message>>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of all messages received so far.
    pub fn messages(&self) -> Vec<Message> {
        self.lock().clone()
    }

    /// Remove and return all messages received so far.
    pub fn take(&self) -> Vec<Message> {
        std::mem::take(&mut *self.lock())
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Message>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Handler for Memory {
    fn handle(&self, _ctx: &Context, message: Message) {
        self.lock().push(message);
    }
}
