//! Session registry
//!
//! Plain map from session id to connection handle, owned exclusively by
//! the dispatcher. At any instant it holds exactly the sessions whose
//! reader task is running and has not yet reported death. No lock: the
//! dispatcher's serialized event loop is the only code that touches it.

use std::collections::HashMap;

use crate::session::handle::{SessionHandle, SessionId};

/// The hub's live-session map
#[derive(Debug, Default)]
pub(crate) struct Registry {
    sessions: HashMap<SessionId, SessionHandle>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, id: SessionId, handle: SessionHandle) {
        self.sessions.insert(id, handle);
    }

    /// Remove a session, tearing down its tasks.
    ///
    /// Returns `false` when the id is not present, which makes duplicate
    /// death reports no-ops.
    pub(crate) fn remove(&mut self, id: SessionId) -> bool {
        self.sessions.remove(&id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Iterate the current membership. Fan-out targets are exactly this
    /// set at the instant a publish event is handled.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&SessionId, &SessionHandle)> {
        self.sessions.iter()
    }
}
