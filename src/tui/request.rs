//! Request bookkeeping for "most recent request wins".
//!
//! Every fetch or mutation the UI starts gets a [`RequestId`] in a
//! [`RequestSlot`]. A reply is applied only if its id is still the latest
//! one issued for that slot; starting a newer request or leaving the
//! screen that owns the slot turns any in-flight reply into a no-op.

use std::collections::HashMap;

/// Identifier attached to an outgoing request and echoed in its reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    /// Raw numeric value, for logging.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a request is for. At most one request per slot is current.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestSlot {
    /// `GET orders` for the orders screen.
    OrderList,
    /// `GET orders/{id}` for the detail screen.
    OrderDetail,
    /// `GET orders/{id}` for the editor.
    EditorOrder,
    /// `GET restaurants/{id}` for the editor.
    EditorCatalog,
    /// Create, update or delete.
    Mutation,
}

/// Issues strictly increasing request ids and remembers the latest per slot.
#[derive(Debug, Default)]
pub struct RequestTracker {
    last_issued: u64,
    latest: HashMap<RequestSlot, RequestId>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request in `slot`, superseding any in-flight one.
    pub fn begin(&mut self, slot: RequestSlot) -> RequestId {
        self.last_issued += 1;
        let id = RequestId(self.last_issued);
        self.latest.insert(slot, id);
        id
    }

    /// Consumes the reply for `id`. Returns `true` if it is the latest
    /// request of `slot` and should be applied.
    pub fn finish(&mut self, slot: RequestSlot, id: RequestId) -> bool {
        if self.latest.get(&slot) == Some(&id) {
            self.latest.remove(&slot);
            true
        } else {
            false
        }
    }

    /// Forgets the in-flight request of `slot`; its reply will be dropped.
    pub fn cancel(&mut self, slot: RequestSlot) {
        self.latest.remove(&slot);
    }

    /// Whether a request is in flight in `slot`.
    pub fn is_pending(&self, slot: RequestSlot) -> bool {
        self.latest.contains_key(&slot)
    }
}
