//! Confirmed/pending partitioning of an order list.

use crate::models::{Order, OrderId};

/// Orders split by whether the restaurant has started them.
///
/// Both buckets keep the relative order of the input list. No sorting is
/// applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBuckets {
    pub confirmed: Vec<Order>,
    pub pending: Vec<Order>,
}

impl OrderBuckets {
    /// Total number of orders across both buckets.
    pub fn len(&self) -> usize {
        self.confirmed.len() + self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.confirmed.is_empty() && self.pending.is_empty()
    }

    /// Returns the order at `index` when the confirmed bucket is laid out
    /// first and the pending one right after it.
    pub fn get(&self, index: usize) -> Option<&Order> {
        match index.checked_sub(self.confirmed.len()) {
            None => self.confirmed.get(index),
            Some(pending_index) => self.pending.get(pending_index),
        }
    }

    /// Finds an order by id in either bucket.
    pub fn find(&self, id: OrderId) -> Option<&Order> {
        self.confirmed
            .iter()
            .chain(self.pending.iter())
            .find(|o| o.id == id)
    }
}

/// Splits `orders` into confirmed (`startedAt` set) and pending buckets.
///
/// Every element is visited exactly once, the last one included.
pub fn classify(orders: Vec<Order>) -> OrderBuckets {
    let (confirmed, pending) = orders.into_iter().partition(Order::is_confirmed);
    OrderBuckets { confirmed, pending }
}
