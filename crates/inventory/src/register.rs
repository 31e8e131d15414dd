use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use flexorder_core::{DomainResult, OrderId};
use flexorder_sales::{LineItem, Order};

/// Records paid orders.
///
/// Implementations may be remote; any retry or timeout policy is theirs and is
/// invisible to the caller.
pub trait Inventory {
    fn register_order(&self, order: &Order) -> DomainResult<()>;
}

impl<I: Inventory + ?Sized> Inventory for &I {
    fn register_order(&self, order: &Order) -> DomainResult<()> {
        (**self).register_order(order)
    }
}

impl<I: Inventory + ?Sized> Inventory for std::sync::Arc<I> {
    fn register_order(&self, order: &Order) -> DomainResult<()> {
        (**self).register_order(order)
    }
}

/// Snapshot of an order as inventory saw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredOrder {
    pub order_id: OrderId,
    pub items: Vec<LineItem>,
    pub registered_at: DateTime<Utc>,
}

/// In-process inventory register. Never fails.
///
/// Registering the same order twice keeps the first registration.
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    registered: Mutex<Vec<RegisteredOrder>>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registered(&self) -> Vec<RegisteredOrder> {
        self.registered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn contains(&self, order_id: OrderId) -> bool {
        self.registered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|r| r.order_id == order_id)
    }

    pub fn len(&self) -> usize {
        self.registered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Inventory for InMemoryInventory {
    fn register_order(&self, order: &Order) -> DomainResult<()> {
        let mut registered = self
            .registered
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if registered.iter().any(|r| r.order_id == order.id_typed()) {
            return Ok(());
        }

        registered.push(RegisteredOrder {
            order_id: order.id_typed(),
            items: order.items().to_vec(),
            registered_at: Utc::now(),
        });
        Ok(())
    }
}
