use thiserror::Error;

use flexorder_core::{DomainError, OrderId};

/// Failures surfaced by a checkout.
///
/// A declined payment is not one of them: it is reported as
/// [`crate::CheckoutOutcome::Aborted`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// The order could not be built (no items, negative values, ...).
    #[error(transparent)]
    Configuration(#[from] DomainError),

    /// Payment was approved but inventory refused the registration.
    #[error("inventory registration failed for order {order_id}: {source}")]
    Inventory {
        order_id: OrderId,
        #[source]
        source: DomainError,
    },

    /// Payment was approved and inventory updated, but no invoice was issued.
    #[error("invoice emission failed for order {order_id}: {source}")]
    Invoicing {
        order_id: OrderId,
        #[source]
        source: DomainError,
    },
}

impl CheckoutError {
    /// True for faults raised after the payment was approved.
    pub fn is_post_payment(&self) -> bool {
        matches!(
            self,
            CheckoutError::Inventory { .. } | CheckoutError::Invoicing { .. }
        )
    }
}
