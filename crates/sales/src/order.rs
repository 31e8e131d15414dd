use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use flexorder_core::{DomainError, DomainResult, Entity, OrderId, ValueObject};

use crate::payment::PaymentMethod;
use crate::shipping::ShippingStrategy;

/// A single purchased item. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    name: String,
    value: Decimal,
}

impl LineItem {
    pub fn new(name: impl Into<String>, value: Decimal) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("line item name must not be empty"));
        }
        if value < Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "line item value must be non-negative, got {value}"
            )));
        }
        Ok(Self { name, value })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Decimal {
        self.value
    }
}

impl ValueObject for LineItem {}

/// A customer order for one checkout attempt.
///
/// `base_value` is the sum of the item values, computed once at construction.
/// There are no setters: price changes are expressed by wrapping the order in
/// adjustment nodes (see [`crate::pricing`]), never by mutating it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    items: Vec<LineItem>,
    payment_method: PaymentMethod,
    shipping_strategy: ShippingStrategy,
    gift_wrap: bool,
    base_value: Decimal,
}

impl Order {
    /// Build an order with a fresh identifier.
    ///
    /// Fails with a validation error when `items` is empty, and with an
    /// invariant violation when the item values do not fit in a `Decimal`.
    pub fn new(
        items: Vec<LineItem>,
        payment_method: PaymentMethod,
        shipping_strategy: ShippingStrategy,
        gift_wrap: bool,
    ) -> DomainResult<Self> {
        Self::with_id(OrderId::new(), items, payment_method, shipping_strategy, gift_wrap)
    }

    pub fn with_id(
        id: OrderId,
        items: Vec<LineItem>,
        payment_method: PaymentMethod,
        shipping_strategy: ShippingStrategy,
        gift_wrap: bool,
    ) -> DomainResult<Self> {
        if items.is_empty() {
            return Err(DomainError::validation(
                "order must contain at least one item",
            ));
        }

        let base_value = items
            .iter()
            .try_fold(Decimal::ZERO, |total, item| total.checked_add(item.value()))
            .ok_or_else(|| DomainError::invariant("order base value overflowed the decimal range"))?;

        Ok(Self {
            id,
            items,
            payment_method,
            shipping_strategy,
            gift_wrap,
            base_value,
        })
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn base_value(&self) -> Decimal {
        self.base_value
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn shipping_strategy(&self) -> ShippingStrategy {
        self.shipping_strategy
    }

    pub fn gift_wrap(&self) -> bool {
        self.gift_wrap
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
