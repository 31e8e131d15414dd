use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use flexorder_core::{DomainError, DomainResult, Entity, InvoiceId, OrderId};
use flexorder_sales::Order;

/// Issues invoices for paid orders.
pub trait Invoicing {
    /// Issue an invoice for `order` charging `amount` (the final payable
    /// amount, shipping and fees included).
    fn issue(&self, order: &Order, amount: Decimal) -> DomainResult<Invoice>;
}

impl<I: Invoicing + ?Sized> Invoicing for &I {
    fn issue(&self, order: &Order, amount: Decimal) -> DomainResult<Invoice> {
        (**self).issue(order, amount)
    }
}

impl<I: Invoicing + ?Sized> Invoicing for std::sync::Arc<I> {
    fn issue(&self, order: &Order, amount: Decimal) -> DomainResult<Invoice> {
        (**self).issue(order, amount)
    }
}

/// Invoice line copied from an order's line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub line_no: u32,
    pub description: String,
    pub value: Decimal,
}

/// An issued invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    id: InvoiceId,
    order_id: OrderId,
    lines: Vec<InvoiceLine>,
    amount: Decimal,
    issued_at: DateTime<Utc>,
}

impl Invoice {
    /// Build an invoice for `order`.
    ///
    /// `amount` is what the customer actually pays and will usually differ
    /// from the sum of the lines (discounts, shipping, gift wrap).
    pub fn for_order(
        id: InvoiceId,
        order: &Order,
        amount: Decimal,
        issued_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if amount < Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "invoice amount must be non-negative, got {amount}"
            )));
        }

        let lines = order
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| InvoiceLine {
                line_no: (i as u32) + 1,
                description: item.name().to_string(),
                value: item.value(),
            })
            .collect();

        Ok(Self {
            id,
            order_id: order.id_typed(),
            lines,
            amount,
            issued_at,
        })
    }

    pub fn id_typed(&self) -> InvoiceId {
        self.id
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn lines(&self) -> &[InvoiceLine] {
        &self.lines
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }
}

impl Entity for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// In-process invoicing. Keeps every issued invoice.
#[derive(Debug, Default)]
pub struct InMemoryInvoicing {
    issued: Mutex<Vec<Invoice>>,
}

impl InMemoryInvoicing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issued(&self) -> Vec<Invoice> {
        self.issued
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn for_order(&self, order_id: OrderId) -> Option<Invoice> {
        self.issued
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|inv| inv.order_id == order_id)
            .cloned()
    }
}

impl Invoicing for InMemoryInvoicing {
    fn issue(&self, order: &Order, amount: Decimal) -> DomainResult<Invoice> {
        let invoice = Invoice::for_order(InvoiceId::new(), order, amount, Utc::now())?;
        self.issued
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(invoice.clone());
        Ok(invoice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexorder_sales::{LineItem, PaymentMethod, ShippingStrategy};
    use rust_decimal_macros::dec;

    fn test_order() -> Order {
        Order::new(
            vec![
                LineItem::new("Invisibility Cloak", dec!(150)).unwrap(),
                LineItem::new("Flight Potion", dec!(80)).unwrap(),
            ],
            PaymentMethod::InstantTransfer,
            ShippingStrategy::Standard,
            false,
        )
        .unwrap()
    }

    #[test]
    fn issue_copies_lines_and_amount() {
        let invoicing = InMemoryInvoicing::new();
        let order = test_order();

        let invoice = invoicing.issue(&order, dec!(229.425)).unwrap();

        assert_eq!(invoice.order_id(), order.id_typed());
        assert_eq!(invoice.amount(), dec!(229.425));
        assert_eq!(invoice.lines().len(), 2);
        assert_eq!(invoice.lines()[1].line_no, 2);
        assert_eq!(invoice.lines()[1].description, "Flight Potion");
        assert_eq!(invoicing.for_order(order.id_typed()), Some(invoice));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let invoicing = InMemoryInvoicing::new();
        let err = invoicing.issue(&test_order(), dec!(-1)).unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert!(invoicing.issued().is_empty());
    }

    #[test]
    fn each_issue_gets_a_fresh_id() {
        let invoicing = InMemoryInvoicing::new();
        let order = test_order();

        let first = invoicing.issue(&order, dec!(10)).unwrap();
        let second = invoicing.issue(&order, dec!(10)).unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(invoicing.issued().len(), 2);
    }
}
