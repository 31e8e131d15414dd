use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use flexorder_core::{InvoiceId, OrderId};
use flexorder_events::Event;
use flexorder_sales::{AdjustmentKind, DeclineReason, PaymentMethod, ShippingStrategy};

/// Where a checkout stands. Transitions only move forward:
/// `Start -> Priced -> Shipped -> Authorized -> Completed | Aborted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStage {
    Start,
    Priced,
    Shipped,
    Authorized,
    Completed,
    Aborted,
}

impl CheckoutStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, CheckoutStage::Completed | CheckoutStage::Aborted)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CheckoutStage::Start => "start",
            CheckoutStage::Priced => "priced",
            CheckoutStage::Shipped => "shipped",
            CheckoutStage::Authorized => "authorized",
            CheckoutStage::Completed => "completed",
            CheckoutStage::Aborted => "aborted",
        }
    }
}

impl core::fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event: CheckoutStarted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutStarted {
    pub order_id: OrderId,
    pub base_value: Decimal,
    pub adjustments: Vec<AdjustmentKind>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OrderPriced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderPriced {
    pub order_id: OrderId,
    pub value_after_adjustments: Decimal,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ShippingCalculated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingCalculated {
    pub order_id: OrderId,
    pub shipping_strategy: ShippingStrategy,
    pub shipping_cost: Decimal,
    /// Non-zero only when the gift-wrap fee was charged outside the chain.
    pub gift_wrap_fee: Decimal,
    pub final_amount: Decimal,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PaymentApproved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentApproved {
    pub order_id: OrderId,
    pub payment_method: PaymentMethod,
    pub amount: Decimal,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PaymentDeclined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentDeclined {
    pub order_id: OrderId,
    pub payment_method: PaymentMethod,
    pub amount: Decimal,
    pub reason: DeclineReason,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OrderRegistered (inventory accepted the order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRegistered {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: InvoiceIssued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceIssued {
    pub order_id: OrderId,
    pub invoice_id: InvoiceId,
    pub amount: Decimal,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CheckoutCompleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutCompleted {
    pub order_id: OrderId,
    pub final_amount: Decimal,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CheckoutAborted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutAborted {
    pub order_id: OrderId,
    pub final_amount: Decimal,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckoutEvent {
    CheckoutStarted(CheckoutStarted),
    OrderPriced(OrderPriced),
    ShippingCalculated(ShippingCalculated),
    PaymentApproved(PaymentApproved),
    PaymentDeclined(PaymentDeclined),
    OrderRegistered(OrderRegistered),
    InvoiceIssued(InvoiceIssued),
    CheckoutCompleted(CheckoutCompleted),
    CheckoutAborted(CheckoutAborted),
}

impl CheckoutEvent {
    pub fn order_id(&self) -> OrderId {
        match self {
            CheckoutEvent::CheckoutStarted(e) => e.order_id,
            CheckoutEvent::OrderPriced(e) => e.order_id,
            CheckoutEvent::ShippingCalculated(e) => e.order_id,
            CheckoutEvent::PaymentApproved(e) => e.order_id,
            CheckoutEvent::PaymentDeclined(e) => e.order_id,
            CheckoutEvent::OrderRegistered(e) => e.order_id,
            CheckoutEvent::InvoiceIssued(e) => e.order_id,
            CheckoutEvent::CheckoutCompleted(e) => e.order_id,
            CheckoutEvent::CheckoutAborted(e) => e.order_id,
        }
    }

    /// The stage the checkout is in once this event has happened.
    pub fn stage(&self) -> CheckoutStage {
        match self {
            CheckoutEvent::CheckoutStarted(_) => CheckoutStage::Start,
            CheckoutEvent::OrderPriced(_) => CheckoutStage::Priced,
            CheckoutEvent::ShippingCalculated(_) => CheckoutStage::Shipped,
            CheckoutEvent::PaymentApproved(_)
            | CheckoutEvent::PaymentDeclined(_)
            | CheckoutEvent::OrderRegistered(_)
            | CheckoutEvent::InvoiceIssued(_) => CheckoutStage::Authorized,
            CheckoutEvent::CheckoutCompleted(_) => CheckoutStage::Completed,
            CheckoutEvent::CheckoutAborted(_) => CheckoutStage::Aborted,
        }
    }
}

impl Event for CheckoutEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CheckoutEvent::CheckoutStarted(_) => "checkout.started",
            CheckoutEvent::OrderPriced(_) => "checkout.priced",
            CheckoutEvent::ShippingCalculated(_) => "checkout.shipping_calculated",
            CheckoutEvent::PaymentApproved(_) => "checkout.payment.approved",
            CheckoutEvent::PaymentDeclined(_) => "checkout.payment.declined",
            CheckoutEvent::OrderRegistered(_) => "checkout.inventory.registered",
            CheckoutEvent::InvoiceIssued(_) => "checkout.invoice.issued",
            CheckoutEvent::CheckoutCompleted(_) => "checkout.completed",
            CheckoutEvent::CheckoutAborted(_) => "checkout.aborted",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CheckoutEvent::CheckoutStarted(e) => e.occurred_at,
            CheckoutEvent::OrderPriced(e) => e.occurred_at,
            CheckoutEvent::ShippingCalculated(e) => e.occurred_at,
            CheckoutEvent::PaymentApproved(e) => e.occurred_at,
            CheckoutEvent::PaymentDeclined(e) => e.occurred_at,
            CheckoutEvent::OrderRegistered(e) => e.occurred_at,
            CheckoutEvent::InvoiceIssued(e) => e.occurred_at,
            CheckoutEvent::CheckoutCompleted(e) => e.occurred_at,
            CheckoutEvent::CheckoutAborted(e) => e.occurred_at,
        }
    }

    fn is_adverse(&self) -> bool {
        matches!(
            self,
            CheckoutEvent::PaymentDeclined(_) | CheckoutEvent::CheckoutAborted(_)
        )
    }
}
