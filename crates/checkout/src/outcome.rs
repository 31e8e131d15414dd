use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use flexorder_core::{DomainError, DomainResult, OrderId};
use flexorder_invoicing::Invoice;
use flexorder_sales::{
    AdjustmentKind, DeclineReason, GIFT_WRAP_FEE, PaymentMethod, PriceComponent,
    ShippingStrategy,
};

use crate::event::CheckoutStage;

/// Price breakdown of one checkout, from base value to the amount charged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub order_id: OrderId,
    pub adjustments: Vec<AdjustmentKind>,
    pub base_value: Decimal,
    pub value_after_adjustments: Decimal,
    pub shipping_strategy: ShippingStrategy,
    pub shipping_cost: Decimal,
    /// Gift-wrap fee charged after shipping for a bare order that asks for
    /// gift wrap. Zero for every adjustment chain.
    pub gift_wrap_fee: Decimal,
    pub final_amount: Decimal,
    pub payment_method: PaymentMethod,
}

impl Quote {
    /// Price `chain` without authorizing anything.
    ///
    /// The fee fallback only applies to a bare order. Once any adjustment
    /// node wraps the order, gift wrap is the chain's business alone.
    pub fn compute<C: PriceComponent + ?Sized>(chain: &C) -> DomainResult<Self> {
        let order = chain.order();
        let value_after_adjustments = chain.evaluate()?;

        let shipping_strategy = chain.shipping_strategy();
        let shipping_cost = shipping_strategy.calculate(value_after_adjustments);

        let gift_wrap_fee = if chain.is_raw() && chain.gift_wrap() {
            GIFT_WRAP_FEE
        } else {
            Decimal::ZERO
        };

        let final_amount = value_after_adjustments
            .checked_add(shipping_cost)
            .and_then(|amount| amount.checked_add(gift_wrap_fee))
            .ok_or_else(|| {
                DomainError::invariant(format!(
                    "final amount overflowed the decimal range ({value_after_adjustments} + {shipping_cost} + {gift_wrap_fee})"
                ))
            })?;

        Ok(Self {
            order_id: order.id_typed(),
            adjustments: chain.adjustments(),
            base_value: order.base_value(),
            value_after_adjustments,
            shipping_strategy,
            shipping_cost,
            gift_wrap_fee,
            final_amount,
            payment_method: chain.payment_method(),
        })
    }

    /// Final amount rounded to cents, for display.
    pub fn final_amount_rounded(&self) -> Decimal {
        self.final_amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// A completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub quote: Quote,
    pub invoice: Invoice,
}

/// A checkout stopped by a payment decline. Nothing was registered or
/// invoiced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declined {
    pub quote: Quote,
    pub reason: DeclineReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckoutOutcome {
    Completed(Receipt),
    Aborted(Declined),
}

impl CheckoutOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, CheckoutOutcome::Completed(_))
    }

    pub fn stage(&self) -> CheckoutStage {
        match self {
            CheckoutOutcome::Completed(_) => CheckoutStage::Completed,
            CheckoutOutcome::Aborted(_) => CheckoutStage::Aborted,
        }
    }

    pub fn quote(&self) -> &Quote {
        match self {
            CheckoutOutcome::Completed(receipt) => &receipt.quote,
            CheckoutOutcome::Aborted(declined) => &declined.quote,
        }
    }

    pub fn final_amount(&self) -> Decimal {
        self.quote().final_amount
    }

    pub fn invoice(&self) -> Option<&Invoice> {
        match self {
            CheckoutOutcome::Completed(receipt) => Some(&receipt.invoice),
            CheckoutOutcome::Aborted(_) => None,
        }
    }
}
